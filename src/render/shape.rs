use super::Frame;
use crate::model::{ShapeAttrs, ShapeType};

pub(super) fn render(svg: &mut String, attrs: &ShapeAttrs, frame: Frame) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }

    let glow_id = format!("glow-{}", frame.id);
    let wants_glow = matches!(attrs.shape_type, ShapeType::Triangle);
    if wants_glow {
        svg.push_str(&format!(
            "<defs><filter id=\"{glow_id}\" x=\"-30%\" y=\"-30%\" width=\"160%\" height=\"160%\"><feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"3\" flood-color=\"{}\" flood-opacity=\"0.5\"/></filter></defs>",
            attrs.stroke_color
        ));
    }

    let style = format!(
        "fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"",
        attrs.fill_color, attrs.stroke_color, attrs.stroke_width
    );
    let opacity = if attrs.opacity < 1.0 {
        format!(" opacity=\"{:.2}\"", attrs.opacity.clamp(0.0, 1.0))
    } else {
        String::new()
    };
    let glow = if wants_glow {
        format!(" filter=\"url(#{glow_id})\"")
    } else {
        String::new()
    };

    match attrs.shape_type {
        ShapeType::Rectangle => {
            svg.push_str(&format!(
                "<rect width=\"{:.2}\" height=\"{:.2}\" rx=\"8\" {style}{opacity}{glow}/>",
                frame.width, frame.height
            ));
        }
        ShapeType::Square => {
            let side = frame.width.min(frame.height);
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{side:.2}\" height=\"{side:.2}\" rx=\"8\" {style}{opacity}{glow}/>",
                (frame.width - side) / 2.0,
                (frame.height - side) / 2.0
            ));
        }
        ShapeType::Circle => {
            svg.push_str(&format!(
                "<ellipse cx=\"{:.2}\" cy=\"{:.2}\" rx=\"{:.2}\" ry=\"{:.2}\" {style}{opacity}{glow}/>",
                frame.width / 2.0,
                frame.height / 2.0,
                frame.width / 2.0,
                frame.height / 2.0
            ));
        }
        ShapeType::Triangle => {
            svg.push_str(&format!(
                "<path d=\"M {:.2} 0 L {:.2} {:.2} L 0 {:.2} Z\" {style}{opacity}{glow}/>",
                frame.width / 2.0,
                frame.width,
                frame.height,
                frame.height
            ));
        }
        ShapeType::Divider => {
            let bar = attrs.stroke_width.max(1.0).min(frame.height);
            svg.push_str(&format!(
                "<rect y=\"{:.2}\" width=\"{:.2}\" height=\"{bar:.2}\" rx=\"{:.2}\" fill=\"{}\"{opacity}/>",
                (frame.height - bar) / 2.0,
                frame.width,
                bar / 2.0,
                attrs.stroke_color
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            id: 1,
            width: 120.0,
            height: 80.0,
        }
    }

    #[test]
    fn circle_uses_half_extents() {
        let mut svg = String::new();
        let attrs = ShapeAttrs {
            shape_type: ShapeType::Circle,
            ..Default::default()
        };
        render(&mut svg, &attrs, frame());
        assert!(svg.contains("rx=\"60.00\" ry=\"40.00\""));
    }

    #[test]
    fn square_is_centered_on_the_long_axis() {
        let mut svg = String::new();
        let attrs = ShapeAttrs {
            shape_type: ShapeType::Square,
            ..Default::default()
        };
        render(&mut svg, &attrs, frame());
        assert!(svg.contains("x=\"20.00\" y=\"0.00\" width=\"80.00\" height=\"80.00\""));
    }

    #[test]
    fn zero_area_frame_emits_nothing() {
        for shape_type in [
            ShapeType::Rectangle,
            ShapeType::Square,
            ShapeType::Circle,
            ShapeType::Triangle,
            ShapeType::Divider,
        ] {
            let attrs = ShapeAttrs {
                shape_type,
                ..Default::default()
            };
            for (width, height) in [(0.0, 80.0), (120.0, 0.0), (0.0, 0.0)] {
                let mut svg = String::new();
                render(&mut svg, &attrs, Frame { id: 1, width, height });
                assert!(svg.is_empty());
            }
        }
    }

    #[test]
    fn only_the_triangle_gets_a_glow_filter() {
        let mut svg = String::new();
        let attrs = ShapeAttrs {
            shape_type: ShapeType::Triangle,
            ..Default::default()
        };
        render(&mut svg, &attrs, frame());
        assert!(svg.contains("filter=\"url(#glow-1)\""));
        assert!(svg.contains(&format!("flood-color=\"{}\"", attrs.stroke_color)));

        let mut svg = String::new();
        render(&mut svg, &ShapeAttrs::default(), frame());
        assert!(!svg.contains("filter"));
    }

    #[test]
    fn divider_ignores_glow_and_stroke() {
        let mut svg = String::new();
        let attrs = ShapeAttrs {
            shape_type: ShapeType::Divider,
            stroke_width: 4.0,
            ..Default::default()
        };
        render(&mut svg, &attrs, frame());
        assert!(!svg.contains("filter"));
        assert!(svg.contains("height=\"4.00\""));
        // The bar takes the stroke color, not the fill.
        assert!(svg.contains(&format!("fill=\"{}\"", attrs.stroke_color)));
        assert!(!svg.contains(&attrs.fill_color));
    }
}

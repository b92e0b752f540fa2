use super::{Frame, escape_xml};
use crate::config::Config;
use crate::model::{TextAlign, TextAttrs};
use crate::text_metrics::wrap_text;

pub(super) fn render(svg: &mut String, attrs: &TextAttrs, frame: Frame, config: &Config) {
    if frame.width <= 0.0 || frame.height <= 0.0 || attrs.content.is_empty() {
        return;
    }

    let lines = wrap_text(&attrs.content, frame.width, attrs.font_size, &attrs.font_family);
    if lines.is_empty() {
        return;
    }

    let line_height = attrs.font_size * config.editor.line_height;
    let total = lines.len() as f32 * line_height;
    // First baseline sits roughly 0.8em below the line top.
    let mut y = (frame.height - total).max(0.0) / 2.0 + attrs.font_size * 0.8;

    let (x, anchor) = match attrs.text_align {
        TextAlign::Left => (0.0, "start"),
        TextAlign::Center => (frame.width / 2.0, "middle"),
        TextAlign::Right => (frame.width, "end"),
    };

    for line in &lines {
        svg.push_str(&format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{anchor}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" fill=\"{}\">{}</text>",
            escape_xml(&attrs.font_family),
            attrs.font_size,
            attrs.font_weight,
            attrs.color,
            escape_xml(line)
        ));
        y += line_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            id: 1,
            width: 200.0,
            height: 50.0,
        }
    }

    #[test]
    fn aligns_per_attribute() {
        for (align, anchor) in [
            (TextAlign::Left, "start"),
            (TextAlign::Center, "middle"),
            (TextAlign::Right, "end"),
        ] {
            let mut svg = String::new();
            let attrs = TextAttrs {
                text_align: align,
                ..Default::default()
            };
            render(&mut svg, &attrs, frame(), &Config::default());
            assert!(svg.contains(&format!("text-anchor=\"{anchor}\"")));
        }
    }

    #[test]
    fn long_content_wraps_to_multiple_lines() {
        let mut svg = String::new();
        let attrs = TextAttrs {
            content: "a reasonably long sentence that cannot stay on one line".to_string(),
            ..Default::default()
        };
        render(
            &mut svg,
            &attrs,
            Frame {
                id: 1,
                width: 90.0,
                height: 120.0,
            },
            &Config::default(),
        );
        assert!(svg.matches("<text").count() > 1);
    }

    #[test]
    fn markup_in_content_is_escaped() {
        let mut svg = String::new();
        let attrs = TextAttrs {
            content: "<b>bold</b> & more".to_string(),
            ..Default::default()
        };
        render(&mut svg, &attrs, frame(), &Config::default());
        assert!(svg.contains("&lt;b&gt;"));
        assert!(svg.contains("&amp; more"));
        assert!(!svg.contains("<b>"));
    }
}

use super::{Frame, escape_xml, placeholder};
use crate::model::{BorderStyle, ImageAttrs};
use crate::theme::Theme;

pub(super) fn render(svg: &mut String, attrs: &ImageAttrs, frame: Frame, theme: &Theme) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    if attrs.src.is_empty() {
        placeholder(svg, frame, theme, "No image");
        return;
    }

    let rx = attrs.border_radius.max(0.0);
    let clip_id = format!("img-clip-{}", frame.id);
    svg.push_str(&format!(
        "<clipPath id=\"{clip_id}\"><rect width=\"{:.2}\" height=\"{:.2}\" rx=\"{rx:.2}\"/></clipPath>",
        frame.width, frame.height
    ));
    let opacity = if attrs.opacity < 1.0 {
        format!(" opacity=\"{:.2}\"", attrs.opacity.clamp(0.0, 1.0))
    } else {
        String::new()
    };
    svg.push_str(&format!(
        "<image href=\"{}\" width=\"{:.2}\" height=\"{:.2}\" preserveAspectRatio=\"xMidYMid slice\" clip-path=\"url(#{clip_id})\"{opacity}/>",
        escape_xml(&attrs.src),
        frame.width,
        frame.height
    ));

    if attrs.border_style != BorderStyle::None && attrs.border_width > 0.0 {
        let dash = match attrs.border_style {
            BorderStyle::Dashed => " stroke-dasharray=\"6 4\"",
            BorderStyle::Dotted => " stroke-dasharray=\"2 3\"",
            _ => "",
        };
        svg.push_str(&format!(
            "<rect width=\"{:.2}\" height=\"{:.2}\" rx=\"{rx:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"{dash}/>",
            frame.width, frame.height, attrs.border_color, attrs.border_width
        ));
    }
}

//! Small decorative elements: trophy, badge, stats card, icon glyph and
//! the social handle pill.

use super::{Frame, escape_xml};
use crate::model::{BadgeAttrs, IconAttrs, SocialBadgeAttrs, StatsCardAttrs, TrophyAttrs};
use crate::theme::Theme;

/// Trophy artwork drawn in a fixed 100x120 box and scaled to fit.
pub(super) fn render_trophy(svg: &mut String, attrs: &TrophyAttrs, frame: Frame) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    let scale = (frame.width / 100.0).min(frame.height / 120.0);
    let tx = (frame.width - 100.0 * scale) / 2.0;
    let ty = (frame.height - 120.0 * scale) / 2.0;
    let color = &attrs.trophy_color;

    svg.push_str(&format!(
        "<g transform=\"translate({tx:.2} {ty:.2}) scale({scale:.4})\">"
    ));
    // Handles first so the cup overlaps their joins.
    svg.push_str(&format!(
        "<path d=\"M 30 26 H 16 A 6 6 0 0 0 10 32 V 36 A 18 18 0 0 0 32 52\" fill=\"none\" stroke=\"{color}\" stroke-width=\"6\"/>"
    ));
    svg.push_str(&format!(
        "<path d=\"M 70 26 H 84 A 6 6 0 0 1 90 32 V 36 A 18 18 0 0 1 68 52\" fill=\"none\" stroke=\"{color}\" stroke-width=\"6\"/>"
    ));
    // Cup bowl.
    svg.push_str(&format!(
        "<path d=\"M 28 16 H 72 V 44 A 22 22 0 0 1 28 44 Z\" fill=\"{color}\"/>"
    ));
    // Stem and base.
    svg.push_str(&format!("<rect x=\"45\" y=\"64\" width=\"10\" height=\"16\" fill=\"{color}\"/>"));
    svg.push_str(&format!(
        "<rect x=\"32\" y=\"80\" width=\"36\" height=\"10\" rx=\"2\" fill=\"{color}\"/>"
    ));
    svg.push_str(&format!(
        "<rect x=\"26\" y=\"92\" width=\"48\" height=\"14\" rx=\"3\" fill=\"{color}\"/>"
    ));
    svg.push_str("</g>");
}

pub(super) fn render_badge(svg: &mut String, attrs: &BadgeAttrs, frame: Frame, theme: &Theme) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    svg.push_str(&format!(
        "<rect width=\"{:.2}\" height=\"{:.2}\" rx=\"6\" fill=\"{}\"/>",
        frame.width, frame.height, attrs.badge_color
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" letter-spacing=\"0.5\" fill=\"{}\">{}</text>",
        frame.width / 2.0,
        frame.height / 2.0,
        theme.font_family,
        attrs.font_size,
        attrs.font_weight,
        attrs.badge_text_color,
        escape_xml(&attrs.badge_text.to_uppercase())
    ));
}

pub(super) fn render_stats_card(svg: &mut String, attrs: &StatsCardAttrs, frame: Frame, theme: &Theme) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    svg.push_str(&format!(
        "<rect width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
        frame.width,
        frame.height,
        attrs.border_radius,
        attrs.fill_color,
        attrs.stroke_color,
        attrs.stroke_width
    ));

    let cx = frame.width / 2.0;
    let cy = frame.height / 2.0;
    let icon_size = attrs.font_size * 0.75;
    let label_size = 12.0;
    svg.push_str(&format!(
        "<text x=\"{cx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{icon_size}\">{}</text>",
        cy - attrs.font_size,
        theme.font_family,
        escape_xml(&attrs.stat_icon)
    ));
    svg.push_str(&format!(
        "<text x=\"{cx:.2}\" y=\"{cy:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" font-weight=\"bold\" fill=\"{}\">{}</text>",
        theme.font_family,
        attrs.font_size,
        attrs.color,
        escape_xml(&attrs.stat_value)
    ));
    svg.push_str(&format!(
        "<text x=\"{cx:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{label_size}\" fill=\"{}\">{}</text>",
        cy + attrs.font_size * 0.8,
        theme.font_family,
        theme.no_data_color,
        escape_xml(&attrs.stat_label)
    ));
}

pub(super) fn render_icon(svg: &mut String, attrs: &IconAttrs, frame: Frame, theme: &Theme) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        frame.width / 2.0,
        frame.height / 2.0,
        theme.font_family,
        attrs.font_size,
        attrs.color,
        escape_xml(&attrs.content)
    ));
}

pub(super) fn render_social_badge(svg: &mut String, attrs: &SocialBadgeAttrs, frame: Frame, theme: &Theme) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    svg.push_str(&format!(
        "<rect width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"{}\"/>",
        frame.width,
        frame.height,
        frame.height / 2.0,
        attrs.badge_color
    ));
    let label = format!("{} @{}", attrs.platform, attrs.handle);
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        frame.width / 2.0,
        frame.height / 2.0,
        theme.font_family,
        attrs.font_size,
        attrs.text_color,
        escape_xml(&label)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            id: 5,
            width: 150.0,
            height: 60.0,
        }
    }

    #[test]
    fn badge_text_is_uppercased() {
        let mut svg = String::new();
        let attrs = BadgeAttrs {
            badge_text: "pro user".to_string(),
            ..Default::default()
        };
        render_badge(&mut svg, &attrs, frame(), &Theme::default());
        assert!(svg.contains(">PRO USER<"));
    }

    #[test]
    fn stats_card_stacks_icon_value_and_label() {
        let mut svg = String::new();
        render_stats_card(&mut svg, &StatsCardAttrs::default(), frame(), &Theme::default());
        assert!(svg.contains("1,234"));
        assert!(svg.contains("Total Commits"));
        assert_eq!(svg.matches("<text").count(), 3);
    }

    #[test]
    fn trophy_scales_to_the_shorter_axis() {
        let mut svg = String::new();
        render_trophy(&mut svg, &TrophyAttrs::default(), frame());
        // 60 / 120 = 0.5 beats 150 / 100 = 1.5.
        assert!(svg.contains("scale(0.5000)"));
        assert!(svg.contains("#FFD700"));
    }

    #[test]
    fn social_badge_shows_platform_and_handle() {
        let mut svg = String::new();
        render_social_badge(&mut svg, &SocialBadgeAttrs::default(), frame(), &Theme::default());
        assert!(svg.contains(">github @octocat<"));
    }
}

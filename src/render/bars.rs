use super::{Frame, escape_xml, placeholder};
use crate::config::Config;
use crate::model::{LanguageBarAttrs, ProgressBarAttrs};
use crate::text_metrics::text_width;
use crate::theme::Theme;

const TRACK_HEIGHT: f32 = 12.0;
const LANGUAGE_BAR_HEIGHT: f32 = 20.0;

pub(super) fn render_progress(svg: &mut String, attrs: &ProgressBarAttrs, frame: Frame, theme: &Theme) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    let value = attrs.progress_value.clamp(0.0, 100.0);

    svg.push_str(&format!(
        "<text y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        attrs.font_size,
        theme.font_family,
        attrs.font_size,
        attrs.color,
        escape_xml(&attrs.progress_label)
    ));
    let track_y = attrs.font_size + 6.0;
    let rx = attrs.border_radius.min(TRACK_HEIGHT / 2.0);
    svg.push_str(&format!(
        "<rect y=\"{track_y:.2}\" width=\"{:.2}\" height=\"{TRACK_HEIGHT}\" rx=\"{rx:.2}\" fill=\"{}\"/>",
        frame.width, attrs.progress_bg_color
    ));
    let fill_w = value / 100.0 * frame.width;
    if fill_w > 0.0 {
        svg.push_str(&format!(
            "<rect y=\"{track_y:.2}\" width=\"{fill_w:.2}\" height=\"{TRACK_HEIGHT}\" rx=\"{rx:.2}\" fill=\"{}\"/>",
            attrs.progress_color
        ));
    }

    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}%</text>",
        frame.width,
        track_y + TRACK_HEIGHT + attrs.font_size + 2.0,
        theme.font_family,
        attrs.font_size,
        attrs.color,
        value.round()
    ));
}

pub(super) fn render_languages(svg: &mut String, attrs: &LanguageBarAttrs, frame: Frame, config: &Config) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    if attrs.languages.is_empty() {
        placeholder(svg, frame, &config.theme, &config.chart.no_data_message);
        return;
    }

    // Percentages are drawn as-is, without renormalizing; a set that sums
    // past 100 simply clips at the bar's right edge.
    let clip_id = format!("langbar-{}", frame.id);
    svg.push_str(&format!(
        "<clipPath id=\"{clip_id}\"><rect width=\"{:.2}\" height=\"{LANGUAGE_BAR_HEIGHT}\" rx=\"8\"/></clipPath>",
        frame.width
    ));
    svg.push_str(&format!("<g clip-path=\"url(#{clip_id})\">"));
    let mut x = 0.0;
    for lang in &attrs.languages {
        let w = (lang.percentage.max(0.0) / 100.0 * frame.width).min(frame.width - x);
        if w <= 0.0 {
            continue;
        }
        svg.push_str(&format!(
            "<rect x=\"{x:.2}\" width=\"{w:.2}\" height=\"{LANGUAGE_BAR_HEIGHT}\" fill=\"{}\"/>",
            lang.color
        ));
        x += w;
    }
    svg.push_str("</g>");

    write_legend(svg, attrs, frame, config);
}

fn write_legend(svg: &mut String, attrs: &LanguageBarAttrs, frame: Frame, config: &Config) {
    let dot = 8.0;
    let gap = 12.0;
    let row_h = attrs.font_size + 6.0;
    let mut x = 0.0;
    let mut y = LANGUAGE_BAR_HEIGHT + 8.0;

    for lang in &attrs.languages {
        let label = format!("{} {:.0}%", lang.name, lang.percentage);
        let entry_w = dot + 4.0 + text_width(&label, attrs.font_size, &config.theme.font_family);
        if x > 0.0 && x + entry_w > frame.width {
            x = 0.0;
            y += row_h;
        }
        svg.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" fill=\"{}\"/>",
            x + dot / 2.0,
            y + attrs.font_size / 2.0,
            dot / 2.0,
            lang.color
        ));
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            x + dot + 4.0,
            y + attrs.font_size / 2.0,
            config.theme.font_family,
            attrs.font_size,
            attrs.color,
            escape_xml(&label)
        ));
        x += entry_w + gap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::LanguageStat;

    fn frame() -> Frame {
        Frame {
            id: 3,
            width: 200.0,
            height: 60.0,
        }
    }

    #[test]
    fn progress_fill_is_proportional() {
        let mut svg = String::new();
        let attrs = ProgressBarAttrs {
            progress_value: 25.0,
            ..Default::default()
        };
        render_progress(&mut svg, &attrs, frame(), &Theme::default());
        assert!(svg.contains("width=\"50.00\""));
        assert!(svg.contains(">25%<"));
    }

    #[test]
    fn zero_progress_omits_the_fill_rect() {
        let mut svg = String::new();
        let attrs = ProgressBarAttrs {
            progress_value: 0.0,
            ..Default::default()
        };
        render_progress(&mut svg, &attrs, frame(), &Theme::default());
        assert_eq!(
            svg.matches(&format!("fill=\"{}\"", attrs.progress_color)).count(),
            0
        );
        assert_eq!(
            svg.matches(&format!("fill=\"{}\"", attrs.progress_bg_color)).count(),
            1
        );
    }

    #[test]
    fn language_segments_use_raw_percentages() {
        let mut svg = String::new();
        let attrs = LanguageBarAttrs {
            languages: vec![
                LanguageStat::new("Rust", 40.0, "#dea584"),
                LanguageStat::new("Go", 20.0, "#00add8"),
            ],
            ..Default::default()
        };
        render_languages(&mut svg, &attrs, frame(), &Config::default());
        // 40% and 20% of 200px, not renormalized to fill the bar.
        assert!(svg.contains("x=\"0.00\" width=\"80.00\""));
        assert!(svg.contains("x=\"80.00\" width=\"40.00\""));
    }

    #[test]
    fn overflowing_percentages_clip_at_the_right_edge() {
        let mut svg = String::new();
        let attrs = LanguageBarAttrs {
            languages: vec![
                LanguageStat::new("A", 80.0, "#111111"),
                LanguageStat::new("B", 80.0, "#222222"),
            ],
            ..Default::default()
        };
        render_languages(&mut svg, &attrs, frame(), &Config::default());
        assert!(svg.contains("x=\"160.00\" width=\"40.00\""));
    }

    #[test]
    fn empty_language_list_shows_placeholder() {
        let mut svg = String::new();
        let attrs = LanguageBarAttrs {
            languages: Vec::new(),
            ..Default::default()
        };
        render_languages(&mut svg, &attrs, frame(), &Config::default());
        assert!(svg.contains("No data"));
    }
}

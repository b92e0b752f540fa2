//! Scene compositor: walks the element list in z-order and emits a single
//! SVG document. Editor mode adds selection and outline affordances on
//! top; export mode emits only card content.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;
use crate::model::ElementKind;
use crate::scene::Scene;
use crate::theme::Theme;

mod bars;
mod chart;
mod contribution;
mod image;
mod qr;
mod shape;
mod table;
mod text;
mod widgets;

pub use chart::pie_angles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Editor,
    Export,
}

/// Local box handed to each element renderer. The compositor has already
/// applied translate/rotate, so renderers draw from (0, 0).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame {
    pub id: u64,
    pub width: f32,
    pub height: f32,
}

pub fn render_scene(scene: &Scene, config: &Config, mode: RenderMode) -> String {
    let settings = &scene.settings;
    let width = settings.width.max(1.0);
    let height = settings.height.max(1.0);
    let theme = &config.theme;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    let transparent = mode == RenderMode::Export && config.export.transparent;
    write_card_surface(&mut svg, settings, transparent);

    for el in &scene.elements {
        let (cx, cy) = (el.width / 2.0, el.height / 2.0);
        svg.push_str(&format!(
            "<g transform=\"translate({:.2} {:.2}) rotate({:.2} {cx:.2} {cy:.2})\">",
            settings.padding + el.x,
            settings.padding + el.y,
            el.rotation,
        ));

        let pad = config.editor.element_padding.min(el.width / 2.0).min(el.height / 2.0);
        let frame = Frame {
            id: el.id,
            width: (el.width - 2.0 * pad).max(0.0),
            height: (el.height - 2.0 * pad).max(0.0),
        };
        svg.push_str(&format!("<g transform=\"translate({pad:.2} {pad:.2})\">"));
        write_element(&mut svg, &el.kind, frame, config);
        svg.push_str("</g>");

        if mode == RenderMode::Editor {
            if scene.selected == Some(el.id) {
                write_selection_chrome(&mut svg, el.width, el.height, config);
            } else {
                svg.push_str(&format!(
                    "<rect width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"4 3\"/>",
                    el.width, el.height, theme.outline_color
                ));
            }
        }

        svg.push_str("</g>");
    }

    if mode == RenderMode::Editor && scene.is_empty() {
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            width / 2.0,
            height / 2.0,
            theme.font_family,
            theme.font_size,
            theme.placeholder_color,
            escape_xml(&config.editor.placeholder_message)
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn write_element(svg: &mut String, kind: &ElementKind, frame: Frame, config: &Config) {
    let theme = &config.theme;
    match kind {
        ElementKind::Text(attrs) => text::render(svg, attrs, frame, config),
        ElementKind::Image(attrs) => image::render(svg, attrs, frame, theme),
        ElementKind::Shape(attrs) => shape::render(svg, attrs, frame),
        ElementKind::Trophy(attrs) => widgets::render_trophy(svg, attrs, frame),
        ElementKind::Badge(attrs) => widgets::render_badge(svg, attrs, frame, theme),
        ElementKind::Table(attrs) => table::render(svg, attrs, frame, config),
        ElementKind::StatsCard(attrs) => widgets::render_stats_card(svg, attrs, frame, theme),
        ElementKind::ProgressBar(attrs) => bars::render_progress(svg, attrs, frame, theme),
        ElementKind::LanguageBar(attrs) => bars::render_languages(svg, attrs, frame, config),
        ElementKind::ContributionGraph(attrs) => contribution::render(svg, attrs, frame, theme),
        ElementKind::Icon(attrs) => widgets::render_icon(svg, attrs, frame, theme),
        ElementKind::QrCode(attrs) => qr::render(svg, attrs, frame, config),
        ElementKind::Chart(attrs) => chart::render(svg, attrs, frame, config),
        ElementKind::SocialBadge(attrs) => widgets::render_social_badge(svg, attrs, frame, theme),
    }
}

fn write_card_surface(svg: &mut String, settings: &crate::model::CardSettings, transparent: bool) {
    let width = settings.width.max(1.0);
    let height = settings.height.max(1.0);
    let rx = settings.border_radius.max(0.0);

    if !transparent {
        if let Some(shadow) = parse_shadow(&settings.shadow) {
            svg.push_str(&format!(
                "<defs><filter id=\"card-shadow\" x=\"-20%\" y=\"-20%\" width=\"140%\" height=\"140%\"><feDropShadow dx=\"{:.2}\" dy=\"{:.2}\" stdDeviation=\"{:.2}\" flood-color=\"{}\"/></filter></defs>",
                shadow.dx, shadow.dy, shadow.blur / 2.0, shadow.color
            ));
        }
        let shadow_attr = if parse_shadow(&settings.shadow).is_some() {
            " filter=\"url(#card-shadow)\""
        } else {
            ""
        };

        let fill = if let Some(gradient) = parse_linear_gradient(&settings.background_color) {
            svg.push_str("<defs>");
            svg.push_str(&gradient.to_svg("card-bg"));
            svg.push_str("</defs>");
            "url(#card-bg)".to_string()
        } else {
            settings.background_color.clone()
        };
        svg.push_str(&format!(
            "<rect width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{rx:.2}\" fill=\"{}\"{shadow_attr}/>",
            escape_xml(&fill)
        ));

        if let Some(href) = settings.background_image.as_deref().filter(|s| !s.is_empty()) {
            svg.push_str(&format!(
                "<clipPath id=\"card-clip\"><rect width=\"{width:.2}\" height=\"{height:.2}\" rx=\"{rx:.2}\"/></clipPath>"
            ));
            svg.push_str(&format!(
                "<image href=\"{}\" width=\"{width:.2}\" height=\"{height:.2}\" preserveAspectRatio=\"xMidYMid slice\" clip-path=\"url(#card-clip)\"/>",
                escape_xml(href)
            ));
        }
    }

    if settings.border_width > 0.0 {
        let inset = settings.border_width / 2.0;
        svg.push_str(&format!(
            "<rect x=\"{inset:.2}\" y=\"{inset:.2}\" width=\"{:.2}\" height=\"{:.2}\" rx=\"{:.2}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\"/>",
            width - settings.border_width,
            height - settings.border_width,
            (rx - inset).max(0.0),
            settings.border_color,
            settings.border_width
        ));
    }
}

fn write_selection_chrome(svg: &mut String, width: f32, height: f32, config: &Config) {
    let theme = &config.theme;
    svg.push_str(&format!(
        "<rect width=\"{width:.2}\" height=\"{height:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
        theme.selection_fill, theme.selection_color
    ));

    let r = config.editor.handle_size / 2.0;
    for (hx, hy) in [(0.0, 0.0), (width, 0.0), (0.0, height), (width, height)] {
        svg.push_str(&format!(
            "<circle cx=\"{hx:.2}\" cy=\"{hy:.2}\" r=\"{r:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\"/>",
            theme.selection_color, theme.handle_border
        ));
    }

    let t = config.editor.edge_handle_thickness;
    let bar = 24.0_f32.min(width / 3.0).min(height / 3.0);
    let edges = [
        (width / 2.0 - bar / 2.0, -t / 2.0, bar, t),
        (width / 2.0 - bar / 2.0, height - t / 2.0, bar, t),
        (-t / 2.0, height / 2.0 - bar / 2.0, t, bar),
        (width - t / 2.0, height / 2.0 - bar / 2.0, t, bar),
    ];
    for (ex, ey, ew, eh) in edges {
        svg.push_str(&format!(
            "<rect x=\"{ex:.2}\" y=\"{ey:.2}\" width=\"{ew:.2}\" height=\"{eh:.2}\" rx=\"{:.2}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
            t / 2.0,
            theme.selection_color,
            theme.handle_border
        ));
    }
}

/// Dashed box with a centered message, shared by renderers that have
/// nothing meaningful to draw.
pub(crate) fn placeholder(svg: &mut String, frame: Frame, theme: &Theme, message: &str) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    svg.push_str(&format!(
        "<rect width=\"{:.2}\" height=\"{:.2}\" rx=\"4\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"5 4\"/>",
        frame.width, frame.height, theme.image_placeholder_fill, theme.image_placeholder_border
    ));
    svg.push_str(&format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"12\" fill=\"{}\">{}</text>",
        frame.width / 2.0,
        frame.height / 2.0,
        theme.font_family,
        theme.no_data_color,
        escape_xml(message)
    ));
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

struct CardShadow {
    dx: f32,
    dy: f32,
    blur: f32,
    color: String,
}

static SHADOW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(-?[\d.]+)(?:px)?\s+(-?[\d.]+)(?:px)?\s+(-?[\d.]+)(?:px)?(?:\s+-?[\d.]+(?:px)?)?\s+(rgba?\([^)]*\)|#[0-9a-fA-F]{3,8})",
    )
    .expect("shadow regex")
});

fn parse_shadow(value: &str) -> Option<CardShadow> {
    if value.trim().is_empty() || value.trim() == "none" {
        return None;
    }
    let caps = SHADOW_RE.captures(value)?;
    Some(CardShadow {
        dx: caps[1].parse().ok()?,
        dy: caps[2].parse().ok()?,
        blur: caps[3].parse().ok()?,
        color: caps[4].to_string(),
    })
}

struct LinearGradient {
    /// Unit direction in CSS convention, already converted to an SVG
    /// gradient line through the box center.
    line: (f32, f32, f32, f32),
    stops: Vec<(String, f32)>,
}

impl LinearGradient {
    fn to_svg(&self, id: &str) -> String {
        let (x1, y1, x2, y2) = self.line;
        let mut out = format!(
            "<linearGradient id=\"{id}\" x1=\"{x1:.4}\" y1=\"{y1:.4}\" x2=\"{x2:.4}\" y2=\"{y2:.4}\">"
        );
        for (color, offset) in &self.stops {
            out.push_str(&format!(
                "<stop offset=\"{:.1}%\" stop-color=\"{}\"/>",
                offset,
                escape_xml(color)
            ));
        }
        out.push_str("</linearGradient>");
        out
    }
}

static GRADIENT_STOP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(#[0-9a-fA-F]{3,8}|rgba?\([^)]*\))\s*([\d.]+%)?").expect("gradient stop regex")
});

static GRADIENT_ANGLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"linear-gradient\(\s*(-?[\d.]+)deg").expect("gradient angle regex"));

/// Parses the subset of CSS `linear-gradient(...)` the editor emits:
/// an optional `<angle>deg` followed by hex or rgb stops with optional
/// percentage offsets.
fn parse_linear_gradient(value: &str) -> Option<LinearGradient> {
    let value = value.trim();
    if !value.starts_with("linear-gradient(") {
        return None;
    }

    // CSS angles run clockwise from "to top"; 180deg is the default.
    let degrees: f32 = GRADIENT_ANGLE_RE
        .captures(value)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(180.0);
    let rad = degrees.to_radians();
    let (dx, dy) = (rad.sin(), -rad.cos());
    let line = (
        0.5 - dx / 2.0,
        0.5 - dy / 2.0,
        0.5 + dx / 2.0,
        0.5 + dy / 2.0,
    );

    let raw: Vec<(String, Option<f32>)> = GRADIENT_STOP_RE
        .captures_iter(value)
        .map(|c| {
            let offset = c
                .get(2)
                .and_then(|m| m.as_str().trim_end_matches('%').parse().ok());
            (c[1].to_string(), offset)
        })
        .collect();
    if raw.len() < 2 {
        return None;
    }

    let last = raw.len() - 1;
    let stops = raw
        .iter()
        .enumerate()
        .map(|(i, (color, offset))| {
            let offset = offset.unwrap_or_else(|| i as f32 / last as f32 * 100.0);
            (color.clone(), offset.clamp(0.0, 100.0))
        })
        .collect();

    Some(LinearGradient { line, stops })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CardSettings;

    fn editor_svg(scene: &Scene) -> String {
        render_scene(scene, &Config::default(), RenderMode::Editor)
    }

    #[test]
    fn empty_scene_shows_placeholder_in_editor_only() {
        let scene = Scene::default();
        let editor = editor_svg(&scene);
        assert!(editor.contains("Click a component"));

        let export = render_scene(&scene, &Config::default(), RenderMode::Export);
        assert!(!export.contains("Click a component"));
    }

    #[test]
    fn export_omits_selection_chrome() {
        let mut scene = Scene::default();
        let id = scene.add_shape();
        scene.select(Some(id));

        let editor = editor_svg(&scene);
        assert!(editor.contains("<circle"));

        let export = render_scene(&scene, &Config::default(), RenderMode::Export);
        assert!(!export.contains(&Config::default().theme.selection_fill));
    }

    #[test]
    fn transparent_export_has_no_background_rect() {
        let scene = Scene::default();
        let mut config = Config::default();
        config.export.transparent = true;
        let svg = render_scene(&scene, &config, RenderMode::Export);
        assert!(!svg.contains(&scene.settings.background_color));
        // Border still renders.
        assert!(svg.contains(&scene.settings.border_color));
    }

    #[test]
    fn gradient_background_emits_linear_gradient_def() {
        let mut scene = Scene::default();
        scene.settings.background_color =
            "linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_string();
        let svg = editor_svg(&scene);
        assert!(svg.contains("<linearGradient id=\"card-bg\""));
        assert!(svg.contains("url(#card-bg)"));
        assert!(svg.contains("stop-color=\"#667eea\""));
    }

    #[test]
    fn shadow_string_becomes_drop_shadow_filter() {
        let scene = Scene::default();
        let svg = editor_svg(&scene);
        assert!(svg.contains("feDropShadow"));

        let mut plain = Scene::default();
        plain.settings.shadow = "none".to_string();
        assert!(!editor_svg(&plain).contains("feDropShadow"));
    }

    #[test]
    fn elements_render_in_insertion_order() {
        let mut scene = Scene::default();
        let id = scene.add_shape();
        if let Some(el) = scene.element_mut(id)
            && let crate::model::ElementKind::Shape(attrs) = &mut el.kind
        {
            attrs.shape_type = crate::model::ShapeType::Circle;
        }
        scene.add_badge();
        let svg = render_scene(&scene, &Config::default(), RenderMode::Export);
        let shape_at = svg.find("<ellipse").expect("circle shape");
        let badge_at = svg.find("NEW").expect("badge text");
        assert!(shape_at < badge_at);
    }

    #[test]
    fn parses_default_card_shadow() {
        let settings = CardSettings::default();
        let shadow = parse_shadow(&settings.shadow).expect("default shadow parses");
        assert_eq!(shadow.dy, 4.0);
        assert_eq!(shadow.blur, 6.0);
        assert_eq!(shadow.color, "rgba(0, 0, 0, 0.1)");
    }

    #[test]
    fn gradient_without_offsets_distributes_evenly() {
        let g = parse_linear_gradient("linear-gradient(90deg, #111111, #222222, #333333)").unwrap();
        assert_eq!(g.stops.len(), 3);
        assert_eq!(g.stops[1].1, 50.0);
        // 90deg points right.
        assert!(g.line.0 < g.line.2);
        assert!((g.line.1 - g.line.3).abs() < 1e-4);
    }
}

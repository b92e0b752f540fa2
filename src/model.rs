use serde::{Deserialize, Serialize};

use crate::stats::{LanguageStat, StatBinding};

/// One placeable item on the card. Geometry is stored in absolute
/// content-box pixels; `rotation` is degrees around the element center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardElement {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl CardElement {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Closed variant set for every element type. The `type` tag plus
/// camelCase payload fields keep the serialized form compatible with the
/// editor's persisted JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ElementKind {
    Text(TextAttrs),
    Image(ImageAttrs),
    Shape(ShapeAttrs),
    Trophy(TrophyAttrs),
    Badge(BadgeAttrs),
    Table(TableAttrs),
    StatsCard(StatsCardAttrs),
    ProgressBar(ProgressBarAttrs),
    LanguageBar(LanguageBarAttrs),
    ContributionGraph(ContributionGraphAttrs),
    Icon(IconAttrs),
    QrCode(QrCodeAttrs),
    Chart(ChartAttrs),
    SocialBadge(SocialBadgeAttrs),
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text(_) => "text",
            ElementKind::Image(_) => "image",
            ElementKind::Shape(_) => "shape",
            ElementKind::Trophy(_) => "trophy",
            ElementKind::Badge(_) => "badge",
            ElementKind::Table(_) => "table",
            ElementKind::StatsCard(_) => "statsCard",
            ElementKind::ProgressBar(_) => "progressBar",
            ElementKind::LanguageBar(_) => "languageBar",
            ElementKind::ContributionGraph(_) => "contributionGraph",
            ElementKind::Icon(_) => "icon",
            ElementKind::QrCode(_) => "qrCode",
            ElementKind::Chart(_) => "chart",
            ElementKind::SocialBadge(_) => "socialBadge",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    #[default]
    Rectangle,
    Square,
    Circle,
    Triangle,
    Divider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    None,
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSource {
    #[default]
    Custom,
    GithubProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAttrs {
    pub content: String,
    pub font_size: f32,
    pub font_family: String,
    pub color: String,
    pub font_weight: String,
    pub text_align: TextAlign,
    pub github_stat: StatBinding,
}

impl Default for TextAttrs {
    fn default() -> Self {
        Self {
            content: "New Text".to_string(),
            font_size: 16.0,
            font_family: "Arial".to_string(),
            color: "#ffffff".to_string(),
            font_weight: "normal".to_string(),
            text_align: TextAlign::Left,
            github_stat: StatBinding::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttrs {
    pub src: String,
    pub opacity: f32,
    pub image_type: ImageSource,
    pub border_radius: f32,
    pub border_style: BorderStyle,
    pub border_width: f32,
    pub border_color: String,
}

impl Default for ImageAttrs {
    fn default() -> Self {
        Self {
            src: String::new(),
            opacity: 1.0,
            image_type: ImageSource::Custom,
            border_radius: 8.0,
            border_style: BorderStyle::None,
            border_width: 1.0,
            border_color: "#3b82f6".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeAttrs {
    pub shape_type: ShapeType,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f32,
    pub opacity: f32,
}

impl Default for ShapeAttrs {
    fn default() -> Self {
        Self {
            shape_type: ShapeType::Rectangle,
            fill_color: "#3b82f6".to_string(),
            stroke_color: "#1e40af".to_string(),
            stroke_width: 2.0,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrophyAttrs {
    pub trophy_type: String,
    pub trophy_color: String,
}

impl Default for TrophyAttrs {
    fn default() -> Self {
        Self {
            trophy_type: "gold".to_string(),
            trophy_color: "#FFD700".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeAttrs {
    pub badge_text: String,
    pub badge_color: String,
    pub badge_text_color: String,
    pub font_size: f32,
    pub font_weight: String,
}

impl Default for BadgeAttrs {
    fn default() -> Self {
        Self {
            badge_text: "NEW".to_string(),
            badge_color: "#3b82f6".to_string(),
            badge_text_color: "#ffffff".to_string(),
            font_size: 14.0,
            font_weight: "bold".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableAttrs {
    pub rows: usize,
    pub columns: usize,
    pub table_data: Vec<Vec<String>>,
    pub header_bg_color: String,
    pub cell_bg_color: String,
    pub color: String,
}

impl Default for TableAttrs {
    fn default() -> Self {
        Self {
            rows: 3,
            columns: 3,
            table_data: vec![
                vec!["Header 1".into(), "Header 2".into(), "Header 3".into()],
                vec!["Data 1".into(), "Data 2".into(), "Data 3".into()],
                vec!["Data 4".into(), "Data 5".into(), "Data 6".into()],
            ],
            header_bg_color: "#3b82f6".to_string(),
            cell_bg_color: "#27272a".to_string(),
            color: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsCardAttrs {
    pub stat_type: String,
    pub stat_value: String,
    pub stat_label: String,
    pub stat_icon: String,
    pub color: String,
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f32,
    pub font_size: f32,
    pub border_radius: f32,
}

impl Default for StatsCardAttrs {
    fn default() -> Self {
        Self {
            stat_type: "commits".to_string(),
            stat_value: "1,234".to_string(),
            stat_label: "Total Commits".to_string(),
            stat_icon: "\u{2605}".to_string(),
            color: "#ffffff".to_string(),
            fill_color: "#1e293b".to_string(),
            stroke_color: "#3b82f6".to_string(),
            stroke_width: 2.0,
            font_size: 32.0,
            border_radius: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBarAttrs {
    /// Stored already clamped to [0, 100]; `Scene::set_progress_value` is
    /// the write path.
    pub progress_value: f32,
    pub progress_color: String,
    pub progress_bg_color: String,
    pub progress_label: String,
    pub color: String,
    pub font_size: f32,
    pub border_radius: f32,
}

impl Default for ProgressBarAttrs {
    fn default() -> Self {
        Self {
            progress_value: 75.0,
            progress_color: "#22c55e".to_string(),
            progress_bg_color: "#374151".to_string(),
            progress_label: "Profile Completeness".to_string(),
            color: "#ffffff".to_string(),
            font_size: 14.0,
            border_radius: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageBarAttrs {
    pub languages: Vec<LanguageStat>,
    pub color: String,
    pub font_size: f32,
}

impl Default for LanguageBarAttrs {
    fn default() -> Self {
        Self {
            languages: vec![
                LanguageStat::new("JavaScript", 45.0, "#f7df1e"),
                LanguageStat::new("TypeScript", 30.0, "#3178c6"),
                LanguageStat::new("Python", 15.0, "#3776ab"),
                LanguageStat::new("CSS", 10.0, "#264de4"),
            ],
            color: "#ffffff".to_string(),
            font_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionGraphAttrs {
    pub contribution_data: Vec<Vec<u8>>,
    pub contribution_colors: Vec<String>,
    pub color: String,
    pub font_size: f32,
}

impl Default for ContributionGraphAttrs {
    fn default() -> Self {
        Self {
            contribution_data: sample_contribution_grid(),
            contribution_colors: default_contribution_palette(),
            color: "#ffffff".to_string(),
            font_size: 10.0,
        }
    }
}

pub fn default_contribution_palette() -> Vec<String> {
    vec![
        "#161b22".to_string(),
        "#0e4429".to_string(),
        "#006d32".to_string(),
        "#26a641".to_string(),
        "#39d353".to_string(),
    ]
}

/// Deterministic placeholder pattern shown until real contribution data is
/// bound.
pub fn sample_contribution_grid() -> Vec<Vec<u8>> {
    (0..52)
        .map(|week| (0..7).map(|day| ((week + day * 3) % 5) as u8).collect())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconAttrs {
    pub content: String,
    pub font_size: f32,
    pub color: String,
}

impl Default for IconAttrs {
    fn default() -> Self {
        Self {
            content: "\u{2B50}".to_string(),
            font_size: 48.0,
            color: "#FFD700".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeAttrs {
    pub data: String,
    pub foreground: String,
    pub background: String,
}

impl Default for QrCodeAttrs {
    fn default() -> Self {
        Self {
            data: "https://github.com".to_string(),
            foreground: "#000000".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDatum {
    pub label: String,
    pub value: f32,
    pub color: String,
}

impl ChartDatum {
    pub fn new(label: &str, value: f32, color: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartAttrs {
    pub chart_type: ChartType,
    pub chart_data: Vec<ChartDatum>,
    pub chart_title: String,
    pub color: String,
    pub font_size: f32,
}

impl Default for ChartAttrs {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Bar,
            chart_data: vec![
                ChartDatum::new("Commits", 120.0, "#3b82f6"),
                ChartDatum::new("PRs", 40.0, "#22c55e"),
                ChartDatum::new("Issues", 25.0, "#f97316"),
            ],
            chart_title: "Activity".to_string(),
            color: "#ffffff".to_string(),
            font_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialBadgeAttrs {
    pub platform: String,
    pub handle: String,
    pub badge_color: String,
    pub text_color: String,
    pub font_size: f32,
}

impl Default for SocialBadgeAttrs {
    fn default() -> Self {
        Self {
            platform: "github".to_string(),
            handle: "octocat".to_string(),
            badge_color: "#24292f".to_string(),
            text_color: "#ffffff".to_string(),
            font_size: 14.0,
        }
    }
}

/// Card-level container state. `background_color` accepts either a solid
/// color or a CSS `linear-gradient(...)` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSettings {
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub border_color: String,
    pub border_width: f32,
    pub border_radius: f32,
    pub padding: f32,
    pub shadow: String,
    pub width: f32,
    pub height: f32,
}

impl Default for CardSettings {
    fn default() -> Self {
        Self {
            background_color: "#1a1a2e".to_string(),
            background_image: None,
            border_color: "#3b82f6".to_string(),
            border_width: 2.0,
            border_radius: 12.0,
            padding: 16.0,
            shadow: "0 4px 6px rgba(0, 0, 0, 0.1)".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tag_matches_persisted_names() {
        let kind = ElementKind::StatsCard(StatsCardAttrs::default());
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "statsCard");
        assert_eq!(kind.name(), "statsCard");

        let kind = ElementKind::QrCode(QrCodeAttrs::default());
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "qrCode");
    }

    #[test]
    fn sample_contribution_grid_is_52_by_7() {
        let grid = sample_contribution_grid();
        assert_eq!(grid.len(), 52);
        assert!(grid.iter().all(|week| week.len() == 7));
        assert!(grid.iter().flatten().all(|level| *level <= 4));
    }

    #[test]
    fn image_source_serializes_kebab_case() {
        let json = serde_json::to_value(ImageSource::GithubProfile).unwrap();
        assert_eq!(json, "github-profile");
    }

    #[test]
    fn element_geometry_flattens_next_to_type_tag() {
        let el = CardElement {
            id: 7,
            x: 1.0,
            y: 2.0,
            width: 30.0,
            height: 40.0,
            rotation: 0.0,
            kind: ElementKind::Shape(ShapeAttrs::default()),
        };
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "shape");
        assert_eq!(json["id"], 7);
        assert_eq!(json["shapeType"], "rectangle");
    }
}

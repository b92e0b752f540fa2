use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::theme::Theme;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub element_padding: f32,
    pub handle_size: f32,
    pub edge_handle_thickness: f32,
    pub line_height: f32,
    pub placeholder_message: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            element_padding: 4.0,
            handle_size: 16.0,
            edge_handle_thickness: 10.0,
            line_height: 1.3,
            placeholder_message: "Click a component on the left to get started".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub pie_viewbox: f32,
    pub pie_center: (f32, f32),
    pub pie_radius: f32,
    pub legend_dot_size: f32,
    pub legend_spacing: f32,
    /// Fraction of the plot height a zero-value bar still occupies.
    pub min_bar_fraction: f32,
    pub bar_gap_fraction: f32,
    pub no_data_message: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            pie_viewbox: 100.0,
            pie_center: (50.0, 50.0),
            pie_radius: 40.0,
            legend_dot_size: 8.0,
            legend_spacing: 4.0,
            min_bar_fraction: 0.02,
            bar_gap_fraction: 0.4,
            no_data_message: "No data".to_string(),
        }
    }
}

/// Export quality/performance tradeoffs. `scale` multiplies the logical
/// card dimensions for raster output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub scale: f32,
    pub jpeg_quality: f32,
    pub transparent: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            jpeg_quality: 0.92,
            transparent: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub editor: EditorConfig,
    pub chart: ChartConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    placeholder_color: Option<String>,
    selection_color: Option<String>,
    outline_color: Option<String>,
    table_grid_color: Option<String>,
    contribution_fallback: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct EditorConfigFile {
    element_padding: Option<f32>,
    handle_size: Option<f32>,
    line_height: Option<f32>,
    placeholder_message: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ChartConfigFile {
    pie_radius: Option<f32>,
    legend_dot_size: Option<f32>,
    min_bar_fraction: Option<f32>,
    no_data_message: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ExportConfigFile {
    scale: Option<f32>,
    jpeg_quality: Option<f32>,
    transparent: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    editor: Option<EditorConfigFile>,
    chart: Option<ChartConfigFile>,
    export: Option<ExportConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "light" => config.theme = Theme::light(),
            "dark" | "default" => config.theme = Theme::editor_dark(),
            other => anyhow::bail!("unknown theme {other:?} (expected \"dark\" or \"light\")"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.placeholder_color {
            config.theme.placeholder_color = v;
        }
        if let Some(v) = vars.selection_color {
            config.theme.selection_color = v;
        }
        if let Some(v) = vars.outline_color {
            config.theme.outline_color = v;
        }
        if let Some(v) = vars.table_grid_color {
            config.theme.table_grid_color = v;
        }
        if let Some(v) = vars.contribution_fallback {
            config.theme.contribution_fallback = v;
        }
    }

    if let Some(editor) = parsed.editor {
        if let Some(v) = editor.element_padding {
            config.editor.element_padding = v;
        }
        if let Some(v) = editor.handle_size {
            config.editor.handle_size = v;
        }
        if let Some(v) = editor.line_height {
            config.editor.line_height = v;
        }
        if let Some(v) = editor.placeholder_message {
            config.editor.placeholder_message = v;
        }
    }

    if let Some(chart) = parsed.chart {
        if let Some(v) = chart.pie_radius {
            config.chart.pie_radius = v;
        }
        if let Some(v) = chart.legend_dot_size {
            config.chart.legend_dot_size = v;
        }
        if let Some(v) = chart.min_bar_fraction {
            config.chart.min_bar_fraction = v;
        }
        if let Some(v) = chart.no_data_message {
            config.chart.no_data_message = v;
        }
    }

    if let Some(export) = parsed.export {
        if let Some(v) = export.scale {
            if v <= 0.0 {
                anyhow::bail!("export scale must be positive, got {v}");
            }
            config.export.scale = v;
        }
        if let Some(v) = export.jpeg_quality {
            config.export.jpeg_quality = v.clamp(0.0, 1.0);
        }
        if let Some(v) = export.transparent {
            config.export.transparent = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let config = load_config(None).unwrap();
        assert_eq!(config.export.scale, 2.0);
        assert_eq!(config.chart.pie_radius, 40.0);
    }

    #[test]
    fn overrides_from_file() {
        let dir = std::env::temp_dir().join("ghcard-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            r##"{
                "theme": "light",
                "themeVariables": { "selectionColor": "#ff0000" },
                "export": { "scale": 3.0, "transparent": true }
            }"##,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.theme.selection_color, "#ff0000");
        assert_eq!(config.theme.table_grid_color, Theme::light().table_grid_color);
        assert_eq!(config.export.scale, 3.0);
        assert!(config.export.transparent);
    }

    #[test]
    fn rejects_nonpositive_scale() {
        let dir = std::env::temp_dir().join("ghcard-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad-scale.json");
        std::fs::write(&path, r#"{ "export": { "scale": 0.0 } }"#).unwrap();
        assert!(load_config(Some(&path)).is_err());
    }
}

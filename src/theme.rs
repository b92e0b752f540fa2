use serde::{Deserialize, Serialize};

/// Editor chrome and typography. Element colors live on the elements
/// themselves; the theme only covers what the card surface and the
/// editing affordances need.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub placeholder_color: String,
    pub selection_color: String,
    pub selection_fill: String,
    pub outline_color: String,
    pub handle_border: String,
    pub table_grid_color: String,
    pub no_data_color: String,
    pub image_placeholder_fill: String,
    pub image_placeholder_border: String,
    pub contribution_fallback: String,
}

impl Theme {
    pub fn editor_dark() -> Self {
        Self {
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_size: 14.0,
            text_color: "#ffffff".to_string(),
            placeholder_color: "#71717a".to_string(),
            selection_color: "#3b82f6".to_string(),
            selection_fill: "rgba(59, 130, 246, 0.05)".to_string(),
            outline_color: "rgba(255, 255, 255, 0.2)".to_string(),
            handle_border: "#ffffff".to_string(),
            table_grid_color: "#555555".to_string(),
            no_data_color: "#9ca3af".to_string(),
            image_placeholder_fill: "#27272a".to_string(),
            image_placeholder_border: "#52525b".to_string(),
            contribution_fallback: "#161b22".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            font_family: "Arial, Helvetica, sans-serif".to_string(),
            font_size: 14.0,
            text_color: "#1c2430".to_string(),
            placeholder_color: "#9ca3af".to_string(),
            selection_color: "#2563eb".to_string(),
            selection_fill: "rgba(37, 99, 235, 0.05)".to_string(),
            outline_color: "rgba(0, 0, 0, 0.15)".to_string(),
            handle_border: "#ffffff".to_string(),
            table_grid_color: "#d4d4d8".to_string(),
            no_data_color: "#6b7280".to_string(),
            image_placeholder_fill: "#f4f4f5".to_string(),
            image_placeholder_border: "#d4d4d8".to_string(),
            contribution_fallback: "#ebedf0".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::editor_dark()
    }
}

/// Parses `#rgb` / `#rrggbb` hex colors. Used when flattening transparency
/// for JPEG export.
pub fn parse_hex_rgb(value: &str) -> Option<[u8; 3]> {
    let hex = value.trim().strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, ch) in hex.chars().enumerate() {
                let v = ch.to_digit(16)? as u8;
                out[i] = v * 16 + v;
            }
            Some(out)
        }
        6 => {
            let mut out = [0u8; 3];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(out)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_rgb("#1a1a2e"), Some([26, 26, 46]));
        assert_eq!(parse_hex_rgb("#fff"), Some([255, 255, 255]));
        assert_eq!(parse_hex_rgb("not-a-color"), None);
        assert_eq!(parse_hex_rgb("#12345"), None);
    }
}

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::{Face, GlyphId};

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Measured width via system fonts, or `None` when no face resolves
/// (headless CI without fonts). Callers fall back to `estimate_width`.
pub fn measure_text_width(text: &str, font_size: f32, font_family: &str) -> Option<f32> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

pub fn text_width(text: &str, font_size: f32, font_family: &str) -> f32 {
    measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| estimate_width(text, font_size))
}

pub fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_width_factor).sum::<f32>() * font_size
}

fn char_width_factor(ch: char) -> f32 {
    match ch {
        ' ' => 0.32,
        'i' | 'l' | 'j' | 't' | 'f' | 'I' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => 0.30,
        'm' | 'w' | 'M' | 'W' | '@' => 0.85,
        'A'..='Z' => 0.68,
        '0'..='9' => 0.56,
        _ if ch.is_ascii() => 0.52,
        _ => 0.95,
    }
}

/// Greedy word wrap into lines no wider than `max_width`. Explicit
/// newlines are honored; a single overlong word is kept whole.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32, font_family: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() || text_width(&candidate, font_size, font_family) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    cache: HashMap<String, Option<LoadedFace>>,
}

struct LoadedFace {
    data: Vec<u8>,
    index: u32,
}

impl LoadedFace {
    fn measure_width(&self, text: &str, font_size: f32) -> Option<f32> {
        let face = Face::parse(&self.data, self.index).ok()?;
        let units_per_em = face.units_per_em() as f32;
        if units_per_em <= 0.0 {
            return None;
        }
        let mut units = 0.0f32;
        for ch in text.chars() {
            let glyph = face.glyph_index(ch).unwrap_or(GlyphId(0));
            units += face.glyph_hor_advance(glyph).unwrap_or(0) as f32;
        }
        Some(units / units_per_em * font_size)
    }
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            cache: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f32, font_family: &str) -> Option<f32> {
        let key = normalize_family_key(font_family);
        if !self.cache.contains_key(&key) {
            let face = self.load_face(font_family);
            self.cache.insert(key.clone(), face);
        }
        let face = self.cache.get(&key)?.as_ref()?;
        let normalized = text.replace('\t', "    ");
        face.measure_width(&normalized, font_size)
    }

    fn load_face(&mut self, font_family: &str) -> Option<LoadedFace> {
        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|part| !part.is_empty())
            .collect();
        let families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "sans-serif" => Family::SansSerif,
                "serif" => Family::Serif,
                "monospace" => Family::Monospace,
                "cursive" => Family::Cursive,
                _ => Family::Name(name.as_str()),
            })
            .chain(std::iter::once(Family::SansSerif))
            .collect();

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| LoadedFace {
                data: data.to_vec(),
                index,
            })
    }
}

fn normalize_family_key(font_family: &str) -> String {
    font_family.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_measures_zero() {
        assert_eq!(measure_text_width("", 16.0, "Arial"), Some(0.0));
        assert_eq!(text_width("", 16.0, "Arial"), 0.0);
    }

    #[test]
    fn estimate_scales_with_font_size() {
        let small = estimate_width("hello world", 10.0);
        let large = estimate_width("hello world", 20.0);
        assert!(large > small * 1.9 && large < small * 2.1);
    }

    #[test]
    fn wrap_respects_max_width() {
        let lines = wrap_text("alpha beta gamma delta", 60.0, 14.0, "Arial");
        assert!(lines.len() >= 2);
        for line in &lines {
            // A single word may exceed the limit; multi-word lines may not.
            if line.contains(' ') {
                assert!(text_width(line, 14.0, "Arial") <= 60.0);
            }
        }
    }

    #[test]
    fn wrap_keeps_explicit_newlines() {
        let lines = wrap_text("one\ntwo", 10_000.0, 14.0, "Arial");
        assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    }
}

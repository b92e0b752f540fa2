use qrcode::{EcLevel, QrCode};
use tracing::debug;

use super::{Frame, placeholder};
use crate::config::Config;
use crate::model::QrCodeAttrs;

/// Quiet-zone width in modules on each side.
const QUIET_ZONE: usize = 2;

pub(super) fn render(svg: &mut String, attrs: &QrCodeAttrs, frame: Frame, config: &Config) {
    if frame.width <= 0.0 || frame.height <= 0.0 {
        return;
    }
    let code = match QrCode::with_error_correction_level(attrs.data.as_bytes(), EcLevel::M) {
        Ok(code) => code,
        Err(err) => {
            debug!(%err, "qr encoding failed");
            placeholder(svg, frame, &config.theme, "Invalid QR data");
            return;
        }
    };

    let modules = code.width();
    let total = modules + 2 * QUIET_ZONE;
    let size = frame.width.min(frame.height);
    let module_px = size / total as f32;
    let ox = (frame.width - size) / 2.0;
    let oy = (frame.height - size) / 2.0;

    svg.push_str(&format!(
        "<rect x=\"{ox:.2}\" y=\"{oy:.2}\" width=\"{size:.2}\" height=\"{size:.2}\" fill=\"{}\"/>",
        attrs.background
    ));

    let colors = code.to_colors();
    for y in 0..modules {
        for x in 0..modules {
            if colors[y * modules + x] != qrcode::Color::Dark {
                continue;
            }
            let px = ox + (x + QUIET_ZONE) as f32 * module_px;
            let py = oy + (y + QUIET_ZONE) as f32 * module_px;
            svg.push_str(&format!(
                "<rect x=\"{px:.2}\" y=\"{py:.2}\" width=\"{module_px:.3}\" height=\"{module_px:.3}\" fill=\"{}\"/>",
                attrs.foreground
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame {
            id: 2,
            width: 120.0,
            height: 120.0,
        }
    }

    #[test]
    fn renders_background_and_dark_modules() {
        let mut svg = String::new();
        render(&mut svg, &QrCodeAttrs::default(), frame(), &Config::default());
        let attrs = QrCodeAttrs::default();
        assert!(svg.contains(&format!("fill=\"{}\"", attrs.background)));
        // A version-1+ code always has finder patterns, so plenty of
        // dark modules.
        assert!(svg.matches(&format!("fill=\"{}\"", attrs.foreground)).count() > 50);
    }

    #[test]
    fn oversized_payload_degrades_to_placeholder() {
        let mut svg = String::new();
        let attrs = QrCodeAttrs {
            data: "x".repeat(5000),
            ..Default::default()
        };
        render(&mut svg, &attrs, frame(), &Config::default());
        assert!(svg.contains("Invalid QR data"));
    }

    #[test]
    fn code_is_centered_in_a_wide_frame() {
        let mut svg = String::new();
        render(
            &mut svg,
            &QrCodeAttrs::default(),
            Frame {
                id: 2,
                width: 200.0,
                height: 100.0,
            },
            &Config::default(),
        );
        // Background square is 100px wide, offset 50px from the left.
        assert!(svg.contains("x=\"50.00\" y=\"0.00\" width=\"100.00\" height=\"100.00\""));
    }
}

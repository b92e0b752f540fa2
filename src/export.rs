//! Export pipeline: scene to SVG text, and (with the `raster` feature)
//! SVG to PNG or background-flattened JPEG at the configured scale.

use thiserror::Error;

use crate::config::Config;
use crate::render::{RenderMode, render_scene};
use crate::scene::Scene;

#[derive(Debug, Error)]
pub enum ExportError {
    #[cfg(feature = "raster")]
    #[error("svg parse failed: {0}")]
    Parse(#[from] usvg::Error),
    #[error("pixmap allocation failed for {0}x{1}")]
    Pixmap(u32, u32),
    #[error("png encoding failed: {0}")]
    PngEncode(String),
    #[cfg(feature = "raster")]
    #[error("jpeg encoding failed: {0}")]
    JpegEncode(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Svg => "image/svg+xml",
        }
    }
}

/// Renders the scene for export: no selection chrome, no outlines, no
/// empty-state placeholder.
pub fn export_svg(scene: &Scene, config: &Config) -> String {
    render_scene(scene, config, RenderMode::Export)
}

#[cfg(feature = "raster")]
fn rasterize(svg: &str, scene: &Scene, config: &Config) -> Result<resvg::tiny_skia::Pixmap, ExportError> {
    let scale = config.export.scale.max(0.1);
    let mut opt = usvg::Options::default();
    if let Some(family) = config.theme.font_family.split(',').next() {
        opt.font_family = family.trim().to_string();
    }
    opt.default_size = usvg::Size::from_wh(scene.settings.width, scene.settings.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let width = (tree.size().width() * scale).round().max(1.0) as u32;
    let height = (tree.size().height() * scale).round().max(1.0) as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or(ExportError::Pixmap(width, height))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    Ok(pixmap)
}

#[cfg(feature = "raster")]
pub fn export_png(scene: &Scene, config: &Config) -> Result<Vec<u8>, ExportError> {
    let svg = export_svg(scene, config);
    let pixmap = rasterize(&svg, scene, config)?;
    pixmap
        .encode_png()
        .map_err(|err| ExportError::PngEncode(err.to_string()))
}

/// JPEG has no alpha channel, so transparent pixels are flattened over
/// the card background (or white when the background is a gradient).
#[cfg(feature = "raster")]
pub fn export_jpeg(scene: &Scene, config: &Config) -> Result<Vec<u8>, ExportError> {
    let svg = export_svg(scene, config);
    let pixmap = rasterize(&svg, scene, config)?;
    let matte = crate::theme::parse_hex_rgb(&scene.settings.background_color)
        .unwrap_or([255, 255, 255]);

    let mut rgb = Vec::with_capacity(pixmap.pixels().len() * 3);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        let a = c.alpha() as f32 / 255.0;
        for (channel, bg) in [(c.red(), matte[0]), (c.green(), matte[1]), (c.blue(), matte[2])] {
            rgb.push((channel as f32 * a + bg as f32 * (1.0 - a)).round() as u8);
        }
    }

    let quality = (config.export.jpeg_quality.clamp(0.0, 1.0) * 100.0).round() as u8;
    let mut out = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality.max(1));
    encoder.encode(
        &rgb,
        pixmap.width(),
        pixmap.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    use base64::Engine as _;
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

pub fn export_filename(username: Option<&str>, format: ExportFormat) -> String {
    let stem = match username {
        Some(name) if !name.is_empty() => name,
        _ => "export",
    };
    format!("github-card-{stem}.{}", format.extension())
}

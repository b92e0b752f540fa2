use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::load_config;
use crate::export::{ExportFormat, export_filename, export_svg, to_data_url};
use crate::persist::{load_scene_or_default, scene_from_json};
use crate::render::{RenderMode, render_scene};
use crate::scene::Scene;
use crate::stats::{StatsBundle, apply_stats, extract_username};

#[derive(Parser, Debug)]
#[command(name = "ghcard", version, about = "GitHub profile card renderer")]
pub struct Args {
    /// Scene JSON file or '-' for stdin. Omit to render an empty card.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG, or a generated
    /// github-card-<username>.<ext> name for raster formats.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme variables and export settings)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// GitHub stats bundle JSON to bind into stat-aware elements
    #[arg(short = 's', long = "statsFile")]
    pub stats: Option<PathBuf>,

    /// GitHub username or profile URL, overrides the bundle's username
    #[arg(short = 'u', long = "username")]
    pub username: Option<String>,

    /// Export scale multiplier override
    #[arg(long = "scale")]
    pub scale: Option<f32>,

    /// Skip the card background so the export composes over other content
    #[arg(long = "transparent")]
    pub transparent: bool,

    /// Render with editing affordances (outlines, selection, handles)
    #[arg(long = "editor")]
    pub editor: bool,

    /// Print a base64 data URL to stdout instead of writing a file
    #[arg(long = "dataUrl")]
    pub data_url: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Jpeg,
}

impl From<OutputFormat> for ExportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Svg => ExportFormat::Svg,
            OutputFormat::Png => ExportFormat::Png,
            OutputFormat::Jpeg => ExportFormat::Jpeg,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(scale) = args.scale {
        anyhow::ensure!(scale > 0.0, "scale must be positive");
        config.export.scale = scale;
    }
    if args.transparent {
        config.export.transparent = true;
    }

    let mut scene = read_scene(args.input.as_deref())?;

    let username = bind_stats(&mut scene, &args)?;

    match args.output_format {
        OutputFormat::Svg => {
            let svg = if args.editor {
                render_scene(&scene, &config, RenderMode::Editor)
            } else {
                export_svg(&scene, &config)
            };
            if args.data_url {
                println!("{}", to_data_url(svg.as_bytes(), ExportFormat::Svg.mime()));
            } else {
                write_output(&svg.into_bytes(), args.output.as_deref(), None)?;
            }
        }
        OutputFormat::Png | OutputFormat::Jpeg => {
            let format = ExportFormat::from(args.output_format);
            let bytes = encode_raster(&scene, &config, format)?;
            if args.data_url {
                println!("{}", to_data_url(&bytes, format.mime()));
            } else {
                let fallback = PathBuf::from(export_filename(username.as_deref(), format));
                write_output(&bytes, args.output.as_deref(), Some(&fallback))?;
            }
        }
    }

    Ok(())
}

fn read_scene(input: Option<&Path>) -> Result<Scene> {
    match input {
        None => Ok(Scene::default()),
        Some(path) if path == Path::new("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(scene_from_json(&buf).unwrap_or_else(|err| {
                warn!(%err, "discarding unreadable scene from stdin, starting empty");
                Scene::default()
            }))
        }
        Some(path) => Ok(load_scene_or_default(path)),
    }
}

/// Loads the stats bundle when given and binds it into the scene. Returns
/// the effective username for filename generation.
fn bind_stats(scene: &mut Scene, args: &Args) -> Result<Option<String>> {
    let mut bundle: StatsBundle = match args.stats.as_deref() {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => StatsBundle::default(),
    };
    if let Some(raw) = args.username.as_deref() {
        bundle.username = Some(extract_username(raw).unwrap_or_else(|| raw.to_string()));
    }
    let username = bundle.username.clone();
    if bundle != StatsBundle::default() {
        apply_stats(scene, &bundle);
    }
    Ok(username)
}

#[cfg(feature = "raster")]
fn encode_raster(scene: &Scene, config: &crate::config::Config, format: ExportFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Png => crate::export::export_png(scene, config)?,
        ExportFormat::Jpeg => crate::export::export_jpeg(scene, config)?,
        ExportFormat::Svg => unreachable!("raster path only handles png/jpeg"),
    };
    Ok(bytes)
}

#[cfg(not(feature = "raster"))]
fn encode_raster(_: &Scene, _: &crate::config::Config, format: ExportFormat) -> Result<Vec<u8>> {
    Err(anyhow::anyhow!(
        "{} output requires a build with the 'raster' feature",
        format.extension()
    ))
}

fn write_output(bytes: &[u8], output: Option<&Path>, fallback: Option<&Path>) -> Result<()> {
    match output.or(fallback) {
        Some(path) => std::fs::write(path, bytes)?,
        None => print!("{}", String::from_utf8_lossy(bytes)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_argument_accepts_profile_urls() {
        let mut scene = Scene::default();
        let args = Args::parse_from([
            "ghcard",
            "--username",
            "https://github.com/octocat",
        ]);
        let username = bind_stats(&mut scene, &args).unwrap();
        assert_eq!(username.as_deref(), Some("octocat"));
    }

    #[test]
    fn format_maps_to_export_format() {
        assert_eq!(ExportFormat::from(OutputFormat::Jpeg), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::from(OutputFormat::Svg), ExportFormat::Svg);
    }
}

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod export;
pub mod geometry;
pub mod model;
pub mod persist;
pub mod render;
pub mod scene;
pub mod stats;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::Config;
pub use model::{CardElement, CardSettings, ElementKind};
pub use render::{RenderMode, render_scene};
pub use scene::Scene;

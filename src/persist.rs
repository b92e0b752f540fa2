use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::model::{CardElement, CardSettings};
use crate::scene::Scene;

/// Bumped when the persisted shape changes incompatibly.
pub const SCENE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("unsupported scene schema version {0} (expected {SCENE_SCHEMA_VERSION})")]
    UnsupportedVersion(u32),
    #[error("scene io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene json invalid: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneFile {
    #[serde(default = "default_version")]
    version: u32,
    settings: CardSettings,
    elements: Vec<CardElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected: Option<u64>,
}

fn default_version() -> u32 {
    // Pre-versioning saves carry no tag; treat them as version 1.
    SCENE_SCHEMA_VERSION
}

pub fn scene_to_json(scene: &Scene) -> Result<String, PersistError> {
    let file = SceneFile {
        version: SCENE_SCHEMA_VERSION,
        settings: scene.settings.clone(),
        elements: scene.elements.clone(),
        selected: scene.selected,
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

pub fn scene_from_json(json: &str) -> Result<Scene, PersistError> {
    let file: SceneFile = serde_json::from_str(json)?;
    if file.version > SCENE_SCHEMA_VERSION {
        return Err(PersistError::UnsupportedVersion(file.version));
    }
    let mut scene = Scene::new(file.settings);
    scene.elements = file.elements;
    scene.selected = file.selected;
    // Selection may reference an element removed by hand-edited JSON.
    if let Some(id) = scene.selected
        && scene.element(id).is_none()
    {
        scene.selected = None;
    }
    scene.reseed_ids();
    Ok(scene)
}

pub fn save_scene(path: &Path, scene: &Scene) -> Result<(), PersistError> {
    let json = scene_to_json(scene)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_scene(path: &Path) -> Result<Scene, PersistError> {
    let contents = std::fs::read_to_string(path)?;
    scene_from_json(&contents)
}

/// Editor-style load: a corrupt save is logged and replaced with the
/// default empty scene instead of taking the editor down.
pub fn load_scene_or_default(path: &Path) -> Scene {
    match load_scene(path) {
        Ok(scene) => scene,
        Err(err) => {
            warn!(path = %path.display(), %err, "discarding unreadable scene, starting empty");
            Scene::default()
        }
    }
}

use std::fs;
use std::path::Path;

use pr3_core::Scene;
use tracing::debug;

use crate::error::AssetError;

/// Load a JSON scene dump.
pub fn load_scene_json(path: &Path) -> Result<Scene, AssetError> {
    let content =
        fs::read_to_string(path).map_err(|e| AssetError::Io(path.to_path_buf(), e))?;
    let scene: Scene = serde_json::from_str(&content)
        .map_err(|e| AssetError::SceneParseFailed(path.to_path_buf(), e.to_string()))?;

    debug!(
        "Scene dump '{}': {} meshes, {} top-level nodes",
        path.display(),
        scene.meshes.len(),
        scene.nodes.len()
    );
    Ok(scene)
}

use std::path::Path;

use pr3_core::Scene;
use tracing::info;

use crate::error::AssetError;
use crate::gltf_loader::load_gltf;
use crate::scene_file::load_scene_json;

/// Scene file formats recognised by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFormat {
    /// Parsed scene dumped as JSON
    Json,
    /// glTF 2.0, text or binary
    Gltf,
}

impl SceneFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "gltf" | "glb" => Some(Self::Gltf),
            _ => None,
        }
    }
}

/// Load a scene file, failing on scenes without meshes.
pub fn load_scene(path: &Path) -> Result<Scene, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let format =
        SceneFormat::from_path(path).ok_or_else(|| AssetError::UnsupportedFormat(path.to_path_buf()))?;

    let scene = match format {
        SceneFormat::Json => load_scene_json(path)?,
        SceneFormat::Gltf => load_gltf(path)?,
    };

    if scene.is_empty() {
        return Err(AssetError::EmptyScene(path.to_path_buf()));
    }

    info!(
        "Loaded {:?} scene '{}' with {} meshes",
        format,
        path.display(),
        scene.meshes.len()
    );
    Ok(scene)
}

use std::path::PathBuf;

use pr3_core::Semantic;

/// Errors that can occur while loading a scene.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("scene not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load glTF file '{path}': {msg}", path = .0.display(), msg = .1)]
    GltfLoadFailed(PathBuf, String),

    #[error("failed to parse scene file '{path}': {msg}", path = .0.display(), msg = .1)]
    SceneParseFailed(PathBuf, String),

    #[error("I/O error loading '{path}': {msg}", path = .0.display(), msg = .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("unsupported scene format in '{}'", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("mesh '{mesh}' in '{}' uses {mode} primitives; only triangles are supported", .path.display())]
    UnsupportedPrimitive {
        path: PathBuf,
        mesh: String,
        mode: String,
    },

    #[error("mesh '{mesh}' in '{}' has no {semantic:?} attribute", .path.display())]
    MissingAttribute {
        path: PathBuf,
        mesh: String,
        semantic: Semantic,
    },

    #[error("scene '{}' contains no meshes", .0.display())]
    EmptyScene(PathBuf),
}

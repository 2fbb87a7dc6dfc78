use pr3_core::{GeometryError, Semantic};

/// Errors raised while turning scene input into geometry or rigs.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("missing scene element: {0}")]
    MissingElement(String),

    #[error("{semantic:?} source of mesh '{mesh}' has {len} floats, not a multiple of {components}")]
    RaggedSource {
        mesh: String,
        semantic: Semantic,
        len: usize,
        components: usize,
    },

    #[error("mesh '{mesh}' has {indices} corner indices, not a multiple of the {stride} inputs")]
    IncompleteCorner {
        mesh: String,
        indices: usize,
        stride: usize,
    },

    #[error("mesh '{mesh}' declares {declared} corners in its face sizes but has {corners}")]
    FaceSizeMismatch {
        mesh: String,
        declared: usize,
        corners: usize,
    },

    #[error("mesh '{mesh}' has {corners} corners, which do not form whole triangles")]
    PartialFace { mesh: String, corners: usize },

    #[error("face {face} of mesh '{mesh}' has {corners} corners; only triangles are supported")]
    UnsupportedArity {
        mesh: String,
        face: usize,
        corners: u32,
    },

    #[error("{semantic:?} index {index} out of range for {len} entries")]
    IndexOutOfRange {
        semantic: Semantic,
        index: u32,
        len: usize,
    },

    #[error("no scene node binds object '{0}'")]
    NoSceneNode(String),

    #[error("node '{node}' references mesh {mesh}, but the scene has {count} meshes")]
    DanglingMesh {
        node: String,
        mesh: usize,
        count: usize,
    },

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

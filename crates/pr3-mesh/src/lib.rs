//! PR3 Mesh - Turns parsed scenes into PR3 models and rigs
//!
//! Corner-indexed meshes are welded into vertex-indexed triangle lists by
//! [`AttributeIndexUnifier`], packaged with their node metadata by
//! [`GeometryAssembler`], and armature hierarchies are flattened into rigs by
//! [`SkeletonExtractor`].

mod assemble;
mod error;
mod skeleton;
mod source;
mod unify;

pub use assemble::GeometryAssembler;
pub use error::MeshError;
pub use skeleton::{SkeletonExtractor, DEFAULT_ARMATURE};
pub use source::{read_corners, read_vectors, Corner};
pub use unify::{unify, AttributeIndexUnifier, UnifiedMesh};

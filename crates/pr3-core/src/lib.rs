//! PR3 Core - Shared types for the PR3 converter
//!
//! This crate provides the data model every other stage works on:
//! - Parsed scene input (mesh sources and the node tree)
//! - Row-major transforms (backed by glam)
//! - Assembled geometry and the PR3 model
//! - Bones and rigs

pub mod error;
pub mod geometry;
pub mod rig;
pub mod scene;
pub mod types;

pub use error::GeometryError;
pub use geometry::{Geometry, Pr3Model};
pub use glam::Mat4;
pub use rig::{Bone, Rig};
pub use scene::{MeshSource, Scene, SceneNode, Semantic};
pub use types::Transform;

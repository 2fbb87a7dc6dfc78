//! PR3 Assets - Scene loading
//!
//! Turns files on disk into the parsed [`pr3_core::Scene`] the converter
//! works on. JSON scene dumps deserialize directly; glTF 2.0 files are read
//! with the `gltf` crate and mapped onto the same structure.

mod error;
mod gltf_loader;
mod loader;
mod scene_file;

pub use error::AssetError;
pub use gltf_loader::load_gltf;
pub use loader::{load_scene, SceneFormat};
pub use scene_file::load_scene_json;

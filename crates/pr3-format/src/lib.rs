//! PR3 Format - Binary containers for models and rigs
//!
//! Two container kinds are supported:
//! - Model containers (`PR3`): objects with geometry, in either the compact
//!   (half floats, varints) or the legacy (full width) encoding
//! - Rig containers (`PR3R`): flat bone lists with parent names
//!
//! Writers are strict state machines: they emit the header up front, accept
//! exactly the declared number of records, and refuse any further use after a
//! failed write. A container whose writer failed must be discarded.

mod binary;
mod error;
mod model;
mod record;
mod rig;
mod version;

pub use error::FormatError;
pub use model::{encode_model, read_model, write_model, ModelWriter, MODEL_MAGIC};
pub use rig::{
    encode_rig, read_rig, write_rig, RigWriter, FLAG_HAS_MESH, FLAG_HAS_PARENT, RIG_MAGIC,
    RIG_VERSION,
};
pub use version::ModelVersion;

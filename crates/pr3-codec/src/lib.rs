//! PR3 Codec - Compact numeric encodings
//!
//! Provides the two encodings used by the compact PR3 layout:
//! - [`half_float`]: IEEE 754 half precision for vector components
//! - [`varint`]: 7-bit continuation encoding for counts and indices

mod error;
pub mod half_float;
pub mod varint;

pub use error::CodecError;

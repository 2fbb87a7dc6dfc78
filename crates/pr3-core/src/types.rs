//! Core types used throughout the converter

use glam::Mat4;
use serde::{Deserialize, Serialize};

/// A 4x4 transform stored as 16 floats in row-major order.
///
/// This is the layout written to PR3 containers. Conversion from glam's
/// column-major [`Mat4`] transposes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transform {
    pub rows: [f32; 16],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        rows: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Create a transform from 16 row-major floats
    pub fn from_rows(rows: [f32; 16]) -> Self {
        Self { rows }
    }

    /// Create a transform from a glam matrix
    pub fn from_mat4(matrix: Mat4) -> Self {
        Self {
            rows: matrix.transpose().to_cols_array(),
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

//! Reading raw mesh sources into typed vectors and corners

use pr3_core::{MeshSource, Semantic};

use crate::error::MeshError;

/// One face corner: an index into each attribute source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Corner {
    pub position: u32,
    pub normal: u32,
    /// Absent when the mesh has no texture channel
    pub uv: Option<u32>,
}

impl Corner {
    pub fn new(position: u32, normal: u32, uv: Option<u32>) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// Split a flat float source into `N`-component vectors.
pub fn read_vectors<const N: usize>(
    mesh: &str,
    semantic: Semantic,
    data: &[f32],
) -> Result<Vec<[f32; N]>, MeshError> {
    if data.len() % N != 0 {
        return Err(MeshError::RaggedSource {
            mesh: mesh.to_string(),
            semantic,
            len: data.len(),
            components: N,
        });
    }

    Ok(data
        .chunks_exact(N)
        .map(|chunk| {
            let mut v = [0.0; N];
            v.copy_from_slice(chunk);
            v
        })
        .collect())
}

/// De-interleave the corner index stream of a mesh, checking that every
/// face is a triangle.
pub fn read_corners(mesh: &MeshSource) -> Result<Vec<Corner>, MeshError> {
    let missing = |what: &str| MeshError::MissingElement(format!("{what} input of mesh '{}'", mesh.name));

    let stride = mesh.stride();
    let position_slot = mesh.slot(Semantic::Position).ok_or_else(|| missing("POSITION"))?;
    let normal_slot = mesh.slot(Semantic::Normal).ok_or_else(|| missing("NORMAL"))?;
    let uv_slot = match (mesh.slot(Semantic::TexCoord), &mesh.tex_coords) {
        (Some(_), None) => {
            return Err(MeshError::MissingElement(format!(
                "TEXCOORD source of mesh '{}'",
                mesh.name
            )))
        }
        (slot, _) => slot,
    };

    if mesh.indices.len() % stride != 0 {
        return Err(MeshError::IncompleteCorner {
            mesh: mesh.name.clone(),
            indices: mesh.indices.len(),
            stride,
        });
    }

    let corners: Vec<Corner> = mesh
        .indices
        .chunks_exact(stride)
        .map(|c| Corner::new(c[position_slot], c[normal_slot], uv_slot.map(|s| c[s])))
        .collect();

    match &mesh.face_sizes {
        Some(sizes) => {
            if let Some((face, &size)) = sizes.iter().enumerate().find(|(_, n)| **n != 3) {
                return Err(MeshError::UnsupportedArity {
                    mesh: mesh.name.clone(),
                    face,
                    corners: size,
                });
            }
            let declared = sizes.len() * 3;
            if declared != corners.len() {
                return Err(MeshError::FaceSizeMismatch {
                    mesh: mesh.name.clone(),
                    declared,
                    corners: corners.len(),
                });
            }
        }
        None if corners.len() % 3 != 0 => {
            return Err(MeshError::PartialFace {
                mesh: mesh.name.clone(),
                corners: corners.len(),
            });
        }
        None => {}
    }

    Ok(corners)
}

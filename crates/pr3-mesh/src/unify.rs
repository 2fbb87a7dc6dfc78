//! Corner attribute unification
//!
//! Scene formats index position, normal and uv independently per corner.
//! Indexed rendering needs one index per vertex, so every distinct
//! `(position, normal, uv)` combination has to become its own vertex.
//!
//! Every source position starts out as one vertex. The first corner that
//! touches a position binds its normal/uv to it. A later corner with a
//! different binding walks that position's duplicate chain and either finds
//! a matching duplicate or appends a new one at the tail.

use pr3_core::Semantic;
use tracing::{debug, warn};

use crate::error::MeshError;
use crate::source::Corner;

/// The normal/uv pair a vertex is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    normal: u32,
    uv: Option<u32>,
}

impl Binding {
    /// Binding given to vertices no face ever referenced
    const UNUSED: Self = Self {
        normal: 0,
        uv: Some(0),
    };
}

/// Arena entry for one output vertex.
#[derive(Debug, Clone)]
struct AttributeVertex {
    index: u32,
    position: [f32; 3],
    binding: Option<Binding>,
    /// Next vertex sharing this position, if any
    duplicate: Option<u32>,
}

/// Vertex-indexed output of the unifier. All attribute arrays have the same
/// length; uvs carry a zero `z`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnifiedMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl UnifiedMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Incremental unifier for a single mesh.
pub struct AttributeIndexUnifier<'a> {
    normals: &'a [[f32; 3]],
    uvs: Option<&'a [[f32; 2]]>,
    source_positions: usize,
    vertices: Vec<AttributeVertex>,
    indices: Vec<u32>,
}

impl<'a> AttributeIndexUnifier<'a> {
    /// Create a unifier with one unbound vertex per source position.
    pub fn new(
        positions: &'a [[f32; 3]],
        normals: &'a [[f32; 3]],
        uvs: Option<&'a [[f32; 2]]>,
    ) -> Self {
        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, &position)| AttributeVertex {
                index: i as u32,
                position,
                binding: None,
                duplicate: None,
            })
            .collect();

        Self {
            normals,
            uvs,
            source_positions: positions.len(),
            vertices,
            indices: Vec::new(),
        }
    }

    /// Add one corner and return the output vertex it maps to.
    pub fn push_corner(&mut self, corner: Corner) -> Result<u32, MeshError> {
        let binding = self.validate(corner)?;
        let index = self.resolve(corner.position as usize, binding);
        self.indices.push(index);
        Ok(index)
    }

    fn validate(&self, corner: Corner) -> Result<Binding, MeshError> {
        check_range(Semantic::Position, corner.position, self.source_positions)?;
        check_range(Semantic::Normal, corner.normal, self.normals.len())?;
        if let Some(uv) = corner.uv {
            check_range(Semantic::TexCoord, uv, self.uvs.map_or(0, <[_]>::len))?;
        }

        Ok(Binding {
            normal: corner.normal,
            uv: corner.uv,
        })
    }

    fn resolve(&mut self, position: usize, binding: Binding) -> u32 {
        let root = &mut self.vertices[position];
        if root.binding.is_none() {
            root.binding = Some(binding);
            return root.index;
        }

        let mut current = position;
        loop {
            let vertex = &self.vertices[current];
            if vertex.binding == Some(binding) {
                return vertex.index;
            }
            match vertex.duplicate {
                Some(next) => current = next as usize,
                None => break,
            }
        }

        let index = self.vertices.len() as u32;
        let position = self.vertices[position].position;
        self.vertices.push(AttributeVertex {
            index,
            position,
            binding: Some(binding),
            duplicate: None,
        });
        self.vertices[current].duplicate = Some(index);
        index
    }

    /// Resolve every vertex to concrete attribute values.
    ///
    /// Positions no face referenced stay in place, bound to attribute
    /// index 0, so output indices keep lining up with the source positions.
    pub fn finish(self) -> UnifiedMesh {
        let unused = self.vertices.iter().filter(|v| v.binding.is_none()).count();
        if unused > 0 {
            warn!("{} source positions are not referenced by any face", unused);
        }
        let duplicates = self.vertices.len() - self.source_positions;
        if duplicates > 0 {
            debug!("split {} vertices for divergent corner attributes", duplicates);
        }

        let mut mesh = UnifiedMesh {
            positions: Vec::with_capacity(self.vertices.len()),
            normals: Vec::with_capacity(self.vertices.len()),
            uvs: Vec::with_capacity(self.vertices.len()),
            indices: self.indices,
        };

        for vertex in &self.vertices {
            let binding = vertex.binding.unwrap_or(Binding::UNUSED);

            let normal = self
                .normals
                .get(binding.normal as usize)
                .copied()
                .unwrap_or_default();
            let uv = match (self.uvs, binding.uv) {
                (Some(uvs), Some(i)) => uvs.get(i as usize).map_or([0.0; 3], |&[u, v]| [u, v, 0.0]),
                _ => [0.0; 3],
            };

            mesh.positions.push(vertex.position);
            mesh.normals.push(normal);
            mesh.uvs.push(uv);
        }

        mesh
    }
}

fn check_range(semantic: Semantic, index: u32, len: usize) -> Result<(), MeshError> {
    if index as usize >= len {
        return Err(MeshError::IndexOutOfRange {
            semantic,
            index,
            len,
        });
    }
    Ok(())
}

/// Unify a whole corner stream in one call.
pub fn unify(
    positions: &[[f32; 3]],
    normals: &[[f32; 3]],
    uvs: Option<&[[f32; 2]]>,
    corners: &[Corner],
) -> Result<UnifiedMesh, MeshError> {
    let mut unifier = AttributeIndexUnifier::new(positions, normals, uvs);
    for &corner in corners {
        unifier.push_corner(corner)?;
    }
    Ok(unifier.finish())
}

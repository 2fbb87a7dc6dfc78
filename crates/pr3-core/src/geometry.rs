use crate::error::GeometryError;
use crate::types::Transform;

/// A single renderable object: vertex-indexed triangle data plus the
/// metadata taken from the scene node that places it.
///
/// Positions, normals and uvs are parallel arrays; uvs carry a zero `z`.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    name: String,
    material: String,
    transform: Transform,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl Geometry {
    /// Build a geometry, checking that the attribute arrays line up and
    /// that every index refers to an existing vertex.
    pub fn new(
        name: impl Into<String>,
        material: impl Into<String>,
        transform: Transform,
        positions: Vec<[f32; 3]>,
        normals: Vec<[f32; 3]>,
        uvs: Vec<[f32; 3]>,
        indices: Vec<u32>,
    ) -> Result<Self, GeometryError> {
        if positions.len() != normals.len() || positions.len() != uvs.len() {
            return Err(GeometryError::MismatchedAttributes {
                positions: positions.len(),
                normals: normals.len(),
                uvs: uvs.len(),
            });
        }

        if indices.len() % 3 != 0 {
            return Err(GeometryError::PartialTriangle(indices.len()));
        }

        if let Some(&index) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }

        Ok(Self {
            name: name.into(),
            material: material.into(),
            transform,
            positions,
            normals,
            uvs,
            indices,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn uvs(&self) -> &[[f32; 3]] {
        &self.uvs
    }

    /// Packed triangle indices, three per face.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// An ordered list of objects making up one PR3 model container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pr3Model {
    pub objects: Vec<Geometry>,
}

impl Pr3Model {
    pub fn new(objects: Vec<Geometry>) -> Self {
        Self { objects }
    }

    /// Total number of vertices across all objects
    pub fn vertex_count(&self) -> usize {
        self.objects.iter().map(Geometry::vertex_count).sum()
    }

    /// Total number of triangles across all objects
    pub fn face_count(&self) -> usize {
        self.objects.iter().map(Geometry::face_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(indices: Vec<u32>) -> Result<Geometry, GeometryError> {
        Geometry::new(
            "Tri",
            "Default",
            Transform::IDENTITY,
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0]; 3],
            vec![[0.0, 0.0, 0.0]; 3],
            indices,
        )
    }

    #[test]
    fn valid_triangle() {
        let geometry = triangle(vec![0, 1, 2]).unwrap();
        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(geometry.face_count(), 1);
        assert_eq!(geometry.indices(), &[0, 1, 2]);
    }

    #[test]
    fn rejects_partial_triangle() {
        assert_eq!(
            triangle(vec![0, 1]).unwrap_err(),
            GeometryError::PartialTriangle(2)
        );
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert_eq!(
            triangle(vec![0, 1, 3]).unwrap_err(),
            GeometryError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn rejects_mismatched_attributes() {
        let result = Geometry::new(
            "Bad",
            "",
            Transform::IDENTITY,
            vec![[0.0; 3]; 3],
            vec![[0.0; 3]; 2],
            vec![[0.0; 3]; 3],
            vec![],
        );
        assert!(matches!(
            result,
            Err(GeometryError::MismatchedAttributes { normals: 2, .. })
        ));
    }

    #[test]
    fn model_totals() {
        let model = Pr3Model::new(vec![
            triangle(vec![0, 1, 2]).unwrap(),
            triangle(vec![0, 1, 2, 2, 1, 0]).unwrap(),
        ]);
        assert_eq!(model.vertex_count(), 6);
        assert_eq!(model.face_count(), 3);
    }
}

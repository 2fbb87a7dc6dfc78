/// Violations of the geometry invariants checked by [`crate::Geometry::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("attribute arrays differ in length: {positions} positions, {normals} normals, {uvs} uvs")]
    MismatchedAttributes {
        positions: usize,
        normals: usize,
        uvs: usize,
    },

    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),

    #[error("face index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

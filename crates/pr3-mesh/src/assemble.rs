use pr3_core::{Geometry, MeshSource, Pr3Model, Scene, SceneNode, Semantic};
use tracing::{debug, info};

use crate::error::MeshError;
use crate::skeleton::DEFAULT_ARMATURE;
use crate::source::{read_corners, read_vectors};
use crate::unify::{unify, UnifiedMesh};

/// Builds geometry records for the meshes of one scene.
///
/// Name, transform and material come from the first scene node (pre-order)
/// whose name equals the object name and which references a mesh. Bones
/// share names with their meshes, so the armature subtree is never searched.
pub struct GeometryAssembler<'a> {
    scene: &'a Scene,
    armature: Option<&'a SceneNode>,
}

impl<'a> GeometryAssembler<'a> {
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            armature: scene.find_node(DEFAULT_ARMATURE),
        }
    }

    /// Use `name` instead of the default armature node.
    pub fn with_armature(mut self, name: &str) -> Self {
        self.armature = self.scene.find_node(name);
        self
    }

    /// Attach node metadata to already unified buffers.
    pub fn assemble(&self, name: &str, mesh: UnifiedMesh) -> Result<Geometry, MeshError> {
        let node = self
            .scene
            .find_mesh_node(name, self.armature)
            .ok_or_else(|| MeshError::NoSceneNode(name.to_string()))?;

        let material = node.material.clone().unwrap_or_default();
        if material.is_empty() {
            debug!("Object '{}' has no bound material", name);
        }

        let geometry = Geometry::new(
            node.name.clone(),
            material,
            node.transform,
            mesh.positions,
            mesh.normals,
            mesh.uvs,
            mesh.indices,
        )?;
        Ok(geometry)
    }

    /// Read, unify and assemble a single mesh source.
    pub fn convert(&self, source: &MeshSource) -> Result<Geometry, MeshError> {
        let name = source.name.as_str();
        let positions = read_vectors::<3>(name, Semantic::Position, &source.positions)?;
        let normals = read_vectors::<3>(name, Semantic::Normal, &source.normals)?;
        let uvs = source
            .tex_coords
            .as_deref()
            .map(|data| read_vectors::<2>(name, Semantic::TexCoord, data))
            .transpose()?;

        let corners = read_corners(source)?;
        let unified = unify(&positions, &normals, uvs.as_deref(), &corners)?;
        let geometry = self.assemble(name, unified)?;

        debug!(
            "Assembled '{}': {} source positions -> {} vertices, {} faces",
            name,
            positions.len(),
            geometry.vertex_count(),
            geometry.face_count()
        );
        Ok(geometry)
    }

    /// Convert every mesh of the scene, in scene order.
    pub fn build_model(&self) -> Result<Pr3Model, MeshError> {
        let objects = self
            .scene
            .meshes
            .iter()
            .map(|source| self.convert(source))
            .collect::<Result<Vec<_>, _>>()?;

        let model = Pr3Model::new(objects);
        info!(
            "Built model with {} objects, {} vertices, {} faces",
            model.objects.len(),
            model.vertex_count(),
            model.face_count()
        );
        Ok(model)
    }
}

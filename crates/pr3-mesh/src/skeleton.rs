//! Skeleton extraction
//!
//! The armature subtree of a scene is flattened into a rig in depth-first
//! post-order: every bone appears after all of its descendants. Bones refer to
//! their parent by name, so consumers must not rely on list position.

use pr3_core::{Bone, Rig, Scene, SceneNode};
use tracing::{debug, info};

use crate::error::MeshError;

/// Name of the node whose subtree holds the bones
pub const DEFAULT_ARMATURE: &str = "Armature";

pub struct SkeletonExtractor<'a> {
    scene: &'a Scene,
    armature: &'a SceneNode,
}

impl<'a> SkeletonExtractor<'a> {
    /// Locate the armature node (first pre-order match).
    pub fn new(scene: &'a Scene, armature: &str) -> Result<Self, MeshError> {
        let armature = scene
            .find_node(armature)
            .ok_or_else(|| MeshError::MissingElement(format!("armature node '{armature}'")))?;
        Ok(Self { scene, armature })
    }

    pub fn armature(&self) -> &SceneNode {
        self.armature
    }

    /// Walk the armature and return its bones in post-order.
    pub fn extract(&self) -> Result<Rig, MeshError> {
        let mut bones = Vec::new();
        self.walk(self.armature, None, &mut bones)?;
        info!(
            "Extracted {} bones from armature '{}'",
            bones.len(),
            self.armature.name
        );
        Ok(Rig::new(bones))
    }

    fn walk(
        &self,
        node: &SceneNode,
        parent: Option<&str>,
        bones: &mut Vec<Bone>,
    ) -> Result<(), MeshError> {
        for child in &node.children {
            self.walk(child, Some(&node.name), bones)?;
        }

        let associated_mesh = self.associated_mesh(&node.name)?;
        debug!(
            "Bone '{}' (parent: {:?}, mesh: {:?})",
            node.name, parent, associated_mesh
        );
        bones.push(Bone {
            name: node.name.clone(),
            transform: node.transform,
            associated_mesh,
            parent: parent.map(str::to_string),
        });
        Ok(())
    }

    /// Mesh of the first node named `name` outside the armature subtree
    /// that references one.
    fn associated_mesh(&self, name: &str) -> Result<Option<u32>, MeshError> {
        let Some(node) = self.scene.find_mesh_node(name, Some(self.armature)) else {
            return Ok(None);
        };
        match node.mesh {
            Some(mesh) if mesh >= self.scene.meshes.len() => Err(MeshError::DanglingMesh {
                node: node.name.clone(),
                mesh,
                count: self.scene.meshes.len(),
            }),
            mesh => Ok(mesh.map(|m| m as u32)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pr3_core::{MeshSource, Transform};

    fn scene() -> Scene {
        let armature = SceneNode::new("Armature")
            .with_child(
                SceneNode::new("Spine")
                    .with_child(SceneNode::new("Head"))
                    .with_child(SceneNode::new("Arm")),
            )
            .with_child(SceneNode::new("Tail"));

        Scene {
            meshes: vec![MeshSource::default(), MeshSource::default()],
            nodes: vec![
                SceneNode::new("Body").with_mesh(0),
                SceneNode::new("Group").with_child(SceneNode::new("Head").with_mesh(1)),
                armature,
            ],
        }
    }

    fn names(rig: &Rig) -> Vec<&str> {
        rig.bones.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn bones_are_emitted_in_post_order() {
        let scene = scene();
        let rig = SkeletonExtractor::new(&scene, DEFAULT_ARMATURE)
            .unwrap()
            .extract()
            .unwrap();

        assert_eq!(names(&rig), vec!["Head", "Arm", "Spine", "Tail", "Armature"]);
    }

    #[test]
    fn parents_are_referenced_by_name() {
        let scene = scene();
        let rig = SkeletonExtractor::new(&scene, DEFAULT_ARMATURE)
            .unwrap()
            .extract()
            .unwrap();

        assert!(rig.find("Armature").unwrap().is_root());
        assert_eq!(rig.find("Spine").unwrap().parent.as_deref(), Some("Armature"));
        assert_eq!(rig.find("Head").unwrap().parent.as_deref(), Some("Spine"));
        assert_eq!(rig.roots().count(), 1);
    }

    #[test]
    fn meshes_are_associated_by_node_name() {
        let scene = scene();
        let rig = SkeletonExtractor::new(&scene, DEFAULT_ARMATURE)
            .unwrap()
            .extract()
            .unwrap();

        assert_eq!(rig.find("Head").unwrap().associated_mesh, Some(1));
        assert_eq!(rig.find("Arm").unwrap().associated_mesh, None);
    }

    #[test]
    fn nodes_without_mesh_are_skipped() {
        let mut scene = scene();
        scene.nodes.insert(0, SceneNode::new("Arm"));
        scene.nodes[2].children.push(SceneNode::new("Arm").with_mesh(0));

        let rig = SkeletonExtractor::new(&scene, DEFAULT_ARMATURE)
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(rig.find("Arm").unwrap().associated_mesh, Some(0));
    }

    #[test]
    fn armature_subtree_is_not_searched_for_meshes() {
        let mut scene = scene();
        scene.nodes[2].children[1].mesh = Some(0);

        let rig = SkeletonExtractor::new(&scene, DEFAULT_ARMATURE)
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(rig.find("Tail").unwrap().associated_mesh, None);
    }

    #[test]
    fn transforms_are_carried_over() {
        let mut scene = scene();
        let moved = Transform::from_rows([2.0; 16]);
        scene.nodes[2].children[1].transform = moved;

        let rig = SkeletonExtractor::new(&scene, DEFAULT_ARMATURE)
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(rig.find("Tail").unwrap().transform, moved);
    }

    #[test]
    fn missing_armature() {
        let scene = scene();
        assert!(matches!(
            SkeletonExtractor::new(&scene, "Skeleton"),
            Err(MeshError::MissingElement(_))
        ));
    }

    #[test]
    fn dangling_mesh_reference() {
        let mut scene = scene();
        scene.nodes[0].name = "Tail".into();
        scene.nodes[0].mesh = Some(9);

        let err = SkeletonExtractor::new(&scene, DEFAULT_ARMATURE)
            .unwrap()
            .extract()
            .unwrap_err();
        assert!(matches!(err, MeshError::DanglingMesh { mesh: 9, count: 2, .. }));
    }

    #[test]
    fn custom_armature_name() {
        let mut scene = scene();
        scene.nodes[2].name = "Rig".into();

        let extractor = SkeletonExtractor::new(&scene, "Rig").unwrap();
        assert_eq!(extractor.armature().children.len(), 2);
        let rig = extractor.extract().unwrap();
        assert_eq!(rig.bones.last().unwrap().name, "Rig");
    }
}

//! Parsed scene input
//!
//! These types describe a scene as an external parser hands it over: raw
//! float sources, an interleaved corner index stream per mesh, and a tree of
//! named nodes. They deserialize directly from a JSON scene dump.

use std::ptr;

use serde::{Deserialize, Serialize};

use crate::types::Transform;

/// Which attribute a slot of a corner refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Semantic {
    #[serde(rename = "POSITION", alias = "VERTEX")]
    Position,
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "TEXCOORD")]
    TexCoord,
}

/// One mesh as delivered by the scene parser.
///
/// `indices` is interleaved: each corner holds one index per entry of
/// `inputs`, in that order. `face_sizes` gives the corner count of every
/// face; when absent every face is assumed to be a triangle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSource {
    pub name: String,
    /// Flat xyz triples
    pub positions: Vec<f32>,
    /// Flat xyz triples
    #[serde(default)]
    pub normals: Vec<f32>,
    /// Flat uv pairs, absent when the mesh has no texture channel
    #[serde(default)]
    pub tex_coords: Option<Vec<f32>>,
    pub inputs: Vec<Semantic>,
    pub indices: Vec<u32>,
    #[serde(default)]
    pub face_sizes: Option<Vec<u32>>,
}

impl MeshSource {
    /// Number of index slots per corner
    pub fn stride(&self) -> usize {
        self.inputs.len()
    }

    /// Slot of `semantic` within a corner, if the mesh references it
    pub fn slot(&self, semantic: Semantic) -> Option<usize> {
        self.inputs.iter().position(|&s| s == semantic)
    }
}

/// A node of the scene hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    /// Name of the bound material
    #[serde(default)]
    pub material: Option<String>,
    /// Index into [`Scene::meshes`]
    #[serde(default)]
    pub mesh: Option<usize>,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_mesh(mut self, mesh: usize) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first pre-order traversal of this node and its descendants
    pub fn preorder(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

/// A complete parsed scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub meshes: Vec<MeshSource>,
    /// Top-level nodes of the visual scene
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Depth-first pre-order traversal over every node of the scene
    pub fn preorder(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.nodes.iter().rev().collect(),
        }
    }

    /// First node named `name` in pre-order
    pub fn find_node(&self, name: &str) -> Option<&SceneNode> {
        self.preorder().find(|n| n.name == name)
    }

    /// First node named `name` in pre-order that references a mesh. The
    /// subtree rooted at `exclude` (usually the armature) is skipped.
    pub fn find_mesh_node(&self, name: &str, exclude: Option<&SceneNode>) -> Option<&SceneNode> {
        let mut stack: Vec<&SceneNode> = self.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if exclude.is_some_and(|e| ptr::eq(node, e)) {
                continue;
            }
            if node.mesh.is_some() && node.name == name {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }
}

/// Pre-order node iterator. Uses an explicit stack so deep hierarchies do
/// not grow the call stack.
pub struct PreOrder<'a> {
    stack: Vec<&'a SceneNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a SceneNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Scene {
        Scene {
            meshes: Vec::new(),
            nodes: vec![
                SceneNode::new("A")
                    .with_child(SceneNode::new("B").with_child(SceneNode::new("C")))
                    .with_child(SceneNode::new("D")),
                SceneNode::new("E"),
            ],
        }
    }

    #[test]
    fn preorder_visits_parents_first() {
        let scene = sample();
        let names: Vec<_> = scene.preorder().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn find_node_returns_first_match() {
        let mut scene = sample();
        scene.nodes.push(SceneNode::new("C").with_mesh(7));
        assert_eq!(scene.find_node("C").unwrap().mesh, None);
        assert!(scene.find_node("Z").is_none());
    }

    #[test]
    fn find_mesh_node_skips_meshless_and_excluded_nodes() {
        let mut scene = sample();
        scene.nodes.insert(0, SceneNode::new("Rig").with_child(SceneNode::new("C").with_mesh(1)));
        scene.nodes.push(SceneNode::new("C").with_mesh(2));

        let rig = &scene.nodes[0];
        assert_eq!(scene.find_mesh_node("C", None).unwrap().mesh, Some(1));
        assert_eq!(scene.find_mesh_node("C", Some(rig)).unwrap().mesh, Some(2));
        assert!(scene.find_mesh_node("B", None).is_none());
    }

    #[test]
    fn deserializes_scene_dump() {
        let json = r#"{
            "meshes": [{
                "name": "Tri",
                "positions": [0, 0, 0, 1, 0, 0, 0, 1, 0],
                "normals": [0, 0, 1],
                "inputs": ["VERTEX", "NORMAL"],
                "indices": [0, 0, 1, 0, 2, 0]
            }],
            "nodes": [{ "name": "Tri", "material": "Default", "mesh": 0 }]
        }"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.stride(), 2);
        assert_eq!(mesh.slot(Semantic::Normal), Some(1));
        assert_eq!(mesh.slot(Semantic::TexCoord), None);
        assert!(mesh.tex_coords.is_none());
        assert!(scene.nodes[0].transform.is_identity());
        assert_eq!(scene.nodes[0].material.as_deref(), Some("Default"));
    }
}

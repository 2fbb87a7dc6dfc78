use std::path::Path;

use gltf::mesh::Mode;
use pr3_core::{Mat4, MeshSource, Scene, SceneNode, Semantic, Transform};
use tracing::debug;

use crate::error::AssetError;

/// Load a glTF 2.0 file (.gltf or .glb) as a scene.
///
/// Every primitive of a node's mesh becomes its own mesh source named after
/// the node. The first primitive is bound to the node itself; further
/// primitives are named `<node>.<n>` and get a sibling node with the same
/// transform so they can be matched by name.
pub fn load_gltf(path: &Path) -> Result<Scene, AssetError> {
    let (document, buffers, _images) = gltf::import(path)
        .map_err(|e| AssetError::GltfLoadFailed(path.to_path_buf(), e.to_string()))?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| AssetError::GltfLoadFailed(path.to_path_buf(), "no scenes found".into()))?;

    let mut builder = SceneBuilder {
        path,
        buffers: &buffers,
        meshes: Vec::new(),
    };

    let mut nodes = Vec::new();
    for node in scene.nodes() {
        nodes.extend(builder.convert_node(&node)?);
    }

    debug!(
        "glTF '{}': {} mesh sources, {} top-level nodes",
        path.display(),
        builder.meshes.len(),
        nodes.len()
    );

    Ok(Scene {
        meshes: builder.meshes,
        nodes,
    })
}

struct SceneBuilder<'a> {
    path: &'a Path,
    buffers: &'a [gltf::buffer::Data],
    meshes: Vec<MeshSource>,
}

impl SceneBuilder<'_> {
    /// Convert a node and its subtree. Returns the node followed by the
    /// siblings created for extra primitives.
    fn convert_node(&mut self, node: &gltf::Node) -> Result<Vec<SceneNode>, AssetError> {
        let name = node
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("node{}", node.index()));
        let transform = Transform::from_mat4(Mat4::from_cols_array_2d(&node.transform().matrix()));

        let mut converted = SceneNode::new(name.clone()).with_transform(transform);
        let mut extra = Vec::new();

        if let Some(mesh) = node.mesh() {
            for (i, primitive) in mesh.primitives().enumerate() {
                let source_name = match i {
                    0 => name.clone(),
                    n => format!("{name}.{n}"),
                };
                let mesh_index = self.meshes.len();
                let source = self.read_primitive(&source_name, &primitive)?;
                self.meshes.push(source);

                let material = primitive.material().name().map(str::to_string);
                if i == 0 {
                    converted.mesh = Some(mesh_index);
                    converted.material = material;
                } else {
                    let mut sibling = SceneNode::new(source_name)
                        .with_transform(transform)
                        .with_mesh(mesh_index);
                    sibling.material = material;
                    extra.push(sibling);
                }
            }
        }

        for child in node.children() {
            converted.children.extend(self.convert_node(&child)?);
        }

        let mut nodes = vec![converted];
        nodes.extend(extra);
        Ok(nodes)
    }

    fn read_primitive(
        &self,
        name: &str,
        primitive: &gltf::Primitive,
    ) -> Result<MeshSource, AssetError> {
        if primitive.mode() != Mode::Triangles {
            return Err(AssetError::UnsupportedPrimitive {
                path: self.path.to_path_buf(),
                mesh: name.to_string(),
                mode: format!("{:?}", primitive.mode()),
            });
        }

        let missing = |semantic: Semantic| AssetError::MissingAttribute {
            path: self.path.to_path_buf(),
            mesh: name.to_string(),
            semantic,
        };

        let buffers = self.buffers;
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .map(|iter| iter.collect())
            .ok_or_else(|| missing(Semantic::Position))?;

        let normals: Vec<[f32; 3]> = reader
            .read_normals()
            .map(|iter| iter.collect())
            .ok_or_else(|| missing(Semantic::Normal))?;

        let tex_coords: Option<Vec<[f32; 2]>> = reader
            .read_tex_coords(0)
            .map(|tc| tc.into_f32().collect());

        let vertex_indices: Vec<u32> = reader
            .read_indices()
            .map(|idx| idx.into_u32().collect())
            .unwrap_or_else(|| (0..positions.len() as u32).collect());

        // glTF attributes already share one index, so every corner repeats it.
        let mut inputs = vec![Semantic::Position, Semantic::Normal];
        if tex_coords.is_some() {
            inputs.push(Semantic::TexCoord);
        }
        let indices = vertex_indices
            .iter()
            .flat_map(|&i| std::iter::repeat(i).take(inputs.len()))
            .collect();

        Ok(MeshSource {
            name: name.to_string(),
            positions: positions.concat(),
            normals: normals.concat(),
            tex_coords: tex_coords.map(|tc| tc.concat()),
            inputs,
            indices,
            face_sizes: None,
        })
    }
}

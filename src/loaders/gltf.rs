use std::path::Path;

use glam::{Mat4, Vec3};
use log::{debug, info};

use crate::error::AssetError;
use crate::math::{Color, MeshData};

/// Animation clip present in a file; clips are reported, not played
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSummary {
    pub name: String,
    /// Last keyframe time in seconds
    pub duration: f32,
}

/// Decoded glTF scene flattened into one world-space triangle list
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub name: String,
    pub mesh: MeshData,
    /// Base color factor of the first material encountered
    pub base_color: Color,
    pub animations: Vec<AnimationSummary>,
}

/// Loads a glTF/GLB file and bakes every node transform into the vertices
pub fn load_gltf_model(path: impl AsRef<Path>) -> Result<ModelData, AssetError> {
    let path = path.as_ref();
    info!("loading glTF file {path:?}");

    let (document, buffers, _images) = gltf::import(path).map_err(|err| AssetError::Import {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    debug!(
        "glTF {path:?}: {} scenes, {} nodes, {} meshes, {} animations",
        document.scenes().count(),
        document.nodes().count(),
        document.meshes().count(),
        document.animations().count()
    );

    let mut builder = MeshBuilder { path, buffers: &buffers, mesh: MeshData::default(), base_color: None };
    for scene in document.scenes() {
        for node in scene.nodes() {
            builder.process_node(&node, &Mat4::IDENTITY)?;
        }
    }

    if builder.mesh.triangle_count() == 0 {
        return Err(AssetError::NoGeometry(path.to_path_buf()));
    }

    let animations = document
        .animations()
        .enumerate()
        .map(|(i, animation)| AnimationSummary {
            name: animation.name().map(str::to_string).unwrap_or_else(|| format!("animation{i}")),
            duration: animation_duration(&animation, &buffers),
        })
        .collect();

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    info!("loaded {name}: {} triangles", builder.mesh.triangle_count());
    Ok(ModelData {
        name,
        mesh: builder.mesh,
        base_color: builder.base_color.unwrap_or(Color::WHITE),
        animations,
    })
}

struct MeshBuilder<'a> {
    path: &'a Path,
    buffers: &'a [gltf::buffer::Data],
    mesh: MeshData,
    base_color: Option<Color>,
}

impl MeshBuilder<'_> {
    fn process_node(&mut self, node: &gltf::Node, parent_transform: &Mat4) -> Result<(), AssetError> {
        let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
        let global_transform = *parent_transform * local_transform;

        if let Some(mesh) = node.mesh() {
            self.process_mesh(&mesh, &global_transform)?;
        }

        for child in node.children() {
            self.process_node(&child, &global_transform)?;
        }
        Ok(())
    }

    fn process_mesh(&mut self, mesh: &gltf::Mesh, transform: &Mat4) -> Result<(), AssetError> {
        debug!("processing mesh {:?}", mesh.name());

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                debug!("skipping {:?} primitive", primitive.mode());
                continue;
            }

            let buffers = self.buffers;
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));
            let positions = reader
                .read_positions()
                .ok_or_else(|| AssetError::MissingPositions(self.path.to_path_buf()))?;

            let base = self.mesh.positions.len() as u32;
            let first_index = self.mesh.indices.len();
            self.mesh
                .positions
                .extend(positions.map(|p| transform.transform_point3(Vec3::from_array(p))));
            let added = self.mesh.positions.len() as u32 - base;

            match reader.read_indices() {
                Some(indices) => self.mesh.indices.extend(indices.into_u32().map(|i| base + i)),
                None => self.mesh.indices.extend(base..base + added - added % 3),
            }

            // mirrored transforms flip winding
            if transform.determinant() < 0.0 {
                for tri in self.mesh.indices[first_index..].chunks_exact_mut(3) {
                    tri.swap(1, 2);
                }
            }

            if self.base_color.is_none() {
                let [r, g, b, _] = primitive.material().pbr_metallic_roughness().base_color_factor();
                self.base_color = Some(Color::rgb(r, g, b));
            }
        }
        Ok(())
    }
}

fn animation_duration(animation: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> f32 {
    let mut max_time = 0.0f32;
    for channel in animation.channels() {
        let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|data| &data.0[..]));
        if let Some(inputs) = reader.read_inputs() {
            for time in inputs {
                max_time = max_time.max(time);
            }
        }
    }
    max_time
}

//! Model loading.
//!
//! Turns a validated [`ModelHandle`] into a [`SceneNode`] by resolving bytes
//! through the injected asset source and decoding them with the `gltf` crate.
//! Format validation is synchronous and happens before any asynchronous work;
//! everything after that point is a suspension point that must not stall the
//! render loop.

pub mod animation;

use std::rc::Rc;

use crate::{
    data_structures::scene_graph::{AnimationTrack, MeshData, SceneNode},
    error::EngineError,
    host::AssetSource,
    resources::animation::read_clips,
};

/// Declared format of a loadable asset, derived from its locator extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelFormat {
    Glb,
    Gltf,
}

/// A validated reference to a loadable 3D asset.
///
/// Construction is the validation point: a handle only exists for locators
/// whose extension is `.glb` or `.gltf`, so load futures never start for
/// assets the engine cannot decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelHandle {
    locator: String,
    format: ModelFormat,
}

impl ModelHandle {
    /// Validate a locator (local transient reference or remote URL) and
    /// derive its format tag.
    pub fn parse(locator: &str) -> Result<Self, EngineError> {
        // URLs may carry query/fragment suffixes after the file name.
        let path = locator
            .split(['?', '#'])
            .next()
            .unwrap_or(locator);
        let format = match path.rsplit('.').next().map(str::to_ascii_lowercase) {
            Some(ext) if ext == "glb" => ModelFormat::Glb,
            Some(ext) if ext == "gltf" => ModelFormat::Gltf,
            _ => {
                return Err(EngineError::InvalidFormat {
                    locator: locator.to_string(),
                });
            }
        };
        Ok(Self {
            locator: locator.to_string(),
            format,
        })
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    pub fn format(&self) -> ModelFormat {
        self.format
    }

    /// File stem used to label the loaded scene node.
    pub fn name(&self) -> &str {
        let path = self.locator.split(['?', '#']).next().unwrap_or(&self.locator);
        let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
        file.rsplit_once('.').map_or(file, |(stem, _)| stem)
    }
}

/// Resolve and decode a model into a scene node.
///
/// The node comes back with its animation clips prepared but not started;
/// attaching it to the scene session gives it the default transform.
pub async fn load_scene_node(
    source: Rc<dyn AssetSource>,
    handle: ModelHandle,
) -> Result<SceneNode, EngineError> {
    let bytes = source.resolve(handle.locator()).await?;
    let gltf = gltf::Gltf::from_slice(&bytes).map_err(|e| EngineError::Decode {
        locator: handle.locator().to_string(),
        reason: e.to_string(),
    })?;

    // Load buffers: binary-chunk buffers come from the GLB blob, URI buffers
    // go through the same asset source as the model itself.
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => match gltf.blob.as_deref() {
                Some(blob) => buffer_data.push(blob.to_vec()),
                None => {
                    return Err(EngineError::Decode {
                        locator: handle.locator().to_string(),
                        reason: "buffer references a missing binary chunk".to_string(),
                    });
                }
            },
            gltf::buffer::Source::Uri(uri) => {
                let bin = source.resolve(uri).await?;
                buffer_data.push(bin);
            }
        }
    }

    let animations = read_clips(&gltf, &buffer_data);
    let clips: Vec<_> = animations.into_values().flatten().collect();
    let animation = (!clips.is_empty()).then(|| AnimationTrack::new(clips));

    let mut meshes = Vec::new();
    for scene in gltf.scenes() {
        for node in scene.nodes() {
            read_meshes(&node, &buffer_data, &mut meshes);
        }
    }

    Ok(SceneNode {
        label: handle.name().to_string(),
        meshes,
        animation,
    })
}

fn read_meshes(node: &gltf::scene::Node, buffer_data: &[Vec<u8>], out: &mut Vec<MeshData>) {
    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| buffer_data.get(buffer.index()).map(Vec::as_slice));
            let mut data = MeshData {
                name: mesh.name().unwrap_or("mesh").to_string(),
                ..Default::default()
            };
            if let Some(positions) = reader.read_positions() {
                data.positions = positions.collect();
            }
            if let Some(normals) = reader.read_normals() {
                data.normals = normals.collect();
            }
            if let Some(indices) = reader.read_indices() {
                data.indices = indices.into_u32().collect();
            }
            out.push(data);
        }
    }
    for child in node.children() {
        read_meshes(&child, buffer_data, out);
    }
}

use std::collections::HashMap;

use crate::data_structures::scene_graph::AnimationClip;

#[derive(Clone, Debug)]
pub enum Keyframes {
    Translation(Vec<cgmath::Vector3<f32>>),
    Rotation(Vec<cgmath::Quaternion<f32>>),
    Scale(Vec<cgmath::Vector3<f32>>),
    Other,
}

/// Decode every animation channel of the document into clips, keyed by the
/// target node index.
pub(crate) fn read_clips(
    gltf: &gltf::Gltf,
    buffer_data: &[Vec<u8>],
) -> HashMap<usize, Vec<AnimationClip>> {
    let mut animations: HashMap<usize, Vec<AnimationClip>> = HashMap::new();
    for animation in gltf.animations() {
        for channel in animation.channels() {
            let reader = channel.reader(|buffer| buffer_data.get(buffer.index()).map(Vec::as_slice));
            let timestamps = match reader.read_inputs() {
                Some(gltf::accessor::Iter::Standard(times)) => times.collect(),
                Some(gltf::accessor::Iter::Sparse(_)) => {
                    log::warn!(
                        "sparse animation inputs in channel {} are not supported",
                        channel.index()
                    );
                    Vec::new()
                }
                None => Vec::new(),
            };
            let keyframes = match reader.read_outputs() {
                Some(gltf::animation::util::ReadOutputs::Translations(translations)) => {
                    Keyframes::Translation(translations.map(Into::into).collect())
                }
                Some(gltf::animation::util::ReadOutputs::Rotations(rotations)) => {
                    Keyframes::Rotation(rotations.into_f32().map(Into::into).collect())
                }
                Some(gltf::animation::util::ReadOutputs::Scales(scales)) => {
                    Keyframes::Scale(scales.map(Into::into).collect())
                }
                // TODO: implement morphing
                Some(gltf::animation::util::ReadOutputs::MorphTargetWeights(_)) | None => {
                    Keyframes::Other
                }
            };
            let name = animation.name().unwrap_or("Default").to_string();
            let clip = AnimationClip {
                name,
                keyframes,
                timestamps,
            };
            animations
                .entry(channel.target().node().index())
                .and_modify(|clips| clips.push(clip.clone()))
                .or_insert(vec![clip]);
        }
    }
    animations
}

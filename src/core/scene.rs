//! Everything the renderer reads each frame.

use super::color::Rgb;
use super::constants::LABEL_Z;
use super::material::BlobMaterial;
use super::presets::Preset;
use glam::Vec3;

/// On-screen preset name. Never removed; hidden labels have zero scale.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: &'static str,
    pub position: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

#[derive(Clone, Debug)]
pub struct SceneState {
    pub background: Rgb,
    pub blob_rotation_y: f32,
    pub material: BlobMaterial,
    pub labels: Vec<Label>,
    /// Label wipe amount, 0 at rest.
    pub text_progress: f32,
    /// Sign of the last accepted scroll, consumed by the label shader.
    pub text_direction: f32,
    /// Seconds since start, drives the displacement noise.
    pub elapsed: f32,
}

impl SceneState {
    pub fn new(presets: &[Preset], background: Rgb) -> Self {
        let labels = presets
            .iter()
            .enumerate()
            .map(|(i, p)| Label {
                text: p.name,
                position: Vec3::new(0.0, 0.0, LABEL_Z),
                scale: if i == 0 { 1.0 } else { 0.0 },
                opacity: 1.0,
            })
            .collect();
        Self {
            background,
            blob_rotation_y: 0.0,
            material: presets
                .first()
                .map(BlobMaterial::from_preset)
                .unwrap_or_default(),
            labels,
            text_progress: 0.0,
            text_direction: 1.0,
            elapsed: 0.0,
        }
    }
}

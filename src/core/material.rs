//! Live blob material parameters and the key table used to apply presets.

use super::constants::{POSITION_TIME_FREQUENCY, SMALL_WAVE_TIME_FREQUENCY};
use super::presets::Preset;

#[derive(Clone, Debug, PartialEq)]
pub struct BlobMaterial {
    pub position_frequency: f32,
    pub position_strength: f32,
    pub time_frequency: f32,
    pub small_wave_position_frequency: f32,
    pub small_wave_position_strength: f32,
    pub small_wave_time_frequency: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub env_map_intensity: f32,
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub transmission: f32,
    pub flat_shading: bool,
    pub wireframe: bool,
    pub map: &'static str,
}

impl Default for BlobMaterial {
    fn default() -> Self {
        Self {
            position_frequency: 0.5,
            position_strength: 0.3,
            time_frequency: POSITION_TIME_FREQUENCY,
            small_wave_position_frequency: 2.0,
            small_wave_position_strength: 0.15,
            small_wave_time_frequency: SMALL_WAVE_TIME_FREQUENCY,
            roughness: 0.5,
            metalness: 0.0,
            env_map_intensity: 1.0,
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            transmission: 0.0,
            flat_shading: false,
            wireframe: false,
            map: "",
        }
    }
}

impl BlobMaterial {
    /// Material with every recognized key of `preset` applied immediately.
    pub fn from_preset(preset: &Preset) -> Self {
        let mut m = Self::default();
        for p in NUMERIC_PARAMS {
            if let Some(v) = preset.number(p.key) {
                (p.set)(&mut m, v);
            }
        }
        for p in FLAG_PARAMS {
            if let Some(v) = preset.flag(p.key) {
                (p.set)(&mut m, v);
            }
        }
        if let Some(map) = preset.texture_map_name() {
            m.map = map;
        }
        m
    }
}

/// A tweenable material field addressed by its preset key.
pub struct NumericParam {
    pub key: &'static str,
    pub get: fn(&BlobMaterial) -> f32,
    pub set: fn(&mut BlobMaterial, f32),
}

/// A boolean material field; snapped rather than interpolated.
pub struct FlagParam {
    pub key: &'static str,
    pub get: fn(&BlobMaterial) -> bool,
    pub set: fn(&mut BlobMaterial, bool),
}

pub static NUMERIC_PARAMS: &[NumericParam] = &[
    NumericParam {
        key: "uPositionFrequency",
        get: |m| m.position_frequency,
        set: |m, v| m.position_frequency = v,
    },
    NumericParam {
        key: "uPositionStrength",
        get: |m| m.position_strength,
        set: |m, v| m.position_strength = v,
    },
    NumericParam {
        key: "uSmallWavePositionFrequency",
        get: |m| m.small_wave_position_frequency,
        set: |m, v| m.small_wave_position_frequency = v,
    },
    NumericParam {
        key: "uSmallWavePositionStrength",
        get: |m| m.small_wave_position_strength,
        set: |m, v| m.small_wave_position_strength = v,
    },
    NumericParam {
        key: "roughness",
        get: |m| m.roughness,
        set: |m, v| m.roughness = v,
    },
    NumericParam {
        key: "metalness",
        get: |m| m.metalness,
        set: |m, v| m.metalness = v,
    },
    NumericParam {
        key: "envMapIntensity",
        get: |m| m.env_map_intensity,
        set: |m, v| m.env_map_intensity = v,
    },
    NumericParam {
        key: "clearcoat",
        get: |m| m.clearcoat,
        set: |m, v| m.clearcoat = v,
    },
    NumericParam {
        key: "clearcoatRoughness",
        get: |m| m.clearcoat_roughness,
        set: |m, v| m.clearcoat_roughness = v,
    },
    NumericParam {
        key: "transmission",
        get: |m| m.transmission,
        set: |m, v| m.transmission = v,
    },
];

pub static FLAG_PARAMS: &[FlagParam] = &[
    FlagParam {
        key: "flatShading",
        get: |m| m.flat_shading,
        set: |m, v| m.flat_shading = v,
    },
    FlagParam {
        key: "wireframe",
        get: |m| m.wireframe,
        set: |m, v| m.wireframe = v,
    },
];

pub fn numeric_param_index(key: &str) -> Option<usize> {
    NUMERIC_PARAMS.iter().position(|p| p.key == key)
}

pub fn flag_param_index(key: &str) -> Option<usize> {
    FLAG_PARAMS.iter().position(|p| p.key == key)
}

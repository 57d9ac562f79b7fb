//! The compiled-in preset table.
//!
//! A preset's `config` is a flat list of parameter keys and values. Keys the
//! material does not recognize are ignored when the preset is applied, so a
//! preset only needs to list what it changes.

use super::color::Rgb;
use super::error::ShowcaseError;

/// Config key holding the gradient texture name.
pub const MAP_KEY: &str = "map";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Number(f32),
    Flag(bool),
    Text(&'static str),
}

#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub name: &'static str,
    pub background: &'static str,
    pub config: &'static [(&'static str, ParamValue)],
}

impl Preset {
    pub fn param(&self, key: &str) -> Option<ParamValue> {
        self.config
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn number(&self, key: &str) -> Option<f32> {
        match self.param(key) {
            Some(ParamValue::Number(v)) => Some(v),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.param(key) {
            Some(ParamValue::Flag(v)) => Some(v),
            _ => None,
        }
    }

    pub fn texture_map_name(&self) -> Option<&'static str> {
        match self.param(MAP_KEY) {
            Some(ParamValue::Text(v)) => Some(v),
            _ => None,
        }
    }

    pub fn background_rgb(&self) -> Result<Rgb, ShowcaseError> {
        Rgb::from_hex(self.background)
    }
}

use ParamValue::{Flag, Number, Text};

pub static PRESETS: [Preset; 3] = [
    Preset {
        name: "Color Fusion",
        background: "#9D73F7",
        config: &[
            ("uPositionFrequency", Number(0.5)),
            ("uPositionStrength", Number(0.4)),
            ("uSmallWavePositionFrequency", Number(0.5)),
            ("uSmallWavePositionStrength", Number(0.7)),
            ("roughness", Number(1.0)),
            ("metalness", Number(0.0)),
            ("envMapIntensity", Number(0.5)),
            ("clearcoat", Number(0.0)),
            ("clearcoatRoughness", Number(0.0)),
            ("transmission", Number(0.0)),
            ("flatShading", Flag(false)),
            ("wireframe", Flag(false)),
            ("map", Text("cosmic-fusion")),
        ],
    },
    Preset {
        name: "Purple Mirror",
        background: "#5300B1",
        config: &[
            ("uPositionFrequency", Number(0.584)),
            ("uPositionStrength", Number(0.276)),
            ("uSmallWavePositionFrequency", Number(0.899)),
            ("uSmallWavePositionStrength", Number(1.266)),
            ("roughness", Number(0.0)),
            ("metalness", Number(1.0)),
            ("envMapIntensity", Number(2.0)),
            ("clearcoat", Number(0.0)),
            ("clearcoatRoughness", Number(0.0)),
            ("transmission", Number(0.0)),
            ("flatShading", Flag(false)),
            ("wireframe", Flag(false)),
            ("map", Text("purple-rain")),
        ],
    },
    Preset {
        name: "Alien Goo",
        background: "#45ACD8",
        config: &[
            ("uPositionFrequency", Number(1.022)),
            ("uPositionStrength", Number(0.99)),
            ("uSmallWavePositionFrequency", Number(0.378)),
            ("uSmallWavePositionStrength", Number(0.341)),
            ("roughness", Number(0.292)),
            ("metalness", Number(0.73)),
            ("envMapIntensity", Number(0.86)),
            ("clearcoat", Number(1.0)),
            ("clearcoatRoughness", Number(0.0)),
            ("transmission", Number(0.0)),
            ("flatShading", Flag(false)),
            ("wireframe", Flag(false)),
            ("map", Text("lucky-day")),
        ],
    },
];

/// Every distinct gradient name referenced by `presets`, in first-use order.
pub fn texture_map_names(presets: &[Preset]) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for name in presets.iter().filter_map(Preset::texture_map_name) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

// Host-side tests for the preset table, material defaults and hex colors.

use blob_showcase::core::color::{linear_to_srgb, srgb_to_linear};
use blob_showcase::core::material::{flag_param_index, numeric_param_index, NUMERIC_PARAMS};
use blob_showcase::core::presets::texture_map_names;
use blob_showcase::core::{BlobMaterial, ParamValue, Rgb, ShowcaseError, PRESETS};

#[test]
fn shipped_presets_are_in_order() {
    let names: Vec<&str> = PRESETS.iter().map(|p| p.name).collect();
    assert_eq!(names, ["Color Fusion", "Purple Mirror", "Alien Goo"]);
    let backgrounds: Vec<&str> = PRESETS.iter().map(|p| p.background).collect();
    assert_eq!(backgrounds, ["#9D73F7", "#5300B1", "#45ACD8"]);
}

#[test]
fn every_preset_has_a_valid_background_and_map() {
    for preset in &PRESETS {
        assert!(preset.background_rgb().is_ok(), "{}", preset.name);
        assert!(preset.texture_map_name().is_some(), "{}", preset.name);
    }
}

#[test]
fn every_preset_key_is_recognized() {
    for preset in &PRESETS {
        for (key, value) in preset.config {
            let known = match value {
                ParamValue::Number(_) => numeric_param_index(key).is_some(),
                ParamValue::Flag(_) => flag_param_index(key).is_some(),
                ParamValue::Text(_) => *key == "map",
            };
            assert!(known, "{} has unrecognized key {}", preset.name, key);
        }
    }
}

#[test]
fn typed_accessors_respect_value_type() {
    let goo = &PRESETS[2];
    assert_eq!(goo.number("clearcoat"), Some(1.0));
    assert_eq!(goo.number("wireframe"), None);
    assert_eq!(goo.flag("wireframe"), Some(false));
    assert_eq!(goo.flag("clearcoat"), None);
    assert_eq!(goo.texture_map_name(), Some("lucky-day"));
    assert_eq!(goo.param("missing"), None);
}

#[test]
fn map_names_are_unique_in_first_use_order() {
    assert_eq!(
        texture_map_names(&PRESETS),
        vec!["cosmic-fusion", "purple-rain", "lucky-day"]
    );
    let doubled = [PRESETS[1], PRESETS[0], PRESETS[1]];
    assert_eq!(
        texture_map_names(&doubled),
        vec!["purple-rain", "cosmic-fusion"]
    );
}

#[test]
fn material_from_preset_applies_every_key() {
    let m = BlobMaterial::from_preset(&PRESETS[1]);
    assert_eq!(m.position_frequency, 0.584);
    assert_eq!(m.small_wave_position_strength, 1.266);
    assert_eq!(m.metalness, 1.0);
    assert_eq!(m.env_map_intensity, 2.0);
    assert_eq!(m.map, "purple-rain");
    assert!(!m.wireframe);
    // Not preset-driven
    assert_eq!(m.time_frequency, 0.3);
    assert_eq!(m.small_wave_time_frequency, 0.3);
}

#[test]
fn numeric_table_keys_are_distinct() {
    for (i, a) in NUMERIC_PARAMS.iter().enumerate() {
        for b in &NUMERIC_PARAMS[i + 1..] {
            assert_ne!(a.key, b.key);
        }
    }
    assert_eq!(NUMERIC_PARAMS.len(), 10);
}

#[test]
fn hex_parsing_accepts_short_and_long_forms() {
    assert_eq!(Rgb::from_hex("#333").unwrap(), Rgb::from_hex("#333333").unwrap());
    let white = Rgb::from_hex("#fff").unwrap();
    for c in white.to_array() {
        assert!((c - 1.0).abs() < 1e-6);
    }
    assert_eq!(Rgb::from_hex("000000").unwrap(), Rgb::new(0.0, 0.0, 0.0));
    assert_eq!(Rgb::from_hex("#9d73f7").unwrap(), Rgb::from_hex("#9D73F7").unwrap());
}

#[test]
fn hex_parsing_converts_to_linear() {
    let c = Rgb::from_hex("#808080").unwrap();
    // sRGB 128 is about 21.6% linear
    assert!((c.r - 0.2158605).abs() < 1e-4);
    assert_eq!(c.r, c.g);
    assert_eq!(c.g, c.b);
}

#[test]
fn bad_hex_is_rejected() {
    for bad in ["", "#", "#12", "#12345", "#gggggg", "#1234567", "#ééé"] {
        match Rgb::from_hex(bad) {
            Err(ShowcaseError::InvalidColor { value }) => assert_eq!(value, bad),
            other => panic!("{:?} parsed as {:?}", bad, other),
        }
    }
}

#[test]
fn srgb_transfer_round_trips() {
    for i in 0..=20 {
        let c = i as f32 / 20.0;
        assert!((linear_to_srgb(srgb_to_linear(c)) - c).abs() < 1e-4);
    }
}

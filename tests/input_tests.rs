// Host-side tests for keyboard mapping, wheel normalization and label layout.

use blob_showcase::core::text_layout::{label_world_size, layout_glyphs};
use blob_showcase::core::{SCROLL_THRESHOLD, KEY_SCROLL_DELTA};
use blob_showcase::input::{scroll_delta_for_key, wheel_delta_px};

#[test]
fn navigation_keys_map_to_signed_deltas() {
    for key in ["ArrowDown", "ArrowRight", "PageDown"] {
        assert_eq!(scroll_delta_for_key(key), Some(KEY_SCROLL_DELTA), "{}", key);
    }
    for key in ["ArrowUp", "ArrowLeft", "PageUp"] {
        assert_eq!(scroll_delta_for_key(key), Some(-KEY_SCROLL_DELTA), "{}", key);
    }
    for key in ["a", "Enter", " ", "arrowdown", ""] {
        assert_eq!(scroll_delta_for_key(key), None, "{}", key);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn key_delta_clears_the_scroll_threshold() {
    assert!(KEY_SCROLL_DELTA >= SCROLL_THRESHOLD);
}

#[test]
fn wheel_deltas_are_normalized_to_pixels() {
    assert_eq!(wheel_delta_px(120.0, 0, 900.0), 120.0);
    assert_eq!(wheel_delta_px(-3.0, 1, 900.0), -48.0);
    assert_eq!(wheel_delta_px(1.0, 2, 900.0), 900.0);
}

#[test]
fn one_line_of_scroll_is_below_threshold() {
    assert!(wheel_delta_px(1.0, 1, 900.0).abs() < SCROLL_THRESHOLD);
    assert!(wheel_delta_px(4.0, 1, 900.0).abs() >= SCROLL_THRESHOLD);
}

#[test]
fn glyphs_advance_with_letter_spacing() {
    let (offsets, width) = layout_glyphs(&[10.0, 20.0, 30.0], -2.0);
    assert_eq!(offsets, vec![0.0, 8.0, 26.0]);
    // No spacing after the last glyph
    assert_eq!(width, 56.0);
}

#[test]
fn empty_and_overlapping_layouts_never_go_negative() {
    let (offsets, width) = layout_glyphs(&[], -5.0);
    assert!(offsets.is_empty());
    assert_eq!(width, 0.0);

    let (_, width) = layout_glyphs(&[1.0, 1.0], -10.0);
    assert_eq!(width, 0.0);
}

#[test]
fn label_size_scales_with_font_world_size() {
    let s = label_world_size(512, 256, 256.0, 0.5);
    assert_eq!((s.x, s.y), (1.0, 0.5));
    let doubled = label_world_size(512, 256, 256.0, 1.0);
    assert_eq!(doubled.x, 2.0 * s.x);
}

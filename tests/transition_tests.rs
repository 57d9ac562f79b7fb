// Host-side tests for the scroll-driven preset transition controller.

use blob_showcase::core::tween::Field;
use blob_showcase::core::constants::ELAPSED_WRAP_SEC;
use blob_showcase::core::{
    next_index, ParamValue, Preset, RejectReason, Rgb, TransitionConfig, TransitionController,
    WheelOutcome, PRESETS,
};
use std::f32::consts::{PI, TAU};

fn controller() -> TransitionController {
    TransitionController::new(PRESETS.to_vec(), TransitionConfig::default()).unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn same_angle(a: f32, b: f32) -> bool {
    let d = (a - b).rem_euclid(TAU);
    d < 1e-3 || TAU - d < 1e-3
}

#[test]
fn next_index_wraps_in_both_directions() {
    for n in 1..8 {
        for current in 0..n {
            for dir in [-1, 1] {
                let next = next_index(current, dir, n);
                assert!(next < n, "n={} current={} dir={} -> {}", n, current, dir, next);
            }
        }
    }
    assert_eq!(next_index(0, -1, 3), 2);
    assert_eq!(next_index(2, 1, 3), 0);
    assert_eq!(next_index(1, 1, 3), 2);
}

#[test]
fn empty_preset_table_is_an_error() {
    assert!(TransitionController::new(Vec::new(), TransitionConfig::default()).is_err());
}

#[test]
fn initial_state_shows_first_preset() {
    let c = controller();
    assert_eq!(c.state().current_index, 0);
    assert!(!c.state().is_animating);
    assert_eq!(c.state().last_transition_at, None);

    let scene = c.scene();
    assert_eq!(scene.labels.len(), 3);
    for (i, label) in scene.labels.iter().enumerate() {
        assert_eq!(label.position.z, 2.0);
        assert_eq!(label.position.x, 0.0);
        assert_eq!(label.scale, if i == 0 { 1.0 } else { 0.0 });
        assert_eq!(label.opacity, 1.0);
    }
    assert_eq!(scene.background, Rgb::from_hex("#333").unwrap());
    assert_eq!(scene.material.map, "cosmic-fusion");
    assert_eq!(scene.text_progress, 0.0);
}

#[test]
fn resources_loaded_fades_background_to_first_preset() {
    let mut c = controller();
    c.on_resources_loaded(0.0);
    assert!(c.tweens().is_active(Field::Background(blob_showcase::core::tween::Channel::R)));
    c.tick(1.0);
    assert_eq!(c.scene().background, Rgb::from_hex("#9D73F7").unwrap());
    assert!(c.tweens().is_empty());
}

#[test]
fn small_scroll_never_starts_a_transition() {
    let mut c = controller();
    for (i, delta) in [10.0, -10.0, 49.9, -49.9].into_iter().enumerate() {
        let outcome = c.on_wheel(delta, i as f64);
        assert_eq!(outcome, WheelOutcome::Rejected(RejectReason::BelowThreshold));
    }
    assert!(!c.state().is_animating);
    assert!(c.tweens().is_empty());
    assert_eq!(c.state().last_transition_at, None);
}

#[test]
fn zero_and_nan_deltas_are_below_threshold() {
    let mut c = controller();
    assert_eq!(
        c.on_wheel(0.0, 0.0),
        WheelOutcome::Rejected(RejectReason::BelowThreshold)
    );
    assert_eq!(
        c.on_wheel(f64::NAN, 0.0),
        WheelOutcome::Rejected(RejectReason::BelowThreshold)
    );
    assert!(c.tweens().is_empty());
}

#[test]
fn threshold_is_inclusive() {
    let mut c = controller();
    assert!(matches!(c.on_wheel(50.0, 0.0), WheelOutcome::Started { .. }));
}

#[test]
fn scroll_down_advances_and_scroll_up_wraps_back() {
    let mut c = controller();
    assert_eq!(
        c.on_wheel(120.0, 0.0),
        WheelOutcome::Started {
            from: 0,
            to: 1,
            direction: 1
        }
    );

    let mut c = controller();
    assert_eq!(
        c.on_wheel(-120.0, 0.0),
        WheelOutcome::Started {
            from: 0,
            to: 2,
            direction: -1
        }
    );
}

#[test]
fn input_while_animating_is_rejected_without_side_effects() {
    let mut c = controller();
    assert!(matches!(c.on_wheel(100.0, 1.0), WheelOutcome::Started { .. }));
    let state_before = c.state().clone();
    let tweens_before = c.tweens().len();
    let swap_before = c.pending_texture_swap();

    assert_eq!(
        c.on_wheel(100.0, 1.0),
        WheelOutcome::Rejected(RejectReason::Animating)
    );
    assert_eq!(c.state(), &state_before);
    assert_eq!(c.tweens().len(), tweens_before);
    assert_eq!(c.pending_texture_swap(), swap_before);
}

#[test]
fn second_input_inside_cooldown_is_rejected() {
    // Short duration so the first transition is over before the second input
    let config = TransitionConfig {
        duration_sec: 0.1,
        texture_swap_delay_sec: 0.05,
        ..TransitionConfig::default()
    };
    let mut c = TransitionController::new(PRESETS.to_vec(), config).unwrap();
    assert!(matches!(c.on_wheel(100.0, 0.0), WheelOutcome::Started { .. }));
    c.tick(0.15);
    assert!(!c.state().is_animating);

    assert_eq!(
        c.on_wheel(100.0, 0.2),
        WheelOutcome::Rejected(RejectReason::Cooldown)
    );
    assert_eq!(c.state().current_index, 1);
    assert_eq!(c.state().last_transition_at, Some(0.0));

    assert!(matches!(c.on_wheel(100.0, 0.5), WheelOutcome::Started { from: 1, to: 2, .. }));
}

#[test]
fn animating_is_checked_before_threshold() {
    let mut c = controller();
    c.on_wheel(100.0, 0.0);
    assert_eq!(
        c.on_wheel(1.0, 0.1),
        WheelOutcome::Rejected(RejectReason::Animating)
    );
}

#[test]
fn transition_start_places_labels_and_spins_blob() {
    let mut c = controller();
    c.on_wheel(100.0, 0.0);

    let scene = c.scene();
    assert_eq!(scene.labels[1].scale, 1.0);
    assert!(approx(scene.labels[1].position.x, 3.5));
    assert_eq!(scene.text_direction, 1.0);
    assert!(c.state().is_animating);

    for field in [
        Field::TextProgress,
        Field::LabelX(0),
        Field::LabelX(1),
        Field::BlobRotationY,
    ] {
        assert!(c.tweens().is_active(field), "{:?} not tweened", field);
    }

    c.tick(0.5);
    assert!(approx(c.scene().blob_rotation_y, -2.0 * PI));

    c.tick(1.0);
    let scene = c.scene();
    assert!(approx(scene.labels[0].position.x, -3.0));
    assert!(approx(scene.labels[1].position.x, 0.0));
    assert!(same_angle(scene.blob_rotation_y, 0.0));
    assert_eq!(scene.background, Rgb::from_hex("#5300B1").unwrap());
}

#[test]
fn backward_transition_mirrors_offsets() {
    let mut c = controller();
    c.on_wheel(-100.0, 0.0);
    assert!(approx(c.scene().labels[2].position.x, -3.5));
    assert_eq!(c.scene().text_direction, -1.0);
    c.tick(0.5);
    assert!(approx(c.scene().blob_rotation_y, 2.0 * PI));
    c.tick(1.0);
    assert!(approx(c.scene().labels[0].position.x, 3.0));
}

#[test]
fn rotation_spins_from_current_angle_and_wraps_on_commit() {
    let mut c = controller();
    for i in 0..25 {
        let t = i as f64 * 2.0;
        let before = c.scene().blob_rotation_y;
        c.on_wheel(100.0, t);
        let spin = c
            .tweens()
            .iter()
            .find(|tw| tw.field == Field::BlobRotationY)
            .expect("rotation tween");
        assert!(approx(spin.from, before));
        assert!(approx(spin.to, before - 4.0 * PI));

        c.tick(t + 1.0);
        let r = c.scene().blob_rotation_y;
        assert!((0.0..=TAU).contains(&r), "rotation {} not wrapped", r);
        assert!(same_angle(r, 0.0));
    }
}

#[test]
fn commit_happens_only_when_progress_completes() {
    let mut c = controller();
    c.on_wheel(100.0, 0.0);

    let report = c.tick(0.5);
    assert_eq!(report.committed, None);
    assert!(c.state().is_animating);
    assert_eq!(c.state().current_index, 0);
    // power2.inOut is exactly halfway at t = 0.5
    assert!(approx(c.scene().text_progress, 0.25));

    let report = c.tick(1.0);
    assert_eq!(report.committed, Some(1));
    assert_eq!(c.state().current_index, 1);
    assert!(!c.state().is_animating);
    assert_eq!(c.scene().text_progress, 0.0);
}

#[test]
fn progress_runs_toward_midpoint_with_power2_in_out() {
    let mut c = controller();
    c.on_wheel(100.0, 0.0);
    c.tick(0.25);
    // 2 * 0.25^2 = 0.125 of the way to 0.5
    assert!(approx(c.scene().text_progress, 0.0625));
    c.tick(0.75);
    // 1 - 0.5^2 / 2 = 0.875 of the way
    assert!(approx(c.scene().text_progress, 0.4375));
}

#[test]
fn texture_swap_fires_after_delay_and_not_before() {
    let mut c = controller();
    c.on_wheel(100.0, 0.0);
    assert!(c.pending_texture_swap().is_some());

    let report = c.tick(0.39);
    assert_eq!(report.texture_swap, None);
    assert_eq!(c.scene().material.map, "cosmic-fusion");

    let report = c.tick(0.4);
    assert_eq!(report.texture_swap, Some("purple-rain"));
    assert_eq!(c.scene().material.map, "purple-rain");
    assert!(c.pending_texture_swap().is_none());

    // Fires once only
    let report = c.tick(0.8);
    assert_eq!(report.texture_swap, None);
}

#[test]
fn map_key_schedules_exactly_one_swap() {
    let mut c = controller();
    let applied = c.apply_preset(2, 0.0);
    assert!(applied.texture_swap.is_some());
    assert!(!applied.tweened.contains(&"map"));

    let mut swaps = Vec::new();
    for step in 1..=20 {
        if let Some(name) = c.tick(step as f64 * 0.05).texture_swap {
            swaps.push(name);
        }
    }
    assert_eq!(swaps, vec!["lucky-day"]);
}

#[test]
fn stale_texture_swap_is_cancelled_by_next_preset() {
    let mut c = controller();
    let first = c.apply_preset(1, 0.0);
    let first_id = first.texture_swap.unwrap();
    let second = c.apply_preset(2, 0.1);
    assert_ne!(second.texture_swap, Some(first_id));

    let report = c.tick(0.45);
    assert_eq!(report.texture_swap, None);
    assert_eq!(c.scene().material.map, "cosmic-fusion");

    let report = c.tick(0.55);
    assert_eq!(report.texture_swap, Some("lucky-day"));
    assert_eq!(c.scene().material.map, "lucky-day");
}

static ROUGHNESS_ONLY: [Preset; 1] = [Preset {
    name: "Rough",
    background: "#000000",
    config: &[("roughness", ParamValue::Number(0.3))],
}];

#[test]
fn only_present_keys_are_tweened() {
    let mut presets = PRESETS.to_vec();
    presets.extend_from_slice(&ROUGHNESS_ONLY);
    let mut c = TransitionController::new(presets, TransitionConfig::default()).unwrap();
    let metalness_before = c.scene().material.metalness;

    let applied = c.apply_preset(3, 0.0);
    assert_eq!(applied.tweened.as_slice(), &["roughness"]);
    assert_eq!(applied.texture_swap, None);

    c.tick(1.0);
    assert!(approx(c.scene().material.roughness, 0.3));
    assert_eq!(c.scene().material.metalness, metalness_before);
}

static ODD_KEYS: [Preset; 1] = [Preset {
    name: "Odd",
    background: "#101010",
    config: &[
        ("uNotAThing", ParamValue::Number(4.0)),
        ("roughness", ParamValue::Flag(true)),
        ("wireframe", ParamValue::Number(1.0)),
        ("metalness", ParamValue::Text("shiny")),
    ],
}];

#[test]
fn unknown_and_mistyped_keys_are_skipped() {
    let mut presets = PRESETS.to_vec();
    presets.extend_from_slice(&ODD_KEYS);
    let mut c = TransitionController::new(presets, TransitionConfig::default()).unwrap();
    let before = c.scene().material.clone();

    let applied = c.apply_preset(3, 0.0);
    assert!(applied.tweened.is_empty());
    assert!(c.tweens().is_empty());
    c.tick(2.0);
    assert_eq!(c.scene().material, before);
}

#[test]
fn out_of_range_preset_applies_nothing() {
    let mut c = controller();
    let applied = c.apply_preset(99, 0.0);
    assert!(applied.tweened.is_empty());
    assert!(c.tweens().is_empty());
}

static WIRE: [Preset; 1] = [Preset {
    name: "Wire",
    background: "#000",
    config: &[("wireframe", ParamValue::Flag(true))],
}];

#[test]
fn flags_hold_until_the_tween_completes() {
    let mut presets = PRESETS.to_vec();
    presets.extend_from_slice(&WIRE);
    let mut c = TransitionController::new(presets, TransitionConfig::default()).unwrap();

    c.apply_preset(3, 0.0);
    c.tick(0.99);
    assert!(!c.scene().material.wireframe);
    c.tick(1.0);
    assert!(c.scene().material.wireframe);
}

#[test]
fn preset_numbers_land_exactly_after_transition() {
    let mut c = controller();
    c.on_wheel(100.0, 0.0);
    c.tick(1.0);
    let m = &c.scene().material;
    assert!(approx(m.position_frequency, 0.584));
    assert!(approx(m.position_strength, 0.276));
    assert!(approx(m.small_wave_position_frequency, 0.899));
    assert!(approx(m.small_wave_position_strength, 1.266));
    assert!(approx(m.roughness, 0.0));
    assert!(approx(m.metalness, 1.0));
    assert!(approx(m.env_map_intensity, 2.0));
    assert!(approx(m.transmission, 0.0));
}

#[test]
fn tick_advances_elapsed_time() {
    let mut c = controller();
    c.tick(2.5);
    assert!(approx(c.scene().elapsed, 2.5));
}

#[test]
fn elapsed_time_wraps_after_an_hour() {
    let mut c = controller();
    c.tick(ELAPSED_WRAP_SEC + 2.5);
    assert!(approx(c.scene().elapsed, 2.5));
    c.tick(10.0 * ELAPSED_WRAP_SEC - 1.0);
    assert!((c.scene().elapsed as f64 - (ELAPSED_WRAP_SEC - 1.0)).abs() < 1e-2);
}

#[test]
fn scroll_during_loading_settles_on_matching_background() {
    let mut c = controller();
    assert!(matches!(c.on_wheel(100.0, 0.2), WheelOutcome::Started { to: 1, .. }));

    // Nothing ticks while assets load
    let report = c.on_resources_loaded(3.0);
    assert_eq!(report.committed, Some(1));
    assert_eq!(c.state().current_index, 1);
    assert!(!c.state().is_animating);

    c.tick(3.016);
    c.tick(10.0);
    assert_eq!(c.state().current_index, 1);
    assert!(!c.state().is_animating);
    assert_eq!(c.scene().background, Rgb::from_hex("#5300B1").unwrap());
    assert_eq!(c.scene().material.map, "purple-rain");
}

#[test]
fn resources_ready_mid_transition_keeps_its_background_tween() {
    let mut c = controller();
    c.on_wheel(100.0, 2.5);
    let report = c.on_resources_loaded(3.0);
    assert_eq!(report.committed, None);
    assert!(c.state().is_animating);

    c.tick(3.5);
    assert_eq!(c.state().current_index, 1);
    assert_eq!(c.scene().background, Rgb::from_hex("#5300B1").unwrap());
}

#[test]
fn commit_is_reported_by_exactly_one_tick() {
    let mut c = controller();
    c.on_wheel(100.0, 0.0);
    let commits: Vec<usize> = [0.3, 0.7, 1.0, 1.2, 2.0]
        .into_iter()
        .filter_map(|t| c.tick(t).committed)
        .collect();
    assert_eq!(commits, vec![1]);
}

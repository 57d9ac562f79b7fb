//! Scroll-driven preset transitions.
//!
//! The controller owns the scene state and every tween that mutates it. A
//! wheel input either starts one transition or is rejected outright; the
//! transition ends only when the label progress tween completes.

use super::color::Rgb;
use super::constants::*;
use super::ease::Ease;
use super::error::ShowcaseError;
use super::material::{flag_param_index, numeric_param_index};
use super::presets::{ParamValue, Preset, MAP_KEY};
use super::scene::SceneState;
use super::timers::{TimerId, Timers};
use super::tween::{Channel, Field, Tween, Tweener};
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct TransitionConfig {
    pub scroll_threshold: f64,
    pub cooldown_sec: f64,
    pub duration_sec: f64,
    pub texture_swap_delay_sec: f64,
    pub progress_midpoint: f32,
    pub incoming_offset_x: f32,
    pub outgoing_offset_x: f32,
    pub spin_radians: f32,
    pub ease: Ease,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: SCROLL_THRESHOLD,
            cooldown_sec: SCROLL_COOLDOWN_SEC,
            duration_sec: TRANSITION_DURATION_SEC,
            texture_swap_delay_sec: TEXTURE_SWAP_DELAY_SEC,
            progress_midpoint: PROGRESS_MIDPOINT,
            incoming_offset_x: INCOMING_LABEL_OFFSET_X,
            outgoing_offset_x: OUTGOING_LABEL_OFFSET_X,
            spin_radians: BLOB_SPIN_RADIANS,
            ease: Ease::Power2InOut,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionState {
    pub current_index: usize,
    pub is_animating: bool,
    pub last_transition_at: Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    Animating,
    BelowThreshold,
    Cooldown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelOutcome {
    Rejected(RejectReason),
    Started {
        from: usize,
        to: usize,
        direction: i32,
    },
}

/// Completion tokens carried by controller tweens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Commit { next: usize },
}

/// What changed during one `tick`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub committed: Option<usize>,
    pub texture_swap: Option<&'static str>,
}

/// Result of applying a preset's parameters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppliedPreset {
    /// Config keys that got a tween, in config order.
    pub tweened: SmallVec<[&'static str; 16]>,
    pub texture_swap: Option<TimerId>,
}

/// `(current + direction + len) mod len`, for any sign of `direction`.
#[inline]
pub fn next_index(current: usize, direction: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (current as i64 + direction as i64 + len).rem_euclid(len) as usize
}

pub struct TransitionController {
    presets: Vec<Preset>,
    backgrounds: Vec<Rgb>,
    config: TransitionConfig,
    state: TransitionState,
    scene: SceneState,
    tweens: Tweener<Completion>,
    timers: Timers<&'static str>,
    pending_swap: Option<TimerId>,
}

impl TransitionController {
    pub fn new(presets: Vec<Preset>, config: TransitionConfig) -> Result<Self, ShowcaseError> {
        if presets.is_empty() {
            return Err(ShowcaseError::NoPresets);
        }
        let backgrounds = presets
            .iter()
            .map(Preset::background_rgb)
            .collect::<Result<Vec<_>, _>>()?;
        let initial_bg = Rgb::from_hex(INITIAL_BACKGROUND_HEX)?;
        let scene = SceneState::new(&presets, initial_bg);
        Ok(Self {
            presets,
            backgrounds,
            config,
            state: TransitionState::default(),
            scene,
            tweens: Tweener::new(),
            timers: Timers::new(),
            pending_swap: None,
        })
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn tweens(&self) -> &Tweener<Completion> {
        &self.tweens
    }

    pub fn pending_texture_swap(&self) -> Option<TimerId> {
        self.pending_swap
    }

    pub fn current_preset(&self) -> &Preset {
        &self.presets[self.state.current_index]
    }

    /// Fade the background in to the current preset once assets are ready.
    ///
    /// Input is live while assets load but nothing ticks, so a transition
    /// started then is caught up first. One still in flight already tweens
    /// the background toward its destination and is left alone.
    pub fn on_resources_loaded(&mut self, now: f64) -> FrameReport {
        let report = self.tick(now);
        if self.state.is_animating {
            log::info!("[transition] resources ready mid-transition");
            return report;
        }
        let bg = self.backgrounds[self.state.current_index];
        self.tween_background(bg, now);
        log::info!(
            "[transition] resources ready, showing {:?}",
            self.current_preset().name
        );
        report
    }

    pub fn on_wheel(&mut self, delta_y: f64, now: f64) -> WheelOutcome {
        if self.state.is_animating {
            return WheelOutcome::Rejected(RejectReason::Animating);
        }
        // NaN and zero never count as a scroll
        if delta_y == 0.0 || !(delta_y.abs() >= self.config.scroll_threshold) {
            return WheelOutcome::Rejected(RejectReason::BelowThreshold);
        }
        if let Some(last) = self.state.last_transition_at {
            if now - last < self.config.cooldown_sec {
                return WheelOutcome::Rejected(RejectReason::Cooldown);
            }
        }

        let direction = if delta_y > 0.0 { 1 } else { -1 };
        let from = self.state.current_index;
        let to = next_index(from, direction, self.presets.len());
        self.state.is_animating = true;
        self.state.last_transition_at = Some(now);
        self.begin(from, to, direction, now);
        WheelOutcome::Started {
            from,
            to,
            direction,
        }
    }

    fn begin(&mut self, from: usize, next: usize, direction: i32, now: f64) {
        let d = direction as f32;
        let cfg = self.config.clone();
        log::info!(
            "[transition] {} -> {} ({:?})",
            self.presets[from].name,
            self.presets[next].name,
            self.presets[next].background
        );

        self.scene.text_direction = d;
        Field::LabelScale(next).write(&mut self.scene, 1.0);
        Field::LabelX(next).write(&mut self.scene, d * cfg.incoming_offset_x);

        self.start_tween(
            Tween::new(Field::TextProgress, cfg.progress_midpoint, now, cfg.duration_sec)
                .on_complete(Completion::Commit { next }),
        );
        self.start_tween(Tween::new(
            Field::LabelX(from),
            -d * cfg.outgoing_offset_x,
            now,
            cfg.duration_sec,
        ));
        let spin_to = self.scene.blob_rotation_y - d * cfg.spin_radians;
        self.start_tween(Tween::new(
            Field::BlobRotationY,
            spin_to,
            now,
            cfg.duration_sec,
        ));
        self.start_tween(Tween::new(Field::LabelX(next), 0.0, now, cfg.duration_sec));
        self.tween_background(self.backgrounds[next], now);
        self.apply_preset(next, now);
    }

    /// Tween every recognized parameter of preset `index` toward its value
    /// and schedule the color map swap. Unknown keys are skipped.
    pub fn apply_preset(&mut self, index: usize, now: f64) -> AppliedPreset {
        let mut applied = AppliedPreset::default();
        let Some(preset) = self.presets.get(index).copied() else {
            return applied;
        };
        // A swap still waiting from an earlier preset must not land after this one's
        if let Some(stale) = self.pending_swap.take() {
            if self.timers.cancel(stale) {
                log::debug!("[transition] cancelled stale texture swap");
            }
        }
        let duration = self.config.duration_sec;
        for &(key, value) in preset.config {
            match value {
                ParamValue::Number(v) => {
                    if let Some(i) = numeric_param_index(key) {
                        self.start_tween(Tween::new(Field::Material(i), v, now, duration));
                        applied.tweened.push(key);
                    }
                }
                ParamValue::Flag(v) => {
                    if let Some(i) = flag_param_index(key) {
                        let target = if v { 1.0 } else { 0.0 };
                        self.start_tween(Tween::new(Field::Flag(i), target, now, duration));
                        applied.tweened.push(key);
                    }
                }
                ParamValue::Text(name) if key == MAP_KEY => {
                    let id = self
                        .timers
                        .schedule(now + self.config.texture_swap_delay_sec, name);
                    self.pending_swap = Some(id);
                    applied.texture_swap = Some(id);
                }
                ParamValue::Text(_) => {}
            }
        }
        applied
    }

    /// Advance tweens and timers to `now` (seconds since start).
    pub fn tick(&mut self, now: f64) -> FrameReport {
        let mut report = FrameReport::default();
        self.scene.elapsed = now.rem_euclid(ELAPSED_WRAP_SEC) as f32;

        for done in self.tweens.update(now, &mut self.scene) {
            match done {
                Completion::Commit { next } => {
                    self.state.current_index = next;
                    self.state.is_animating = false;
                    self.scene.text_progress = 0.0;
                    if !self.tweens.is_active(Field::BlobRotationY) {
                        self.scene.blob_rotation_y = self.scene.blob_rotation_y.rem_euclid(TAU);
                    }
                    report.committed = Some(next);
                    log::info!("[transition] settled on {:?}", self.presets[next].name);
                }
            }
        }

        for name in self.timers.drain_due(now) {
            self.scene.material.map = name;
            report.texture_swap = Some(name);
        }
        if let Some(id) = self.pending_swap {
            if !self.timers.is_pending(id) {
                self.pending_swap = None;
            }
        }
        report
    }

    fn tween_background(&mut self, target: Rgb, now: f64) {
        let duration = self.config.duration_sec;
        for (channel, v) in [
            (Channel::R, target.r),
            (Channel::G, target.g),
            (Channel::B, target.b),
        ] {
            self.start_tween(Tween::new(Field::Background(channel), v, now, duration));
        }
    }

    fn start_tween(&mut self, tween: Tween<Completion>) {
        let tween = tween.ease(self.config.ease);
        self.tweens.start(&self.scene, tween);
    }
}

//! Frame-driven tweening of scene fields.
//!
//! A tween captures the current value of its field when started and writes
//! the eased value on every `update`. Tweens never cancel each other: if two
//! target the same field, the one started last is written last.

use super::ease::Ease;
use super::material::{FLAG_PARAMS, NUMERIC_PARAMS};
use super::scene::SceneState;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    R,
    G,
    B,
}

/// Addressable scalar in `SceneState`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    TextProgress,
    TextDirection,
    BlobRotationY,
    LabelX(usize),
    LabelScale(usize),
    Background(Channel),
    /// Index into `NUMERIC_PARAMS`.
    Material(usize),
    /// Index into `FLAG_PARAMS`; 0.0 is false, anything else true.
    Flag(usize),
}

impl Field {
    pub fn read(self, scene: &SceneState) -> f32 {
        match self {
            Field::TextProgress => scene.text_progress,
            Field::TextDirection => scene.text_direction,
            Field::BlobRotationY => scene.blob_rotation_y,
            Field::LabelX(i) => scene.labels.get(i).map_or(0.0, |l| l.position.x),
            Field::LabelScale(i) => scene.labels.get(i).map_or(0.0, |l| l.scale),
            Field::Background(Channel::R) => scene.background.r,
            Field::Background(Channel::G) => scene.background.g,
            Field::Background(Channel::B) => scene.background.b,
            Field::Material(i) => NUMERIC_PARAMS
                .get(i)
                .map_or(0.0, |p| (p.get)(&scene.material)),
            Field::Flag(i) => FLAG_PARAMS.get(i).map_or(0.0, |p| {
                if (p.get)(&scene.material) {
                    1.0
                } else {
                    0.0
                }
            }),
        }
    }

    pub fn write(self, scene: &mut SceneState, v: f32) {
        match self {
            Field::TextProgress => scene.text_progress = v,
            Field::TextDirection => scene.text_direction = v,
            Field::BlobRotationY => scene.blob_rotation_y = v,
            Field::LabelX(i) => {
                if let Some(l) = scene.labels.get_mut(i) {
                    l.position.x = v;
                }
            }
            Field::LabelScale(i) => {
                if let Some(l) = scene.labels.get_mut(i) {
                    l.scale = v;
                }
            }
            Field::Background(Channel::R) => scene.background.r = v,
            Field::Background(Channel::G) => scene.background.g = v,
            Field::Background(Channel::B) => scene.background.b = v,
            Field::Material(i) => {
                if let Some(p) = NUMERIC_PARAMS.get(i) {
                    (p.set)(&mut scene.material, v);
                }
            }
            Field::Flag(i) => {
                if let Some(p) = FLAG_PARAMS.get(i) {
                    (p.set)(&mut scene.material, v != 0.0);
                }
            }
        }
    }

    /// Discrete fields hold their value and jump to the target on completion.
    #[inline]
    pub fn is_discrete(self) -> bool {
        matches!(self, Field::Flag(_))
    }
}

#[derive(Clone, Debug)]
pub struct Tween<C> {
    pub field: Field,
    pub from: f32,
    pub to: f32,
    pub start: f64,
    pub duration: f64,
    pub ease: Ease,
    pub on_complete: Option<C>,
}

impl<C> Tween<C> {
    /// Tween toward `to`, starting at `start`. `from` is captured by
    /// `Tweener::start`.
    pub fn new(field: Field, to: f32, start: f64, duration: f64) -> Self {
        Self {
            field,
            from: 0.0,
            to,
            start,
            duration,
            ease: Ease::default(),
            on_complete: None,
        }
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn on_complete(mut self, token: C) -> Self {
        self.on_complete = Some(token);
        self
    }

    /// Write this frame's value; returns true once finished.
    fn step(&self, now: f64, scene: &mut SceneState) -> bool {
        let elapsed = now - self.start;
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (elapsed / self.duration).clamp(0.0, 1.0) as f32
        };
        let finished = t >= 1.0;
        if finished {
            self.field.write(scene, self.to);
        } else if !self.field.is_discrete() {
            let k = self.ease.apply(t);
            self.field.write(scene, self.from + (self.to - self.from) * k);
        }
        finished
    }
}

pub struct Tweener<C> {
    active: Vec<Tween<C>>,
}

impl<C> Default for Tweener<C> {
    fn default() -> Self {
        Self { active: Vec::new() }
    }
}

impl<C> Tweener<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `tween`, capturing the field's current value as its origin.
    pub fn start(&mut self, scene: &SceneState, mut tween: Tween<C>) {
        tween.from = tween.field.read(scene);
        self.active.push(tween);
    }

    /// Advance all tweens to `now`; returns completion tokens of the tweens
    /// that finished, in scheduling order.
    pub fn update(&mut self, now: f64, scene: &mut SceneState) -> SmallVec<[C; 2]> {
        let mut done = SmallVec::new();
        self.active.retain_mut(|t| {
            let finished = t.step(now, scene);
            if finished {
                if let Some(token) = t.on_complete.take() {
                    done.push(token);
                }
            }
            !finished
        });
        done
    }

    pub fn is_active(&self, field: Field) -> bool {
        self.active.iter().any(|t| t.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tween<C>> {
        self.active.iter()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Easing curves available to tweens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-in-out: slow start, fast middle, slow end.
    #[default]
    Power2InOut,
}

impl Ease {
    /// Map normalized time `t` to eased progress. `t` is clamped to \[0, 1\].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2InOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
        }
    }
}

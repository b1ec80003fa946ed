use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing function shaping how a width curve moves between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant rate (no easing).
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow start.
    CubicIn,
    /// Stronger slow end.
    CubicOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Smooth sine-wave blend.
    SineInOut,
    /// Dramatic fast start.
    ExpoOut,
}

impl Easing {
    /// Apply the easing function to a normalized parameter `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Easing::ExpoOut => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Width-over-length function, sampled at t in [0, 1] along point order.
///
/// A pure evaluatable value: drivers sample it every tick without any
/// shared mutable state behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WidthCurve {
    /// Same extrusion radius along the whole chain.
    Constant(f32),
    /// Eased blend from the width at t=0 to the width at t=1.
    Taper { from: f32, to: f32, easing: Easing },
    /// Symmetric profile: `edge` at both ends, `peak` at the middle.
    Pulse { edge: f32, peak: f32, easing: Easing },
}

impl WidthCurve {
    /// Evaluate the curve at `t` in [0, 1].
    pub fn sample(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            WidthCurve::Constant(w) => w,
            WidthCurve::Taper { from, to, easing } => lerp(from, to, easing.apply(t)),
            WidthCurve::Pulse { edge, peak, easing } => {
                // fold [0,1] onto [0,1] with the crest at t=0.5
                let folded = 1.0 - (2.0 * t - 1.0).abs();
                lerp(edge, peak, easing.apply(folded))
            }
        }
    }
}

impl Default for WidthCurve {
    fn default() -> Self {
        WidthCurve::Constant(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
    }

    #[test]
    fn quad_out_faster_start() {
        let mid = Easing::QuadOut.apply(0.5);
        assert!(mid > 0.5, "QuadOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn apply_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn constant_ignores_t() {
        let c = WidthCurve::Constant(3.0);
        assert_eq!(c.sample(0.0), 3.0);
        assert_eq!(c.sample(0.7), 3.0);
    }

    #[test]
    fn taper_interpolates() {
        let c = WidthCurve::Taper { from: 2.0, to: 0.0, easing: Easing::Linear };
        assert!((c.sample(0.5) - 1.0).abs() < 1e-6);
        assert_eq!(c.sample(0.0), 2.0);
        assert_eq!(c.sample(1.0), 0.0);
    }

    #[test]
    fn pulse_is_symmetric() {
        let c = WidthCurve::Pulse { edge: 0.0, peak: 4.0, easing: Easing::Linear };
        assert!((c.sample(0.25) - c.sample(0.75)).abs() < 1e-6);
        assert!((c.sample(0.5) - 4.0).abs() < 1e-6);
        assert!((c.sample(0.0) - 0.0).abs() < 1e-6);
    }
}

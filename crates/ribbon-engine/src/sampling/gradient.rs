use serde::{Deserialize, Serialize};

use crate::api::types::Rgba;

/// Color-over-length gradient, sampled at t in [0, 1] along point order.
///
/// Stops are kept sorted by position; sampling clamps outside the first and
/// last stop and linearly interpolates between neighbors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGradient {
    stops: Vec<(f32, Rgba)>,
}

impl ColorGradient {
    /// Gradient from explicit stops. Positions are clamped to [0, 1] and
    /// sorted; an empty stop list falls back to solid white.
    pub fn new(mut stops: Vec<(f32, Rgba)>) -> Self {
        if stops.is_empty() {
            return Self::solid(Rgba::WHITE);
        }
        for (t, _) in &mut stops {
            *t = t.clamp(0.0, 1.0);
        }
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    /// Single color along the whole chain.
    pub fn solid(color: Rgba) -> Self {
        Self { stops: vec![(0.0, color)] }
    }

    /// Full color at the head fading to transparent at the tail.
    pub fn fade_out(color: Rgba) -> Self {
        Self {
            stops: vec![(0.0, color), (1.0, color.with_alpha(0.0))],
        }
    }

    /// Evaluate the gradient at `t` in [0, 1].
    pub fn sample(&self, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        // deserialized gradients can arrive with no stops at all
        let first = match self.stops.first() {
            Some(first) => *first,
            None => return Rgba::WHITE,
        };
        if t <= first.0 {
            return first.1;
        }
        for pair in self.stops.windows(2) {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            if t <= t1 {
                let span = t1 - t0;
                if span <= f32::EPSILON {
                    return c1;
                }
                return c0.lerp(c1, (t - t0) / span);
            }
        }
        self.stops[self.stops.len() - 1].1
    }

    pub fn stops(&self) -> &[(f32, Rgba)] {
        &self.stops
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self::solid(Rgba::WHITE)
    }
}

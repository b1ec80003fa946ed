//! Driver configuration, loadable from JSON.
//!
//! All numeric fields are user-tunable; out-of-range values are clamped by
//! `sanitize`, never rejected. Missing JSON fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::api::types::SpaceMode;
use crate::sampling::{ColorGradient, WidthCurve};

/// Smallest accepted minimum-vertex-distance. Anything below this would
/// record a new trail point on nearly every tick.
pub const MIN_DISTANCE_FLOOR: f32 = 0.01;

/// Smallest usable trail ring. One slot is a sentinel, so 3 slots is the
/// minimum that still yields a drawable segment pair.
pub const MIN_TRAIL_POINTS: usize = 3;

fn default_max_points() -> usize {
    64
}

fn default_lifetime() -> f32 {
    2.0
}

fn default_min_distance() -> f32 {
    0.1
}

fn default_true() -> bool {
    true
}

fn default_width_multiplier() -> f32 {
    1.0
}

/// Configuration for a trail driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailConfig {
    /// Ring capacity in points. One slot is reserved as a sentinel.
    #[serde(default = "default_max_points")]
    pub max_points: usize,
    /// Seconds a recorded point stays alive once it becomes the oldest.
    #[serde(default = "default_lifetime")]
    pub lifetime: f32,
    /// Minimum travel distance before a new point is recorded.
    #[serde(default = "default_min_distance")]
    pub min_vertex_distance: f32,
    /// When the ring is full, discard the oldest point to admit a new one.
    /// When false, new points are refused until a slot frees up.
    #[serde(default = "default_true")]
    pub steal_oldest: bool,
    /// Signal the owner for removal on the tick the trail empties out.
    #[serde(default)]
    pub autodestruct: bool,
    /// Slide the oldest point toward its neighbor as it burns down,
    /// instead of letting it pop out of existence.
    #[serde(default = "default_true")]
    pub smooth_interpolation: bool,
    /// Scales every sampled width.
    #[serde(default = "default_width_multiplier")]
    pub width_multiplier: f32,
    /// Width-over-length function.
    #[serde(default)]
    pub width: WidthCurve,
    /// Color-over-length gradient.
    #[serde(default)]
    pub color: ColorGradient,
    /// Coordinate space of the positions fed to `tick`.
    #[serde(default)]
    pub space: SpaceMode,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_points: default_max_points(),
            lifetime: default_lifetime(),
            min_vertex_distance: default_min_distance(),
            steal_oldest: true,
            autodestruct: false,
            smooth_interpolation: true,
            width_multiplier: default_width_multiplier(),
            width: WidthCurve::default(),
            color: ColorGradient::default(),
            space: SpaceMode::default(),
        }
    }
}

impl TrailConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    // -- Builder pattern --

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_min_vertex_distance(mut self, distance: f32) -> Self {
        self.min_vertex_distance = distance;
        self
    }

    pub fn with_steal_oldest(mut self, steal: bool) -> Self {
        self.steal_oldest = steal;
        self
    }

    pub fn with_autodestruct(mut self, autodestruct: bool) -> Self {
        self.autodestruct = autodestruct;
        self
    }

    pub fn with_smooth_interpolation(mut self, smooth: bool) -> Self {
        self.smooth_interpolation = smooth;
        self
    }

    pub fn with_width_multiplier(mut self, multiplier: f32) -> Self {
        self.width_multiplier = multiplier;
        self
    }

    pub fn with_width(mut self, width: WidthCurve) -> Self {
        self.width = width;
        self
    }

    pub fn with_color(mut self, color: ColorGradient) -> Self {
        self.color = color;
        self
    }

    pub fn with_space(mut self, space: SpaceMode) -> Self {
        self.space = space;
        self
    }

    /// Clamp all tunables into their valid ranges.
    pub fn sanitize(&mut self) {
        if self.max_points < MIN_TRAIL_POINTS {
            log::debug!(
                "trail max_points {} clamped to {}",
                self.max_points,
                MIN_TRAIL_POINTS
            );
            self.max_points = MIN_TRAIL_POINTS;
        }
        if self.lifetime < 0.0 {
            log::debug!("trail lifetime {} clamped to 0", self.lifetime);
            self.lifetime = 0.0;
        }
        if self.min_vertex_distance < MIN_DISTANCE_FLOOR {
            log::debug!(
                "trail min_vertex_distance {} clamped to {}",
                self.min_vertex_distance,
                MIN_DISTANCE_FLOOR
            );
            self.min_vertex_distance = MIN_DISTANCE_FLOOR;
        }
        if self.width_multiplier < 0.0 {
            self.width_multiplier = 0.0;
        }
    }
}

/// Configuration for a line driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineConfig {
    /// Connect the last point back to the first.
    #[serde(default)]
    pub looped: bool,
    /// Scales every sampled width.
    #[serde(default = "default_width_multiplier")]
    pub width_multiplier: f32,
    /// Width-over-length function.
    #[serde(default)]
    pub width: WidthCurve,
    /// Color-over-length gradient.
    #[serde(default)]
    pub color: ColorGradient,
    /// Coordinate space of the point list.
    #[serde(default)]
    pub space: SpaceMode,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            looped: false,
            width_multiplier: default_width_multiplier(),
            width: WidthCurve::default(),
            color: ColorGradient::default(),
            space: SpaceMode::default(),
        }
    }
}

impl LineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    // -- Builder pattern --

    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    pub fn with_width_multiplier(mut self, multiplier: f32) -> Self {
        self.width_multiplier = multiplier;
        self
    }

    pub fn with_width(mut self, width: WidthCurve) -> Self {
        self.width = width;
        self
    }

    pub fn with_color(mut self, color: ColorGradient) -> Self {
        self.color = color;
        self
    }

    pub fn with_space(mut self, space: SpaceMode) -> Self {
        self.space = space;
        self
    }

    /// Clamp all tunables into their valid ranges.
    pub fn sanitize(&mut self) {
        if self.width_multiplier < 0.0 {
            self.width_multiplier = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_trail_config() {
        let c = TrailConfig::default();
        assert_eq!(c.max_points, 64);
        assert!(c.steal_oldest);
        assert!(!c.autodestruct);
    }

    #[test]
    fn builder_pattern() {
        let c = TrailConfig::default()
            .with_max_points(8)
            .with_lifetime(5.0)
            .with_steal_oldest(false)
            .with_autodestruct(true);
        assert_eq!(c.max_points, 8);
        assert_eq!(c.lifetime, 5.0);
        assert!(!c.steal_oldest);
        assert!(c.autodestruct);
    }

    #[test]
    fn sanitize_clamps_to_floors() {
        let mut c = TrailConfig::default()
            .with_max_points(1)
            .with_lifetime(-2.0)
            .with_min_vertex_distance(0.0);
        c.sanitize();
        assert_eq!(c.max_points, MIN_TRAIL_POINTS);
        assert_eq!(c.lifetime, 0.0);
        assert_eq!(c.min_vertex_distance, MIN_DISTANCE_FLOOR);
    }

    #[test]
    fn trail_config_from_json_with_defaults() {
        let c = TrailConfig::from_json(r#"{ "max_points": 16, "lifetime": 3.5 }"#).unwrap();
        assert_eq!(c.max_points, 16);
        assert_eq!(c.lifetime, 3.5);
        // unspecified fields fall back to defaults
        assert_eq!(c.min_vertex_distance, 0.1);
        assert!(c.smooth_interpolation);
    }

    #[test]
    fn line_config_from_json() {
        let c = LineConfig::from_json(r#"{ "looped": true, "width_multiplier": 2.0 }"#).unwrap();
        assert!(c.looped);
        assert_eq!(c.width_multiplier, 2.0);
    }

    #[test]
    fn width_curve_round_trips_through_json() {
        let c = LineConfig::default().with_width(WidthCurve::Constant(0.5));
        let json = serde_json::to_string(&c).unwrap();
        let back = LineConfig::from_json(&json).unwrap();
        assert_eq!(back.width, WidthCurve::Constant(0.5));
    }
}

pub mod api;
pub mod chain;
pub mod drivers;
pub mod sampling;

// Re-export key types at crate root for convenience
pub use api::config::{LineConfig, TrailConfig, MIN_DISTANCE_FLOOR, MIN_TRAIL_POINTS};
pub use api::types::{Rgba, SpaceMode};
pub use chain::{ChainBuffer, ChainElement, ChainVertex, DirtyFlags, ElementKind};
pub use drivers::{advance_frame, ChainDriver, Driver, LineDriver, TrailDriver};
pub use sampling::{lerp, ColorGradient, Easing, WidthCurve};

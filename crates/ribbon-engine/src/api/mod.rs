pub mod config;
pub mod types;

pub use config::{LineConfig, TrailConfig};
pub use types::{Rgba, SpaceMode};

//! Drivers translating domain points into chain element updates.
//!
//! Both drivers implement the same small capability interface over one
//! exclusively-owned `ChainBuffer`; there is no shared base type. The host
//! scheduler owns the per-frame call; nothing here registers itself into
//! any implicit lifecycle.

pub mod line;
pub mod trail;

pub use line::LineDriver;
pub use trail::TrailDriver;

use glam::Vec3;

use crate::chain::ChainBuffer;

/// Capability interface shared by the line and trail drivers.
pub trait ChainDriver {
    /// Element capacity this driver currently needs from its chain.
    fn required_capacity(&self) -> usize;

    /// Re-derive every chain element from driver state, reallocating the
    /// chain if the required capacity changed.
    fn rebuild(&mut self);

    /// Advance one frame. `position` is the tracked point for trail mode
    /// and ignored by the passive line mode. Returns false only when the
    /// driver asks its owner to remove it (trail autodestruct).
    fn tick(&mut self, dt: f32, position: Vec3) -> bool;

    fn chain(&self) -> &ChainBuffer;

    fn chain_mut(&mut self) -> &mut ChainBuffer;
}

/// Per-frame update: tick the driver, then commit pending chain changes.
///
/// Call this once per rendered frame, as late as possible in the frame's
/// update order, so movement applied earlier in the same frame is reflected
/// in the committed geometry. Returns the driver's liveness verdict.
pub fn advance_frame(driver: &mut dyn ChainDriver, dt: f32, position: Vec3) -> bool {
    let alive = driver.tick(dt, position);
    driver.chain_mut().refresh();
    alive
}

/// Variant-tagged driver for hosts that store lines and trails uniformly.
pub enum Driver {
    Line(LineDriver),
    Trail(TrailDriver),
}

impl Driver {
    pub fn line(config: crate::api::config::LineConfig) -> Self {
        Driver::Line(LineDriver::new(config))
    }

    pub fn trail(config: crate::api::config::TrailConfig) -> Self {
        Driver::Trail(TrailDriver::new(config))
    }

    pub fn as_line_mut(&mut self) -> Option<&mut LineDriver> {
        match self {
            Driver::Line(driver) => Some(driver),
            Driver::Trail(_) => None,
        }
    }

    pub fn as_trail_mut(&mut self) -> Option<&mut TrailDriver> {
        match self {
            Driver::Trail(driver) => Some(driver),
            Driver::Line(_) => None,
        }
    }
}

impl ChainDriver for Driver {
    fn required_capacity(&self) -> usize {
        match self {
            Driver::Line(driver) => driver.required_capacity(),
            Driver::Trail(driver) => driver.required_capacity(),
        }
    }

    fn rebuild(&mut self) {
        match self {
            Driver::Line(driver) => driver.rebuild(),
            Driver::Trail(driver) => driver.rebuild(),
        }
    }

    fn tick(&mut self, dt: f32, position: Vec3) -> bool {
        match self {
            Driver::Line(driver) => driver.tick(dt, position),
            Driver::Trail(driver) => driver.tick(dt, position),
        }
    }

    fn chain(&self) -> &ChainBuffer {
        match self {
            Driver::Line(driver) => driver.chain(),
            Driver::Trail(driver) => driver.chain(),
        }
    }

    fn chain_mut(&mut self) -> &mut ChainBuffer {
        match self {
            Driver::Line(driver) => driver.chain_mut(),
            Driver::Trail(driver) => driver.chain_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TrailConfig;

    #[test]
    fn advance_frame_commits_geometry() {
        let config = TrailConfig::default().with_min_vertex_distance(1.0);
        let mut driver = TrailDriver::new(config);

        advance_frame(&mut driver, 0.016, Vec3::ZERO);
        let generation = driver.chain().generation();

        // movement past the threshold records a point and commits a mesh
        let alive = advance_frame(&mut driver, 0.016, Vec3::new(2.0, 0.0, 0.0));
        assert!(alive);
        assert!(driver.chain().generation() > generation);
    }

    #[test]
    fn tagged_driver_dispatches_by_variant() {
        let mut driver = Driver::trail(TrailConfig::default().with_min_vertex_distance(1.0));
        assert!(driver.as_line_mut().is_none());
        advance_frame(&mut driver, 0.016, Vec3::ZERO);
        advance_frame(&mut driver, 0.016, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(driver.as_trail_mut().unwrap().occupancy(), 1);
    }

    #[test]
    fn advance_frame_idle_line_is_noop() {
        let mut driver = LineDriver::new(Default::default());
        driver.set_points(vec![Vec3::ZERO, Vec3::X]);
        advance_frame(&mut driver, 0.016, Vec3::ZERO);
        let generation = driver.chain().generation();

        // passive driver, no mutations: nothing to commit
        advance_frame(&mut driver, 0.016, Vec3::ZERO);
        assert_eq!(driver.chain().generation(), generation);
    }
}

//! Line mode: a caller-owned ordered point list, optionally closed into a
//! loop, lowered onto the chain as `2N - 1` elements (`2N` when looped).

use glam::Vec3;

use crate::api::config::LineConfig;
use crate::chain::{ChainBuffer, DirtyFlags};
use crate::drivers::ChainDriver;

/// Driver for fixed point lists. Passive: geometry changes only through
/// explicit mutation calls, never in `tick`.
pub struct LineDriver {
    config: LineConfig,
    points: Vec<Vec3>,
    chain: ChainBuffer,
}

impl LineDriver {
    pub fn new(mut config: LineConfig) -> Self {
        config.sanitize();
        Self {
            config,
            points: Vec::new(),
            chain: ChainBuffer::new(),
        }
    }

    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Mutable access to the caller-owned point list. Changing its length
    /// here leaves the chain stale until the next mutation call or
    /// `rebuild`; `set_position` detects that and falls back to a rebuild.
    pub fn points_mut(&mut self) -> &mut Vec<Vec3> {
        &mut self.points
    }

    /// Replace the whole point list.
    ///
    /// A changed length forces a full reinitialize; an equal length patches
    /// element positions in place and marks only positions dirty.
    pub fn set_points(&mut self, points: Vec<Vec3>) {
        let previous = self.points.len();
        let size_changed = points.len() != previous;
        self.points = points;
        if size_changed || self.required_capacity() != self.chain.reserved_elements() {
            if size_changed && previous != 0 {
                log::warn!(
                    "line point count changed ({} -> {}); rebuilding chain",
                    previous,
                    self.points.len()
                );
            }
            self.rebuild();
            return;
        }
        if self.points.is_empty() {
            return;
        }
        for i in 0..self.points.len() {
            self.patch_positions(i);
        }
        self.chain.mark_dirty(DirtyFlags::POSITIONS);
    }

    /// Move a single point, rewriting only its endpoint element and the
    /// (up to) two adjacent pipes. Falls back to a full rebuild when the
    /// chain capacity no longer matches the point list.
    pub fn set_position(&mut self, index: usize, pos: Vec3) {
        assert!(
            index < self.points.len(),
            "line point {} out of range ({} points)",
            index,
            self.points.len()
        );
        self.points[index] = pos;
        if self.required_capacity() != self.chain.reserved_elements() {
            log::warn!("line chain capacity out of date; rebuilding");
            self.rebuild();
            return;
        }
        self.patch_positions(index);
        self.chain.mark_dirty(DirtyFlags::POSITIONS);
    }

    /// Open or close the loop. Changes required capacity, so the chain is
    /// fully regenerated.
    pub fn set_looped(&mut self, looped: bool) {
        if self.config.looped != looped {
            self.config.looped = looped;
            self.rebuild();
        }
    }

    /// Sample spacing for width/color evaluation: even steps along point
    /// order, not along arc length.
    fn sample_step(&self) -> f32 {
        let n = self.points.len();
        if self.config.looped && n > 0 {
            1.0 / n as f32
        } else if n > 1 {
            1.0 / (n - 1) as f32
        } else {
            1.0
        }
    }

    /// Rewrite the endpoint element of point `index` and its adjacent
    /// pipes, wrapping across the loop closure.
    fn patch_positions(&mut self, index: usize) {
        let n = self.points.len();
        self.chain.set_point(2 * index, self.points[index]);
        if index > 0 {
            self.chain
                .set_pipe(2 * index - 1, self.points[index - 1], self.points[index]);
        } else if self.config.looped {
            self.chain
                .set_pipe(2 * n - 1, self.points[n - 1], self.points[0]);
        }
        if index + 1 < n {
            self.chain
                .set_pipe(2 * index + 1, self.points[index], self.points[index + 1]);
        } else if self.config.looped {
            self.chain
                .set_pipe(2 * n - 1, self.points[n - 1], self.points[0]);
        }
    }
}

impl ChainDriver for LineDriver {
    fn required_capacity(&self) -> usize {
        let n = self.points.len();
        match n {
            0 => 0,
            _ if self.config.looped => 2 * n,
            _ => 2 * n - 1,
        }
    }

    fn rebuild(&mut self) {
        self.chain.allocate(self.required_capacity());
        let n = self.points.len();
        if n == 0 {
            return;
        }

        let step = self.sample_step();
        let mult = self.config.width_multiplier;
        let sample = |i: usize| {
            let t = i as f32 * step;
            (self.config.width.sample(t) * mult, self.config.color.sample(t))
        };
        for i in 0..n {
            let (width, color) = sample(i);
            self.chain.set_point(2 * i, self.points[i]);
            self.chain.set_size(2 * i, width);
            self.chain.set_color(2 * i, color);
            if i > 0 {
                let (prev_width, prev_color) = sample(i - 1);
                self.chain
                    .set_pipe(2 * i - 1, self.points[i - 1], self.points[i]);
                self.chain.set_size_pair(2 * i - 1, prev_width, width);
                self.chain.set_color_pair(2 * i - 1, prev_color, color);
            }
        }
        if self.config.looped {
            // closing pipe: its far end samples t = 1.0
            let (last_width, last_color) = sample(n - 1);
            let (end_width, end_color) = sample(n);
            self.chain.set_pipe(2 * n - 1, self.points[n - 1], self.points[0]);
            self.chain.set_size_pair(2 * n - 1, last_width, end_width);
            self.chain.set_color_pair(2 * n - 1, last_color, end_color);
        }
        self.chain.mark_dirty(DirtyFlags::ALL);
    }

    fn tick(&mut self, _dt: f32, _position: Vec3) -> bool {
        true
    }

    fn chain(&self) -> &ChainBuffer {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut ChainBuffer {
        &mut self.chain
    }
}

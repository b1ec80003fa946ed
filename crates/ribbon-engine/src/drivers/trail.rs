//! Trail mode: a time-windowed ring of recorded positions following a
//! moving point, aged out past a lifetime.
//!
//! The ring keeps `start`/`end` cursors mod capacity; `start == end` means
//! empty, so one slot stays reserved as a sentinel and at most
//! `capacity - 1` segments are live at once. Each point's lifetime scalar
//! charges up while the point is the newest, is frozen in the middle of
//! the ring, and burns down once the point becomes the oldest.

use glam::Vec3;

use crate::api::config::TrailConfig;
use crate::chain::{ChainBuffer, DirtyFlags};
use crate::drivers::ChainDriver;

#[derive(Debug, Clone, Copy, Default)]
struct TrailPoint {
    pos: Vec3,
    life: f32,
}

/// Driver for motion trails, fed the tracked position once per frame.
pub struct TrailDriver {
    config: TrailConfig,
    points: Vec<TrailPoint>,
    start: usize,
    end: usize,
    /// Last recorded position; the next point is due once the tracked
    /// position has moved `min_vertex_distance` away from it.
    anchor: Option<Vec3>,
    chain: ChainBuffer,
}

impl TrailDriver {
    pub fn new(mut config: TrailConfig) -> Self {
        config.sanitize();
        let points = vec![TrailPoint::default(); config.max_points];
        let chain = ChainBuffer::with_capacity(config.max_points * 2);
        Self {
            config,
            points,
            start: 0,
            end: 0,
            anchor: None,
            chain,
        }
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Number of live segments: `(end - start + capacity) % capacity`.
    pub fn occupancy(&self) -> usize {
        let cap = self.points.len();
        (self.end + cap - self.start) % cap
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of live recorded points, oldest to newest.
    pub fn live_points(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.occupancy() + 1
        }
    }

    /// Live recorded positions ordered oldest to newest.
    pub fn live_positions(&self) -> Vec<Vec3> {
        let cap = self.points.len();
        (0..self.live_points())
            .map(|k| self.points[(self.start + k) % cap].pos)
            .collect()
    }

    /// Drop every recorded point and zero all visible geometry in one
    /// synchronous pass. The next movement starts a fresh trail.
    pub fn clear(&mut self) {
        for slot in 0..self.points.len() {
            self.retire_slot(slot);
        }
        self.start = 0;
        self.end = 0;
        self.anchor = None;
    }

    /// Record `position` as a new point, seeding the ring from the anchor
    /// when it was empty. A full ring either steals the oldest slot or
    /// refuses the point, depending on configuration.
    fn push_point(&mut self, anchor: Vec3, position: Vec3) {
        let cap = self.points.len();
        if self.is_empty() {
            self.points[self.start] = TrailPoint {
                pos: anchor,
                life: self.config.lifetime,
            };
        }
        let next = (self.end + 1) % cap;
        if next == self.start {
            if !self.config.steal_oldest {
                // newest point stays pinned until a slot frees up
                return;
            }
            self.retire_slot(self.start);
            self.start = (self.start + 1) % cap;
        }
        self.end = next;
        self.points[self.end] = TrailPoint { pos: position, life: 0.0 };
        self.anchor = Some(position);
    }

    /// Zero the two elements of `slot`, removing it from visible geometry.
    fn retire_slot(&mut self, slot: usize) {
        self.chain.set_size_pair(2 * slot, 0.0, 0.0);
        self.chain.set_size_pair(2 * slot + 1, 0.0, 0.0);
        self.chain.mark_dirty(DirtyFlags::SIZES);
    }

    /// Expire the oldest point. When this empties the ring the surviving
    /// end slot has no segment left to draw, so it is retired too.
    fn expire_start(&mut self) {
        self.retire_slot(self.start);
        self.start = (self.start + 1) % self.points.len();
        if self.is_empty() {
            self.retire_slot(self.end);
        }
    }

    /// Oldest point's position, slid toward its neighbor in proportion to
    /// the elapsed fraction of its lifetime, so it drains instead of
    /// popping when it expires.
    fn smoothed_start_pos(&self) -> Vec3 {
        let point = &self.points[self.start];
        if !self.config.smooth_interpolation || self.occupancy() == 0 {
            return point.pos;
        }
        let next = &self.points[(self.start + 1) % self.points.len()];
        let lifetime = self.config.lifetime.max(f32::EPSILON);
        let frac = 1.0 - (point.life / lifetime).clamp(0.0, 1.0);
        point.pos.lerp(next.pos, frac)
    }

    /// Recompute the boundary element positions and resample width/color
    /// across every live point. O(occupancy) per tick: the sampling step
    /// is `1 / occupancy`, which changes whenever a point is added or
    /// expires, so every live point is rewritten.
    fn restyle(&mut self) {
        let cap = self.points.len();
        let occ = self.occupancy();
        let step = if occ == 0 { 1.0 } else { 1.0 / occ as f32 };
        let mult = self.config.width_multiplier;

        for k in 0..=occ {
            let slot = (self.start + k) % cap;
            let t = k as f32 * step;
            let width = self.config.width.sample(t) * mult;
            let color = self.config.color.sample(t);
            self.chain.set_size(2 * slot, width);
            self.chain.set_color(2 * slot, color);
            if k < occ {
                let t_next = (k + 1) as f32 * step;
                let width_next = self.config.width.sample(t_next) * mult;
                let color_next = self.config.color.sample(t_next);
                self.chain.set_size_pair(2 * slot + 1, width, width_next);
                self.chain.set_color_pair(2 * slot + 1, color, color_next);
            } else {
                // newest point has no successor yet
                self.chain.set_size_pair(2 * slot + 1, 0.0, 0.0);
            }
        }

        let end_pos = self.points[self.end].pos;
        self.chain.set_point(2 * self.end, end_pos);
        let prev = (self.end + cap - 1) % cap;
        self.chain
            .set_pipe(2 * prev + 1, self.points[prev].pos, end_pos);

        // start side last: with one segment live, its pipe is the same
        // element and the smoothed position must win
        let start_pos = self.smoothed_start_pos();
        self.chain.set_point(2 * self.start, start_pos);
        let next = (self.start + 1) % cap;
        self.chain
            .set_pipe(2 * self.start + 1, start_pos, self.points[next].pos);

        self.chain
            .mark_dirty(DirtyFlags::POSITIONS | DirtyFlags::SIZES | DirtyFlags::COLORS);
    }
}

impl ChainDriver for TrailDriver {
    fn required_capacity(&self) -> usize {
        self.points.len() * 2
    }

    fn rebuild(&mut self) {
        self.chain.allocate(self.required_capacity());
        for slot in 0..self.points.len() {
            self.retire_slot(slot);
        }
        if !self.is_empty() {
            let cap = self.points.len();
            let occ = self.occupancy();
            for k in 0..=occ {
                let slot = (self.start + k) % cap;
                self.chain.set_point(2 * slot, self.points[slot].pos);
                if k < occ {
                    let next = (slot + 1) % cap;
                    self.chain.set_pipe(
                        2 * slot + 1,
                        self.points[slot].pos,
                        self.points[next].pos,
                    );
                }
            }
            self.restyle();
        }
        self.chain.mark_dirty(DirtyFlags::ALL);
    }

    /// One frame of trail maintenance. Returns false exactly once: on the
    /// tick an expiry empties the trail while autodestruct is enabled,
    /// telling the owner to remove the trail object.
    fn tick(&mut self, dt: f32, position: Vec3) -> bool {
        // record a new point once the tracked position moved far enough
        match self.anchor {
            None => self.anchor = Some(position),
            Some(anchor) => {
                let min = self.config.min_vertex_distance;
                if position.distance_squared(anchor) > min * min {
                    self.push_point(anchor, position);
                }
            }
        }

        // newest point charges up toward full lifetime
        if !self.is_empty() {
            let newest = &mut self.points[self.end];
            newest.life = (newest.life + dt).min(self.config.lifetime);
        }

        // oldest point burns down; at most one expiry per tick
        let mut destroyed = false;
        if !self.is_empty() {
            self.points[self.start].life -= dt;
            if self.points[self.start].life <= 0.0 {
                self.expire_start();
                destroyed = self.is_empty() && self.config.autodestruct;
            }
        }

        if !self.is_empty() {
            self.restyle();
        }

        !destroyed
    }

    fn chain(&self) -> &ChainBuffer {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut ChainBuffer {
        &mut self.chain
    }
}

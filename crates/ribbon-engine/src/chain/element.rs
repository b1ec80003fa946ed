use glam::Vec3;

use crate::api::types::Rgba;

bitflags::bitflags! {
    /// Per-category deferred-write markers. Setters are O(1); a refresh
    /// commits every flagged category at once and clears the set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        const POSITIONS = 1 << 0;
        const SIZES = 1 << 1;
        const COLORS = 1 << 2;
        const ALL = Self::POSITIONS.bits() | Self::SIZES.bits() | Self::COLORS.bits();
    }
}

/// Role of an element slot within the chain.
///
/// Slots alternate by convention: even offsets hold point elements, odd
/// offsets hold the pipe connecting a point to its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    /// Billboard quad at a single control point, capping a joint.
    #[default]
    Point,
    /// Quad spanning two consecutive points.
    Pipe,
}

/// One slot in the flat element buffer.
///
/// Point elements use only index 0 of each pair; pipe elements carry
/// start/end values that the quad interpolates across.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChainElement {
    pub kind: ElementKind,
    pub ends: [Vec3; 2],
    pub size: [f32; 2],
    pub color: [Rgba; 2],
}

impl ChainElement {
    /// Turn the slot into a point element at `pos`.
    pub fn set_point(&mut self, pos: Vec3) {
        self.kind = ElementKind::Point;
        self.ends = [pos, pos];
    }

    /// Turn the slot into a pipe element spanning `a -> b`.
    pub fn set_pipe(&mut self, a: Vec3, b: Vec3) {
        self.kind = ElementKind::Pipe;
        self.ends = [a, b];
    }
}

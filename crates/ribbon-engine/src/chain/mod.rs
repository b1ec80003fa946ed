//! Mesh chain buffer: the flat element array behind every line and trail.
//!
//! The buffer owns per-element semantic values (positions, sizes, colors)
//! and materializes them into renderable vertex/index data only on
//! `refresh`. All setters are O(1) writes into the element array; refresh
//! is the single place O(capacity) work happens.

mod element;
pub mod mesh;

pub use element::{ChainElement, DirtyFlags, ElementKind};
pub use mesh::ChainVertex;

use glam::Vec3;

use crate::api::types::Rgba;
use mesh::{push_quad_indices, PIPE_CORNERS, POINT_CORNERS, VERTEX_END};

/// Flat buffer of alternating point/pipe elements with deferred mesh
/// generation. Exclusively owned by one driver; never shared.
pub struct ChainBuffer {
    elements: Vec<ChainElement>,
    vertices: Vec<ChainVertex>,
    indices: Vec<u32>,
    dirty: DirtyFlags,
    generation: u64,
}

impl ChainBuffer {
    /// Empty chain with no reserved elements.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            vertices: Vec::new(),
            indices: Vec::new(),
            dirty: DirtyFlags::empty(),
            generation: 0,
        }
    }

    /// Chain pre-sized to `required_elements`.
    pub fn with_capacity(required_elements: usize) -> Self {
        let mut chain = Self::new();
        chain.allocate(required_elements);
        chain
    }

    /// (Re)allocate storage for exactly `required_elements` elements.
    ///
    /// Idempotent: a repeated call with the current capacity performs no
    /// work. A changed capacity replaces the buffer wholesale; element
    /// values reset and the caller is expected to drive a full rebuild.
    pub fn allocate(&mut self, required_elements: usize) {
        if self.elements.len() == required_elements {
            return;
        }
        self.elements = vec![ChainElement::default(); required_elements];
        self.vertices = vec![ChainVertex::default(); required_elements * 4];
        self.indices = Vec::with_capacity(required_elements * 6);
        for e in 0..required_elements {
            push_quad_indices(&mut self.indices, e);
        }
        self.dirty = DirtyFlags::ALL;
    }

    /// Current allocated capacity in elements. Drivers compare this against
    /// their required capacity to detect when to reallocate.
    pub fn reserved_elements(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    fn slot(&mut self, index: usize) -> &mut ChainElement {
        // out-of-range means the driver forgot to reallocate first
        assert!(
            index < self.elements.len(),
            "chain element {} out of range (capacity {})",
            index,
            self.elements.len()
        );
        &mut self.elements[index]
    }

    /// Make element `index` a point (billboard) at `pos`.
    pub fn set_point(&mut self, index: usize, pos: Vec3) {
        self.slot(index).set_point(pos);
    }

    /// Make element `index` a pipe spanning `a -> b`.
    pub fn set_pipe(&mut self, index: usize, a: Vec3, b: Vec3) {
        self.slot(index).set_pipe(a, b);
    }

    /// Constant extrusion radius across the element.
    pub fn set_size(&mut self, index: usize, size: f32) {
        self.slot(index).size = [size, size];
    }

    /// Interpolated extrusion radius from the element start to its end.
    pub fn set_size_pair(&mut self, index: usize, start: f32, end: f32) {
        self.slot(index).size = [start, end];
    }

    /// Constant color across the element.
    pub fn set_color(&mut self, index: usize, color: Rgba) {
        self.slot(index).color = [color, color];
    }

    /// Interpolated color from the element start to its end.
    pub fn set_color_pair(&mut self, index: usize, start: Rgba, end: Rgba) {
        self.slot(index).color = [start, end];
    }

    /// Flag one or more attribute categories for the next refresh.
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Commit pending element changes into the vertex buffer.
    ///
    /// Rewrites only the flagged attribute categories, bumps the mesh
    /// generation, clears the flags, and returns true. When nothing is
    /// dirty this is a no-op returning false.
    pub fn refresh(&mut self) -> bool {
        if self.dirty.is_empty() {
            return false;
        }
        let write_positions = self.dirty.contains(DirtyFlags::POSITIONS);
        let write_sizes = self.dirty.contains(DirtyFlags::SIZES);
        let write_colors = self.dirty.contains(DirtyFlags::COLORS);

        for (element, quad) in self.elements.iter().zip(self.vertices.chunks_mut(4)) {
            if write_positions {
                match element.kind {
                    ElementKind::Point => {
                        for (v, corner) in quad.iter_mut().zip(POINT_CORNERS) {
                            v.position = element.ends[0].to_array();
                            v.corner = corner;
                        }
                    }
                    ElementKind::Pipe => {
                        for ((v, corner), end) in
                            quad.iter_mut().zip(PIPE_CORNERS).zip(VERTEX_END)
                        {
                            v.position = element.ends[end].to_array();
                            v.corner = corner;
                        }
                    }
                }
            }
            if write_sizes {
                for (v, end) in quad.iter_mut().zip(VERTEX_END) {
                    v.size = match element.kind {
                        ElementKind::Point => element.size[0],
                        ElementKind::Pipe => element.size[end],
                    };
                }
            }
            if write_colors {
                for (v, end) in quad.iter_mut().zip(VERTEX_END) {
                    v.color = match element.kind {
                        ElementKind::Point => element.color[0].to_array(),
                        ElementKind::Pipe => element.color[end].to_array(),
                    };
                }
            }
        }

        self.generation = self.generation.wrapping_add(1);
        self.dirty = DirtyFlags::empty();
        true
    }

    /// Read access to a stored element (its semantic values, not the mesh).
    pub fn element(&self, index: usize) -> &ChainElement {
        &self.elements[index]
    }

    /// Committed vertex data: 4 vertices per element.
    pub fn vertices(&self) -> &[ChainVertex] {
        &self.vertices
    }

    /// Committed index data: 6 indices per element, two CCW triangles.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Bumped on every committing refresh. Backends compare generations to
    /// decide whether to re-upload the buffers.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for ChainBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_is_idempotent() {
        let mut chain = ChainBuffer::with_capacity(5);
        chain.set_point(2, Vec3::X);
        chain.allocate(5);
        // same capacity: stored values must survive
        assert_eq!(chain.element(2).ends[0], Vec3::X);
        assert_eq!(chain.reserved_elements(), 5);
    }

    #[test]
    fn allocate_resize_resets_elements() {
        let mut chain = ChainBuffer::with_capacity(2);
        chain.set_point(1, Vec3::Y);
        chain.allocate(4);
        assert_eq!(chain.reserved_elements(), 4);
        assert_eq!(chain.element(1).ends[0], Vec3::ZERO);
        assert_eq!(chain.dirty(), DirtyFlags::ALL);
    }

    #[test]
    fn refresh_commits_point_quad() {
        let mut chain = ChainBuffer::with_capacity(1);
        chain.set_point(0, Vec3::new(1.0, 2.0, 3.0));
        chain.set_size(0, 0.5);
        chain.mark_dirty(DirtyFlags::ALL);
        assert!(chain.refresh());

        let quad = &chain.vertices()[0..4];
        for v in quad {
            assert_eq!(v.position, [1.0, 2.0, 3.0]);
            assert_eq!(v.size, 0.5);
        }
        // billboard corners span the unit square
        assert_eq!(quad[0].corner, [-1.0, -1.0]);
        assert_eq!(quad[2].corner, [1.0, 1.0]);
    }

    #[test]
    fn refresh_commits_pipe_quad() {
        let mut chain = ChainBuffer::with_capacity(1);
        chain.set_pipe(0, Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0));
        chain.set_size_pair(0, 1.0, 2.0);
        chain.mark_dirty(DirtyFlags::ALL);
        chain.refresh();

        let quad = &chain.vertices()[0..4];
        assert_eq!(quad[0].position, [0.0, 0.0, 0.0]);
        assert_eq!(quad[1].position, [0.0, 0.0, 0.0]);
        assert_eq!(quad[2].position, [4.0, 0.0, 0.0]);
        assert_eq!(quad[3].position, [4.0, 0.0, 0.0]);
        assert_eq!(quad[0].size, 1.0);
        assert_eq!(quad[2].size, 2.0);
    }

    #[test]
    fn refresh_without_dirty_is_noop() {
        let mut chain = ChainBuffer::with_capacity(2);
        chain.set_point(0, Vec3::X);
        chain.mark_dirty(DirtyFlags::ALL);
        assert!(chain.refresh());
        let generation = chain.generation();
        let snapshot = chain.vertices().to_vec();

        // no setter calls in between: second refresh does no work
        assert!(!chain.refresh());
        assert_eq!(chain.generation(), generation);
        assert_eq!(chain.vertices(), &snapshot[..]);
    }

    #[test]
    fn partial_refresh_only_touches_flagged_category() {
        let mut chain = ChainBuffer::with_capacity(1);
        chain.set_point(0, Vec3::X);
        chain.set_size(0, 1.0);
        chain.mark_dirty(DirtyFlags::ALL);
        chain.refresh();

        // move the element but only flag sizes: position must stay stale
        chain.set_point(0, Vec3::Y);
        chain.set_size(0, 2.0);
        chain.mark_dirty(DirtyFlags::SIZES);
        chain.refresh();
        assert_eq!(chain.vertices()[0].position, [1.0, 0.0, 0.0]);
        assert_eq!(chain.vertices()[0].size, 2.0);

        // flagging positions catches the vertex up
        chain.mark_dirty(DirtyFlags::POSITIONS);
        chain.refresh();
        assert_eq!(chain.vertices()[0].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn index_buffer_is_two_triangles_per_element() {
        let chain = ChainBuffer::with_capacity(3);
        assert_eq!(chain.indices().len(), 3 * 6);
        assert_eq!(&chain.indices()[0..6], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(&chain.indices()[6..12], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn setter_past_capacity_panics() {
        let mut chain = ChainBuffer::with_capacity(2);
        chain.set_point(2, Vec3::ZERO);
    }

    #[test]
    fn zero_capacity_refresh_is_defined() {
        let mut chain = ChainBuffer::new();
        assert!(!chain.refresh());
        assert_eq!(chain.vertex_count(), 0);
    }
}

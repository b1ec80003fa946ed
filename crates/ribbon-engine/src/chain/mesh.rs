//! Renderable buffer layout produced by the chain.
//!
//! Every element materializes as one quad of four vertices. The backend
//! consumes the whole chain as a single indexed triangle mesh and extrudes
//! each vertex sideways by `size` using the 2D `corner` offset:
//!
//! - point elements: all four vertices share the element position and the
//!   corners span the unit square, yielding a screen-facing billboard;
//! - pipe elements: vertices 0-1 sit at the start position, 2-3 at the end.
//!   `corner.x` is the parameter along the segment (0 or 1), `corner.y` the
//!   side (-1 or +1) to push perpendicular to the projected segment.

use bytemuck::{Pod, Zeroable};

/// One vertex of an element quad: 10 floats = 40 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ChainVertex {
    /// World- or local-space position (see the driver's `SpaceMode`).
    pub position: [f32; 3],
    /// Quad-corner offset consumed by the backend for extrusion.
    pub corner: [f32; 2],
    /// Extrusion radius at this vertex.
    pub size: f32,
    /// Straight-alpha RGBA.
    pub color: [f32; 4],
}

impl ChainVertex {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Corner offsets for a point (billboard) quad.
pub const POINT_CORNERS: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];

/// Corner offsets for a pipe quad. x = parameter along the segment,
/// y = side. Ordered to share the winding of `POINT_CORNERS`.
pub const PIPE_CORNERS: [[f32; 2]; 4] = [[0.0, -1.0], [0.0, 1.0], [1.0, 1.0], [1.0, -1.0]];

/// Which element end each quad vertex samples (position/size/color index).
pub const VERTEX_END: [usize; 4] = [0, 0, 1, 1];

/// Append the two triangles of the quad at element offset `element` to the
/// index buffer, in fixed CCW winding.
pub fn push_quad_indices(indices: &mut Vec<u32>, element: usize) {
    let base = (element * 4) as u32;
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_10_floats() {
        assert_eq!(std::mem::size_of::<ChainVertex>(), 40);
        assert_eq!(ChainVertex::FLOATS, 10);
    }

    #[test]
    fn quad_indices_reference_own_vertices() {
        let mut indices = Vec::new();
        push_quad_indices(&mut indices, 3);
        assert_eq!(indices.len(), 6);
        assert!(indices.iter().all(|&i| (12..16).contains(&i)));
    }

    #[test]
    fn pipe_corners_span_both_ends() {
        for (corner, end) in PIPE_CORNERS.iter().zip(VERTEX_END) {
            assert_eq!(corner[0] as usize, end);
        }
    }
}

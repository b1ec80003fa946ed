use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// RGBA color with straight (non-premultiplied) alpha.
/// Stored as four floats so it can be written directly into vertex data.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { r: self.r, g: self.g, b: self.b, a }
    }

    /// Componentwise linear interpolation.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Coordinate space the driver's point positions are expressed in.
///
/// `World` leaves recorded points behind in the world as the tracked object
/// moves (the usual trail behavior). `Local` means the caller supplies
/// positions already in the owner's local frame and the rendering backend
/// applies the owner transform at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceMode {
    #[default]
    World,
    Local,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_is_4_floats() {
        assert_eq!(std::mem::size_of::<Rgba>(), 16);
    }

    #[test]
    fn lerp_midpoint() {
        let c = Rgba::TRANSPARENT.lerp(Rgba::WHITE, 0.5);
        assert!((c.r - 0.5).abs() < 1e-6);
        assert!((c.a - 0.5).abs() < 1e-6);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Rgba::rgb(0.2, 0.4, 0.6).with_alpha(0.5);
        assert_eq!(c.r, 0.2);
        assert_eq!(c.a, 0.5);
    }
}

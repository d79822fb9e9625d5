//! Math utilities and types
//!
//! Layout happens in a 2D plane: +X to the right, +Y up, baseline of the
//! first line on the X axis. Subsequent lines move down (negative Y).

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Axis-aligned bounding box of laid-out text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner (left, bottom)
    pub min: Vec2,
    /// Maximum corner (right, top)
    pub max: Vec2,
}

impl Bounds {
    /// A degenerate box at the origin
    pub fn empty() -> Self {
        Self {
            min: Vec2::zeros(),
            max: Vec2::zeros(),
        }
    }

    /// Box spanning a rectangle given by its lower-left corner and size
    pub fn from_rect(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    /// Grow this box to also cover `other`
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Vec2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Width of the box
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the box
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

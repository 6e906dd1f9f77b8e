//! Math utilities and types
//!
//! Provides the 2D math types used by the simulation.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Rescale `v` to have magnitude `length`, keeping its direction.
///
/// A zero vector has no direction and is returned unchanged.
pub fn with_magnitude(v: Vec2, length: f32) -> Vec2 {
    let current = v.norm();
    if current > 0.0 {
        v * (length / current)
    } else {
        v
    }
}

/// Axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge (y grows downward)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() > other.x
            && self.x < other.right()
            && self.bottom() > other.y
            && self.y < other.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_with_magnitude_preserves_direction() {
        let v = with_magnitude(Vec2::new(3.0, 4.0), 10.0);
        assert_relative_eq!(v.x, 6.0, epsilon = 1e-5);
        assert_relative_eq!(v.y, 8.0, epsilon = 1e-5);
        assert_eq!(with_magnitude(Vec2::zeros(), 5.0), Vec2::zeros());
    }

    #[test]
    fn test_rect_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 5.0, 5.0);
        let inside = Rect::new(9.0, 9.0, 5.0, 5.0);

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_circle_bounds() {
        let r = Rect::around_circle(Vec2::new(400.0, 300.0), 10.0);
        assert_eq!(r, Rect::new(390.0, 290.0, 20.0, 20.0));
        assert_relative_eq!(r.center().x, 400.0);
    }
}

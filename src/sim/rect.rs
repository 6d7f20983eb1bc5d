//! Axis-aligned rectangle geometry
//!
//! Screen space: x grows right, y grows down. A rect spans
//! `[left, right) x [top, bottom)` and overlap is strict, so rects that only
//! share an edge do not touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Whether the rect has positive area
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Strict overlap: true only if the intersection has positive area
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Mirror across the vertical line `x = axis`
    pub fn reflect_x(&self, axis: f32) -> Self {
        Self::new(2.0 * axis - self.right(), self.top(), self.size.x, self.size.y)
    }

    /// Mirror across the horizontal line `y = axis`
    pub fn reflect_y(&self, axis: f32) -> Self {
        Self::new(self.left(), 2.0 * axis - self.bottom(), self.size.x, self.size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 5.0, 8.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 15.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 28.0);
        assert!(!r.is_empty());
        assert!(Rect::new(0.0, 0.0, 0.0, 4.0).is_empty());
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_positive_area_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_reflection_preserves_size() {
        let r = Rect::new(2.0, 3.0, 4.0, 5.0);
        let rx = r.reflect_x(0.0);
        assert_eq!(rx.left(), -6.0);
        assert_eq!(rx.size, r.size);
        let ry = r.reflect_y(10.0);
        assert_eq!(ry.top(), 12.0);
        assert_eq!(ry.bottom(), 17.0);
    }
}

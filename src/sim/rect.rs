//! Axis-aligned rectangle geometry for tiles and body hitboxes
//!
//! Coordinates follow screen convention: x grows right, y grows down.
//! So the "top" edge of a rect is its smallest y and "bottom" is `y + h`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (position of top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Horizontal extents overlap (open interval, touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Vertical extents overlap (open interval)
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.top() < other.bottom() && self.bottom() > other.top()
    }

    /// Strict intersection test. Rects that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Whether `inner` lies fully inside this rect (edges may touch)
    pub fn contains_rect(&self, inner: &Rect) -> bool {
        inner.left() >= self.left()
            && inner.right() <= self.right()
            && inner.top() >= self.top()
            && inner.bottom() <= self.bottom()
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
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 1.0, 1.0);
        let c = Rect::new(0.0, 1.0, 1.0, 1.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.overlaps_y(&b));
        assert!(a.overlaps_x(&c));
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(1.5, 1.5, 2.0, 2.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect::new(0.0, 0.0, 32.0, 32.0);
        assert!(outer.contains_rect(&Rect::new(3.0, 3.0, 29.0, 29.0)));
        assert!(!outer.contains_rect(&Rect::new(4.0, 4.0, 29.0, 29.0)));
    }
}

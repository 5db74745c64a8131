//! Axis-aligned integer rectangles
//!
//! World units are pixels with the origin at the top-left and y growing
//! downward. Edges follow the half-open convention: `right = x + w` is the
//! first column outside the rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Move so the left edge sits at `left`
    #[inline]
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Move so the right edge sits at `right`
    #[inline]
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    #[inline]
    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    #[inline]
    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// Geometric center (not snapped to the pixel grid)
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.x as f32 + self.w as f32 / 2.0,
            self.y as f32 + self.h as f32 / 2.0,
        )
    }

    /// Strict overlap test: rectangles that only share an edge do not overlap
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Point containment, inclusive on the top-left edges only
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left() as f32
            && point.x < self.right() as f32
            && point.y >= self.top() as f32
            && point.y < self.bottom() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10, 20, 30, 40);
        assert_eq!(r.left(), 10);
        assert_eq!(r.right(), 40);
        assert_eq!(r.top(), 20);
        assert_eq!(r.bottom(), 60);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_edge_setters_keep_size() {
        let mut r = Rect::new(0, 0, 24, 40);
        r.set_right(100);
        assert_eq!((r.x, r.right()), (76, 100));
        r.set_bottom(560);
        assert_eq!((r.y, r.bottom()), (520, 560));
        r.set_left(5);
        r.set_top(7);
        assert_eq!(r, Rect::new(5, 7, 24, 40));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 40, 40);
        let right_neighbour = Rect::new(40, 0, 40, 40);
        let below = Rect::new(0, 40, 40, 40);
        assert!(!a.overlaps(&right_neighbour));
        assert!(!a.overlaps(&below));
        assert!(a.overlaps(&Rect::new(39, 39, 40, 40)));
    }

    #[test]
    fn test_contains_point_half_open() {
        let r = Rect::new(120, 200, 560, 40);
        assert!(r.contains_point(Vec2::new(120.0, 200.0)));
        assert!(r.contains_point(Vec2::new(679.9, 239.9)));
        assert!(!r.contains_point(Vec2::new(680.0, 220.0)));
        assert!(!r.contains_point(Vec2::new(300.0, 240.0)));
    }
}

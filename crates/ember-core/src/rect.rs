//! Axis-aligned rectangle

use crate::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with its origin at the top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict overlap test. Rectangles that merely share an edge do not
    /// intersect, so a body resting exactly on a surface is separated.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Overlap depth along x, assuming the rectangles intersect.
    /// Returns the smaller of the left-side and right-side penetrations.
    pub fn penetration_x(&self, other: &Rect) -> f32 {
        (self.right() - other.x).min(other.right() - self.x)
    }

    /// Overlap depth along y, assuming the rectangles intersect.
    pub fn penetration_y(&self, other: &Rect) -> f32 {
        (self.bottom() - other.y).min(other.bottom() - self.y)
    }
}

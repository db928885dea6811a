//! Geometry primitives shared by the placement search and the parallax clamp.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: Point) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
        }
    }

    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn min_dim(self) -> f64 {
        self.width.min(self.height)
    }

    /// `true` when both dimensions are finite and strictly positive.
    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle (top-left origin, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Clamps `value` into `[min, max]`.
///
/// Unlike [`f64::clamp`] this never panics: a NaN `value` lands on `min`, and an inverted range
/// resolves to `max`. Callers that care about inverted ranges check `min > max` first.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Closest-point-on-AABB test: the circle touches `rect` when the point of `rect` nearest to
/// `center` lies strictly within `radius`.
pub fn circle_intersects_rect(center: Point, radius: f64, rect: &Rect) -> bool {
    let nearest_x = clamp(center.x, rect.x, rect.right());
    let nearest_y = clamp(center.y, rect.y, rect.bottom());
    let dx = center.x - nearest_x;
    let dy = center.y - nearest_y;
    dx * dx + dy * dy < radius * radius
}

/// Squared-distance comparison; no square root is taken.
pub fn circles_overlap(c1: Point, r1: f64, c2: Point, r2: f64) -> bool {
    let reach = r1 + r2;
    c1.distance_sq(c2) < reach * reach
}

//! Vector and collision helpers.
//!
//! Every function here is total: finite inputs never yield NaN or infinity,
//! and degenerate inputs (zero-length or non-finite vectors) collapse to zero
//! rather than propagating into health or position state.

use serde::{Deserialize, Serialize};

use crate::types::{DVec2, WorldBounds};

/// Unit vector along `(dx, dy)`, or zero when the input has no usable length.
pub fn normalize(dx: f64, dy: f64) -> DVec2 {
    if !dx.is_finite() || !dy.is_finite() {
        return DVec2::ZERO;
    }
    let len = dx.hypot(dy);
    if len <= 0.0 || !len.is_finite() {
        return DVec2::ZERO;
    }
    let unit = DVec2::new(dx / len, dy / len);
    if unit.is_finite() {
        unit
    } else {
        DVec2::ZERO
    }
}

/// Unit vector pointing from `from` to `to`.
pub fn direction(from: DVec2, to: DVec2) -> DVec2 {
    normalize(to.x - from.x, to.y - from.y)
}

/// Euclidean distance, saturated to `f64::MAX` for extreme inputs.
pub fn distance(a: DVec2, b: DVec2) -> f64 {
    let d = (b.x - a.x).hypot(b.y - a.y);
    if d.is_nan() {
        0.0
    } else {
        d.min(f64::MAX)
    }
}

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub position: DVec2,
    pub size: DVec2,
}

impl Aabb {
    pub fn new(position: DVec2, size: DVec2) -> Self {
        Self { position, size }
    }

    /// Box of `size` centered on `center`.
    pub fn centered(center: DVec2, size: DVec2) -> Self {
        Self {
            position: center - size * 0.5,
            size,
        }
    }

    pub fn center(&self) -> DVec2 {
        self.position + self.size * 0.5
    }

    /// Closed-interval overlap: touching edges count as contact.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        aabb_overlap(self, other)
    }
}

/// True iff the two boxes intersect (closed intervals on both axes).
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    a.position.x <= b.position.x + b.size.x
        && b.position.x <= a.position.x + a.size.x
        && a.position.y <= b.position.y + b.size.y
        && b.position.y <= a.position.y + a.size.y
}

/// Clamp a top-left position so a box of `size` stays inside `bounds`.
///
/// When the box is larger than the arena the position pins to zero.
pub fn clamp_to_bounds(position: DVec2, size: DVec2, bounds: &WorldBounds) -> DVec2 {
    let max_x = (bounds.width - size.x).max(0.0);
    let max_y = (bounds.height - size.y).max(0.0);
    DVec2::new(position.x.clamp(0.0, max_x), position.y.clamp(0.0, max_y))
}

/// Perpendicular of a direction (rotated 90° counter-clockwise).
pub fn perpendicular(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

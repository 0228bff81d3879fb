// Defines an Axis-Aligned Bounding Box

use crate::math::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An Axis-Aligned Bounding Box defined by its lower and upper corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AABB {
    pub lower: Vec2,
    pub upper: Vec2,
}

impl AABB {
    /// Creates a new AABB, ordering the corners component-wise.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        AABB {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    /// The maximal box. Shapes without a computable bound report this.
    pub fn unbounded() -> Self {
        AABB {
            lower: Vec2::MIN,
            upper: Vec2::MAX,
        }
    }

    /// Box of half-width `radius` around `center`.
    pub fn around(center: Vec2, radius: f64) -> Self {
        let r = Vec2::new(radius, radius);
        AABB {
            lower: center - r,
            upper: center + r,
        }
    }

    /// True when lower <= upper on both axes and no corner is NaN.
    pub fn is_valid(&self) -> bool {
        let d = self.upper - self.lower;
        d.x >= 0.0 && d.y >= 0.0
    }

    /// False for the maximal box and for any box with an infinite or
    /// saturated extent.
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite()
            && self.upper.is_finite()
            && self.lower.x > f64::MIN
            && self.lower.y > f64::MIN
            && self.upper.x < f64::MAX
            && self.upper.y < f64::MAX
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.lower.x <= p.x && p.x <= self.upper.x && self.lower.y <= p.y && p.y <= self.upper.y
    }

    /// Grows every side by `amount`.
    pub fn inflated(&self, amount: f64) -> AABB {
        let r = Vec2::new(amount, amount);
        AABB {
            lower: self.lower - r,
            upper: self.upper + r,
        }
    }
}

use std::f64::consts::PI;

use crate::collision::aabb::AABB;
use crate::collision::ray::{RayCastInput, RayCastOutput};
use crate::common::settings::EPSILON;
use crate::error::{ShapeError, ShapeResult};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

use super::mass::MassData;

/// A solid circle with a local-space center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f64,
}

impl Circle {
    /// Creates a circle centered on the local origin.
    ///
    /// Panics if `radius` is negative; see [`Circle::try_new`].
    pub fn new(radius: f64) -> Self {
        assert!(radius >= 0.0, "Circle radius cannot be negative");
        Self { center: Vec2::ZERO, radius }
    }

    /// Creates a circle, rejecting negative or non-finite parameters.
    pub fn try_new(center: Vec2, radius: f64) -> ShapeResult<Self> {
        if !center.is_finite() || !radius.is_finite() {
            return Err(ShapeError::NonFinite("circle"));
        }
        if radius < 0.0 {
            return Err(ShapeError::NegativeRadius(radius));
        }
        Ok(Self { center, radius })
    }

    /// Moves the local center.
    pub fn with_center(mut self, center: Vec2) -> Self {
        self.center = center;
        self
    }

    pub fn test_point(&self, transform: &Transform, p: Vec2) -> bool {
        let center = transform.apply(self.center);
        (p - center).magnitude_squared() <= self.radius * self.radius
    }

    /// Solves `|s + t*d|^2 = r^2` for the smallest `t` in range, where `s`
    /// is the ray start relative to the center. Rays starting inside miss.
    pub fn ray_cast(&self, input: &RayCastInput, transform: &Transform) -> Option<RayCastOutput> {
        let position = transform.apply(self.center);
        let s = input.p1 - position;
        let b = s.magnitude_squared() - self.radius * self.radius;

        let r = input.p2 - input.p1;
        let c = s.dot(r);
        let rr = r.magnitude_squared();
        let sigma = c * c - rr * b;

        if sigma < 0.0 || rr < EPSILON {
            return None;
        }

        let a = -(c + sigma.sqrt());
        if 0.0 <= a && a <= input.max_fraction * rr {
            let fraction = a / rr;
            return Some(RayCastOutput {
                fraction,
                normal: (s + fraction * r).normalize(),
            });
        }

        None
    }

    pub fn compute_aabb(&self, transform: &Transform) -> AABB {
        AABB::around(transform.apply(self.center), self.radius)
    }

    pub fn compute_mass(&self, density: f64) -> MassData {
        let mass = density * PI * self.radius * self.radius;
        MassData {
            mass,
            center: self.center,
            // Inertia about the local origin.
            inertia: mass * (0.5 * self.radius * self.radius + self.center.magnitude_squared()),
        }
    }
}

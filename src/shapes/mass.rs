use crate::math::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mass properties of a shape assuming uniform density.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MassData {
    pub mass: f64,
    /// Center of mass in shape-local coordinates.
    pub center: Vec2,
    /// Rotational inertia about the local origin.
    pub inertia: f64,
}

impl MassData {
    pub fn new(mass: f64, center: Vec2, inertia: f64) -> Self {
        Self { mass, center, inertia }
    }

    /// Inertia about the center of mass (parallel axis theorem).
    pub fn inertia_about_center(&self) -> f64 {
        (self.inertia - self.mass * self.center.magnitude_squared()).max(0.0)
    }
}

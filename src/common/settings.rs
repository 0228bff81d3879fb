//! Global tuning constants and the implicit-field configuration record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Collision and constraint tolerance, in meters.
pub const LINEAR_SLOP: f64 = 0.005;

/// Default skin radius of polygons.
pub const POLYGON_RADIUS: f64 = 2.0 * LINEAR_SLOP;

/// Threshold below which a separation counts as "inside".
pub const EPSILON: f64 = f64::EPSILON;

/// Upper bound on points in a single manifold.
pub const MAX_MANIFOLD_POINTS: usize = 2;

/// Upper bound on polygon vertex count.
pub const MAX_POLYGON_VERTICES: usize = 8;

/// Gradient step as a fraction of a field's characteristic size.
pub const GRADIENT_STEP_SCALE: f64 = 0.01;

/// Parameters for sampling an implicit field.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldSettings {
    /// Central-difference step used by the gradient estimator.
    pub gradient_step: f64,
    /// Iteration cap for sphere-marched ray casts.
    pub max_march_steps: usize,
    /// A march stops as a hit once the field is within this distance of zero.
    pub march_tolerance: f64,
}

impl FieldSettings {
    /// Creates settings, clamping values to usable ranges.
    pub fn new(gradient_step: f64, max_march_steps: usize, march_tolerance: f64) -> Self {
        FieldSettings {
            gradient_step: gradient_step.abs().max(f64::EPSILON),
            max_march_steps: max_march_steps.max(1),
            march_tolerance: march_tolerance.abs().max(f64::EPSILON),
        }
    }

    /// Settings whose gradient step and march tolerance follow the size of
    /// the geometry rather than fixed constants.
    pub fn scaled_to(characteristic_size: f64) -> Self {
        let size = characteristic_size.abs().max(f64::EPSILON);
        let defaults = Self::default();
        Self::new(
            size * GRADIENT_STEP_SCALE,
            defaults.max_march_steps,
            size * GRADIENT_STEP_SCALE * 0.1,
        )
    }
}

impl Default for FieldSettings {
    fn default() -> Self {
        FieldSettings {
            gradient_step: GRADIENT_STEP_SCALE,
            max_march_steps: 64,
            march_tolerance: 0.1 * LINEAR_SLOP,
        }
    }
}

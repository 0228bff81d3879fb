//! Shapes described only by a signed distance function.
//!
//! The field is evaluated in world space: negative inside, zero on the
//! surface, positive outside. Everything else about the shape (its normal,
//! its ray hits, optionally its mass) is recovered by sampling that field.

use std::fmt;
use std::sync::Arc;

use log::trace;

use crate::collision::aabb::AABB;
use crate::collision::ray::{RayCastInput, RayCastOutput};
use crate::common::settings::{FieldSettings, EPSILON};
use crate::error::{ShapeError, ShapeResult};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

use super::mass::MassData;

/// A scalar signed distance function over world space.
///
/// Implementations must be pure: the same point always yields the same
/// distance, and evaluation has no side effects. Shapes holding a field are
/// shared across threads, hence the `Send + Sync` bound.
pub trait DistanceField: Send + Sync {
    fn distance(&self, p: Vec2) -> f64;
}

impl<F> DistanceField for F
where
    F: Fn(Vec2) -> f64 + Send + Sync,
{
    fn distance(&self, p: Vec2) -> f64 {
        self(p)
    }
}

/// A shape whose geometry is an externally supplied [`DistanceField`].
#[derive(Clone)]
pub struct ImplicitField {
    /// Local reference point.
    pub position: Vec2,
    field: Arc<dyn DistanceField>,
    settings: FieldSettings,
    bounds: Option<AABB>,
    unit_mass: Option<MassData>,
}

impl fmt::Debug for ImplicitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplicitField")
            .field("position", &self.position)
            .field("settings", &self.settings)
            .field("bounds", &self.bounds)
            .field("unit_mass", &self.unit_mass)
            .finish_non_exhaustive()
    }
}

impl ImplicitField {
    /// Wraps a field with default sampling settings.
    pub fn new(position: Vec2, field: impl DistanceField + 'static) -> Self {
        Self::from_arc(position, Arc::new(field))
    }

    /// Wraps a field that is already shared with other owners.
    pub fn from_arc(position: Vec2, field: Arc<dyn DistanceField>) -> Self {
        ImplicitField {
            position,
            field,
            settings: FieldSettings::default(),
            bounds: None,
            unit_mass: None,
        }
    }

    pub fn with_settings(mut self, settings: FieldSettings) -> ShapeResult<Self> {
        let h = settings.gradient_step;
        if !h.is_finite() || h <= 0.0 {
            return Err(ShapeError::InvalidGradientStep(h));
        }
        let tolerance = settings.march_tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ShapeError::InvalidMarchTolerance(tolerance));
        }
        if settings.max_march_steps == 0 {
            return Err(ShapeError::NoMarchSteps);
        }
        self.settings = settings;
        Ok(self)
    }

    pub fn with_gradient_step(self, gradient_step: f64) -> ShapeResult<Self> {
        let settings = FieldSettings { gradient_step, ..self.settings };
        self.with_settings(settings)
    }

    /// Scales the gradient step and march tolerance to the size of the
    /// geometry the field describes.
    pub fn with_characteristic_size(mut self, size: f64) -> Self {
        let scaled = FieldSettings::scaled_to(size);
        self.settings = FieldSettings {
            max_march_steps: self.settings.max_march_steps,
            ..scaled
        };
        self
    }

    /// Supplies a world-space bound, used by [`ImplicitField::compute_aabb`].
    pub fn with_bounds(mut self, bounds: AABB) -> ShapeResult<Self> {
        if !bounds.is_valid() {
            return Err(ShapeError::InvertedBounds);
        }
        self.bounds = Some(bounds);
        Ok(self)
    }

    /// Supplies mass properties at unit density, used by
    /// [`ImplicitField::compute_mass`].
    pub fn with_unit_mass(mut self, mass: MassData) -> Self {
        self.unit_mass = Some(mass);
        self
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn bounds(&self) -> Option<AABB> {
        self.bounds
    }

    /// Signed distance from the world point `p` to the surface.
    pub fn distance(&self, p: Vec2) -> f64 {
        self.field.distance(p)
    }

    /// Central-difference gradient of the field at `p`. Not normalized.
    pub fn gradient(&self, p: Vec2) -> Vec2 {
        let h = self.settings.gradient_step;
        let dx = Vec2::new(h, 0.0);
        let dy = Vec2::new(0.0, h);
        Vec2::new(
            self.distance(p + dx) - self.distance(p - dx),
            self.distance(p + dy) - self.distance(p - dy),
        ) / (2.0 * h)
    }

    /// Unit gradient at `p`, or zero where the field is flat.
    pub fn normal(&self, p: Vec2) -> Vec2 {
        self.gradient(p).normalize()
    }

    /// The field is already in world space, so `transform` does not move it.
    pub fn test_point(&self, _transform: &Transform, p: Vec2) -> bool {
        self.distance(p) <= 0.0
    }

    /// Sphere-marches from `p1` toward `p2`. Each step advances by the
    /// field value, which cannot skip past the surface of a true distance
    /// field. Rays starting inside the surface miss.
    pub fn ray_cast(&self, input: &RayCastInput, _transform: &Transform) -> Option<RayCastOutput> {
        let d = input.p2 - input.p1;
        let length = d.magnitude();
        if length < EPSILON {
            return None;
        }
        let direction = d / length;
        let max_t = input.max_fraction * length;

        if self.distance(input.p1) <= 0.0 {
            return None;
        }

        let mut t = 0.0;
        for _ in 0..self.settings.max_march_steps {
            let p = input.p1 + t * direction;
            let dist = self.distance(p);
            if dist <= self.settings.march_tolerance {
                return Some(RayCastOutput {
                    fraction: t / length,
                    normal: self.normal(p),
                });
            }

            t += dist;
            if t > max_t {
                return None;
            }
        }

        trace!(
            "ray march exhausted {} steps at t={t}",
            self.settings.max_march_steps
        );
        None
    }

    /// Supplied bounds, or the maximal box when none were given.
    pub fn compute_aabb(&self, _transform: &Transform) -> AABB {
        match self.bounds {
            Some(bounds) => bounds,
            None => {
                trace!("implicit field has no bounds; reporting unbounded AABB");
                AABB::unbounded()
            }
        }
    }

    /// Supplied unit mass scaled by `density`, or a unit mass at the
    /// reference point with no rotational inertia.
    pub fn compute_mass(&self, density: f64) -> MassData {
        match self.unit_mass {
            Some(unit) => MassData {
                mass: unit.mass * density,
                center: unit.center,
                inertia: unit.inertia * density,
            },
            None => {
                trace!("implicit field has no mass data; reporting placeholder unit mass");
                MassData {
                    mass: 1.0,
                    center: self.position,
                    inertia: 0.0,
                }
            }
        }
    }

    /// Estimates mass properties by sampling the field on a
    /// `resolution x resolution` grid over `bounds`. The result is in the
    /// field's frame; inertia is about that frame's origin.
    pub fn sample_mass(&self, density: f64, bounds: &AABB, resolution: usize) -> MassData {
        let resolution = resolution.max(1);
        let size = bounds.upper - bounds.lower;
        let cell = Vec2::new(size.x / resolution as f64, size.y / resolution as f64);
        let cell_mass = density * cell.x * cell.y;
        let cell_inertia = cell_mass * cell.magnitude_squared() / 12.0;

        let mut mass = 0.0;
        let mut moment = Vec2::ZERO;
        let mut inertia = 0.0;
        for i in 0..resolution {
            for j in 0..resolution {
                let p = bounds.lower + Vec2::new((i as f64 + 0.5) * cell.x, (j as f64 + 0.5) * cell.y);
                if self.distance(p) <= 0.0 {
                    mass += cell_mass;
                    moment += cell_mass * p;
                    inertia += cell_mass * p.magnitude_squared() + cell_inertia;
                }
            }
        }

        if mass <= 0.0 {
            return MassData {
                mass: 0.0,
                center: self.position,
                inertia: 0.0,
            };
        }

        MassData {
            mass,
            center: moment / mass,
            inertia,
        }
    }
}

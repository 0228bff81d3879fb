pub mod arena;
pub mod circle;
pub mod implicit;
pub mod mass;
pub mod polygon;

// Re-export the specific shape types
pub use arena::{ShapeArena, ShapeHandle};
pub use circle::Circle;
pub use implicit::{DistanceField, ImplicitField};
pub use mass::MassData;
pub use polygon::Polygon;

use crate::collision::aabb::AABB;
use crate::collision::ray::{RayCastInput, RayCastOutput};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

/// Variant tag of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Circle,
    Polygon,
    ImplicitField,
}

/// Geometry attached to a body, expressed in the body's local frame.
#[derive(Debug, Clone)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
    ImplicitField(ImplicitField),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Polygon(_) => ShapeType::Polygon,
            Shape::ImplicitField(_) => ShapeType::ImplicitField,
        }
    }

    /// Radius used by contact generation: the circle radius or the polygon
    /// skin. Implicit fields carry none.
    pub fn radius(&self) -> f64 {
        match self {
            Shape::Circle(circle) => circle.radius,
            Shape::Polygon(polygon) => polygon.radius(),
            Shape::ImplicitField(_) => 0.0,
        }
    }

    /// Deep-copies this shape into `arena`, which then owns the copy.
    pub fn clone_into_arena(&self, arena: &mut ShapeArena) -> ShapeHandle {
        arena.allocate(self.clone())
    }

    /// Number of child primitives. Every current variant is a single child.
    pub fn child_count(&self) -> usize {
        1
    }

    /// Whether the world point `p` lies inside the shape (boundary included).
    pub fn test_point(&self, transform: &Transform, p: Vec2) -> bool {
        match self {
            Shape::Circle(circle) => circle.test_point(transform, p),
            Shape::Polygon(polygon) => polygon.test_point(transform, p),
            Shape::ImplicitField(field) => field.test_point(transform, p),
        }
    }

    pub fn ray_cast(
        &self,
        input: &RayCastInput,
        transform: &Transform,
        child_index: usize,
    ) -> Option<RayCastOutput> {
        debug_assert!(child_index < self.child_count(), "child index out of range");
        match self {
            Shape::Circle(circle) => circle.ray_cast(input, transform),
            Shape::Polygon(polygon) => polygon.ray_cast(input, transform),
            Shape::ImplicitField(field) => field.ray_cast(input, transform),
        }
    }

    pub fn compute_aabb(&self, transform: &Transform, child_index: usize) -> AABB {
        debug_assert!(child_index < self.child_count(), "child index out of range");
        match self {
            Shape::Circle(circle) => circle.compute_aabb(transform),
            Shape::Polygon(polygon) => polygon.compute_aabb(transform),
            Shape::ImplicitField(field) => field.compute_aabb(transform),
        }
    }

    pub fn compute_mass(&self, density: f64) -> MassData {
        match self {
            Shape::Circle(circle) => circle.compute_mass(density),
            Shape::Polygon(polygon) => polygon.compute_mass(density),
            Shape::ImplicitField(field) => field.compute_mass(density),
        }
    }
}

impl From<Circle> for Shape {
    fn from(circle: Circle) -> Self {
        Shape::Circle(circle)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

impl From<ImplicitField> for Shape {
    fn from(field: ImplicitField) -> Self {
        Shape::ImplicitField(field)
    }
}

//! Narrow-phase collision for 2D rigid bodies.
//!
//! Given two shapes and their world transforms, the routines in
//! [`collision`] decide whether the shapes touch and describe the contact as
//! a [`Manifold`] for a downstream solver. Shapes are circles, convex
//! polygons, or implicit fields defined by a signed distance function.

pub mod collision;
pub mod common;
pub mod error;
pub mod math;
pub mod shapes;

// Re-export key types for easier use
pub use collision::{
    collide, collide_circles, collide_implicit_field_and_circle, collide_polygon_and_circle,
    ContactId, Manifold, ManifoldPoint, ManifoldType, RayCastInput, RayCastOutput, WorldManifold,
    AABB,
};
pub use common::FieldSettings;
pub use error::{CollisionError, CollisionResult, ShapeError, ShapeResult};
pub use math::{Transform, Vec2};
pub use shapes::{
    Circle, DistanceField, ImplicitField, MassData, Polygon, Shape, ShapeArena, ShapeHandle,
    ShapeType,
};

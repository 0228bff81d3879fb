pub mod aabb;
pub mod detection;
pub mod manifold;
pub mod ray;

// Re-export key types
pub use aabb::AABB;
pub use detection::*;
pub use manifold::*;
pub use ray::{RayCastInput, RayCastOutput};

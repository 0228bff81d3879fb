use crate::math::vec2::Vec2;

/// Ray-cast input. The ray extends from `p1` to `p1 + max_fraction * (p2 - p1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCastInput {
    pub p1: Vec2,
    pub p2: Vec2,
    pub max_fraction: f64,
}

impl RayCastInput {
    pub fn new(p1: Vec2, p2: Vec2, max_fraction: f64) -> Self {
        Self { p1, p2, max_fraction }
    }

}

/// Ray-cast hit. The ray hits at `p1 + fraction * (p2 - p1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayCastOutput {
    /// World-space surface normal at the hit.
    pub normal: Vec2,
    pub fraction: f64,
}

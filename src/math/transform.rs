use super::vec2::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position and rotation of a shape's local frame in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    pub position: Vec2,
    pub rotation: f64, // Angle in radians
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Creates a new transform.
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    /// Creates an identity transform (no translation, no rotation).
    pub fn identity() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
        }
    }

    /// Creates a pure translation.
    pub fn from_position(position: Vec2) -> Self {
        Self { position, rotation: 0.0 }
    }

    /// Rotates a local vector into world orientation (no translation).
    pub fn rotate_vector(self, v: Vec2) -> Vec2 {
        let (sin_a, cos_a) = self.rotation.sin_cos();
        Vec2::new(v.x * cos_a - v.y * sin_a, v.x * sin_a + v.y * cos_a)
    }

    /// Rotates a world vector back into local orientation (no translation).
    pub fn inverse_rotate_vector(self, v: Vec2) -> Vec2 {
        let (sin_a, cos_a) = self.rotation.sin_cos();
        Vec2::new(v.x * cos_a + v.y * sin_a, -v.x * sin_a + v.y * cos_a)
    }

    /// Maps a local point to world space (rotation then translation).
    pub fn apply(self, point: Vec2) -> Vec2 {
        self.rotate_vector(point) + self.position
    }

    /// Maps a world point to local space (inverse translation then inverse rotation).
    pub fn apply_inverse(self, point: Vec2) -> Vec2 {
        self.inverse_rotate_vector(point - self.position)
    }
}

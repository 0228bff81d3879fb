use crate::common::settings::{EPSILON, MAX_MANIFOLD_POINTS};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

/// How to interpret a manifold's anchor point and normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ManifoldType {
    /// Anchor is circle A's local center; normal is unused.
    #[default]
    Circles,
    /// Anchor and normal live on a face of shape A, in A's frame.
    FaceA,
    /// Anchor and normal live on a face of shape B, in B's frame.
    FaceB,
    /// Anchor is the estimated deepest point against an implicit field and
    /// the normal is the field gradient, both in the field's (world) frame.
    Sdf,
}

/// Kind of geometric feature a contact point sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureType {
    #[default]
    Vertex = 0,
    Face = 1,
}

/// The features that intersect to form a contact point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactFeature {
    pub index_a: u8,
    pub index_b: u8,
    pub type_a: FeatureType,
    pub type_b: FeatureType,
}

impl ContactFeature {
    /// Packs the feature into a single comparable key.
    pub fn key(&self) -> u32 {
        u32::from(self.index_a)
            | u32::from(self.index_b) << 8
            | (self.type_a as u32) << 16
            | (self.type_b as u32) << 24
    }
}

/// Persistent identifier used by the solver to match contact points across
/// steps for warm starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContactId {
    pub key: u32,
}

impl From<ContactFeature> for ContactId {
    fn from(feature: ContactFeature) -> Self {
        ContactId { key: feature.key() }
    }
}

/// A contact point belonging to a manifold.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ManifoldPoint {
    /// Usage depends on the manifold type; for every routine in this crate it
    /// is the circle's local center.
    pub local_point: Vec2,
    pub id: ContactId,
}

/// Contact geometry between two shapes, in local coordinates so it stays
/// valid while the bodies move within a step.
///
/// A manifold with zero points means "no contact"; none of the other fields
/// carry meaning in that case.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Manifold {
    pub manifold_type: ManifoldType,
    /// Usage depends on the manifold type.
    pub local_point: Vec2,
    /// Not used for `ManifoldType::Circles`.
    pub local_normal: Vec2,
    /// Overlap depth; only set for `ManifoldType::Sdf`.
    pub overlap: f64,
    points: [ManifoldPoint; MAX_MANIFOLD_POINTS],
    point_count: usize,
}

impl Manifold {
    /// The "no contact" manifold.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A manifold with a single contact point.
    pub fn single(
        manifold_type: ManifoldType,
        local_point: Vec2,
        local_normal: Vec2,
        point: ManifoldPoint,
    ) -> Self {
        let mut manifold = Manifold {
            manifold_type,
            local_point,
            local_normal,
            ..Self::default()
        };
        manifold.push_point(point);
        manifold
    }

    /// Appends a point. Returns false, leaving the manifold unchanged, once
    /// `MAX_MANIFOLD_POINTS` is reached.
    pub fn push_point(&mut self, point: ManifoldPoint) -> bool {
        if self.point_count == MAX_MANIFOLD_POINTS {
            return false;
        }
        self.points[self.point_count] = point;
        self.point_count += 1;
        true
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn points(&self) -> &[ManifoldPoint] {
        &self.points[..self.point_count]
    }

    pub fn is_touching(&self) -> bool {
        self.point_count > 0
    }
}

/// World-space view of a manifold, as consumed by a contact solver.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldManifold {
    /// World vector pointing from A to B.
    pub normal: Vec2,
    points: [Vec2; MAX_MANIFOLD_POINTS],
    /// A negative value indicates overlap.
    separations: [f64; MAX_MANIFOLD_POINTS],
    point_count: usize,
}

impl WorldManifold {
    /// Evaluates a manifold with the current transforms and shape radii.
    /// Contact points sit midway between the two surfaces.
    pub fn new(
        manifold: &Manifold,
        xf_a: &Transform,
        radius_a: f64,
        xf_b: &Transform,
        radius_b: f64,
    ) -> Self {
        let mut world = WorldManifold::default();
        if !manifold.is_touching() {
            return world;
        }
        world.point_count = manifold.point_count();

        match manifold.manifold_type {
            ManifoldType::Circles => {
                let point_a = xf_a.apply(manifold.local_point);
                let point_b = xf_b.apply(manifold.points[0].local_point);
                world.normal = Vec2::X;
                if point_a.distance_squared(point_b) > EPSILON * EPSILON {
                    world.normal = (point_b - point_a).normalize();
                }

                let c_a = point_a + radius_a * world.normal;
                let c_b = point_b - radius_b * world.normal;
                world.points[0] = 0.5 * (c_a + c_b);
                world.separations[0] = (c_b - c_a).dot(world.normal);
            }
            ManifoldType::FaceA => {
                world.normal = xf_a.rotate_vector(manifold.local_normal);
                let plane_point = xf_a.apply(manifold.local_point);

                for (i, point) in manifold.points().iter().enumerate() {
                    let clip_point = xf_b.apply(point.local_point);
                    let c_a = clip_point
                        + (radius_a - (clip_point - plane_point).dot(world.normal)) * world.normal;
                    let c_b = clip_point - radius_b * world.normal;
                    world.points[i] = 0.5 * (c_a + c_b);
                    world.separations[i] = (c_b - c_a).dot(world.normal);
                }
            }
            ManifoldType::FaceB => {
                world.normal = xf_b.rotate_vector(manifold.local_normal);
                let plane_point = xf_b.apply(manifold.local_point);

                for (i, point) in manifold.points().iter().enumerate() {
                    let clip_point = xf_a.apply(point.local_point);
                    let c_b = clip_point
                        + (radius_b - (clip_point - plane_point).dot(world.normal)) * world.normal;
                    let c_a = clip_point - radius_a * world.normal;
                    world.points[i] = 0.5 * (c_a + c_b);
                    world.separations[i] = (c_a - c_b).dot(world.normal);
                }

                // Ensure normal points from A to B.
                world.normal = -world.normal;
            }
            ManifoldType::Sdf => {
                // Anchor is the circle's deepest point; the field surface
                // lies `overlap` further along the normal.
                world.normal = manifold.local_normal;
                world.points[0] = manifold.local_point + 0.5 * manifold.overlap * world.normal;
                world.separations[0] = -manifold.overlap;
            }
        }

        world
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points[..self.point_count]
    }

    pub fn separations(&self) -> &[f64] {
        &self.separations[..self.point_count]
    }
}

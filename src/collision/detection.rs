//! Narrow-phase contact generation between specific shape pairs.
//!
//! Every routine is total: a miss is reported as a manifold with zero
//! points, never as an error.

use log::trace;

use crate::common::settings::EPSILON;
use crate::error::{CollisionError, CollisionResult};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;
use crate::shapes::{Circle, ImplicitField, Polygon, Shape};

use super::manifold::{ContactId, Manifold, ManifoldPoint, ManifoldType};

/// The only point a circle can contribute. Id 0: with one possible point
/// there is nothing to disambiguate across steps.
fn circle_point(circle: &Circle) -> ManifoldPoint {
    ManifoldPoint {
        local_point: circle.center,
        id: ContactId::default(),
    }
}

/// Contact between two circles. The normal is left zero; the solver derives
/// it from the two centers.
pub fn collide_circles(
    circle_a: &Circle,
    xf_a: &Transform,
    circle_b: &Circle,
    xf_b: &Transform,
) -> Manifold {
    let p_a = xf_a.apply(circle_a.center);
    let p_b = xf_b.apply(circle_b.center);

    let dist_sq = p_a.distance_squared(p_b);
    let radius = circle_a.radius + circle_b.radius;
    if dist_sq > radius * radius {
        return Manifold::empty();
    }

    Manifold::single(
        ManifoldType::Circles,
        circle_a.center,
        Vec2::ZERO,
        circle_point(circle_b),
    )
}

/// Contact between a polygon (A) and a circle (B), expressed on a face or
/// vertex of the polygon.
pub fn collide_polygon_and_circle(
    polygon_a: &Polygon,
    xf_a: &Transform,
    circle_b: &Circle,
    xf_b: &Transform,
) -> Manifold {
    // Circle position in the frame of the polygon.
    let c = xf_b.apply(circle_b.center);
    let c_local = xf_a.apply_inverse(c);

    let radius = polygon_a.radius() + circle_b.radius;
    let vertices = polygon_a.vertices();
    let normals = polygon_a.normals();
    let vertex_count = vertices.len();

    // Find the min separating edge. Strict `>` keeps the first index on ties.
    let mut normal_index = 0;
    let mut separation = f64::MIN;
    for (i, (v, n)) in vertices.iter().zip(normals).enumerate() {
        let s = n.dot(c_local - *v);
        if s > radius {
            return Manifold::empty();
        }
        if s > separation {
            separation = s;
            normal_index = i;
        }
    }

    // Vertices that subtend the incident face.
    let v1 = vertices[normal_index];
    let v2 = vertices[(normal_index + 1) % vertex_count];
    let face_center = 0.5 * (v1 + v2);
    let face_normal = normals[normal_index];

    // Center inside the polygon.
    if separation < EPSILON {
        return Manifold::single(
            ManifoldType::FaceA,
            face_center,
            face_normal,
            circle_point(circle_b),
        );
    }

    // Barycentric coordinates of the center along the face.
    let u1 = (c_local - v1).dot(v2 - v1);
    let u2 = (c_local - v2).dot(v1 - v2);

    let (anchor, normal) = if u1 <= 0.0 {
        if c_local.distance_squared(v1) > radius * radius {
            return Manifold::empty();
        }
        (v1, (c_local - v1).normalize())
    } else if u2 <= 0.0 {
        if c_local.distance_squared(v2) > radius * radius {
            return Manifold::empty();
        }
        (v2, (c_local - v2).normalize())
    } else {
        if (c_local - face_center).dot(face_normal) > radius {
            return Manifold::empty();
        }
        (face_center, face_normal)
    };

    Manifold::single(ManifoldType::FaceA, anchor, normal, circle_point(circle_b))
}

/// Contact between an implicit field (A) and a circle (B).
///
/// The deepest point of the circle is estimated by stepping one radius
/// against the field gradient at the circle's center. Only one gradient
/// sample is taken, so concave or thin features narrower than the circle
/// can be missed; such cases are reported as no contact rather than guessed.
pub fn collide_implicit_field_and_circle(
    field_a: &ImplicitField,
    _xf_a: &Transform,
    circle_b: &Circle,
    xf_b: &Transform,
) -> Manifold {
    let p_b = xf_b.apply(circle_b.center);

    let center_distance = field_a.distance(p_b);
    if center_distance > circle_b.radius {
        return Manifold::empty();
    }

    // A flat gradient leaves the normal zero, so the candidate is the center
    // itself and the contact carries no direction.
    let normal = field_a.normal(p_b);
    if normal == Vec2::ZERO {
        trace!("flat field gradient at {p_b:?}; probing the circle center");
    }

    let candidate = p_b - circle_b.radius * normal;
    let candidate_distance = field_a.distance(candidate);
    if candidate_distance >= 0.0 {
        trace!(
            "candidate {candidate:?} outside field ({candidate_distance}); gradient estimate rejected"
        );
        return Manifold::empty();
    }

    let mut manifold = Manifold::single(ManifoldType::Sdf, candidate, normal, circle_point(circle_b));
    manifold.overlap = candidate_distance.abs();
    manifold
}

/// Routes a shape pair to its narrow-phase routine. Pairs are not swapped:
/// the supported orderings put the circle on the B side.
pub fn collide(
    shape_a: &Shape,
    xf_a: &Transform,
    shape_b: &Shape,
    xf_b: &Transform,
) -> CollisionResult<Manifold> {
    match (shape_a, shape_b) {
        (Shape::Circle(a), Shape::Circle(b)) => Ok(collide_circles(a, xf_a, b, xf_b)),
        (Shape::Polygon(a), Shape::Circle(b)) => Ok(collide_polygon_and_circle(a, xf_a, b, xf_b)),
        (Shape::ImplicitField(a), Shape::Circle(b)) => {
            Ok(collide_implicit_field_and_circle(a, xf_a, b, xf_b))
        }
        _ => Err(CollisionError::UnsupportedPair {
            a: shape_a.shape_type(),
            b: shape_b.shape_type(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeType;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    fn at(x: f64, y: f64) -> Transform {
        Transform::from_position(Vec2::new(x, y))
    }

    fn unit_square() -> Polygon {
        Polygon::new_box(0.5, 0.5).unwrap()
    }

    // --- Circle vs circle ---

    #[test]
    fn test_collide_circles_overlapping() {
        let a = Circle::new(1.0);
        let b = Circle::new(1.0);
        let m = collide_circles(&a, &at(0.0, 0.0), &b, &at(1.5, 0.0));

        assert_eq!(m.point_count(), 1);
        assert_eq!(m.manifold_type, ManifoldType::Circles);
        assert_eq!(m.local_point, a.center);
        assert_eq!(m.local_normal, Vec2::ZERO);
        assert_eq!(m.points()[0].local_point, b.center);
        assert_eq!(m.points()[0].id.key, 0);
    }

    #[test]
    fn test_collide_circles_separated() {
        let a = Circle::new(1.0);
        let b = Circle::new(1.0);
        let m = collide_circles(&a, &at(0.0, 0.0), &b, &at(3.0, 0.0));
        assert_eq!(m.point_count(), 0);
    }

    #[test]
    fn test_collide_circles_touching_counts() {
        let a = Circle::new(1.0);
        let b = Circle::new(1.0);
        let m = collide_circles(&a, &at(0.0, 0.0), &b, &at(2.0, 0.0));
        assert_eq!(m.point_count(), 1);
    }

    #[test]
    fn test_collide_circles_uses_local_centers() {
        let a = Circle::new(0.5).with_center(Vec2::new(1.0, 0.0));
        let b = Circle::new(0.5).with_center(Vec2::new(-1.0, 0.0));
        // World centers (1,0) and (2,0) exactly touch.
        let m = collide_circles(&a, &at(0.0, 0.0), &b, &at(3.0, 0.0));
        assert_eq!(m.point_count(), 1);
        assert_eq!(m.local_point, Vec2::new(1.0, 0.0));
        assert_eq!(m.points()[0].local_point, Vec2::new(-1.0, 0.0));

        // Rotating A by 180 degrees moves its center to (-1,0).
        let m = collide_circles(&a, &Transform::new(Vec2::ZERO, PI), &b, &at(3.0, 0.0));
        assert_eq!(m.point_count(), 0);
    }

    // --- Polygon vs circle ---

    #[test]
    fn test_polygon_circle_center_inside_uses_first_deepest_face() {
        let polygon = unit_square();
        let circle = Circle::new(0.5);
        let m = collide_polygon_and_circle(&polygon, &at(0.0, 0.0), &circle, &at(0.0, 0.0));

        assert_eq!(m.point_count(), 1);
        assert_eq!(m.manifold_type, ManifoldType::FaceA);
        // All four faces tie; edge 0 (bottom) wins.
        assert!((m.local_normal - Vec2::new(0.0, -1.0)).magnitude() < EPSILON);
        assert!((m.local_point - Vec2::new(0.0, -0.5)).magnitude() < EPSILON);
        assert_eq!(m.points()[0].id.key, 0);
    }

    #[test]
    fn test_polygon_circle_center_inside_nearest_face() {
        let polygon = unit_square();
        let circle = Circle::new(0.1);
        let m = collide_polygon_and_circle(&polygon, &at(0.0, 0.0), &circle, &at(0.4, 0.1));

        assert_eq!(m.point_count(), 1);
        assert!((m.local_normal - Vec2::X).magnitude() < EPSILON);
        assert!((m.local_point - Vec2::new(0.5, 0.0)).magnitude() < EPSILON);
    }

    #[test]
    fn test_polygon_circle_face_region() {
        let polygon = unit_square();
        let circle = Circle::new(0.5);
        let m = collide_polygon_and_circle(&polygon, &at(0.0, 0.0), &circle, &at(0.2, 0.9));

        assert_eq!(m.point_count(), 1);
        assert_eq!(m.manifold_type, ManifoldType::FaceA);
        assert!((m.local_normal - Vec2::Y).magnitude() < EPSILON);
        assert!((m.local_point - Vec2::new(0.0, 0.5)).magnitude() < EPSILON);
    }

    #[test]
    fn test_polygon_circle_vertex_region_hit() {
        let polygon = unit_square();
        let circle = Circle::new(0.2);
        let m = collide_polygon_and_circle(&polygon, &at(0.0, 0.0), &circle, &at(0.6, 0.6));

        assert_eq!(m.point_count(), 1);
        assert_eq!(m.manifold_type, ManifoldType::FaceA);
        assert!((m.local_point - Vec2::new(0.5, 0.5)).magnitude() < EPSILON);
        let diag = Vec2::new(1.0, 1.0).normalize();
        assert!((m.local_normal - diag).magnitude() < EPSILON);
    }

    #[test]
    fn test_polygon_circle_vertex_region_miss() {
        // Within reach of both corner faces, but too far from the corner.
        let polygon = Polygon::new_box(1.0, 1.0).unwrap();
        let circle = Circle::new(0.1);
        let m = collide_polygon_and_circle(&polygon, &at(0.0, 0.0), &circle, &at(1.1, 1.1));
        assert_eq!(m.point_count(), 0);
    }

    #[test]
    fn test_polygon_circle_early_out() {
        let polygon = unit_square();
        let circle = Circle::new(0.5);
        let m = collide_polygon_and_circle(&polygon, &at(0.0, 0.0), &circle, &at(3.0, 0.0));
        assert_eq!(m.point_count(), 0);
    }

    #[test]
    fn test_polygon_circle_skin_radius_extends_reach() {
        let polygon = unit_square().with_radius(0.2).unwrap();
        let circle = Circle::new(0.1);
        let xf_b = at(0.0, 0.75);

        let m = collide_polygon_and_circle(&polygon, &at(0.0, 0.0), &circle, &xf_b);
        assert_eq!(m.point_count(), 1);

        let bare = unit_square().with_radius(0.0).unwrap();
        let m = collide_polygon_and_circle(&bare, &at(0.0, 0.0), &circle, &xf_b);
        assert_eq!(m.point_count(), 0);
    }

    #[test]
    fn test_polygon_circle_rotated_polygon() {
        // Diamond: square rotated 45 degrees, corner at (sqrt(0.5), 0).
        let polygon = unit_square();
        let xf_a = Transform::new(Vec2::ZERO, PI / 4.0);
        let circle = Circle::new(0.1);
        let corner_x = 0.5f64.sqrt();
        let m = collide_polygon_and_circle(&polygon, &xf_a, &circle, &at(corner_x + 0.05, 0.0));

        assert_eq!(m.point_count(), 1);
        // Normal in polygon space points along the local corner diagonal.
        let world_normal = xf_a.rotate_vector(m.local_normal);
        assert!((world_normal - Vec2::X).magnitude() < 1e-6);
    }

    #[test]
    fn test_polygon_circle_center_on_face_plane() {
        let polygon = Polygon::new_box(1.0, 1.0).unwrap();
        let circle = Circle::new(0.3);
        // Separation is exactly zero on the right face, corner included.
        for y in [-0.75, -0.25, 0.0, 0.5, 0.9, 1.0] {
            for _ in 0..2 {
                let m = collide_polygon_and_circle(&polygon, &at(0.0, 0.0), &circle, &at(1.0, y));
                assert_eq!(m.point_count(), 1, "y = {y}");
                assert_eq!(m.manifold_type, ManifoldType::FaceA);
                assert_eq!(m.local_normal, Vec2::X, "y = {y}");
                assert_eq!(m.local_point, Vec2::new(1.0, 0.0), "y = {y}");
            }
        }
    }

    // --- Implicit field vs circle ---

    #[test]
    fn test_field_circle_half_plane() {
        let field = ImplicitField::new(Vec2::ZERO, |p: Vec2| p.y);
        let circle = Circle::new(1.0);
        let m = collide_implicit_field_and_circle(&field, &at(0.0, 0.0), &circle, &at(0.0, 0.5));

        assert_eq!(m.point_count(), 1);
        assert_eq!(m.manifold_type, ManifoldType::Sdf);
        assert!((m.overlap - 0.5).abs() < EPSILON);
        assert!((m.local_point - Vec2::new(0.0, -0.5)).magnitude() < EPSILON);
        assert!((m.local_normal - Vec2::Y).magnitude() < EPSILON);
        assert_eq!(m.points()[0].local_point, circle.center);
        assert_eq!(m.points()[0].id.key, 0);
    }

    #[test]
    fn test_field_circle_far_away() {
        let field = ImplicitField::new(Vec2::ZERO, |p: Vec2| p.y);
        let circle = Circle::new(1.0);
        let m = collide_implicit_field_and_circle(&field, &at(0.0, 0.0), &circle, &at(0.0, 1.5));
        assert_eq!(m.point_count(), 0);
    }

    #[test]
    fn test_field_circle_flat_field_reports_center() {
        let field = ImplicitField::new(Vec2::ZERO, |_: Vec2| -1.0);
        let circle = Circle::new(1.0);
        let m = collide_implicit_field_and_circle(&field, &at(0.0, 0.0), &circle, &at(2.0, 3.0));

        assert_eq!(m.point_count(), 1);
        assert_eq!(m.manifold_type, ManifoldType::Sdf);
        assert_eq!(m.local_normal, Vec2::ZERO);
        assert_eq!(m.local_point, Vec2::new(2.0, 3.0));
        assert!((m.overlap - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_field_circle_at_disk_center() {
        let field = ImplicitField::new(Vec2::ZERO, |p: Vec2| p.magnitude() - 1.0)
            .with_characteristic_size(1.0);
        let circle = Circle::new(0.5);
        let xf_b = at(0.0, 0.0);

        let direct = collide_circles(&Circle::new(1.0), &at(0.0, 0.0), &circle, &xf_b);
        let m = collide_implicit_field_and_circle(&field, &at(0.0, 0.0), &circle, &xf_b);

        assert_eq!(direct.point_count(), 1);
        assert_eq!(m.point_count(), 1);
        assert_eq!(m.local_point, Vec2::ZERO);
        assert!((m.overlap - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_field_circle_on_slab_midline() {
        let field = ImplicitField::new(Vec2::ZERO, |p: Vec2| p.y.abs() - 1.0);
        let circle = Circle::new(0.5);
        let m = collide_implicit_field_and_circle(&field, &at(0.0, 0.0), &circle, &at(0.0, 0.0));

        assert_eq!(m.point_count(), 1);
        assert_eq!(m.local_normal, Vec2::ZERO);
        assert!((m.overlap - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_field_circle_thin_feature_rejected() {
        // A sliver |y| - 0.05 whose gradient flips across y=0. A circle
        // centered just above points its probe straight through the sliver.
        let field = ImplicitField::new(Vec2::ZERO, |p: Vec2| p.y.abs() - 0.05)
            .with_gradient_step(0.001)
            .unwrap();
        let circle = Circle::new(1.0);
        let m = collide_implicit_field_and_circle(&field, &at(0.0, 0.0), &circle, &at(0.0, 0.01));
        assert_eq!(m.point_count(), 0);
    }

    #[test]
    fn test_field_circle_disk() {
        let field = ImplicitField::new(Vec2::ZERO, |p: Vec2| p.magnitude() - 1.0);
        let circle = Circle::new(0.5);
        let m = collide_implicit_field_and_circle(&field, &at(0.0, 0.0), &circle, &at(1.25, 0.0));

        assert_eq!(m.point_count(), 1);
        assert!((m.overlap - 0.25).abs() < 1e-6);
        assert!((m.local_normal - Vec2::X).magnitude() < 1e-6);
        assert!((m.local_point - Vec2::new(0.75, 0.0)).magnitude() < 1e-6);
    }

    // --- Dispatch ---

    #[test]
    fn test_collide_dispatch() {
        let circle: Shape = Circle::new(1.0).into();
        let polygon: Shape = unit_square().into();
        let field: Shape = ImplicitField::new(Vec2::ZERO, |p: Vec2| p.y).into();
        let xf_a = at(0.0, 0.0);
        let xf_b = at(0.0, 0.5);

        let m = collide(&circle, &xf_a, &circle, &xf_b).unwrap();
        assert_eq!(m.manifold_type, ManifoldType::Circles);
        let m = collide(&polygon, &xf_a, &circle, &xf_b).unwrap();
        assert_eq!(m.manifold_type, ManifoldType::FaceA);
        let m = collide(&field, &xf_a, &circle, &xf_b).unwrap();
        assert_eq!(m.manifold_type, ManifoldType::Sdf);

        assert_eq!(
            collide(&circle, &xf_a, &polygon, &xf_b).unwrap_err(),
            CollisionError::UnsupportedPair {
                a: ShapeType::Circle,
                b: ShapeType::Polygon,
            }
        );
        assert!(collide(&polygon, &xf_a, &field, &xf_b).is_err());
    }
}

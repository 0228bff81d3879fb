use crate::collision::aabb::AABB;
use crate::collision::ray::{RayCastInput, RayCastOutput};
use crate::common::settings::{LINEAR_SLOP, MAX_POLYGON_VERTICES, POLYGON_RADIUS};
use crate::error::{ShapeError, ShapeResult};
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

use super::mass::MassData;

/// A convex polygon defined by its vertices in local space, wound
/// counter-clockwise, plus a uniform skin radius around its boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    /// Outward unit normal of the edge from vertex `i` to vertex `i + 1`.
    normals: Vec<Vec2>,
    centroid: Vec2,
    radius: f64,
}

impl Polygon {
    /// Creates a polygon from counter-clockwise convex vertices with the
    /// default skin radius.
    pub fn new(vertices: Vec<Vec2>) -> ShapeResult<Self> {
        let n = vertices.len();
        if n < 3 {
            return Err(ShapeError::TooFewVertices(n));
        }
        if n > MAX_POLYGON_VERTICES {
            return Err(ShapeError::TooManyVertices { count: n, max: MAX_POLYGON_VERTICES });
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(ShapeError::NonFinite("polygon vertices"));
        }

        let min_edge_sq = (0.5 * LINEAR_SLOP) * (0.5 * LINEAR_SLOP);
        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let edge = vertices[(i + 1) % n] - vertices[i];
            if edge.magnitude_squared() < min_edge_sq {
                return Err(ShapeError::DegenerateEdge(i));
            }
            normals.push(edge.perpendicular_cw().normalize());
        }

        // Every turn must be strictly to the left.
        for i in 0..n {
            let e1 = vertices[(i + 1) % n] - vertices[i];
            let e2 = vertices[(i + 2) % n] - vertices[(i + 1) % n];
            if e1.cross(e2) <= 0.0 {
                return Err(ShapeError::NotConvex((i + 1) % n));
            }
        }

        let mut polygon = Polygon {
            vertices,
            normals,
            centroid: Vec2::ZERO,
            radius: POLYGON_RADIUS,
        };
        polygon.centroid = polygon.calculate_centroid();
        Ok(polygon)
    }

    /// Axis-aligned box with half-widths `hx`, `hy` centered on the origin.
    pub fn new_box(hx: f64, hy: f64) -> ShapeResult<Self> {
        Self::new(vec![
            Vec2::new(-hx, -hy),
            Vec2::new(hx, -hy),
            Vec2::new(hx, hy),
            Vec2::new(-hx, hy),
        ])
    }

    /// Box with half-widths `hx`, `hy`, centered at `center` and rotated by
    /// `angle` within the local frame.
    pub fn new_oriented_box(hx: f64, hy: f64, center: Vec2, angle: f64) -> ShapeResult<Self> {
        let xf = Transform::new(center, angle);
        Self::new(vec![
            xf.apply(Vec2::new(-hx, -hy)),
            xf.apply(Vec2::new(hx, -hy)),
            xf.apply(Vec2::new(hx, hy)),
            xf.apply(Vec2::new(-hx, hy)),
        ])
    }

    /// Replaces the skin radius.
    pub fn with_radius(mut self, radius: f64) -> ShapeResult<Self> {
        if !radius.is_finite() {
            return Err(ShapeError::NonFinite("polygon radius"));
        }
        if radius < 0.0 {
            return Err(ShapeError::NegativeRadius(radius));
        }
        self.radius = radius;
        Ok(self)
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Calculates the area of the polygon using the Shoelace formula.
    pub fn calculate_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            area += self.vertices[i].cross(self.vertices[(i + 1) % n]);
        }
        area / 2.0
    }

    /// Calculates the centroid (center of mass for uniform density) by
    /// summing a triangle fan around the first vertex.
    fn calculate_centroid(&self) -> Vec2 {
        let n = self.vertices.len();
        let origin = self.vertices[0];
        let mut centroid = Vec2::ZERO;
        let mut area_sum = 0.0;

        for i in 1..(n - 1) {
            let v2 = self.vertices[i];
            let v3 = self.vertices[i + 1];
            let triangle_area = (v2 - origin).cross(v3 - origin) / 2.0;
            area_sum += triangle_area;
            centroid += (origin + v2 + v3) / 3.0 * triangle_area;
        }

        centroid / area_sum
    }

    /// Second polar moment of area about the local origin (density 1).
    fn calculate_inertia_about_origin(&self) -> f64 {
        let n = self.vertices.len();
        let mut inertia_sum = 0.0;
        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];
            inertia_sum += v1.cross(v2)
                * (v1.magnitude_squared() + v1.dot(v2) + v2.magnitude_squared());
        }
        inertia_sum / 12.0
    }

    /// Inclusive containment against every edge plane of the core polygon.
    /// The skin radius is not part of the test.
    pub fn test_point(&self, transform: &Transform, p: Vec2) -> bool {
        let p_local = transform.apply_inverse(p);
        self.vertices
            .iter()
            .zip(&self.normals)
            .all(|(v, n)| n.dot(p_local - *v) <= 0.0)
    }

    /// Clips the ray against each edge half-plane, tracking the entering
    /// fraction `lower` and leaving fraction `upper`.
    pub fn ray_cast(&self, input: &RayCastInput, transform: &Transform) -> Option<RayCastOutput> {
        let p1 = transform.apply_inverse(input.p1);
        let p2 = transform.apply_inverse(input.p2);
        let d = p2 - p1;

        let mut lower = 0.0;
        let mut upper = input.max_fraction;
        let mut index = None;

        for (i, (v, n)) in self.vertices.iter().zip(&self.normals).enumerate() {
            // p = p1 + a * d
            // dot(normal, p - v) = 0
            // dot(normal, p1 - v) + a * dot(normal, d) = 0
            let numerator = n.dot(*v - p1);
            let denominator = n.dot(d);

            if denominator == 0.0 {
                if numerator < 0.0 {
                    return None;
                }
            } else if denominator < 0.0 && numerator < lower * denominator {
                // Entering this half-space.
                lower = numerator / denominator;
                index = Some(i);
            } else if denominator > 0.0 && numerator < upper * denominator {
                // Leaving this half-space.
                upper = numerator / denominator;
            }

            if upper < lower {
                return None;
            }
        }

        index.map(|i| RayCastOutput {
            fraction: lower,
            normal: transform.rotate_vector(self.normals[i]),
        })
    }

    pub fn compute_aabb(&self, transform: &Transform) -> AABB {
        let mut lower = transform.apply(self.vertices[0]);
        let mut upper = lower;
        for v in self.vertices.iter().skip(1) {
            let w = transform.apply(*v);
            lower = lower.min(w);
            upper = upper.max(w);
        }
        AABB { lower, upper }.inflated(self.radius)
    }

    pub fn compute_mass(&self, density: f64) -> MassData {
        MassData {
            mass: density * self.calculate_area(),
            center: self.centroid,
            inertia: density * self.calculate_inertia_about_origin(),
        }
    }
}

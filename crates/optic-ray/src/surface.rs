//! Surfaces rays can intersect: planes, conics, spheres.
//!
//! Intersection routines return the distance along the ray to the first hit
//! in the ray's forward direction, or `None` when the surface is missed.
//! Conic intersection uses the quadratic formulation from Murphy's "Simple
//! Three-D Raytrace Algorithm"; a small positive threshold rejects
//! self-intersections caused by round-off.

use crate::Ray;
use optic_core::{Error, Result};
use optic_math::{QuadraticRoots, Vec3, min_positive, quadratic_roots};

/// Distances closer than this along a ray are treated as the ray's own
/// starting surface.
const SELF_INTERSECT_EPS: f64 = 1e-12;

/// An infinite plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
}

impl Plane {
    /// Creates a plane; the normal is normalized and must be nonzero.
    pub fn new(point: impl Into<Vec3>, normal: impl Into<Vec3>) -> Result<Self> {
        let normal = normal
            .into()
            .normalized()
            .ok_or_else(|| Error::invalid_input("plane normal must be nonzero"))?;
        Ok(Self {
            point: point.into(),
            normal,
        })
    }

    /// Anchor point of the plane.
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Unit normal of the plane.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Signed distance along `ray` to the plane, or `None` when the ray is
    /// parallel to it. A ray lying in the plane is also parallel (distance
    /// zero everywhere), so the single check suffices.
    pub fn ray_intersect_dist(&self, ray: &Ray) -> Option<f64> {
        let ldotn = ray.direction().dot(self.normal);
        if ldotn == 0.0 {
            return None;
        }
        Some((self.point - ray.point()).dot(self.normal) / ldotn)
    }
}

/// Rotationally-symmetric conic: ellipsoid, paraboloid, or hyperboloid,
/// with spheres as the zero-conic-constant special case.
///
/// The z-axis is the symmetry axis. `radius` is the vertex radius of
/// curvature with the optical sign convention deciding the opening
/// direction; `conic` is the conic constant (0 sphere, -1 paraboloid,
/// < -1 hyperboloid).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conic {
    /// Vertex radius of curvature.
    pub radius: f64,
    /// Conic constant.
    pub conic: f64,
    /// Vertex location.
    pub vertex: Vec3,
}

impl Conic {
    /// Creates a conic with its vertex at the given position.
    pub fn new(radius: f64, conic: f64, vertex: impl Into<Vec3>) -> Self {
        Self {
            radius,
            conic,
            vertex: vertex.into(),
        }
    }

    /// Quadratic coefficients for the ray-conic intersection.
    fn intersect_terms(&self, ray: &Ray) -> (f64, f64, f64) {
        let p = ray.point() - self.vertex;
        let d = ray.direction();
        let k1 = self.conic + 1.0;
        let a = d.x * d.x + d.y * d.y + k1 * d.z * d.z;
        let b = 2.0 * (p.x * d.x + p.y * d.y + k1 * p.z * d.z - self.radius * d.z);
        let c = p.x * p.x + p.y * p.y + k1 * p.z * p.z - 2.0 * self.radius * p.z;
        (a, b, c)
    }

    /// Distance along `ray` to the first forward intersection, or `None`
    /// when the ray misses (complex roots) or the conic lies behind it.
    pub fn ray_intersect_dist(&self, ray: &Ray) -> Option<f64> {
        let (a, b, c) = self.intersect_terms(ray);
        min_positive(quadratic_roots(a, b, c).real(), SELF_INTERSECT_EPS)
    }

    /// Sag of the surface at the radial point `(x, y)`: the z-distance from
    /// the vertex plane to the conic, shifted by the vertex position.
    pub fn sag(&self, x: f64, y: f64) -> f64 {
        let xv = x - self.vertex.x;
        let yv = y - self.vertex.y;
        let rho2 = xv * xv + yv * yv;
        let c = 1.0 / self.radius;
        let conic_sag = c * rho2 / (1.0 + (1.0 - (1.0 + self.conic) * c * c * rho2).sqrt());
        conic_sag + self.vertex.z
    }
}

/// A sphere with refractive indices inside and outside, the refracting
/// element of the rainbow-style water-droplet traces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center position.
    pub center: Vec3,
    /// Radius (positive).
    pub radius: f64,
    /// Refractive index of the sphere material.
    pub n_sphere: f64,
    /// Refractive index of the surrounding medium.
    pub n_outside: f64,
}

impl Sphere {
    /// Creates a sphere; the radius must be positive.
    pub fn new(
        center: impl Into<Vec3>,
        radius: f64,
        n_sphere: f64,
        n_outside: f64,
    ) -> Result<Self> {
        if radius <= 0.0 {
            return Err(Error::invalid_input("sphere radius must be positive"));
        }
        Ok(Self {
            center: center.into(),
            radius,
            n_sphere,
            n_outside,
        })
    }

    /// Returns `true` when `point` lies strictly inside the sphere.
    pub fn is_inside(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() < self.radius * self.radius
    }

    /// Distance along `ray` to the first forward intersection, or `None`
    /// on a miss.
    pub fn ray_intersect_dist(&self, ray: &Ray) -> Option<f64> {
        let oc = ray.point() - self.center;
        let a = 1.0; // direction is unit length
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        match quadratic_roots(a, b, c) {
            QuadraticRoots::Complex(_) | QuadraticRoots::None => None,
            roots => min_positive(roots.real(), SELF_INTERSECT_EPS),
        }
    }

    /// Outward surface normal at a point on (or near) the surface.
    pub fn surface_normal(&self, point: Vec3) -> Option<Vec3> {
        (point - self.center).normalized()
    }
}

//! Rays and their interaction with surfaces.
//!
//! A [`Ray`] is a point, a unit direction, and bookkeeping (wavelength,
//! intensity). Interaction functions are pure: [`reflect`] returns the
//! mirrored ray, [`refract`] returns both the transmitted and reflected
//! rays with Fresnel intensity factors applied.

use crate::optics::fresnel_coefs;
use crate::surface::{Plane, Sphere};
use optic_core::{Error, Result};
use optic_math::Vec3;

/// A geometric ray.
///
/// The direction is kept unit length; setters re-normalize. Intensity
/// starts at 1 and is attenuated by the Fresnel factors as the ray
/// interacts with surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    point: Vec3,
    direction: Vec3,
    wavelength: f64,
    intensity: f64,
}

impl Ray {
    /// Creates a ray from a reference point and a direction.
    ///
    /// The direction is normalized; a zero direction fails with
    /// [`Error::InvalidInput`]. Wavelength and intensity default to 1.
    pub fn new(point: impl Into<Vec3>, direction: impl Into<Vec3>) -> Result<Self> {
        let direction = direction
            .into()
            .normalized()
            .ok_or_else(|| Error::invalid_input("ray direction must be nonzero"))?;
        Ok(Self {
            point: point.into(),
            direction,
            wavelength: 1.0,
            intensity: 1.0,
        })
    }

    /// Reference point of the ray.
    #[inline]
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Moves the reference point.
    pub fn set_point(&mut self, point: impl Into<Vec3>) {
        self.point = point.into();
    }

    /// Unit direction of travel.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Sets the direction of travel, re-normalizing.
    pub fn set_direction(&mut self, direction: impl Into<Vec3>) -> Result<()> {
        self.direction = direction
            .into()
            .normalized()
            .ok_or_else(|| Error::invalid_input("ray direction must be nonzero"))?;
        Ok(())
    }

    /// Wavelength tag carried by the ray (dispersion bookkeeping).
    #[inline]
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Sets the wavelength tag.
    pub fn with_wavelength(mut self, wavelength: f64) -> Self {
        self.wavelength = wavelength;
        self
    }

    /// Current intensity.
    #[inline]
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Scales the intensity, e.g. by a Fresnel factor.
    pub fn attenuate(&mut self, factor: f64) {
        self.intensity *= factor;
    }

    /// Advances the reference point by `distance` along the direction.
    pub fn propagate(&mut self, distance: f64) {
        self.point = self.point + self.direction * distance;
    }

    /// Advances the ray to its intersection with `plane`.
    ///
    /// Fails with [`Error::InvalidInput`] when the ray is parallel to the
    /// plane and never meets it.
    pub fn propagate_to_plane(&mut self, plane: &Plane) -> Result<()> {
        let dist = plane
            .ray_intersect_dist(self)
            .ok_or_else(|| Error::invalid_input("ray is parallel to the plane"))?;
        self.propagate(dist);
        Ok(())
    }
}

/// Angle of incidence between a ray direction and a surface normal.
pub fn angle_of_incidence(direction: Vec3, surface_normal: Vec3) -> f64 {
    direction.dot(surface_normal).clamp(-1.0, 1.0).acos()
}

/// Reflects a ray about a unit surface normal.
///
/// The returned ray keeps the incoming intensity; callers apply the Fresnel
/// factor when energy matters (as [`refract`] does).
pub fn reflect(ray: &Ray, normal: Vec3) -> Ray {
    let mut out = *ray;
    let ndots = ray.direction().dot(normal);
    // Mirror formula keeps the direction unit length; set directly.
    out.direction = ray.direction() - 2.0 * ndots * normal;
    out
}

/// Outcome of a ray meeting a refractive interface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refraction {
    /// The transmitted ray with the Fresnel `T` factor applied, or `None`
    /// under total internal reflection.
    pub transmitted: Option<Ray>,
    /// The reflected ray with the Fresnel `R` factor applied (R = 1 under
    /// TIR).
    pub reflected: Ray,
}

/// Refracts a ray at an interface with unit normal pointing into the
/// incident medium.
///
/// `ni` and `nt` are the incident- and transmit-side refractive indices.
/// Energy splits between the two outgoing rays by the unpolarized Fresnel
/// coefficients; under total internal reflection everything reflects.
pub fn refract(ray: &Ray, normal: Vec3, ni: f64, nt: f64) -> Refraction {
    let eta = ni / nt;
    let c1 = -ray.direction().dot(normal);
    let cs2 = 1.0 - eta * eta * (1.0 - c1 * c1);

    let (transmitted, r) = if cs2 > 0.0 {
        let mut trans = *ray;
        // Snell's law in vector form; the result is unit length.
        trans.direction = ray.direction() * eta + normal * (eta * c1 - cs2.sqrt());
        let theta_i = c1.clamp(-1.0, 1.0).acos();
        let (r, t) = fresnel_coefs(ni, theta_i, nt);
        trans.attenuate(t);
        (Some(trans), r)
    } else {
        (None, 1.0)
    };

    let mut reflected = reflect(ray, normal);
    reflected.attenuate(r);
    Refraction {
        transmitted,
        reflected,
    }
}

/// Propagates a ray onto a sphere and refracts it there.
///
/// The incident/transmit indices are chosen by whether the ray starts
/// inside or outside the sphere; the surface normal is flipped to face the
/// incoming ray. Fails with [`Error::InvalidInput`] when the ray misses the
/// sphere.
pub fn refract_at_sphere(ray: &Ray, sphere: &Sphere) -> Result<Refraction> {
    let (ni, nt) = if sphere.is_inside(ray.point()) {
        (sphere.n_sphere, sphere.n_outside)
    } else {
        (sphere.n_outside, sphere.n_sphere)
    };
    let dist = sphere
        .ray_intersect_dist(ray)
        .ok_or_else(|| Error::invalid_input("ray does not intersect the sphere"))?;
    let mut at_surface = *ray;
    at_surface.propagate(dist);

    let mut normal = sphere
        .surface_normal(at_surface.point())
        .ok_or_else(|| Error::invalid_input("ray hit the sphere center"))?;
    // Face the incoming ray
    if normal.dot(at_surface.direction()) > 0.0 {
        normal = -normal;
    }
    Ok(refract(&at_surface, normal, ni, nt))
}

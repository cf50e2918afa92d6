//! # optic-ray
//!
//! Geometric optics and ray tracing primitives.
//!
//! - [`optics`] - Scalar interface formulas: Snell's law, total internal
//!   reflection, Brewster's angle, Fresnel coefficients
//! - [`Ray`] - A ray with position, unit direction, and intensity
//! - [`surface`] - Plane, conic, and sphere intersection geometry
//! - [`reflect`] / [`refract`] - Ray-surface interaction with Fresnel
//!   energy bookkeeping
//!
//! # Usage
//!
//! ```rust
//! use optic_math::Vec3;
//! use optic_ray::{Ray, surface::Plane};
//!
//! let mut ray = Ray::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]).unwrap();
//! let plane = Plane::new([0.0, 0.0, 5.0], [0.0, 0.0, -1.0]).unwrap();
//! ray.propagate_to_plane(&plane).unwrap();
//! assert_eq!(ray.point().z, 5.0);
//! ```
//!
//! # Dependencies
//!
//! - [`optic-core`] - Error types
//! - [`optic-math`] - Vectors and the quadratic solver

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod optics;
mod ray;
pub mod surface;

pub use ray::*;

//! # optic-math
//!
//! Math utilities for color and optics calculations.
//!
//! This crate provides the primitives the rest of the workspace leans on:
//!
//! - [`Vec3`] - 3D vectors for XYZ triplets, ray origins and directions
//! - [`Mat3`] - 3x3 matrices for linear color transforms
//! - [`quadratic_roots`] - Cancellation-avoiding quadratic solver for
//!   ray-surface intersections
//! - [`safe_divide`] / [`bilevel`] - Elementwise array helpers used by the
//!   piecewise color encodings
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! All math is IEEE f64; the perceptual color encodings carry thresholds
//! (Lab epsilon/kappa) that are numerically delicate in single precision.
//!
//! # Usage
//!
//! ```rust
//! use optic_math::{Mat3, Vec3};
//!
//! // sRGB to XYZ (D65)
//! let rgb_to_xyz = Mat3::from_rows([
//!     [0.4124564, 0.3575761, 0.1804375],
//!     [0.2126729, 0.7151522, 0.0721750],
//!     [0.0193339, 0.1191920, 0.9503041],
//! ]);
//! let xyz = rgb_to_xyz * Vec3::new(1.0, 0.0, 0.0);
//! assert!((xyz.x - 0.4124564).abs() < 1e-12);
//! ```
//!
//! # Dependencies
//!
//! - [`optic-core`] - Error types for the array helpers
//! - [`glam`] - Interop with the wider Rust math ecosystem (DMat3/DVec3)
//!
//! # Used By
//!
//! - `optic-color` - Matrix registry and piecewise encodings
//! - `optic-ray` - Ray/surface geometry

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod array;
mod mat3;
mod quadratic;
mod vec3;

pub use array::*;
pub use mat3::*;
pub use quadratic::*;
pub use vec3::*;

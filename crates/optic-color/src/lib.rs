//! # optic-color
//!
//! Color-space conversion math.
//!
//! Converts pixel and colorimetric triplets between linear/non-linear
//! encodings (sRGB companding), device-independent spaces (CIE XYZ), and
//! perceptually-uniform spaces (CIE Lab, CIE Luv), plus polar (LCh) and
//! chromaticity (xy, xyY, u'v') representations, parameterized by a
//! reference white point.
//!
//! # Modules
//!
//! - [`whitepoint`] - Standard illuminant white points and scaling
//! - [`matrix`] - Named registry of 3x3 linear transforms and chromatic
//!   adaptation
//! - [`transform`] - Nonlinear conversions (companding, Lab, Luv, LCh,
//!   chromaticity coordinates)
//!
//! # Usage
//!
//! ```rust
//! use optic_core::Image;
//! use optic_color::{transform, whitepoint};
//!
//! let xyz = Image::from_pixel3([0.5, 0.5, 0.5]);
//! let lab = transform::xyz_to_lab(&xyz, &whitepoint::D50).unwrap();
//! let back = transform::lab_to_xyz(&lab, &whitepoint::D50).unwrap();
//! assert!((back.data()[0] - 0.5).abs() < 1e-10);
//! ```
//!
//! # Dependencies
//!
//! - [`optic-core`] - Image buffers and errors
//! - [`optic-math`] - Matrices and the bilevel/safe-divide helpers
//!
//! # Used By
//!
//! - `optic-holo` - Not directly; holograms are single-channel
//! - Downstream callers converting decoded images between spaces

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod matrix;
pub mod transform;
pub mod whitepoint;

pub use matrix::{adapt_whitepoint, invert_transform_name, matrix, transform_names};
pub use whitepoint::WhitePoint;

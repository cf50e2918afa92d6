//! # optic-core
//!
//! Core types shared by the optics-rs workspace.
//!
//! This crate provides the foundation the numerical crates build on:
//!
//! - [`Image`] - Owned interleaved f64 sample buffer with channel helpers
//! - [`Error`] / [`Result`] - Unified error type for the whole workspace
//! - Sample conversions between display u8 codes and working-range floats
//!
//! # Sample model
//!
//! All pixel math in the workspace runs on IEEE doubles. Decoded 8-bit
//! images are normalized to `[0, 1]` on the way in ([`u8_to_float`]) and
//! re-quantized on the way out ([`float_to_u8`]). Images store samples
//! interleaved in row-major order:
//!
//! ```text
//! [R G B R G B ...]  <- row 0
//! [R G B R G B ...]  <- row 1
//! ```
//!
//! # Usage
//!
//! ```rust
//! use optic_core::Image;
//!
//! let img = Image::from_data(2, 1, 3, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap();
//! let [r, g, b] = img.split3().unwrap();
//! assert_eq!(r, vec![0.1, 0.4]);
//! assert_eq!(b, vec![0.3, 0.6]);
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - Derive macro for the error enum
//!
//! # Used By
//!
//! - `optic-math` - Array helpers report shape errors
//! - `optic-color` - Color transforms run on [`Image`] planes
//! - `optic-holo` - Hologram data is loaded from [`Image`] buffers
//! - `optic-io` - File decoding fills [`Image`] buffers

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod image;

pub use error::*;
pub use image::*;

//! # optic-holo
//!
//! Digital holography reconstruction via the angular-spectrum method.
//!
//! A recorded interference pattern contains, in its spatial frequencies, the
//! optical field that produced it. Multiplying the pattern's Fourier
//! transform by the free-space propagation kernel
//! `K(u,v) = exp(i*pi*lambda*z*(u^2+v^2))` and transforming back yields the
//! complex field at distance `z` from the recording plane.
//!
//! # Modules
//!
//! - [`fft`] - 2D forward/inverse DFT pair and FFT bin frequencies
//! - [`Hologram`] - The reconstruction engine with lazily cached spectrum
//!   and frequency grid
//! - [`focus`] - Focus metrics and through-volume focus stacking
//!
//! # Usage
//!
//! ```rust
//! use optic_core::Image;
//! use optic_holo::Hologram;
//!
//! let pattern = Image::from_data(8, 8, 1, vec![0.5; 64]).unwrap();
//! let mut holo = Hologram::new(658e-6, 9e-3);
//! holo.load(pattern).unwrap();
//! let field = holo.reconstruct(54.0).unwrap();
//! assert_eq!(field.len(), 64);
//! ```
//!
//! # Units
//!
//! `wavelength`, `pixel_size`, and `z` share one length unit; the defaults
//! are millimeters (0.500e-3 mm = 500 nm).
//!
//! # Dependencies
//!
//! - [`optic-core`] - Image buffers and errors
//! - [`optic-io`] - Grayscale decode for file-backed loads
//! - [`rustfft`] / [`num-complex`] - The DFT pair
//! - [`rayon`] - Parallel row/column passes (feature `parallel`, default on)
//! - [`tracing`] - Load-time diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod fft;
pub mod focus;
mod hologram;

pub use hologram::*;

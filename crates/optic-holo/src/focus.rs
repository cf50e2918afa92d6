//! Focus detection across a reconstruction volume.
//!
//! A hologram encodes objects at many depths at once. Sweeping the
//! reconstruction distance and scoring each slice with a sharpness metric
//! locates the plane where each pixel comes into focus.
//!
//! Metrics operate on the amplitude `|field|` of a reconstruction; the
//! gradient metrics convolve with a 3x3 derivative pair and take the
//! magnitude, the Laplacian metric takes the absolute second derivative.

use crate::Hologram;
use num_complex::Complex64;
use optic_core::{Error, Result};

/// Sharpness metric applied to a reconstructed slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMetric {
    /// Sobel gradient magnitude (3x3, weights 1-2-1).
    Sobel,
    /// Prewitt gradient magnitude (3x3, uniform weights).
    Prewitt,
    /// Scharr gradient magnitude (3x3, weights 3-10-3).
    Scharr,
    /// Absolute Laplacian (second derivative).
    Laplace,
}

impl FocusMetric {
    /// The x-direction derivative kernel for the gradient metrics.
    fn gradient_kernel(self) -> Option<[f64; 9]> {
        match self {
            Self::Sobel => Some([-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0]),
            Self::Prewitt => Some([-1.0, 0.0, 1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0]),
            Self::Scharr => Some([-3.0, 0.0, 3.0, -10.0, 0.0, 10.0, -3.0, 0.0, 3.0]),
            Self::Laplace => None,
        }
    }
}

const LAPLACE_KERNEL: [f64; 9] = [0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0];

/// Same-size 3x3 convolution with clamped edges.
fn convolve3(src: &[f64], nx: usize, ny: usize, kernel: &[f64; 9]) -> Vec<f64> {
    let mut out = vec![0.0; src.len()];
    for y in 0..ny {
        for x in 0..nx {
            let mut acc = 0.0;
            for ky in 0..3 {
                for kx in 0..3 {
                    let sy = (y + ky).saturating_sub(1).min(ny - 1);
                    let sx = (x + kx).saturating_sub(1).min(nx - 1);
                    acc += kernel[ky * 3 + kx] * src[sy * nx + sx];
                }
            }
            out[y * nx + x] = acc;
        }
    }
    out
}

fn transpose3(kernel: &[f64; 9]) -> [f64; 9] {
    let mut out = [0.0; 9];
    for r in 0..3 {
        for c in 0..3 {
            out[c * 3 + r] = kernel[r * 3 + c];
        }
    }
    out
}

/// Per-pixel sharpness of a complex field slice.
///
/// Fails with [`Error::ShapeMismatch`] when the field length is not
/// `nx * ny`.
pub fn metric_map(
    field: &[Complex64],
    nx: usize,
    ny: usize,
    metric: FocusMetric,
) -> Result<Vec<f64>> {
    if field.len() != nx * ny {
        return Err(Error::shape_mismatch(nx * ny, field.len()));
    }
    let amplitude: Vec<f64> = field.iter().map(|c| c.norm()).collect();
    Ok(match metric.gradient_kernel() {
        Some(kx) => {
            let gx = convolve3(&amplitude, nx, ny, &kx);
            let gy = convolve3(&amplitude, nx, ny, &transpose3(&kx));
            gx.iter().zip(&gy).map(|(gx, gy)| gx.hypot(*gy)).collect()
        }
        None => convolve3(&amplitude, nx, ny, &LAPLACE_KERNEL)
            .into_iter()
            .map(f64::abs)
            .collect(),
    })
}

/// Result of a focus sweep through a hologram volume.
#[derive(Debug, Clone)]
pub struct FocusStack {
    /// Best (maximum) metric value seen at each pixel.
    pub metric: Vec<f64>,
    /// Field sample at each pixel's best slice.
    pub field: Vec<Complex64>,
    /// Distance of each pixel's best slice.
    pub best_z: Vec<f64>,
    /// Samples per row.
    pub nx: usize,
    /// Rows.
    pub ny: usize,
}

/// Reconstructs the hologram at each listed distance and keeps, per pixel,
/// the slice where `metric` peaks.
///
/// The hologram's cached spectrum makes the sweep one FFT plus one inverse
/// FFT per distance. An empty distance list fails with
/// [`Error::InvalidInput`].
pub fn focus_stack(
    holo: &mut Hologram,
    z_positions: &[f64],
    metric: FocusMetric,
) -> Result<FocusStack> {
    if z_positions.is_empty() {
        return Err(Error::invalid_input("focus sweep needs at least one distance"));
    }
    let (nx, ny) = match (holo.nx(), holo.ny()) {
        (Some(nx), Some(ny)) => (nx, ny),
        _ => return Err(Error::NoData),
    };
    let n = nx * ny;
    let mut best_metric = vec![f64::NEG_INFINITY; n];
    let mut best_field = vec![Complex64::new(0.0, 0.0); n];
    let mut best_z = vec![f64::NAN; n];

    for &z in z_positions {
        let field = holo.reconstruct(z)?.to_vec();
        let scores = metric_map(&field, nx, ny, metric)?;
        for i in 0..n {
            if scores[i] > best_metric[i] {
                best_metric[i] = scores[i];
                best_field[i] = field[i];
                best_z[i] = z;
            }
        }
    }

    Ok(FocusStack {
        metric: best_metric,
        field: best_field,
        best_z,
        nx,
        ny,
    })
}

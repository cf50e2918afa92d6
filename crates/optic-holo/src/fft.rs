//! 2D discrete Fourier transform pair.
//!
//! Thin orchestration over [`rustfft`]: rows are transformed in place, the
//! buffer is transposed, columns are transformed as rows, and the buffer is
//! transposed back. With the `parallel` feature the row passes fan out over
//! rayon.
//!
//! The forward transform is unscaled and the inverse divides by the sample
//! count, so `ifft2(fft2(x)) == x` to floating tolerance.

use num_complex::Complex64;
use optic_core::{Error, Result};
use rustfft::FftPlanner;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// FFT bin frequencies for `n` samples at spacing `d`, in the conventional
/// FFT ordering: non-negative bins first, then the negative tail.
///
/// Bin `k` sits at `k / (n*d)` for `k < ceil(n/2)` and at `(k - n) / (n*d)`
/// after.
///
/// # Example
///
/// ```rust
/// use optic_holo::fft::fft_freq;
///
/// assert_eq!(fft_freq(4, 0.25), vec![0.0, 1.0, -2.0, -1.0]);
/// ```
pub fn fft_freq(n: usize, d: f64) -> Vec<f64> {
    let step = 1.0 / (n as f64 * d);
    let split = n.div_ceil(2);
    (0..n)
        .map(|k| {
            if k < split {
                k as f64 * step
            } else {
                (k as f64 - n as f64) * step
            }
        })
        .collect()
}

fn transpose(buf: &[Complex64], nx: usize, ny: usize) -> Vec<Complex64> {
    let mut out = vec![Complex64::new(0.0, 0.0); buf.len()];
    for y in 0..ny {
        for x in 0..nx {
            out[x * ny + y] = buf[y * nx + x];
        }
    }
    out
}

fn rows_in_place(buf: &mut [Complex64], row_len: usize, forward: bool) {
    let mut planner = FftPlanner::new();
    let plan = if forward {
        planner.plan_fft_forward(row_len)
    } else {
        planner.plan_fft_inverse(row_len)
    };

    #[cfg(feature = "parallel")]
    buf.par_chunks_mut(row_len).for_each(|row| plan.process(row));

    #[cfg(not(feature = "parallel"))]
    for row in buf.chunks_mut(row_len) {
        plan.process(row);
    }
}

fn transform2(buf: Vec<Complex64>, nx: usize, ny: usize, forward: bool) -> Vec<Complex64> {
    let mut buf = buf;
    rows_in_place(&mut buf, nx, forward);
    let mut buf = transpose(&buf, nx, ny);
    rows_in_place(&mut buf, ny, forward);
    transpose(&buf, ny, nx)
}

/// Forward 2D DFT of a real `ny x nx` grid (row-major), unnormalized.
///
/// Fails with [`Error::ShapeMismatch`] when the buffer length is not
/// `nx * ny`.
pub fn fft2(data: &[f64], nx: usize, ny: usize) -> Result<Vec<Complex64>> {
    if data.len() != nx * ny {
        return Err(Error::shape_mismatch(nx * ny, data.len()));
    }
    let buf: Vec<Complex64> = data.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    Ok(transform2(buf, nx, ny, true))
}

/// Inverse 2D DFT of an `ny x nx` spectrum, scaled by `1/(nx*ny)`.
pub fn ifft2(spectrum: &[Complex64], nx: usize, ny: usize) -> Result<Vec<Complex64>> {
    if spectrum.len() != nx * ny {
        return Err(Error::shape_mismatch(nx * ny, spectrum.len()));
    }
    let mut out = transform2(spectrum.to_vec(), nx, ny, false);
    let scale = 1.0 / (nx * ny) as f64;
    for v in &mut out {
        *v *= scale;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fft_freq_even() {
        assert_eq!(fft_freq(4, 0.25), vec![0.0, 1.0, -2.0, -1.0]);
    }

    #[test]
    fn test_fft_freq_odd() {
        let f = fft_freq(5, 1.0);
        let want = [0.0, 0.2, 0.4, -0.4, -0.2];
        for (got, want) in f.iter().zip(want) {
            assert_relative_eq!(*got, want, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_fft2_dc_component() {
        // A constant grid concentrates all energy in bin (0, 0).
        let data = vec![0.25; 16];
        let spec = fft2(&data, 4, 4).unwrap();
        assert_relative_eq!(spec[0].re, 4.0, epsilon = 1e-12);
        assert_relative_eq!(spec[0].im, 0.0, epsilon = 1e-12);
        for v in &spec[1..] {
            assert!(v.norm() < 1e-12);
        }
    }

    #[test]
    fn test_fft2_shape_check() {
        assert!(fft2(&[0.0; 15], 4, 4).is_err());
        assert!(ifft2(&vec![Complex64::new(0.0, 0.0); 15], 4, 4).is_err());
    }

    #[test]
    fn test_roundtrip_non_square() {
        // Deterministic pseudo-random samples on an 8x4 grid
        let nx = 8;
        let ny = 4;
        let data: Vec<f64> = (0..nx * ny)
            .map(|i| ((i * 2654435761_usize) % 1000) as f64 / 1000.0)
            .collect();
        let spec = fft2(&data, nx, ny).unwrap();
        let back = ifft2(&spec, nx, ny).unwrap();
        for (got, want) in back.iter().zip(&data) {
            assert_relative_eq!(got.re, *want, epsilon = 1e-12);
            assert_relative_eq!(got.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_frequency_lands_in_its_bin() {
        // cos(2*pi*x*2/nx) along x splits into bins (2, 0) and (nx-2, 0).
        let nx = 16;
        let ny = 8;
        let mut data = vec![0.0; nx * ny];
        for y in 0..ny {
            for x in 0..nx {
                data[y * nx + x] = (2.0 * std::f64::consts::PI * 2.0 * x as f64 / nx as f64).cos();
            }
        }
        let spec = fft2(&data, nx, ny).unwrap();
        let half_energy = (nx * ny) as f64 / 2.0;
        assert_relative_eq!(spec[2].re, half_energy, epsilon = 1e-9);
        assert_relative_eq!(spec[nx - 2].re, half_energy, epsilon = 1e-9);
        // No leakage into the row above
        assert!(spec[nx + 2].norm() < 1e-9);
    }
}

//! The hologram reconstruction engine.
//!
//! [`Hologram`] owns a captured interference pattern plus the physical
//! parameters of the recording (wavelength, pixel pitch) and reconstructs
//! the complex optical field at arbitrary propagation distances.
//!
//! Two derived quantities are cached lazily and invalidated precisely:
//!
//! - the spectrum (2D DFT of the pattern) - cleared whenever the data
//!   changes
//! - the squared-frequency grid `u^2 + v^2` - cleared whenever the sample
//!   counts or the pixel pitch change
//!
//! The propagation kernel itself depends on `z` and is rebuilt per
//! reconstruction, never cached across distances.

use crate::fft::{fft2, fft_freq, ifft2};
use num_complex::Complex64;
use optic_core::{Error, Image, Result};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default recording wavelength: 500 nm expressed in millimeters.
pub const DEFAULT_WAVELENGTH: f64 = 0.500e-3;

/// Default sensor pixel pitch: 10 um expressed in millimeters.
pub const DEFAULT_PIXEL_SIZE: f64 = 0.010;

/// The two mutually exclusive input forms [`Hologram::load`] accepts.
///
/// Built via `From` conversions so `load` can take either an in-memory
/// image or a path:
///
/// ```rust,no_run
/// use optic_holo::Hologram;
///
/// let mut holo = Hologram::default();
/// holo.load("captures/plankton.png").unwrap();
/// ```
#[derive(Debug, Clone)]
pub enum HologramSource {
    /// A decoded sample grid; 1-channel, or 3-channel (collapsed to luma).
    Samples(Image),
    /// A raster image file to decode as grayscale.
    File(PathBuf),
}

impl From<Image> for HologramSource {
    fn from(img: Image) -> Self {
        Self::Samples(img)
    }
}

impl From<&Path> for HologramSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<PathBuf> for HologramSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&str> for HologramSource {
    fn from(path: &str) -> Self {
        Self::File(PathBuf::from(path))
    }
}

/// A digital hologram and its reconstruction state.
///
/// See the [crate docs](crate) for the propagation model. All lengths
/// (wavelength, pixel size, z) share one unit.
#[derive(Debug, Clone)]
pub struct Hologram {
    wavelength: f64,
    pixel_size: f64,
    /// Captured pattern, row-major, plus its dimensions.
    data: Option<Vec<f64>>,
    nx: usize,
    ny: usize,
    /// Cached DFT of `data`.
    spectrum: Option<Vec<Complex64>>,
    /// Cached u^2 + v^2 grid.
    freq_r2: Option<Vec<f64>>,
    /// Most recent reconstruction.
    field: Option<Vec<Complex64>>,
    /// Distance of the most recent reconstruction.
    z: Option<f64>,
}

impl Default for Hologram {
    fn default() -> Self {
        Self::new(DEFAULT_WAVELENGTH, DEFAULT_PIXEL_SIZE)
    }
}

impl Hologram {
    /// Creates an empty hologram with the given physical parameters.
    pub fn new(wavelength: f64, pixel_size: f64) -> Self {
        Self {
            wavelength,
            pixel_size,
            data: None,
            nx: 0,
            ny: 0,
            spectrum: None,
            freq_r2: None,
            field: None,
            z: None,
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Loads the interference pattern from an array or an image file.
    ///
    /// File sources decode as grayscale with integer samples normalized to
    /// `[0, 1]`. In-memory 3-channel images are collapsed to luma;
    /// 1-channel images are taken as-is. An empty grid fails with
    /// [`Error::InvalidInput`].
    ///
    /// Loading resets the cached spectrum, the reconstructed field, and the
    /// last distance.
    pub fn load(&mut self, source: impl Into<HologramSource>) -> Result<()> {
        let img = match source.into() {
            HologramSource::Samples(img) => img,
            HologramSource::File(path) => optic_io::read_gray(&path)?,
        };
        let (width, height, channels) = img.shape();
        let samples = match channels {
            1 => img.into_data(),
            3 => {
                debug!("collapsing 3-channel pattern to grayscale");
                img.data()
                    .chunks(3)
                    .map(|px| 0.299 * px[0] + 0.587 * px[1] + 0.114 * px[2])
                    .collect()
            }
            n => return Err(Error::channel_mismatch(1, n as u8)),
        };
        if samples.is_empty() {
            return Err(Error::invalid_input("hologram grid has no samples"));
        }
        self.set_data(samples, width, height);
        Ok(())
    }

    fn set_data(&mut self, samples: Vec<f64>, nx: usize, ny: usize) {
        if self.nx != nx || self.ny != ny {
            self.freq_r2 = None;
        }
        self.nx = nx;
        self.ny = ny;
        self.data = Some(samples);
        self.spectrum = None;
        self.field = None;
        self.z = None;
    }

    // ------------------------------------------------------------------
    // Physical parameters and derived quantities
    // ------------------------------------------------------------------

    /// Recording wavelength.
    #[inline]
    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Sets the recording wavelength; no cached state depends on it.
    pub fn set_wavelength(&mut self, wavelength: f64) {
        self.wavelength = wavelength;
    }

    /// Sensor pixel pitch.
    #[inline]
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Sets the pixel pitch, invalidating the cached frequency grid.
    pub fn set_pixel_size(&mut self, pixel_size: f64) {
        if self.pixel_size != pixel_size {
            self.freq_r2 = None;
        }
        self.pixel_size = pixel_size;
    }

    /// Loaded pattern, if any.
    pub fn data(&self) -> Option<&[f64]> {
        self.data.as_deref()
    }

    /// Sample count in the x-direction, when data is loaded.
    pub fn nx(&self) -> Option<usize> {
        self.data.as_ref().map(|_| self.nx)
    }

    /// Sample count in the y-direction, when data is loaded.
    pub fn ny(&self) -> Option<usize> {
        self.data.as_ref().map(|_| self.ny)
    }

    /// Physical step size in the x-direction.
    #[inline]
    pub fn dx(&self) -> f64 {
        self.pixel_size
    }

    /// Physical step size in the y-direction.
    #[inline]
    pub fn dy(&self) -> f64 {
        self.pixel_size
    }

    /// Nyquist frequency in the x-direction, `1 / (2*dx)`.
    #[inline]
    pub fn u_max(&self) -> f64 {
        1.0 / (2.0 * self.dx())
    }

    /// Nyquist frequency in the y-direction, `1 / (2*dy)`.
    #[inline]
    pub fn v_max(&self) -> f64 {
        1.0 / (2.0 * self.dy())
    }

    /// Frequency increment in the x-direction, `u_max / (nx/2)`.
    pub fn du(&self) -> Option<f64> {
        self.nx().map(|nx| self.u_max() / (0.5 * nx as f64))
    }

    /// Frequency increment in the y-direction, `v_max / (ny/2)`.
    pub fn dv(&self) -> Option<f64> {
        self.ny().map(|ny| self.v_max() / (0.5 * ny as f64))
    }

    /// Wavenumber `k = 2*pi / wavelength`.
    #[inline]
    pub fn wavenumber(&self) -> f64 {
        2.0 * PI / self.wavelength
    }

    /// Distance of the most recent reconstruction.
    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// Cached spectrum of the loaded pattern, if computed.
    pub fn spectrum(&self) -> Option<&[Complex64]> {
        self.spectrum.as_deref()
    }

    /// Most recent reconstructed field, if any.
    pub fn field(&self) -> Option<&[Complex64]> {
        self.field.as_deref()
    }

    /// Intensity `|field|^2` of the most recent reconstruction as a
    /// displayable single-channel image.
    pub fn intensity(&self) -> Option<Image> {
        let field = self.field.as_ref()?;
        let data: Vec<f64> = field.iter().map(|c| c.norm_sqr()).collect();
        Image::from_data(self.nx, self.ny, 1, data).ok()
    }

    // ------------------------------------------------------------------
    // Reconstruction
    // ------------------------------------------------------------------

    /// Reconstructs the optical field at propagation distance `z`.
    ///
    /// The pattern's spectrum is computed on first use and reused for every
    /// subsequent distance; only the propagation kernel is rebuilt. Fails
    /// with [`Error::NoData`] when no pattern is loaded.
    pub fn reconstruct(&mut self, z: f64) -> Result<&[Complex64]> {
        let data = self.data.as_ref().ok_or(Error::NoData)?;
        if self.spectrum.is_none() {
            self.spectrum = Some(fft2(data, self.nx, self.ny)?);
        }
        let kernel = self.kernel(z)?;
        let spectrum = self.spectrum.as_ref().ok_or(Error::NoData)?;
        let product: Vec<Complex64> = spectrum.iter().zip(&kernel).map(|(s, k)| s * k).collect();
        let field = ifft2(&product, self.nx, self.ny)?;
        self.z = Some(z);
        Ok(self.field.insert(field).as_slice())
    }

    fn ensure_freq_grid(&mut self) -> Result<()> {
        if self.freq_r2.is_some() {
            return Ok(());
        }
        if self.data.is_none() {
            return Err(Error::NoData);
        }
        let u = fft_freq(self.nx, self.pixel_size);
        let v = fft_freq(self.ny, self.pixel_size);
        let mut r2 = Vec::with_capacity(self.nx * self.ny);
        for vj in &v {
            for ui in &u {
                r2.push(ui * ui + vj * vj);
            }
        }
        self.freq_r2 = Some(r2);
        Ok(())
    }

    /// Angular-spectrum propagation kernel for distance `z`:
    /// `K(u,v) = exp(i * pi * wavelength * z * (u^2 + v^2))`.
    pub fn kernel(&mut self, z: f64) -> Result<Vec<Complex64>> {
        self.ensure_freq_grid()?;
        let r2 = self.freq_r2.as_ref().ok_or(Error::NoData)?;
        let a = PI * self.wavelength * z;
        Ok(r2
            .iter()
            .map(|&r2| Complex64::new(0.0, a * r2).exp())
            .collect())
    }

    /// The propagation kernel in its explicit cosine+sine form:
    /// `cos(a*R^2) + i*sin(a*R^2)` with `a = pi * wavelength * z`.
    ///
    /// Numerically equivalent to [`kernel`](Self::kernel); both forms must
    /// agree to floating tolerance for every parameter combination.
    pub fn kernel_cs(&mut self, z: f64) -> Result<Vec<Complex64>> {
        self.ensure_freq_grid()?;
        let r2 = self.freq_r2.as_ref().ok_or(Error::NoData)?;
        let a = PI * self.wavelength * z;
        Ok(r2
            .iter()
            .map(|&r2| Complex64::new((a * r2).cos(), (a * r2).sin()))
            .collect())
    }

    /// Sample index (possibly fractional) along the x-axis where the
    /// kernel's local frequency first exceeds the sampling grid's Nyquist
    /// limit.
    ///
    /// The quadratic-phase chirp advances by `2*pi*wavelength*z*m*df^2` per
    /// sample `m`, with `df = 1/(nx*pixel_size)`; the phase step hits the
    /// pi limit at `m = 1/(2*wavelength*z*df^2)`. Frequencies beyond that
    /// sample alias and make the corresponding reconstruction content
    /// unreliable. Returns infinity at `z = 0` (no chirp).
    pub fn aliasing_sample(&self, z: f64) -> Result<f64> {
        let nx = self.nx().ok_or(Error::NoData)?;
        let df = 1.0 / (nx as f64 * self.pixel_size);
        Ok(1.0 / (2.0 * self.wavelength * z.abs() * df * df))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp_image(nx: usize, ny: usize) -> Image {
        let data: Vec<f64> = (0..nx * ny).map(|i| (i % 7) as f64 / 7.0).collect();
        Image::from_data(nx, ny, 1, data).unwrap()
    }

    #[test]
    fn test_defaults() {
        let holo = Hologram::default();
        assert_eq!(holo.wavelength(), 500e-6);
        assert_eq!(holo.pixel_size(), 10e-3);
        assert_eq!(holo.dx(), 10e-3);
        assert_eq!(holo.dy(), 10e-3);
        assert!(holo.data().is_none());
        assert!(holo.field().is_none());
        assert!(holo.spectrum().is_none());
        assert!(holo.z().is_none());
    }

    #[test]
    fn test_frequency_quantities() {
        let mut holo = Hologram::default();
        assert_relative_eq!(holo.u_max(), 50.0);
        assert_relative_eq!(holo.v_max(), 50.0);
        // No data yet: frequency increments are undefined
        assert!(holo.du().is_none());

        holo.load(ramp_image(8, 4)).unwrap();
        assert_relative_eq!(holo.du().unwrap(), 50.0 / 4.0);
        assert_relative_eq!(holo.dv().unwrap(), 50.0 / 2.0);
    }

    #[test]
    fn test_wavenumber() {
        let holo = Hologram::new(0.5, 1.0);
        assert_relative_eq!(holo.wavenumber(), 4.0 * PI);
    }

    #[test]
    fn test_load_resets_state() {
        let mut holo = Hologram::default();
        holo.load(ramp_image(8, 8)).unwrap();
        holo.reconstruct(10.0).unwrap();
        assert!(holo.spectrum().is_some());
        assert!(holo.field().is_some());
        assert_eq!(holo.z(), Some(10.0));

        holo.load(ramp_image(8, 8)).unwrap();
        assert!(holo.spectrum().is_none());
        assert!(holo.field().is_none());
        assert!(holo.z().is_none());
        assert_eq!(holo.nx(), Some(8));
    }

    #[test]
    fn test_load_collapses_color() {
        let mut holo = Hologram::default();
        let rgb = Image::from_data(1, 1, 3, vec![1.0, 0.0, 0.0]).unwrap();
        holo.load(rgb).unwrap();
        assert_relative_eq!(holo.data().unwrap()[0], 0.299);
    }

    #[test]
    fn test_load_rejects_bad_input() {
        let mut holo = Hologram::default();
        assert!(matches!(
            holo.load(Image::new(2, 2, 2)),
            Err(Error::ChannelMismatch { .. })
        ));
        assert!(matches!(
            holo.load(Image::new(0, 0, 1)),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_reconstruct_without_data() {
        let mut holo = Hologram::default();
        assert!(matches!(holo.reconstruct(5.0), Err(Error::NoData)));
    }

    #[test]
    fn test_kernel_unit_modulus() {
        let mut holo = Hologram::new(658e-6, 9e-3);
        holo.load(ramp_image(16, 16)).unwrap();
        for k in holo.kernel(54.0).unwrap() {
            assert_relative_eq!(k.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_kernel_forms_agree() {
        // The exponential and cosine+sine formulations must match within
        // 1e-10 across wavelength / pixel size / distance combinations.
        for &wavelength in &[405e-6, 500e-6, 658e-6] {
            for &pixel in &[5e-3, 9e-3, 10e-3] {
                for &z in &[-25.0, 0.0, 1.0, 54.0, 500.0] {
                    let mut holo = Hologram::new(wavelength, pixel);
                    holo.load(ramp_image(16, 8)).unwrap();
                    let a = holo.kernel(z).unwrap();
                    let b = holo.kernel_cs(z).unwrap();
                    for (ka, kb) in a.iter().zip(&b) {
                        assert!(
                            (ka - kb).norm() < 1e-10,
                            "kernel mismatch at wavelength={wavelength}, pixel={pixel}, z={z}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_pixel_size_invalidates_frequency_grid() {
        let mut holo = Hologram::default();
        holo.load(ramp_image(8, 8)).unwrap();
        let k1 = holo.kernel(10.0).unwrap();
        holo.set_pixel_size(5e-3);
        let k2 = holo.kernel(10.0).unwrap();
        // Halving the pitch doubles the grid frequencies; kernels differ
        assert!(k1.iter().zip(&k2).any(|(a, b)| (a - b).norm() > 1e-6));
    }

    #[test]
    fn test_aliasing_sample() {
        let mut holo = Hologram::new(658e-6, 9e-3);
        assert!(holo.aliasing_sample(54.0).is_err());
        holo.load(ramp_image(128, 128)).unwrap();

        let df = 1.0 / (128.0 * 9e-3);
        let want = 1.0 / (2.0 * 658e-6 * 54.0 * df * df);
        assert_relative_eq!(holo.aliasing_sample(54.0).unwrap(), want);

        // Deeper reconstructions alias earlier
        assert!(holo.aliasing_sample(108.0).unwrap() < holo.aliasing_sample(54.0).unwrap());
        assert!(holo.aliasing_sample(0.0).unwrap().is_infinite());
    }

    #[test]
    fn test_intensity_shape() {
        let mut holo = Hologram::default();
        holo.load(ramp_image(8, 4)).unwrap();
        assert!(holo.intensity().is_none());
        holo.reconstruct(3.0).unwrap();
        let intensity = holo.intensity().unwrap();
        assert_eq!(intensity.shape(), (8, 4, 1));
        assert!(intensity.data().iter().all(|v| v.is_finite() && *v >= 0.0));
    }
}

//! # optic-io
//!
//! Raster image I/O for the optics-rs workspace.
//!
//! Decoding and encoding are delegated to the [`image`] crate (BMP, PNG,
//! JPEG, TIFF with the default feature set); this crate only adapts between
//! its 8-bit buffers and the workspace's `[0, 1]` f64 [`Image`] buffers.
//!
//! # Usage
//!
//! ```rust,no_run
//! use optic_io::{read, read_gray, write};
//!
//! let color = read("shot.png").unwrap();          // 3-channel RGB
//! let pattern = read_gray("holo.bmp").unwrap();   // 1-channel luma
//! write("out.png", &color).unwrap();
//! ```
//!
//! # Dependencies
//!
//! - [`optic-core`] - Target buffers and errors
//! - [`image`] - Codecs
//! - [`tracing`] - Decode diagnostics
//!
//! # Used By
//!
//! - `optic-holo` - File-backed hologram loads

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use image::{DynamicImage, ImageBuffer, ImageError};
use optic_core::{Error, Image, Result, float_to_u8, u8_to_float};
use std::path::Path;
use tracing::debug;

fn codec_error(err: ImageError) -> Error {
    match err {
        ImageError::IoError(io) => Error::Io(io),
        other => Error::Decode(other.to_string()),
    }
}

/// Reads an image file as 3-channel RGB with samples in `[0, 1]`.
///
/// Grayscale sources are expanded to three equal channels. A missing file
/// fails with [`Error::Io`]; an undecodable one with [`Error::Decode`].
pub fn read(path: impl AsRef<Path>) -> Result<Image> {
    let decoded = image::open(path.as_ref()).map_err(codec_error)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    let data = u8_to_float(rgb.as_raw());
    Image::from_data(width as usize, height as usize, 3, data)
}

/// Reads an image file as a single luma channel with samples in `[0, 1]`.
///
/// Multi-channel sources are collapsed to luma; integer samples are
/// normalized by the type maximum (255 for 8-bit).
pub fn read_gray(path: impl AsRef<Path>) -> Result<Image> {
    let decoded = image::open(path.as_ref()).map_err(codec_error)?;
    if decoded.color().channel_count() > 1 {
        debug!(
            channels = decoded.color().channel_count(),
            "collapsing multi-channel image to grayscale"
        );
    }
    let gray = decoded.to_luma8();
    let (width, height) = gray.dimensions();
    let data = u8_to_float(gray.as_raw());
    Image::from_data(width as usize, height as usize, 1, data)
}

/// Writes a 1- or 3-channel `[0, 1]` image as an 8-bit file.
///
/// The format follows the path extension. Samples are quantized with
/// round-to-nearest and clamped; other channel counts fail with
/// [`Error::ChannelMismatch`].
pub fn write(path: impl AsRef<Path>, img: &Image) -> Result<()> {
    let codes = float_to_u8(img.data());
    let (width, height) = (img.width() as u32, img.height() as u32);
    let dynamic = match img.channels() {
        1 => ImageBuffer::from_raw(width, height, codes)
            .map(DynamicImage::ImageLuma8)
            .ok_or_else(|| Error::invalid_input("sample buffer does not fill the image"))?,
        3 => ImageBuffer::from_raw(width, height, codes)
            .map(DynamicImage::ImageRgb8)
            .ok_or_else(|| Error::invalid_input("sample buffer does not fill the image"))?,
        n => return Err(Error::channel_mismatch(3, n as u8)),
    };
    dynamic.save(path.as_ref()).map_err(codec_error)
}

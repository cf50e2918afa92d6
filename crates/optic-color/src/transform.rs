//! Nonlinear color-space transforms.
//!
//! The piecewise encodings (sRGB companding, Lab/Luv) all route through
//! [`bilevel`], which applies the power-law branch above a threshold and the
//! linear branch at or below it. Divisions that can meet a zero denominator
//! (chromaticity projections, Luv at black) route through [`safe_divide0`] /
//! [`sdiv`] so black maps to black instead of NaN.
//!
//! Image-level transforms require 3-channel input, never mutate their
//! argument, and preserve its shape. The white point parameterizes the
//! XYZ normalization and should be on the same scale as the data.

use crate::whitepoint::WhitePoint;
use optic_core::{Image, Result, float_to_u8, u8_to_float};
use optic_math::{Vec3, bilevel, safe_divide0, sdiv};

/// CIE threshold between the cube-root and linear Lab branches.
pub const LAB_EPSILON: f64 = 0.008856;

/// CIE slope constant for the linear Lab branch.
pub const LAB_KAPPA: f64 = 903.3;

// ============================================================================
// sRGB companding
// ============================================================================

/// Encodes one linear-RGB value to its sRGB code in `[0, 1]`.
///
/// Linear scale below 0.0031308, power law above.
#[inline]
pub fn compand_value(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Decodes one sRGB code in `[0, 1]` back to linear RGB.
///
/// Inverse of [`compand_value`] away from the threshold boundary.
#[inline]
pub fn inverse_compand_value(encoded: f64) -> f64 {
    if encoded <= 0.0405 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

/// Compands linear RGB samples in `[0, 1]` to 8-bit sRGB codes.
pub fn compand(rgb_linear: &[f64]) -> Result<Vec<u8>> {
    let encoded = bilevel(
        rgb_linear,
        |x| 1.055 * x.powf(1.0 / 2.4) - 0.055,
        |x| x * 12.92,
        0.0031308,
        None,
    )?;
    Ok(float_to_u8(&encoded))
}

/// Inverts the sRGB companding: 8-bit codes to linear RGB in `[0, 1]`.
pub fn inverse_compand(srgb: &[u8]) -> Result<Vec<f64>> {
    let normalized = u8_to_float(srgb);
    bilevel(
        &normalized,
        |x| ((x + 0.055) / 1.055).powf(2.4),
        |x| x / 12.92,
        0.0405,
        None,
    )
}

// ============================================================================
// Chromaticity coordinates
// ============================================================================

/// (x, y) chromaticity of an XYZ triplet.
pub fn xyz_to_xy(xyz: Vec3) -> (f64, f64) {
    let sum = xyz.sum();
    (xyz.x / sum, xyz.y / sum)
}

/// XYZ to xyY (sometimes written xyL).
pub fn xyz_to_xyy(xyz: Vec3) -> [f64; 3] {
    let (x, y) = xyz_to_xy(xyz);
    [x, y, xyz.y]
}

/// xyY back to XYZ.
pub fn xyy_to_xyz(xyy: [f64; 3]) -> Vec3 {
    let [x, y, big_y] = xyy;
    Vec3::new(
        x * big_y / y,
        big_y,
        (1.0 - x - y) * big_y / y,
    )
}

/// (x, y) chromaticity to XYZ, assuming Y = 1.
pub fn xy_to_xyz(xy: (f64, f64)) -> Vec3 {
    xyy_to_xyz([xy.0, xy.1, 1.0])
}

/// CIE 1976 (u', v') coordinates to (x, y) chromaticity.
pub fn uv_to_xy(uv: (f64, f64)) -> (f64, f64) {
    let (u, v) = uv;
    let denom = 6.0 * u - 16.0 * v + 12.0;
    (sdiv(9.0 * u, denom), sdiv(4.0 * v, denom))
}

/// (x, y) chromaticity to CIE 1976 (u', v').
pub fn xy_to_uv(xy: (f64, f64)) -> (f64, f64) {
    let (x, y) = xy;
    let denom = -2.0 * x + 12.0 * y + 3.0;
    (sdiv(4.0 * x, denom), sdiv(9.0 * y, denom))
}

// ============================================================================
// CIELAB
// ============================================================================

/// Converts XYZ to CIELAB (L*a*b*).
///
/// `white` is the white point of the XYZ encoding and must share its scale:
/// for XYZ in `[0, 1]` the white values sit near 1. Relative values above 1
/// are legal, not an error.
pub fn xyz_to_lab(xyz: &Image, white: &WhitePoint) -> Result<Image> {
    let [x, y, z] = xyz.split3()?;
    let xr: Vec<f64> = x.iter().map(|v| v / white.x).collect();
    let yr: Vec<f64> = y.iter().map(|v| v / white.y).collect();
    let zr: Vec<f64> = z.iter().map(|v| v / white.z).collect();

    let f_small = |t: f64| (LAB_KAPPA * t + 16.0) / 116.0;
    let fx = bilevel(&xr, f64::cbrt, f_small, LAB_EPSILON, None)?;
    let fy = bilevel(&yr, f64::cbrt, f_small, LAB_EPSILON, None)?;
    let fz = bilevel(&zr, f64::cbrt, f_small, LAB_EPSILON, None)?;

    let l: Vec<f64> = fy.iter().map(|f| 116.0 * f - 16.0).collect();
    let a: Vec<f64> = fx.iter().zip(&fy).map(|(x, y)| 500.0 * (x - y)).collect();
    let b: Vec<f64> = fy.iter().zip(&fz).map(|(y, z)| 200.0 * (y - z)).collect();
    Image::from_planes3(xyz.width(), xyz.height(), [l, a, b])
}

/// Converts CIELAB back to XYZ against the same white point.
pub fn lab_to_xyz(lab: &Image, white: &WhitePoint) -> Result<Image> {
    let [l, a, b] = lab.split3()?;
    let fy: Vec<f64> = l.iter().map(|v| (v + 16.0) / 116.0).collect();
    let fx: Vec<f64> = a.iter().zip(&fy).map(|(a, fy)| a / 500.0 + fy).collect();
    let fz: Vec<f64> = fy.iter().zip(&b).map(|(fy, b)| fy - b / 200.0).collect();

    // Inverse of lab_f; the threshold moves to f(epsilon) = epsilon^(1/3).
    let finv_small = |f: f64| (116.0 * f - 16.0) / LAB_KAPPA;
    let xr = bilevel(&fx, |f| f * f * f, finv_small, LAB_EPSILON.cbrt(), None)?;
    let zr = bilevel(&fz, |f| f * f * f, finv_small, LAB_EPSILON.cbrt(), None)?;
    // Y is recovered from L* directly; its linear branch switches at
    // L = kappa * epsilon.
    let yr = bilevel(
        &l,
        |v| {
            let f = (v + 16.0) / 116.0;
            f * f * f
        },
        |v| v / LAB_KAPPA,
        LAB_KAPPA * LAB_EPSILON,
        None,
    )?;

    let x: Vec<f64> = xr.iter().map(|v| v * white.x).collect();
    let y: Vec<f64> = yr.iter().map(|v| v * white.y).collect();
    let z: Vec<f64> = zr.iter().map(|v| v * white.z).collect();
    Image::from_planes3(lab.width(), lab.height(), [x, y, z])
}

// ============================================================================
// CIELUV
// ============================================================================

fn u_prime(x: &[f64], y: &[f64], z: &[f64]) -> Result<Vec<f64>> {
    let num: Vec<f64> = x.iter().map(|v| 4.0 * v).collect();
    let denom: Vec<f64> = x
        .iter()
        .zip(y)
        .zip(z)
        .map(|((x, y), z)| x + 15.0 * y + 3.0 * z)
        .collect();
    safe_divide0(&num, &denom)
}

fn v_prime(x: &[f64], y: &[f64], z: &[f64]) -> Result<Vec<f64>> {
    let num: Vec<f64> = y.iter().map(|v| 9.0 * v).collect();
    let denom: Vec<f64> = x
        .iter()
        .zip(y)
        .zip(z)
        .map(|((x, y), z)| x + 15.0 * y + 3.0 * z)
        .collect();
    safe_divide0(&num, &denom)
}

fn u_prime_ref(white: &WhitePoint) -> f64 {
    sdiv(4.0 * white.x, white.x + 15.0 * white.y + 3.0 * white.z)
}

fn v_prime_ref(white: &WhitePoint) -> f64 {
    sdiv(9.0 * white.y, white.x + 15.0 * white.y + 3.0 * white.z)
}

/// Converts XYZ to CIELUV (L*u*v*).
///
/// Black (XYZ = 0) maps to Luv = 0 through the safe divisions.
pub fn xyz_to_luv(xyz: &Image, white: &WhitePoint) -> Result<Image> {
    let [x, y, z] = xyz.split3()?;
    let yr: Vec<f64> = y.iter().map(|v| v / white.y).collect();
    let up = u_prime(&x, &y, &z)?;
    let vp = v_prime(&x, &y, &z)?;
    let up_ref = u_prime_ref(white);
    let vp_ref = v_prime_ref(white);

    let l = bilevel(
        &yr,
        |y| 116.0 * y.cbrt() - 16.0,
        |y| y * LAB_KAPPA,
        LAB_EPSILON,
        None,
    )?;
    let u: Vec<f64> = l
        .iter()
        .zip(&up)
        .map(|(l, up)| 13.0 * l * (up - up_ref))
        .collect();
    let v: Vec<f64> = l
        .iter()
        .zip(&vp)
        .map(|(l, vp)| 13.0 * l * (vp - vp_ref))
        .collect();
    Image::from_planes3(xyz.width(), xyz.height(), [l, u, v])
}

/// Converts CIELUV back to XYZ against the same white point.
pub fn luv_to_xyz(luv: &Image, white: &WhitePoint) -> Result<Image> {
    let [l, u, v] = luv.split3()?;
    let yr = bilevel(
        &l,
        |v| {
            let f = (v + 16.0) / 116.0;
            f * f * f
        },
        |v| v / LAB_KAPPA,
        LAB_KAPPA * LAB_EPSILON,
        None,
    )?;
    let y: Vec<f64> = yr.iter().map(|v| v * white.y).collect();

    let thirteen_l: Vec<f64> = l.iter().map(|v| 13.0 * v).collect();
    let up_ref = u_prime_ref(white);
    let vp_ref = v_prime_ref(white);
    let up: Vec<f64> = safe_divide0(&u, &thirteen_l)?
        .into_iter()
        .map(|v| v + up_ref)
        .collect();
    let vp: Vec<f64> = safe_divide0(&v, &thirteen_l)?
        .into_iter()
        .map(|v| v + vp_ref)
        .collect();

    let x: Vec<f64> = y
        .iter()
        .zip(up.iter().zip(&vp))
        .map(|(y, (up, vp))| y * sdiv(9.0 * up, 4.0 * vp))
        .collect();
    let z: Vec<f64> = y
        .iter()
        .zip(up.iter().zip(&vp))
        .map(|(y, (up, vp))| y * sdiv(12.0 - 3.0 * up - 20.0 * vp, 4.0 * vp))
        .collect();
    Image::from_planes3(luv.width(), luv.height(), [x, y, z])
}

// ============================================================================
// LCh
// ============================================================================

/// Converts CIELUV to its polar LCh form.
///
/// L: luminance, C: chroma, h: hue in radians.
pub fn luv_to_lch(luv: &Image) -> Result<Image> {
    let [l, u, v] = luv.split3()?;
    let c: Vec<f64> = u.iter().zip(&v).map(|(u, v)| u.hypot(*v)).collect();
    let h: Vec<f64> = u.iter().zip(&v).map(|(u, v)| v.atan2(*u)).collect();
    Image::from_planes3(luv.width(), luv.height(), [l, c, h])
}

/// Saturation correlate of an LCh image: chroma over luminance.
///
/// Zero-luminance pixels yield zero rather than infinity.
pub fn lch_saturation(lch: &Image) -> Result<Vec<f64>> {
    let [l, c, _] = lch.split3()?;
    safe_divide0(&c, &l)
}

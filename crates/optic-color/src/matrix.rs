//! Named registry of linear color transform matrices.
//!
//! Forward transforms are a compile-time table keyed by
//! `source2destination[_qualifier]` names. Inverse transforms are not stored:
//! requesting `lms2xyz` finds the registered `xyz2lms` by reversing the name
//! around the first `'2'` (any `_qualifier` after the first `'_'` is carried
//! along) and numerically inverts the matrix.
//!
//! Lookup is exact-match only; misspelled or unregistered names fail with
//! [`Error::UnknownTransform`] rather than guessing.
//!
//! # Usage
//!
//! ```rust
//! use optic_color::matrix::matrix;
//!
//! let fwd = matrix("xyz2lms").unwrap();
//! let inv = matrix("lms2xyz").unwrap();
//! let prod = fwd * inv;
//! assert!((prod.m[0][0] - 1.0).abs() < 1e-10);
//! ```

use crate::whitepoint::WhitePoint;
use optic_core::{Error, Result};
use optic_math::Mat3;

// ============================================================================
// Transform matrices
// ============================================================================
// Values from the CIE and Bruce Lindbloom reference tables.

/// Unit transform; leaves the color untouched. Useful in tests and as a
/// placeholder in transform chains.
const ONE2ONE: Mat3 = Mat3::IDENTITY;

/// Original von Kries XYZ->LMS, normalized to an equal-energy illuminant.
const XYZ2LMS_VON_KRIES: Mat3 = Mat3::from_rows([
    [0.38971, 0.68898, -0.07868],
    [-0.22981, 1.18340, 0.04641],
    [0.0, 0.0, 1.0],
]);

/// von Kries XYZ->LMS, normalized to D65.
const XYZ2LMS_VON_KRIES_D65: Mat3 = Mat3::from_rows([
    [0.4002, 0.7076, -0.0808],
    [-0.2263, 1.1653, 0.0457],
    [0.0, 0.0, 0.9182],
]);

/// Bradford XYZ->LMS (spectrally sharpened cone space).
const XYZ2LMS_BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// CIECAM97s XYZ->LMS.
const XYZ2LMS_CIECAM97S: Mat3 = Mat3::from_rows([
    [0.8562, 0.3372, -0.1934],
    [-0.8360, 1.8327, 0.0033],
    [0.0357, -0.0469, 1.0112],
]);

/// CIECAM02 XYZ->LMS.
const XYZ2LMS_CIECAM02: Mat3 = Mat3::from_rows([
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
]);

/// Linear sRGB to XYZ, Bradford-adapted to D50.
const SRGB2XYZ_D50: Mat3 = Mat3::from_rows([
    [0.4360747, 0.3850649, 0.1430804],
    [0.2225045, 0.7168786, 0.0606169],
    [0.0139322, 0.0971045, 0.7141733],
]);

/// Linear sRGB to XYZ with its native D65 white.
const SRGB2XYZ_D65: Mat3 = Mat3::from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

/// Forward transform table.
///
/// Unqualified names are the conventional defaults: `xyz2lms` is Bradford,
/// `srgb2xyz` is the D50-adapted matrix.
const FORWARD_TRANSFORMS: &[(&str, Mat3)] = &[
    ("one2one", ONE2ONE),
    ("xyz2lms", XYZ2LMS_BRADFORD),
    ("xyz2lms_von_kries", XYZ2LMS_VON_KRIES),
    ("xyz2lms_von_kries_d65", XYZ2LMS_VON_KRIES_D65),
    ("xyz2lms_bradford", XYZ2LMS_BRADFORD),
    ("xyz2lms_ciecam97s", XYZ2LMS_CIECAM97S),
    ("xyz2lms_ciecam02", XYZ2LMS_CIECAM02),
    ("srgb2xyz", SRGB2XYZ_D50),
    ("srgb2xyz_d50", SRGB2XYZ_D50),
    ("srgb2xyz_d65", SRGB2XYZ_D65),
];

// ============================================================================
// Lookup
// ============================================================================

fn forward(name: &str) -> Option<Mat3> {
    FORWARD_TRANSFORMS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, m)| *m)
}

/// Derives the name of the opposite-direction transform.
///
/// The `src2dst` head (everything before the first `'_'`) is split on its
/// first `'2'` and the tokens are swapped; any qualifier suffix is kept.
/// Returns `None` when the head has no `'2'` separator.
///
/// # Example
///
/// ```rust
/// use optic_color::invert_transform_name;
///
/// assert_eq!(invert_transform_name("foo2bar").as_deref(), Some("bar2foo"));
/// assert_eq!(
///     invert_transform_name("foo2bar_multi_qual").as_deref(),
///     Some("bar2foo_multi_qual")
/// );
/// ```
pub fn invert_transform_name(name: &str) -> Option<String> {
    let (head, qualifier) = match name.split_once('_') {
        Some((h, q)) => (h, Some(q)),
        None => (name, None),
    };
    let (src, dst) = head.split_once('2')?;
    Some(match qualifier {
        Some(q) => format!("{dst}2{src}_{q}"),
        None => format!("{dst}2{src}"),
    })
}

/// Returns the matrix for a registered transform name.
///
/// Forward names return the table entry; names whose reversal is registered
/// return the numerical inverse. Anything else fails with
/// [`Error::UnknownTransform`]; a registered matrix that cannot be inverted
/// fails with [`Error::SingularTransform`].
pub fn matrix(transform_name: &str) -> Result<Mat3> {
    if let Some(m) = forward(transform_name) {
        return Ok(m);
    }
    if let Some(fwd_name) = invert_transform_name(transform_name) {
        if let Some(m) = forward(&fwd_name) {
            return m.inverse().ok_or_else(|| Error::singular(fwd_name));
        }
    }
    Err(Error::UnknownTransform(transform_name.to_string()))
}

/// All names [`matrix`] accepts: registered forwards plus their derived
/// inverses, in registry order.
pub fn transform_names() -> Vec<String> {
    let mut names: Vec<String> = FORWARD_TRANSFORMS
        .iter()
        .map(|(n, _)| (*n).to_string())
        .collect();
    names.extend(
        FORWARD_TRANSFORMS
            .iter()
            .filter_map(|(n, _)| invert_transform_name(n)),
    );
    names
}

// ============================================================================
// Chromatic adaptation
// ============================================================================

/// Computes the XYZ(source white) -> XYZ(destination white) adaptation.
///
/// von Kries-style: both whites are taken into LMS, a diagonal matrix scales
/// each cone response by the destination/source ratio, and the result is
/// brought back to XYZ:
///
/// ```text
/// M = lms2xyz * diag(dst_lms / src_lms) * xyz2lms
/// ```
///
/// Adapting a white point to itself yields the identity.
///
/// Both white points should be on the same scale.
pub fn adapt_whitepoint(source: &WhitePoint, dest: &WhitePoint) -> Result<Mat3> {
    let xyz2lms = matrix("xyz2lms")?;
    let lms2xyz = matrix("lms2xyz")?;
    let src_lms = xyz2lms * source.xyz();
    let dst_lms = xyz2lms * dest.xyz();
    let scale = Mat3::diagonal_from(dst_lms.div_elementwise(src_lms));
    Ok(lms2xyz * scale * xyz2lms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::whitepoint;
    use optic_math::Vec3;

    fn assert_identity(m: &Mat3, tol: f64) {
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (m.m[i][j] - expected).abs() < tol,
                    "[{i}][{j}] = {}",
                    m.m[i][j]
                );
            }
        }
    }

    #[test]
    fn test_invert_transform_name() {
        assert_eq!(invert_transform_name("foo2bar").as_deref(), Some("bar2foo"));
        assert_eq!(
            invert_transform_name("foo2bar_qual").as_deref(),
            Some("bar2foo_qual")
        );
        assert_eq!(
            invert_transform_name("foo2bar_multi_qual").as_deref(),
            Some("bar2foo_multi_qual")
        );
        assert_eq!(invert_transform_name("nodirection"), None);
    }

    #[test]
    fn test_matrix_forward_and_inverse() {
        let fwd = matrix("xyz2lms").unwrap();
        let inv = matrix("lms2xyz").unwrap();
        assert_identity(&(fwd * inv), 1e-10);
    }

    #[test]
    fn test_matrix_unknown() {
        let err = matrix("foo2bar_unknown_transform").unwrap_err();
        assert!(matches!(err, Error::UnknownTransform(_)));
    }

    #[test]
    fn test_one2one_is_identity() {
        assert_identity(&matrix("one2one").unwrap(), 0.0);
        // ... and so is its derived inverse
        assert_identity(&matrix("one2one").unwrap().inverse().unwrap(), 1e-15);
    }

    #[test]
    fn test_default_aliases() {
        assert_eq!(matrix("xyz2lms").unwrap(), matrix("xyz2lms_bradford").unwrap());
        assert_eq!(matrix("srgb2xyz").unwrap(), matrix("srgb2xyz_d50").unwrap());
    }

    #[test]
    fn test_qualified_inverse() {
        let fwd = matrix("xyz2lms_ciecam02").unwrap();
        let inv = matrix("lms2xyz_ciecam02").unwrap();
        assert_identity(&(fwd * inv), 1e-10);
    }

    #[test]
    fn test_transform_names_paired() {
        let names = transform_names();
        assert_eq!(names.len(), 2 * FORWARD_TRANSFORMS.len());
        assert!(names.iter().any(|n| n == "lms2xyz_von_kries_d65"));
    }

    #[test]
    fn test_adapt_whitepoint_self_is_identity() {
        for wp in [whitepoint::D50, whitepoint::D65, whitepoint::A, whitepoint::E] {
            let m = adapt_whitepoint(&wp, &wp).unwrap();
            assert_identity(&m, 1e-10);
        }
    }

    #[test]
    fn test_adapt_whitepoint_maps_white() {
        // The adaptation must carry the source white exactly onto the
        // destination white.
        let m = adapt_whitepoint(&whitepoint::D65, &whitepoint::D50).unwrap();
        let mapped = m * whitepoint::D65.xyz();
        let want = whitepoint::D50.xyz();
        assert!((mapped - want).length() < 1e-10, "mapped = {mapped:?}");
    }

    #[test]
    fn test_adapt_roundtrip() {
        let there = adapt_whitepoint(&whitepoint::D65, &whitepoint::D50).unwrap();
        let back = adapt_whitepoint(&whitepoint::D50, &whitepoint::D65).unwrap();
        assert_identity(&(back * there), 1e-10);
    }

    #[test]
    fn test_srgb_red_to_xyz() {
        let xyz = matrix("srgb2xyz_d65").unwrap() * Vec3::new(1.0, 0.0, 0.0);
        assert!((xyz.x - 0.4124564).abs() < 1e-12);
        assert!((xyz.y - 0.2126729).abs() < 1e-12);
    }
}

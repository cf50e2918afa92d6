//! Cross-module color pipeline checks: companding, linear transforms, and
//! perceptual encodings chained the way callers actually use them.

use optic_core::Image;
use optic_color::{adapt_whitepoint, matrix, transform, whitepoint};
use optic_math::{Mat3, Vec3};

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() < tol, "{a} vs {b}");
}

#[test]
fn srgb_pixel_to_lab_and_back() {
    // Decode an 8-bit sRGB pixel, take it to XYZ, to Lab, and all the way
    // back to the same 8-bit codes.
    let codes: [u8; 3] = [200, 128, 40];
    let linear = transform::inverse_compand(&codes).unwrap();
    let rgb = Vec3::new(linear[0], linear[1], linear[2]);

    let to_xyz = matrix("srgb2xyz_d50").unwrap();
    let xyz = to_xyz * rgb;
    let lab = transform::xyz_to_lab(&Image::from_pixel3(xyz.to_array()), &whitepoint::D50).unwrap();

    let xyz_back = transform::lab_to_xyz(&lab, &whitepoint::D50).unwrap();
    let rgb_back = matrix("xyz2srgb_d50").unwrap()
        * Vec3::new(xyz_back.data()[0], xyz_back.data()[1], xyz_back.data()[2]);
    let codes_back = transform::compand(&rgb_back.to_array()).unwrap();
    assert_eq!(codes_back, codes);
}

#[test]
fn luv_lch_chain_preserves_luminance() {
    let xyz = Image::from_pixel3([0.4, 0.35, 0.2]);
    let luv = transform::xyz_to_luv(&xyz, &whitepoint::D65).unwrap();
    let lch = transform::luv_to_lch(&luv).unwrap();
    assert_close(lch.data()[0], luv.data()[0], 1e-12);

    // Chroma is the vector magnitude of (u, v)
    let (u, v) = (luv.data()[1], luv.data()[2]);
    assert_close(lch.data()[1], (u * u + v * v).sqrt(), 1e-12);
}

#[test]
fn adaptation_composes_with_registry_matrices() {
    // Adapting D65 -> D50 and back through the registry's LMS space is a
    // round trip.
    let forward = adapt_whitepoint(&whitepoint::D65, &whitepoint::D50).unwrap();
    let back = adapt_whitepoint(&whitepoint::D50, &whitepoint::D65).unwrap();
    let prod = back * forward;
    for i in 0..3 {
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_close(prod.m[i][j], expected, 1e-10);
        }
    }
}

#[test]
fn adapted_gray_stays_gray() {
    // A neutral axis color under the source white maps to the neutral axis
    // under the destination white.
    let m = adapt_whitepoint(&whitepoint::D65, &whitepoint::D50).unwrap();
    let gray_d65 = whitepoint::D65.xyz() * 0.18;
    let gray_d50 = m * gray_d65;
    let want = whitepoint::D50.xyz() * 0.18;
    assert!((gray_d50 - want).length() < 1e-10);
}

#[test]
fn registry_products_are_consistent() {
    // xyz2lms * lms2xyz = identity for every registered qualifier.
    for name in ["xyz2lms", "xyz2lms_von_kries", "xyz2lms_ciecam02"] {
        let fwd = matrix(name).unwrap();
        let inv_name = optic_color::invert_transform_name(name).unwrap();
        let inv = matrix(&inv_name).unwrap();
        let prod: Mat3 = fwd * inv;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_close(prod.m[i][j], expected, 1e-10);
            }
        }
    }
}

//! Interface formulas from geometric optics.
//!
//! Angles are in radians, measured from the surface normal. `ni` is the
//! refractive index on the incident side, `nt` on the transmitting side.
//! Past total internal reflection the refraction angle (and everything
//! derived from it) is NaN, which keeps the TIR case visible instead of
//! silently wrong.

/// Angle of refraction through an interface (Snell's law).
///
/// Returns NaN when `theta_i` exceeds the TIR angle.
pub fn refraction_angle(ni: f64, theta_i: f64, nt: f64) -> f64 {
    (ni * theta_i.sin() / nt).asin()
}

/// Incidence angle where total internal reflection begins.
///
/// When no TIR is possible (`ni < nt`) this returns `pi/2`, the steepest
/// physical incidence, so `theta_i > tir_angle(..)` is always a valid test.
pub fn tir_angle(ni: f64, nt: f64) -> f64 {
    if ni < nt {
        std::f64::consts::FRAC_PI_2
    } else {
        (nt / ni).asin()
    }
}

/// Brewster's angle: incidence at which p-polarized reflection vanishes.
pub fn brewsters_angle(ni: f64, nt: f64) -> f64 {
    (nt / ni).atan()
}

/// Fresnel amplitude coefficients `(rs, rp, ts, tp)`.
///
/// Amplitude (not intensity) factors for the s- and p-polarized wave
/// components.
pub fn fresnel_amplitude_coefs(ni: f64, theta_i: f64, nt: f64) -> (f64, f64, f64, f64) {
    let theta_t = refraction_angle(ni, theta_i, nt);
    let ci = theta_i.cos();
    let ct = theta_t.cos();
    let rs = (ni * ci - nt * ct) / (ni * ci + nt * ct);
    let ts = 2.0 * ni * ci / (ni * ci + nt * ct);
    let rp = (nt * ci - ni * ct) / (ni * ct + nt * ci);
    let tp = 2.0 * ni * ci / (ni * ct + nt * ci);
    (rs, rp, ts, tp)
}

/// Fresnel intensity coefficients `(R, T)` for unpolarized light.
///
/// `R` averages the s- and p-polarized reflectances; `T = 1 - R` by energy
/// conservation.
pub fn fresnel_coefs(ni: f64, theta_i: f64, nt: f64) -> (f64, f64) {
    let (rs, rp, _, _) = fresnel_amplitude_coefs(ni, theta_i, nt);
    let r_avg = 0.5 * (rs * rs + rp * rp);
    (r_avg, 1.0 - r_avg)
}

/// Total reflectance of a slab, summing internal bounces, neglecting
/// interference. Assumes the same index `ni` on both sides of the slab.
pub fn slab_reflectance(ni: f64, theta_i: f64, n_slab: f64) -> f64 {
    let (r, _) = fresnel_coefs(ni, theta_i, n_slab);
    2.0 * r / (1.0 + r)
}

/// Schlick's approximation to the Fresnel reflectance.
pub fn schlick_reflectance(ni: f64, theta_i: f64, nt: f64) -> f64 {
    let r_zero = ((ni - nt) / (ni + nt)).powi(2);
    r_zero + (1.0 - r_zero) * (1.0 - theta_i.cos()).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_refraction_angle() {
        assert_eq!(refraction_angle(1.5, 0.0, 1.0), 0.0);
        assert_relative_eq!(
            refraction_angle(1.5, 0.1, 1.0),
            0.1503155,
            epsilon = 1e-6
        );
        // Past TIR the angle is undefined
        assert!(refraction_angle(1.5, 0.73, 1.0).is_nan());
    }

    #[test]
    fn test_tir_angle() {
        assert_relative_eq!(tir_angle(1.0, 1.0), 1.570796, epsilon = 1e-6);
        assert_relative_eq!(tir_angle(1.0, 1.1), 1.570796, epsilon = 1e-6);
        assert_relative_eq!(tir_angle(1.5, 1.0), 0.7297276, epsilon = 1e-6);
    }

    #[test]
    fn test_brewsters_angle() {
        assert_relative_eq!(brewsters_angle(1.5, 1.0), 0.5880026, epsilon = 1e-6);
    }

    #[test]
    fn test_brewster_kills_p_reflection() {
        let theta_b = brewsters_angle(1.0, 1.5);
        let (_, rp, _, _) = fresnel_amplitude_coefs(1.0, theta_b, 1.5);
        assert!(rp.abs() < 1e-12);
    }

    #[test]
    fn test_fresnel_coefs() {
        assert_eq!(fresnel_coefs(1.0, 0.0, 1.0), (0.0, 1.0));
        let (r, t) = fresnel_coefs(1.6, 0.5, 1.0);
        assert_relative_eq!(r, 0.072538667, epsilon = 1e-6);
        assert_relative_eq!(t, 0.927461332, epsilon = 1e-6);

        // Beyond TIR both coefficients degrade to NaN
        let tir = tir_angle(1.6, 1.0);
        let (r, t) = fresnel_coefs(1.6, tir + 0.01, 1.0);
        assert!(r.is_nan());
        assert!(t.is_nan());
    }

    #[test]
    fn test_normal_incidence_reflectance() {
        // R at normal incidence is ((ni-nt)/(ni+nt))^2
        let (r, _) = fresnel_coefs(1.0, 0.0, 1.5);
        assert_relative_eq!(r, 0.04, epsilon = 1e-6);
    }

    #[test]
    fn test_slab_reflectance() {
        // The slab sum exceeds the single-surface reflection
        let (r_single, _) = fresnel_coefs(1.0, 0.3, 1.5);
        let r_slab = slab_reflectance(1.0, 0.3, 1.5);
        assert!(r_slab > r_single);

        let tir = tir_angle(1.6, 1.0);
        assert!(slab_reflectance(1.6, tir + 0.01, 1.0).is_nan());
    }

    #[test]
    fn test_schlick_tracks_fresnel() {
        // Schlick's approximation should sit near the exact value at
        // moderate angles
        let exact = fresnel_coefs(1.0, 0.4, 1.5).0;
        let approx_r = schlick_reflectance(1.0, 0.4, 1.5);
        assert!((exact - approx_r).abs() < 0.01);
    }
}

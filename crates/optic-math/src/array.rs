//! Elementwise array helpers for piecewise color encodings.
//!
//! Two small contracts underpin most of the nonlinear color math:
//!
//! - [`safe_divide`] - elementwise division where zero denominators yield a
//!   configurable replacement instead of inf/NaN
//! - [`bilevel`] - apply one of two functions per element depending on a
//!   threshold test, optionally against a separate comparison array
//!
//! Both allocate fresh output and never mutate their inputs.

use optic_core::{Error, Result};

/// Elementwise division with zero denominators replaced.
///
/// Wherever `denom` is exactly zero the output receives `replace` instead of
/// the IEEE inf/NaN the division would produce. Operands must have the same
/// length; otherwise [`Error::ShapeMismatch`] is returned.
///
/// # Example
///
/// ```rust
/// use optic_math::safe_divide;
///
/// let out = safe_divide(&[1.0, 1.0, 1.0], &[0.0, 0.0, 1.0], 42.0).unwrap();
/// assert_eq!(out, vec![42.0, 42.0, 1.0]);
/// ```
pub fn safe_divide(num: &[f64], denom: &[f64], replace: f64) -> Result<Vec<f64>> {
    if num.len() != denom.len() {
        return Err(Error::shape_mismatch(num.len(), denom.len()));
    }
    Ok(num
        .iter()
        .zip(denom)
        .map(|(&n, &d)| if d == 0.0 { replace } else { n / d })
        .collect())
}

/// [`safe_divide`] with the default replacement value of zero.
pub fn safe_divide0(num: &[f64], denom: &[f64]) -> Result<Vec<f64>> {
    safe_divide(num, denom, 0.0)
}

/// Scalar counterpart of [`safe_divide0`].
#[inline]
pub fn sdiv(num: f64, denom: f64) -> f64 {
    if denom == 0.0 { 0.0 } else { num / denom }
}

/// Applies one of two functions per element, split by a threshold.
///
/// Elements whose comparison value is greater than `threshold` go through
/// `large`; elements at or below it go through `small`. The comparison
/// array defaults to `x` itself; passing `thresh_var` evaluates the test
/// against that array instead (it must match `x` in length).
///
/// The output has the same length as `x`; neither input is modified.
///
/// # Example
///
/// ```rust
/// use optic_math::bilevel;
///
/// let x = [0.0, 1.0, 2.0, 3.0, 4.0];
/// let out = bilevel(&x, |v| v, |_| -1.0, 2.0, None).unwrap();
/// assert_eq!(out, vec![-1.0, -1.0, -1.0, 3.0, 4.0]);
/// ```
pub fn bilevel(
    x: &[f64],
    large: impl Fn(f64) -> f64,
    small: impl Fn(f64) -> f64,
    threshold: f64,
    thresh_var: Option<&[f64]>,
) -> Result<Vec<f64>> {
    if let Some(tv) = thresh_var {
        if tv.len() != x.len() {
            return Err(Error::shape_mismatch(x.len(), tv.len()));
        }
    }
    let compare = thresh_var.unwrap_or(x);
    Ok(x.iter()
        .zip(compare)
        .map(|(&v, &cmp)| if cmp <= threshold { small(v) } else { large(v) })
        .collect())
}

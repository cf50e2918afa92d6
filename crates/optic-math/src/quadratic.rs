//! Quadratic equation solver for ray-surface intersections.
//!
//! The textbook formula `(-b +/- sqrt(disc)) / 2a` loses precision when `b`
//! and the discriminant root nearly cancel. The solver here computes the
//! numerically stable root first and derives the second from the product of
//! roots `c / (a * x1)`.

/// Roots of a quadratic equation, ordered when real.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    /// No solution exists (degenerate `0 = c` with nonzero c, or `0 = 0`).
    None,
    /// A single root: linear equation or double root.
    One(f64),
    /// Two distinct real roots, smaller first.
    Two(f64, f64),
    /// Complex-conjugate roots; carries the shared real part, which for
    /// intersection tests is the parameter of closest approach.
    Complex(f64),
}

impl QuadraticRoots {
    /// Real roots as a small vector, empty for [`None`](Self::None) and
    /// [`Complex`](Self::Complex).
    pub fn real(self) -> Vec<f64> {
        match self {
            Self::None | Self::Complex(_) => vec![],
            Self::One(x) => vec![x],
            Self::Two(x1, x2) => vec![x1, x2],
        }
    }
}

/// Solves `a*x^2 + b*x + c = 0` with reduced cancellation error.
///
/// Degenerate coefficient combinations fall back to the linear solution or
/// report no roots rather than dividing by zero.
///
/// # Example
///
/// ```rust
/// use optic_math::{quadratic_roots, QuadraticRoots};
///
/// assert_eq!(quadratic_roots(1.0, -3.0, 2.0), QuadraticRoots::Two(1.0, 2.0));
/// assert_eq!(quadratic_roots(0.0, 2.0, -4.0), QuadraticRoots::One(2.0));
/// ```
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> QuadraticRoots {
    if a == 0.0 {
        if b == 0.0 {
            // 0*x^2 + 0*x + c = 0 has no solution in x.
            return QuadraticRoots::None;
        }
        return QuadraticRoots::One(-c / b);
    }
    let discr = b * b - 4.0 * a * c;
    if discr == 0.0 {
        return QuadraticRoots::One(-b / (2.0 * a));
    }
    if discr < 0.0 {
        return QuadraticRoots::Complex(-b / (2.0 * a));
    }
    let root_discr = discr.sqrt();
    let x1 = (-b - b.signum() * root_discr) / (2.0 * a);
    let x2 = c / (a * x1);
    QuadraticRoots::Two(x1.min(x2), x1.max(x2))
}

/// Smallest value strictly greater than `thr`, or `None` when nothing
/// qualifies.
///
/// Round-off sometimes makes a geometric "zero" land at `+/-1e-16`; passing
/// a small positive threshold skips those self-intersections.
pub fn min_positive(values: impl IntoIterator<Item = f64>, thr: f64) -> Option<f64> {
    values
        .into_iter()
        .filter(|&v| v > thr)
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_roots() {
        // x^2 - 5x + 6 = (x-2)(x-3)
        let QuadraticRoots::Two(x1, x2) = quadratic_roots(1.0, -5.0, 6.0) else {
            panic!("expected two roots");
        };
        assert_relative_eq!(x1, 2.0);
        assert_relative_eq!(x2, 3.0);
    }

    #[test]
    fn test_double_root() {
        // (x-1)^2
        assert_eq!(quadratic_roots(1.0, -2.0, 1.0), QuadraticRoots::One(1.0));
    }

    #[test]
    fn test_linear_fallback() {
        assert_eq!(quadratic_roots(0.0, 4.0, -8.0), QuadraticRoots::One(2.0));
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(quadratic_roots(0.0, 0.0, 3.0), QuadraticRoots::None);
    }

    #[test]
    fn test_complex_roots_carry_real_part() {
        // x^2 + 1 = 0
        assert_eq!(quadratic_roots(1.0, 0.0, 1.0), QuadraticRoots::Complex(0.0));
        // x^2 - 2x + 5: real part 1
        assert_eq!(
            quadratic_roots(1.0, -2.0, 5.0),
            QuadraticRoots::Complex(1.0)
        );
    }

    #[test]
    fn test_cancellation_resistance() {
        // Small c relative to b: the naive formula would lose the small root.
        let QuadraticRoots::Two(x1, _) = quadratic_roots(1.0, 1e8, 1.0) else {
            panic!("expected two roots");
        };
        assert_relative_eq!(x1, -1e8, max_relative = 1e-12);
        let product = match quadratic_roots(1.0, 1e8, 1.0) {
            QuadraticRoots::Two(a, b) => a * b,
            _ => unreachable!(),
        };
        assert_relative_eq!(product, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn test_min_positive() {
        assert_eq!(min_positive([3.0, -1.0, 2.0], 0.0), Some(2.0));
        assert_eq!(min_positive([1e-15, 2.0], 1e-12), Some(2.0));
        assert_eq!(min_positive([-1.0, -2.0], 0.0), None);
    }
}

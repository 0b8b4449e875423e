use nalgebra::Complex;

/// A root of a polynomial equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Root {
    /// A real root.
    Real(f64),
    /// A root with a non-zero imaginary part.
    Complex(Complex<f64>),
    /// The equation has no root in this slot (degree dropped, or it is
    /// identically zero).
    Undefined,
}

impl Root {
    /// Returns the root value if it is real.
    #[must_use]
    pub fn real(&self) -> Option<f64> {
        match self {
            Self::Real(t) => Some(*t),
            Self::Complex(_) | Self::Undefined => None,
        }
    }

    /// Returns the real root if it lies strictly inside `(0, 1)`.
    #[must_use]
    pub fn in_unit_interval(&self) -> Option<f64> {
        self.real().filter(|t| *t > 0.0 && *t < 1.0)
    }
}

/// Solves `a·t² + b·t + c = 0` over the complex numbers.
///
/// The discriminant sign decides between a real pair and a complex-conjugate
/// pair, so real roots never carry a spurious imaginary part. When the
/// quadratic term vanishes relative to the others the equation is solved as
/// linear and the second slot is [`Root::Undefined`]. Real roots are returned
/// in ascending order.
#[must_use]
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> [Root; 2] {
    let scale = b.abs().max(c.abs());
    if a.abs() <= f64::EPSILON * scale {
        if b.abs() <= f64::EPSILON * c.abs() {
            return [Root::Undefined, Root::Undefined];
        }
        return [Root::Real(-c / b), Root::Undefined];
    }

    let discriminant = b * b - 4.0 * a * c;
    let two_a = 2.0 * a;
    if discriminant >= 0.0 {
        // Citardauq form for the root that would otherwise suffer cancellation.
        let sqrt_d = discriminant.sqrt();
        let q = -0.5 * (b + b.signum() * sqrt_d);
        let (r1, r2) = if q.abs() < f64::MIN_POSITIVE {
            (0.0, 0.0)
        } else {
            (q / a, c / q)
        };
        let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        [Root::Real(lo), Root::Real(hi)]
    } else {
        let re = -b / two_a;
        let im = (-discriminant).sqrt() / two_a;
        [
            Root::Complex(Complex::new(re, -im.abs())),
            Root::Complex(Complex::new(re, im.abs())),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn two_real_roots_are_sorted() {
        // (t - 0.25)(t - 2) = t² - 2.25t + 0.5
        let [r1, r2] = solve_quadratic(1.0, -2.25, 0.5);
        assert_abs_diff_eq!(r1.real().unwrap(), 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(r2.real().unwrap(), 2.0, epsilon = 1e-12);
        assert_eq!(r1.in_unit_interval(), Some(0.25));
        assert_eq!(r2.in_unit_interval(), None);
    }

    #[test]
    fn negative_discriminant_is_complex() {
        let [r1, r2] = solve_quadratic(1.0, 0.0, 1.0);
        match (r1, r2) {
            (Root::Complex(z1), Root::Complex(z2)) => {
                assert_abs_diff_eq!(z1.re, 0.0);
                assert_abs_diff_eq!(z1.im, -1.0, epsilon = 1e-12);
                assert_abs_diff_eq!(z2.im, 1.0, epsilon = 1e-12);
            }
            other => panic!("expected complex roots, got {other:?}"),
        }
        assert!(r1.real().is_none());
    }

    #[test]
    fn double_root() {
        // (t - 0.5)² = t² - t + 0.25
        let [r1, r2] = solve_quadratic(1.0, -1.0, 0.25);
        assert_abs_diff_eq!(r1.real().unwrap(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(r2.real().unwrap(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn small_root_keeps_precision() {
        // Roots 1e-8 and 1e8.
        let [r1, r2] = solve_quadratic(1.0, -(1e8 + 1e-8), 1.0);
        assert_abs_diff_eq!(r1.real().unwrap(), 1e-8, epsilon = 1e-20);
        assert_abs_diff_eq!(r2.real().unwrap(), 1e8, epsilon = 1e-4);
    }

    #[test]
    fn vanishing_quadratic_term_is_linear() {
        let [r1, r2] = solve_quadratic(0.0, 2.0, -1.0);
        assert_eq!(r1, Root::Real(0.5));
        assert_eq!(r2, Root::Undefined);
    }

    #[test]
    fn constant_equation_has_no_roots() {
        assert_eq!(solve_quadratic(0.0, 0.0, 3.0), [Root::Undefined, Root::Undefined]);
        assert_eq!(solve_quadratic(0.0, 0.0, 0.0), [Root::Undefined, Root::Undefined]);
    }

    #[test]
    fn unit_interval_is_open() {
        assert_eq!(Root::Real(0.0).in_unit_interval(), None);
        assert_eq!(Root::Real(1.0).in_unit_interval(), None);
        assert_eq!(Root::Undefined.in_unit_interval(), None);
    }
}

use crate::math::roots::{solve_quadratic, Root};
use crate::math::{cross_2d, Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain};

/// A 2D cubic Bezier curve defined by four points: the starting point, two
/// successive control points and the ending point.
///
/// The curve is defined by the equation:
/// `P(t) = (1 - t)³·p1 + 3(1 - t)²t·c1 + 3(1 - t)t²·c2 + t³·p2` for `t ∈ [0, 1]`.
///
/// Control points may coincide with their endpoints; the tangent accessors
/// fall back to the next distinct control point in that case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Start point.
    pub p1: Point2,
    /// First control point.
    pub c1: Point2,
    /// Second control point.
    pub c2: Point2,
    /// End point.
    pub p2: Point2,
}

impl CubicBezier {
    /// Creates a new cubic Bezier curve.
    #[must_use]
    pub fn new(p1: Point2, c1: Point2, c2: Point2, p2: Point2) -> Self {
        Self { p1, c1, c2, p2 }
    }

    /// Splits the curve at `t` with the de Casteljau construction.
    ///
    /// Both halves are independent curves parametrized over `[0, 1]`.
    /// Splitting at `0` or `1` yields a zero-length half.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        // _1ab is the first iteration from the first (a) to the second (b) point and so on
        let ctrl_1ab = self.p1 + (self.c1 - self.p1) * t;
        let ctrl_1bc = self.c1 + (self.c2 - self.c1) * t;
        let ctrl_1cd = self.c2 + (self.p2 - self.c2) * t;
        let ctrl_2ab = ctrl_1ab + (ctrl_1bc - ctrl_1ab) * t;
        let ctrl_2bc = ctrl_1bc + (ctrl_1cd - ctrl_1bc) * t;
        // final point on the curve
        let ctrl_3ab = ctrl_2ab + (ctrl_2bc - ctrl_2ab) * t;

        (
            Self::new(self.p1, ctrl_1ab, ctrl_2ab, ctrl_3ab),
            Self::new(ctrl_3ab, ctrl_2bc, ctrl_1cd, self.p2),
        )
    }

    /// First derivative at `t`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector2 {
        let mt = 1.0 - t;
        let d0 = self.c1 - self.p1;
        let d1 = self.c2 - self.c1;
        let d2 = self.p2 - self.c2;
        (d0 * (mt * mt) + d1 * (2.0 * mt * t) + d2 * (t * t)) * 3.0
    }

    /// Forward tangent direction at the start point.
    ///
    /// Uses `c1 - p1`, falling back to `c2 - p1` and then to the chord when
    /// the control points coincide with the start point.
    #[must_use]
    pub fn start_tangent(&self) -> Vector2 {
        [self.c1 - self.p1, self.c2 - self.p1, self.p2 - self.p1]
            .into_iter()
            .find(|v| v.norm() >= TOLERANCE)
            .unwrap_or_else(Vector2::zeros)
    }

    /// Forward tangent direction at the end point.
    ///
    /// Uses `p2 - c2`, falling back to `p2 - c1` and then to the chord when
    /// the control points coincide with the end point.
    #[must_use]
    pub fn end_tangent(&self) -> Vector2 {
        [self.p2 - self.c2, self.p2 - self.c1, self.p2 - self.p1]
            .into_iter()
            .find(|v| v.norm() >= TOLERANCE)
            .unwrap_or_else(Vector2::zeros)
    }

    /// Distance between the endpoints.
    #[must_use]
    pub fn chord_length(&self) -> f64 {
        (self.p2 - self.p1).norm()
    }

    /// Length of the control polygon, an upper bound on the arc length.
    #[must_use]
    pub fn control_polygon_length(&self) -> f64 {
        (self.c1 - self.p1).norm() + (self.c2 - self.c1).norm() + (self.p2 - self.c2).norm()
    }

    /// Returns whether all four points coincide within `tolerance`.
    #[must_use]
    pub fn is_point(&self, tolerance: f64) -> bool {
        self.control_polygon_length() <= tolerance
    }

    /// Parameters where the curvature numerator `B'(t) × B''(t)` vanishes.
    ///
    /// With `a = c1 - p1`, `b = c2 - c1 - a` and `c = p2 - c2 - a - 2b` the
    /// cross product reduces to the quadratic
    /// `(b × c)·t² + (a × c)·t + (a × b) = 0`, whose roots may be complex.
    #[must_use]
    pub fn inflexion_points(&self) -> [Root; 2] {
        let a = self.c1 - self.p1;
        let b = self.c2 - self.c1 - a;
        let c = self.p2 - self.c2 - a - b * 2.0;
        solve_quadratic(cross_2d(&b, &c), cross_2d(&a, &c), cross_2d(&a, &b))
    }

    /// Real inflexion parameters strictly inside `(0, 1)`, ascending, with a
    /// repeated root reported once.
    #[must_use]
    pub fn real_inflexions(&self) -> Vec<f64> {
        let mut ts: Vec<f64> = self
            .inflexion_points()
            .iter()
            .filter_map(Root::in_unit_interval)
            .collect();
        ts.sort_by(f64::total_cmp);
        ts.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);
        ts
    }

    /// Splits the curve at its real inflexion points.
    ///
    /// Returns one, two or three consecutive pieces together with their
    /// parameter ranges on this curve. Every split parameter is reprojected
    /// onto the local `[0, 1]` range of the piece being split.
    #[must_use]
    pub fn split_at_inflexions(&self) -> Vec<(Self, CurveDomain)> {
        let mut pieces = Vec::with_capacity(3);
        let mut rest = *self;
        let mut rest_domain = CurveDomain::unit();
        for t in self.real_inflexions() {
            let local = (t - rest_domain.t_min) / rest_domain.width();
            let (left, right) = rest.split(local);
            let (left_domain, right_domain) = rest_domain.split(local);
            pieces.push((left, left_domain));
            rest = right;
            rest_domain = right_domain;
        }
        pieces.push((rest, rest_domain));
        pieces
    }
}

impl Curve for CubicBezier {
    /// Bernstein evaluation. Parameters outside `[0, 1]` extrapolate.
    fn point_at(&self, t: f64) -> Point2 {
        let mt = 1.0 - t;
        let b0 = mt * mt * mt;
        let b1 = 3.0 * mt * mt * t;
        let b2 = 3.0 * mt * t * t;
        let b3 = t * t * t;
        Point2::from(
            self.p1.coords * b0 + self.c1.coords * b1 + self.c2.coords * b2 + self.p2.coords * b3,
        )
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        self.derivative_at(t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn start_point(&self) -> Point2 {
        self.p1
    }

    fn end_point(&self) -> Point2 {
        self.p2
    }
}

mod arc;
mod biarc;
mod cubic_bezier;
mod line;

pub use arc::Arc;
pub use biarc::{BiArc, MAX_LENGTH_RATIO};
pub use cubic_bezier::CubicBezier;
pub use line::Line;

use crate::math::{Point2, Vector2};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// The unit domain `[0, 1]`.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Maps a parameter local to this domain (`0` at `t_min`, `1` at `t_max`)
    /// onto the enclosing parameter space.
    #[must_use]
    pub fn lerp(&self, t: f64) -> f64 {
        self.t_min + (self.t_max - self.t_min) * t
    }

    /// Splits the domain at local parameter `t`.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let mid = self.lerp(t);
        (Self::new(self.t_min, mid), Self::new(mid, self.t_max))
    }

    /// Returns the width of the domain.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.t_max - self.t_min
    }
}

/// Trait for parametric curves in the plane.
pub trait Curve {
    /// Evaluates the curve at parameter `t`.
    fn point_at(&self, t: f64) -> Point2;

    /// Computes the tangent vector at parameter `t`.
    ///
    /// The vector is not normalized and may be zero on degenerate curves.
    fn tangent_at(&self, t: f64) -> Vector2;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns the point at the start of the domain.
    fn start_point(&self) -> Point2 {
        self.point_at(self.domain().t_min)
    }

    /// Returns the point at the end of the domain.
    fn end_point(&self) -> Point2 {
        self.point_at(self.domain().t_max)
    }
}

/// The largest sampled distance between two curves and where it occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    /// Euclidean distance between the two curves at `t`.
    pub distance: f64,
    /// Unit-domain parameter at which `distance` was measured.
    pub t: f64,
}

/// Samples two unit-domain curves at `samples + 1` evenly spaced parameters
/// and returns the largest point-to-point distance.
///
/// Both curves are evaluated at the same parameter, so this measures
/// parametric rather than closest-point deviation. Ties keep the earliest
/// parameter.
#[must_use]
pub fn max_deviation<A, B>(a: &A, b: &B, samples: usize) -> Deviation
where
    A: Curve + ?Sized,
    B: Curve + ?Sized,
{
    let samples = samples.max(1);
    #[allow(clippy::cast_precision_loss)]
    let step = 1.0 / samples as f64;
    let mut worst = Deviation { distance: 0.0, t: 0.0 };
    for i in 0..=samples {
        #[allow(clippy::cast_precision_loss)]
        let t = (i as f64 * step).min(1.0);
        let distance = (a.point_at(t) - b.point_at(t)).norm();
        if distance > worst.distance {
            worst = Deviation { distance, t };
        }
    }
    worst
}

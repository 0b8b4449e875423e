use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Arc, CubicBezier, Curve, CurveDomain, Line};

/// Longest biarc accepted from [`BiArc::from_cubic`], as a multiple of the
/// curve's control polygon length.
///
/// A tangent pointing almost straight away from the joint yields a nearly
/// full circle of unbounded radius.
pub const MAX_LENGTH_RATIO: f64 = std::f64::consts::PI;

/// Two circular arcs joined with a common tangent.
///
/// The first arc leaves the start point along the start tangent, the second
/// arrives at the end point along the end tangent, and both share the
/// tangent direction at the joint. The parameter `t ∈ [0, 1]` is
/// proportional to arc length across both arcs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiArc {
    first: Arc,
    second: Arc,
}

impl BiArc {
    /// Builds the biarc from `p1` with forward tangent `t1` to `p2` with
    /// forward tangent `t2`.
    ///
    /// The joint is the incenter of the triangle formed by the endpoints and
    /// the intersection `V` of the two tangent lines.
    ///
    /// # Errors
    ///
    /// Returns an error if a tangent is zero-length, the tangent lines are
    /// parallel, or the triangle collapses to a point.
    pub fn new(p1: Point2, t1: &Vector2, p2: Point2, t2: &Vector2) -> Result<Self> {
        let v = Line::new(p1, *t1)?.intersection(&Line::new(p2, *t2)?)?;
        let joint = incenter(&p1, &v, &p2)?;
        Self::with_joint(p1, t1, joint, p2, t2)
    }

    /// Builds the biarc through a given joint point.
    ///
    /// The joint must lie on the locus of tangent-continuous joints for the
    /// arcs to meet smoothly; any other point yields a kinked pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either arc cannot be constructed.
    pub fn with_joint(
        p1: Point2,
        t1: &Vector2,
        joint: Point2,
        p2: Point2,
        t2: &Vector2,
    ) -> Result<Self> {
        let first = Arc::from_tangent(p1, t1, joint)?;
        // Built backwards from the end so the end tangent is honoured.
        let second = Arc::from_tangent(p2, &-t2, joint)?.reversed();
        Ok(Self { first, second })
    }

    /// Fits a biarc to the endpoints and end tangents of a cubic curve.
    ///
    /// Degenerate input never fails. When the incenter joint cannot be built
    /// (parallel tangent lines) or gives a biarc longer than
    /// [`MAX_LENGTH_RATIO`] times the control polygon, the joint moves to the
    /// chord midpoint, or for opposite tangents to the point where both arcs
    /// have equal tangent lengths. When that fails the same way, the result
    /// is a pair of straight segments through the chord midpoint.
    #[must_use]
    pub fn from_cubic(curve: &CubicBezier) -> Self {
        let (p1, p2) = (curve.p1, curve.p2);
        let t1 = curve.start_tangent();
        let t2 = curve.end_tangent();
        let max_length = MAX_LENGTH_RATIO * curve.control_polygon_length();
        let bounded = |biarc: Self| -> Result<Self> {
            if biarc.length() > max_length {
                return Err(GeometryError::Degenerate(format!(
                    "biarc length {} exceeds {max_length}",
                    biarc.length()
                ))
                .into());
            }
            Ok(biarc)
        };

        Self::new(p1, &t1, p2, &t2)
            .and_then(bounded)
            .or_else(|err| {
                let joint = parallel_joint(&p1, &t1, &p2, &t2);
                debug!(%err, ?p1, ?p2, ?joint, "degenerate biarc, moving the joint");
                Self::with_joint(p1, &t1, joint, p2, &t2).and_then(bounded)
            })
            .unwrap_or_else(|err| {
                debug!(%err, "degenerate biarc, using straight segments");
                let mid = nalgebra::center(&p1, &p2);
                Self {
                    first: Arc::from_bulge(p1, mid, 0.0),
                    second: Arc::from_bulge(mid, p2, 0.0),
                }
            })
    }

    /// Returns the arc from the start point to the joint.
    #[must_use]
    pub fn first(&self) -> &Arc {
        &self.first
    }

    /// Returns the arc from the joint to the end point.
    #[must_use]
    pub fn second(&self) -> &Arc {
        &self.second
    }

    /// Returns the transition point between the two arcs.
    #[must_use]
    pub fn joint(&self) -> Point2 {
        *self.first.end()
    }

    /// Total arc length of both arcs.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.first.length() + self.second.length()
    }

    /// Maps `t` onto one of the arcs by arc length.
    fn locate(&self, t: f64) -> (&Arc, f64) {
        let l1 = self.first.length();
        let l2 = self.second.length();
        let s = t * (l1 + l2);
        if s <= l1 {
            let local = if l1 < TOLERANCE { 0.0 } else { s / l1 };
            (&self.first, local)
        } else {
            (&self.second, (s - l1) / l2)
        }
    }
}

impl Curve for BiArc {
    fn point_at(&self, t: f64) -> Point2 {
        let (arc, local) = self.locate(t);
        arc.point_at(local)
    }

    fn tangent_at(&self, t: f64) -> Vector2 {
        let (arc, local) = self.locate(t);
        arc.tangent_at(local)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn start_point(&self) -> Point2 {
        *self.first.start()
    }

    fn end_point(&self) -> Point2 {
        *self.second.end()
    }
}

/// Joint used when the incenter construction is unusable.
///
/// Tangents pointing the same way join at the chord midpoint, which is the
/// center of symmetry of the biarc. Opposite tangents join at
/// `mid + t1 * |p2 - p1| / 2`, where both arcs have the same tangent length
/// and meet with a common direction.
fn parallel_joint(p1: &Point2, t1: &Vector2, p2: &Point2, t2: &Vector2) -> Point2 {
    let mid = nalgebra::center(p1, p2);
    let len = t1.norm();
    if t1.dot(t2) >= 0.0 || len < TOLERANCE {
        return mid;
    }
    mid + t1 * ((p2 - p1).norm() * 0.5 / len)
}

/// Incenter of triangle `(a, b, c)`: the vertices weighted by the lengths
/// of the opposite sides.
fn incenter(a: &Point2, b: &Point2, c: &Point2) -> Result<Point2> {
    let wa = (c - b).norm();
    let wb = (c - a).norm();
    let wc = (b - a).norm();
    let perimeter = wa + wb + wc;
    if perimeter < TOLERANCE {
        return Err(GeometryError::Degenerate("biarc triangle collapsed to a point".into()).into());
    }
    Ok(Point2::from(
        (a.coords * wa + b.coords * wb + c.coords * wc) / perimeter,
    ))
}

use nalgebra::Rotation2;

use crate::error::{GeometryError, Result};
use crate::math::arc_2d::{arc_from_bulge, arc_tangent_at, bulge_from_tangent};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain};

/// A circular arc between two points in the plane.
///
/// The arc is stored in bulge form (`bulge = tan(sweep / 4)`) alongside its
/// derived center, radius and angles. A bulge of (nearly) zero is a straight
/// segment: its radius is infinite and its center is the chord midpoint.
/// The parameter `t ∈ [0, 1]` is proportional to the swept angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    start: Point2,
    end: Point2,
    bulge: f64,
    center: Point2,
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
}

impl Arc {
    /// Creates the arc from `start` to `end` with the given bulge.
    #[must_use]
    pub fn from_bulge(start: Point2, end: Point2, bulge: f64) -> Self {
        let (center, radius, start_angle, sweep_angle) = arc_from_bulge(&start, &end, bulge);
        if radius < TOLERANCE {
            return Self {
                start,
                end,
                bulge: 0.0,
                center: nalgebra::center(&start, &end),
                radius: f64::INFINITY,
                start_angle: (end.y - start.y).atan2(end.x - start.x),
                sweep_angle: 0.0,
            };
        }
        Self {
            start,
            end,
            bulge,
            center,
            radius,
            start_angle,
            sweep_angle,
        }
    }

    /// Creates the arc that leaves `start` in the direction of `tangent` and
    /// ends at `end`.
    ///
    /// The center lies on the normal to `tangent` through `start`, at equal
    /// distance from both endpoints. A tangent along the chord gives a
    /// straight segment.
    ///
    /// # Errors
    ///
    /// Returns an error if `tangent` is zero-length, or if it points directly
    /// away from `end` (the arc would be a full circle).
    pub fn from_tangent(start: Point2, tangent: &Vector2, end: Point2) -> Result<Self> {
        if tangent.norm() < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let bulge = bulge_from_tangent(&start, tangent, &end).ok_or_else(|| {
            GeometryError::Degenerate("arc tangent points away from its end point".into())
        })?;
        Ok(Self::from_bulge(start, end, bulge))
    }

    /// Returns the same arc traversed from `end` to `start`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::from_bulge(self.end, self.start, -self.bulge)
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Returns the bulge, `tan(sweep / 4)`.
    #[must_use]
    pub fn bulge(&self) -> f64 {
        self.bulge
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the arc, infinite for a straight segment.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Angle of the start point as seen from the center, in radians.
    ///
    /// For a straight segment this is the direction of the chord.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Signed swept angle: positive is counter-clockwise.
    #[must_use]
    pub fn sweep_angle(&self) -> f64 {
        self.sweep_angle
    }

    /// Angle of the end point as seen from the center.
    #[must_use]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// Returns whether the arc turns clockwise.
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.sweep_angle < 0.0
    }

    /// Returns whether the arc degenerated to a straight segment.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        self.radius.is_infinite()
    }

    /// Returns the arc length.
    #[must_use]
    pub fn length(&self) -> f64 {
        if self.is_straight() {
            (self.end - self.start).norm()
        } else {
            self.radius * self.sweep_angle.abs()
        }
    }
}

impl Curve for Arc {
    /// Rotates the nearer endpoint about the center, keeping both ends accurate.
    fn point_at(&self, t: f64) -> Point2 {
        if self.is_straight() {
            return self.start + (self.end - self.start) * t;
        }
        if t <= 0.5 {
            self.center + Rotation2::new(self.sweep_angle * t) * (self.start - self.center)
        } else {
            self.center + Rotation2::new(-self.sweep_angle * (1.0 - t)) * (self.end - self.center)
        }
    }

    /// Unit tangent in the direction of travel.
    fn tangent_at(&self, t: f64) -> Vector2 {
        if self.is_straight() {
            let chord = self.end - self.start;
            let len = chord.norm();
            return if len < TOLERANCE { Vector2::zeros() } else { chord / len };
        }
        arc_tangent_at(self.start_angle, self.sweep_angle, t)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::unit()
    }

    fn start_point(&self) -> Point2 {
        self.start
    }

    fn end_point(&self) -> Point2 {
        self.end
    }
}

use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{line_line_intersect_2d, point_at};
use crate::math::{Point2, Vector2, TOLERANCE};

use super::{Curve, CurveDomain};

/// An infinite line defined by an origin point and a direction vector.
///
/// The parametric form is: `P(t) = origin + t * direction`.
#[derive(Debug, Clone)]
pub struct Line {
    origin: Point2,
    direction: Vector2,
}

impl Line {
    /// Creates a new line from an origin and direction.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero-length.
    pub fn new(origin: Point2, direction: Vector2) -> Result<Self> {
        let len = direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            direction: direction / len,
        })
    }

    /// Returns the origin point of the line.
    #[must_use]
    pub fn origin(&self) -> &Point2 {
        &self.origin
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Returns the point where this line crosses `other`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParallelLines`] if the lines are parallel or
    /// coincident.
    pub fn intersection(&self, other: &Line) -> Result<Point2> {
        let (t, _) = line_line_intersect_2d(
            &self.origin,
            &self.direction,
            &other.origin,
            &other.direction,
        )
        .ok_or(GeometryError::ParallelLines)?;
        Ok(point_at(&self.origin, &self.direction, t))
    }
}

impl Curve for Line {
    fn point_at(&self, t: f64) -> Point2 {
        point_at(&self.origin, &self.direction, t)
    }

    fn tangent_at(&self, _t: f64) -> Vector2 {
        self.direction
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(f64::NEG_INFINITY, f64::INFINITY)
    }
}

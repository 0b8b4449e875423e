//! 2D arc/bulge math utilities.
//!
//! Bulge convention: `bulge = tan(sweep_angle / 4)`.
//! - `bulge = 0`: straight line
//! - `bulge > 0`: counter-clockwise arc
//! - `bulge < 0`: clockwise arc
//! - `|bulge| = 1`: semicircle
use std::f64::consts::{PI, TAU};

use super::{cross_2d, Point2, Vector2};

/// Bulges below this magnitude are treated as straight segments.
///
/// The sagitta of such an arc is `chord * bulge / 2`, far below any
/// useful approximation tolerance.
pub const STRAIGHT_BULGE: f64 = 1e-6;

/// Converts a bulge-defined arc segment to center-radius-angle form.
///
/// Returns `(center, radius, start_angle, sweep_angle)`.
///
/// Returns degenerate values (center at `start`, zero radius and sweep) for
/// zero-length chords and straight segments.
#[must_use]
pub fn arc_from_bulge(start: &Point2, end: &Point2, bulge: f64) -> (Point2, f64, f64, f64) {
    let chord = end - start;
    let chord_len = chord.norm();

    if chord_len < 1e-12 || bulge.abs() < STRAIGHT_BULGE {
        return (*start, 0.0, 0.0, 0.0);
    }

    // Distance from chord midpoint to center.
    let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
    let mid = nalgebra::center(start, end);

    // Normal to chord pointing toward center (for positive bulge, center is left of chord).
    let normal = Vector2::new(-chord.y, chord.x) / chord_len;
    let center = mid + normal * (sagitta_ratio * chord_len * 0.5);

    // r = d*(1+b²)/(4*|b|) derived from r = d/(2*sin(θ/2)) with θ=4*atan(b)
    let radius = (chord_len * 0.5) * (1.0 + bulge * bulge) / (2.0 * bulge.abs());

    let start_angle = (start.y - center.y).atan2(start.x - center.x);
    let sweep = normalize_sweep(4.0 * bulge.atan());

    (center, radius, start_angle, sweep)
}

/// Computes the bulge of the arc that leaves `start` along `tangent` and
/// ends at `end`.
///
/// By the tangent-chord angle theorem the sweep is twice the signed angle
/// from the tangent to the chord, so `bulge = tan(angle / 2)`.
///
/// Returns `None` when the tangent points straight away from `end`, which
/// would require a full circle.
#[must_use]
pub fn bulge_from_tangent(start: &Point2, tangent: &Vector2, end: &Point2) -> Option<f64> {
    let chord = end - start;
    let angle = cross_2d(tangent, &chord).atan2(tangent.dot(&chord));
    if PI - angle.abs() < 1e-12 {
        return None;
    }
    Some((angle * 0.5).tan())
}

/// Computes the unit tangent direction on an arc at parameter `t` in `[0, 1]`.
///
/// The tangent points in the direction of increasing `t`.
#[must_use]
pub fn arc_tangent_at(start_angle: f64, sweep: f64, t: f64) -> Vector2 {
    let angle = start_angle + sweep * t;
    let sign = if sweep >= 0.0 { 1.0 } else { -1.0 };
    // Tangent to circle at angle θ is (-sin θ, cos θ) for CCW; negate for CW.
    Vector2::new(-sign * angle.sin(), sign * angle.cos())
}

/// Normalizes a sweep angle to the `[-2π, 2π]` range.
fn normalize_sweep(sweep: f64) -> f64 {
    if sweep > TAU {
        sweep - TAU
    } else if sweep < -TAU {
        sweep + TAU
    } else {
        sweep
    }
}

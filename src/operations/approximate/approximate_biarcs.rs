use tracing::{debug, trace, warn};

use crate::error::{OperationError, Result};
use crate::geometry::curve::{max_deviation, BiArc, CubicBezier, CurveDomain};

use super::{ApproximatedBiArc, Approximation, ApproximationOptions};

/// Worst-error parameters closer than this to either end split at the middle.
const BOUNDARY_EPSILON: f64 = 1e-6;

/// Upper bound on error samples per fragment.
const MAX_SAMPLES: usize = 1 << 16;

/// A piece of the source curve waiting to be fitted.
///
/// The curve is re-parameterized to `[0, 1]`; `domain` records which part of
/// the source curve it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    /// The piece of the source curve, re-parameterized to `[0, 1]`.
    pub curve: CubicBezier,
    /// Parameter range of `curve` on the source curve.
    pub domain: CurveDomain,
    /// Number of adaptive splits that produced this fragment.
    pub depth: u32,
}

impl Fragment {
    /// Splits the fragment at local parameter `t`.
    #[must_use]
    pub fn split(&self, t: f64) -> (Self, Self) {
        let (left, right) = self.curve.split(t);
        let (left_domain, right_domain) = self.domain.split(t);
        let depth = self.depth + 1;
        (
            Self {
                curve: left,
                domain: left_domain,
                depth,
            },
            Self {
                curve: right,
                domain: right_domain,
                depth,
            },
        )
    }
}

/// Approximates a cubic Bézier curve with a sequence of biarcs.
///
/// The curve is first cut at its inflexion points. Each piece is then fitted
/// with one biarc, and pieces whose sampled error exceeds the tolerance are
/// split at the worst sample and fitted again.
pub struct ApproximateBiArcs {
    curve: CubicBezier,
    options: ApproximationOptions,
}

impl ApproximateBiArcs {
    /// Creates a new `ApproximateBiArcs` operation.
    #[must_use]
    pub fn new(curve: CubicBezier, options: ApproximationOptions) -> Self {
        Self { curve, options }
    }

    /// Fragments left after cutting the curve at its real inflexion points.
    #[must_use]
    pub fn inflexion_fragments(&self) -> Vec<Fragment> {
        self.curve
            .split_at_inflexions()
            .into_iter()
            .map(|(curve, domain)| Fragment {
                curve,
                domain,
                depth: 0,
            })
            .collect()
    }

    /// Executes the approximation.
    ///
    /// The result is ordered from the curve's start point to its end point.
    /// Fragments that still exceed the tolerance at `max_depth` are kept and
    /// flagged as not converged.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidParameter`] if the options are invalid,
    /// or [`OperationError::InvalidInput`] if a control point is not finite.
    pub fn execute(&self) -> Result<Approximation> {
        self.options.validate()?;
        let c = &self.curve;
        if [c.p1, c.c1, c.c2, c.p2]
            .iter()
            .any(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(
                OperationError::InvalidInput("control points must be finite".into()).into(),
            );
        }

        let mut stack = self.inflexion_fragments();
        debug!(fragments = stack.len(), "split curve at inflexion points");

        let mut accepted = Vec::new();
        while let Some(fragment) = stack.pop() {
            let biarc = BiArc::from_cubic(&fragment.curve);
            let samples = self.sample_count(&biarc);
            let deviation = max_deviation(&biarc, &fragment.curve, samples);
            trace!(
                t_min = fragment.domain.t_min,
                t_max = fragment.domain.t_max,
                depth = fragment.depth,
                samples,
                error = deviation.distance,
                "fitted fragment"
            );

            let within = deviation.distance <= self.options.tolerance;
            if !within && fragment.depth < self.options.max_depth {
                let near_end =
                    deviation.t < BOUNDARY_EPSILON || deviation.t > 1.0 - BOUNDARY_EPSILON;
                let t = if near_end { 0.5 } else { deviation.t };
                let (left, right) = fragment.split(t);
                stack.push(right);
                stack.push(left);
                continue;
            }

            if !within {
                warn!(
                    t_min = fragment.domain.t_min,
                    t_max = fragment.domain.t_max,
                    error = deviation.distance,
                    tolerance = self.options.tolerance,
                    "subdivision depth cap reached, keeping best-effort biarc"
                );
            }
            accepted.push(ApproximatedBiArc {
                biarc,
                domain: fragment.domain,
                max_error: deviation.distance,
                converged: within,
            });
        }

        let approximation = Approximation::from_unordered(accepted);
        debug!(
            biarcs = approximation.len(),
            unconverged = approximation.unconverged_count(),
            max_error = approximation.max_error(),
            "approximation finished"
        );
        Ok(approximation)
    }

    /// `ceil(length / sampling_step)`, clamped to `1..=MAX_SAMPLES`.
    fn sample_count(&self, biarc: &BiArc) -> usize {
        let n = (biarc.length() / self.options.sampling_step).ceil();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = n as usize;
        n.clamp(1, MAX_SAMPLES)
    }
}

mod approximate_biarcs;
mod approximation;

pub use approximate_biarcs::{ApproximateBiArcs, Fragment};
pub use approximation::{ApproximatedBiArc, Approximation};

use crate::error::{OperationError, Result};

/// Parameters controlling biarc approximation quality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximationOptions {
    /// Distance between error samples along each fitted biarc.
    pub sampling_step: f64,
    /// Maximum allowed deviation between the curve and its biarcs.
    pub tolerance: f64,
    /// Maximum number of adaptive splits applied to one inflexion-free piece.
    pub max_depth: u32,
}

impl Default for ApproximationOptions {
    fn default() -> Self {
        Self {
            sampling_step: 5.0,
            tolerance: 1.0,
            max_depth: 12,
        }
    }
}

impl ApproximationOptions {
    /// Creates options with the default depth cap.
    #[must_use]
    pub fn new(sampling_step: f64, tolerance: f64) -> Self {
        Self {
            sampling_step,
            tolerance,
            ..Self::default()
        }
    }

    /// Sets the maximum subdivision depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Checks that the sampling step and tolerance are usable.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidParameter`] if `sampling_step` or
    /// `tolerance` is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [
            ("sampling_step", self.sampling_step),
            ("tolerance", self.tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OperationError::InvalidParameter { parameter, value }.into());
            }
        }
        Ok(())
    }
}

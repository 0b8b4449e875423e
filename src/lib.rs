pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{BiarcError, Result};
pub use geometry::{Arc, BiArc, CubicBezier, Curve, Line, Pline};
pub use operations::{ApproximateBiArcs, Approximation, ApproximationOptions};

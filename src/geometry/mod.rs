pub mod curve;
pub mod pline;

pub use curve::{Arc, BiArc, CubicBezier, Curve, CurveDomain, Line};
pub use pline::{Pline, PlineVertex};

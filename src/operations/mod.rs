pub mod approximate;

pub use approximate::{
    ApproximateBiArcs, ApproximatedBiArc, Approximation, ApproximationOptions, Fragment,
};

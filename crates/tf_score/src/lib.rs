mod logspace;
mod convert;

pub use logspace::*;
pub use convert::*;


/// Scores live in an additive log domain: adding two scores multiplies the
/// underlying Boltzmann weights, [`logadd`] sums them. Anything downstream
/// (DP matrices, beam buckets) should use this alias rather than a bare f64
/// so the domain is visible at the type level.
pub type Score = f64;

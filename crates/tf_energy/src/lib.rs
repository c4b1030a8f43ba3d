/// Base, PairTypeRNA, NucleotideVec, PaddedSeq, ...
mod nucleotides;

/// The provider traits the facades depend on.
mod score_model;

/// Compact Turner-like parameter tables.
mod nn_tables;

/// The concrete nearest neighbor score provider.
mod nn_model;

/// Canonical pairing constraints.
mod constraints;

pub use nucleotides::*;
pub use score_model::*;
pub use nn_tables::*;
pub use nn_model::*;
pub use constraints::*;

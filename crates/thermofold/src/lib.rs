/// The scoring facade consumed by the DP / beam search inner loop.
mod loop_scorer;

/// The constraint facade for search-space pruning.
mod fold_constraints;

pub use loop_scorer::*;
pub use fold_constraints::*;

// Log-space primitives and conversions, so callers need one import.
pub use tf_score::{Score, neg_inf, impossible, logadd};
pub use tf_score::{K0, KB, energy_to_score, rt_kcal_mol, score_to_energy};

pub use tf_energy::{Base, NucleotideVec, PaddedSeq, PairTypeRNA, SequenceError};
pub use tf_energy::{CanonicalConstraints, ConstraintModel};
pub use tf_energy::{ModelError, NearestNeighborModel, ScoreModel};

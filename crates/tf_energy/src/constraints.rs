use crate::{Base, PaddedSeq};
use crate::nn_tables::MINHPIN;

/// What the constraint facade requires of a constraint provider.
///
/// All three are pure predicates over padded 1-based positions; they never
/// return the forbidden score sentinel, only booleans.
pub trait ConstraintModel {
    /// May positions `i` and `j` form a base pair?
    fn allow_pair(&self, i: usize, j: usize) -> bool;

    /// May a loop span `i..j` be closed inside the structure?
    fn allow_inner_loop(&self, i: usize, j: usize) -> bool;

    /// May an exterior segment span `i..j`?
    fn allow_outer_loop(&self, i: usize, j: usize) -> bool;
}

/// Canonical + wobble pairing with a minimum separation, over one bound
/// sequence. Inner loops must stay on real bases; exterior segments may
/// touch the padding positions.
pub struct CanonicalConstraints {
    min_separation: usize,
    seq: Option<PaddedSeq>,
}

impl Default for CanonicalConstraints {
    fn default() -> Self {
        Self::new(MINHPIN)
    }
}

impl CanonicalConstraints {
    pub fn new(min_separation: usize) -> Self {
        CanonicalConstraints { min_separation, seq: None }
    }

    pub fn set_seq(&mut self, seq: &[Base]) {
        self.seq = Some(PaddedSeq::new(seq));
    }

    fn seq(&self) -> &PaddedSeq {
        self.seq.as_ref().expect("set_seq() must complete before constraint queries")
    }
}

impl ConstraintModel for CanonicalConstraints {
    fn allow_pair(&self, i: usize, j: usize) -> bool {
        let seq = self.seq();
        i >= 1 && j <= seq.len()
            && i < j && j - i > self.min_separation
            && seq.pair(i, j).can_pair()
    }

    fn allow_inner_loop(&self, i: usize, j: usize) -> bool {
        i >= 1 && i <= j && j <= self.seq().len()
    }

    fn allow_outer_loop(&self, i: usize, j: usize) -> bool {
        i <= j && j <= self.seq().len() + 1
    }
}

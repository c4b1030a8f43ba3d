use tf_score::Score;
use tf_energy::ConstraintModel;

/// Thin facade over a biological-constraint provider, for pruning the
/// DP's search space before any score is computed.
///
/// Borrows its provider immutably and does not own it; the provider must
/// outlive the facade and be fully set up (sequence bound) beforehand.
/// The log-space utilities are re-exported as associated functions so a
/// constraint-only consumer never has to depend on the scoring engine.
pub struct FoldConstraints<'a, C: ConstraintModel> {
    model: &'a C,
}

impl<'a, C: ConstraintModel> FoldConstraints<'a, C> {
    pub fn new(model: &'a C) -> Self {
        FoldConstraints { model }
    }

    pub fn allow_pair(&self, i: usize, j: usize) -> bool {
        self.model.allow_pair(i, j)
    }

    pub fn allow_inner_loop(&self, i: usize, j: usize) -> bool {
        self.model.allow_inner_loop(i, j)
    }

    pub fn allow_outer_loop(&self, i: usize, j: usize) -> bool {
        self.model.allow_outer_loop(i, j)
    }

    // Log-space utilities, re-exported from tf_score.

    pub fn neg_inf() -> Score {
        tf_score::neg_inf()
    }

    pub fn impossible(sc: Score) -> bool {
        tf_score::impossible(sc)
    }

    pub fn logadd(acc: &mut Score, val: Score) {
        tf_score::logadd(acc, val)
    }
}

use log::debug;

use tf_score::Score;
use tf_energy::{Base, ModelError, ScoreModel};

/// The scoring engine: one log-Boltzmann method per elementary loop type,
/// plus closed-pair wrappers, over a borrowed score provider.
///
/// ## Coordinate conventions
///
/// The provider pads the sequence at both ends and addresses it 1-based.
/// Two index conventions appear below and they are *not* interchangeable:
///
/// - **DP coordinates**: the recurrence's internal bounds. A DP pair
///   `(x, y)` denotes the padded pair `(x+1, y)`; hairpin/interior/
///   multi-close methods take the *inner* bounds of the loop instead
///   (first and last unpaired position, closing pair one step outside).
/// - **Closed-pair coordinates**: the literal padded positions `(a, b)`
///   of the closing base pair. Closed `(a, b)` equals DP pair `(a-1, b)`.
///   Every `*_closed` method is a fixed algebraic remap onto its
///   DP-coordinate twin; none performs an independent lookup.
///
/// The scorer borrows its provider mutably but does not own it; the
/// provider must outlive the scorer. `initialize()` then `set_seq()` must
/// complete before the first query. Scoring methods take `&self` and touch
/// no mutable state, so after binding a sequence one scorer can be shared
/// immutably across DP worker threads.
pub struct LoopScorer<'a, M: ScoreModel> {
    model: &'a mut M,
}

impl<'a, M: ScoreModel> LoopScorer<'a, M> {
    pub fn new(model: &'a mut M) -> Self {
        LoopScorer { model }
    }

    /// One-time parameter load/validation, sequence independent.
    pub fn initialize(&mut self) -> Result<(), ModelError> {
        self.model.initialize()
    }

    /// Bind a sequence. Scores computed against a previously bound
    /// sequence are invalid once this returns.
    pub fn set_seq(&mut self, seq: &[Base]) {
        debug!("rebinding scoring engine to sequence of length {}", seq.len());
        self.model.set_seq(seq);
    }

    /// Unpadded sequence length.
    pub fn seqlen(&self) -> usize {
        self.model.seqlen()
    }

    pub fn max_loop(&self) -> usize {
        self.model.max_loop()
    }

    pub fn min_hairpin(&self) -> usize {
        self.model.min_hairpin()
    }

    pub fn rt_kcal_mol(&self) -> f64 {
        self.model.rt_kcal_mol()
    }

    pub fn energy_to_score(&self, energy: f64) -> Score {
        self.model.energy_to_score(energy)
    }

    pub fn score_to_energy(&self, score: Score) -> f64 {
        self.model.score_to_energy(score)
    }

    // Log Boltzmann factors, DP coordinates.

    /// Stack between the DP pairs `(i, j)` and `(i+1, j-1)`, i.e. the
    /// padded pairs `(i+1, j)` and `(i+2, j-1)`.
    pub fn log_boltz_stack(&self, i: usize, j: usize) -> Score {
        self.model.score_stack(i, j)
    }

    /// Helix terminated at the DP pair `(i, j)`.
    pub fn log_boltz_stem_close(&self, i: usize, j: usize) -> Score {
        self.model.score_stem_close(i, j)
    }

    /// `i`, `j` are the first and last unpaired position inside the loop;
    /// the closing pair is `(i-1, j+1)` in DP coordinates, i.e. padded
    /// `seq(i)` / `seq(j+1)`. Spans below the hairpin minimum score as
    /// forbidden.
    pub fn log_boltz_hairpin(&self, i: usize, j: usize) -> Score {
        self.model.score_hairpin(i, j)
    }

    /// Outer pair closes at DP `(i-1, j+1)`, inner pair at DP `(ip, jp)`,
    /// with `i <= ip` and `jp <= j`. E.g. outer pair (1,10) over inner
    /// pair (2,8), a length-1 bulge, is `log_boltz_interior(2, 9, 2, 8)`.
    /// Spans whose combined unpaired length exceeds the loop maximum
    /// score as forbidden.
    pub fn log_boltz_interior(&self, i: usize, j: usize, ip: usize, jp: usize) -> Score {
        self.model.score_interior(i, j, ip, jp)
    }

    /// Two-pair loop dispatcher: a stack iff no unpaired bases separate
    /// `(i, j)` from `(p, q)`, an interior/bulge loop otherwise. The
    /// adjacency test is exactly `p == i+1 && q == j-1`; anything looser
    /// misclassifies single-base bulges.
    pub fn log_boltz_loop(&self, i: usize, j: usize, p: usize, q: usize) -> Score {
        if p == i + 1 && q == j - 1 {
            return self.model.score_stack(i, j);
        }
        self.model.score_interior(i, j, p, q)
    }

    /// Multiloop closed at DP `(i-1, j+1)`; inner-bounds addressing like
    /// the hairpin and interior methods.
    pub fn log_boltz_multi_close(&self, i: usize, j: usize) -> Score {
        self.model.score_multi_close(i, j)
    }

    /// Branch helix at the padded pair `(i+1, j)` inside a multiloop.
    pub fn log_boltz_multi_open(&self, i: usize, j: usize) -> Score {
        self.model.score_multi_open(i, j)
    }

    /// One more unpaired base inside an open multiloop.
    pub fn log_boltz_multi_extend(&self, i: usize, j: usize) -> Score {
        self.model.score_multi_extend(i, j)
    }

    /// Exterior-loop analogue of `log_boltz_multi_extend`.
    pub fn log_boltz_outer_extend(&self, i: usize, j: usize) -> Score {
        self.model.score_outer_extend(i, j)
    }

    /// Exterior branch helix at the padded pair `(i+1, j)`.
    pub fn log_boltz_outer_branch(&self, i: usize, j: usize) -> Score {
        self.model.score_outer_branch(i, j)
    }

    // Boltzmann factors; the forbidden sentinel maps to weight 0.

    pub fn boltz_stack(&self, i: usize, j: usize) -> Score {
        self.log_boltz_stack(i, j).exp()
    }

    pub fn boltz_stem_close(&self, i: usize, j: usize) -> Score {
        self.log_boltz_stem_close(i, j).exp()
    }

    pub fn boltz_hairpin(&self, i: usize, j: usize) -> Score {
        self.log_boltz_hairpin(i, j).exp()
    }

    pub fn boltz_interior(&self, i: usize, j: usize, ip: usize, jp: usize) -> Score {
        self.log_boltz_interior(i, j, ip, jp).exp()
    }

    pub fn boltz_loop(&self, i: usize, j: usize, p: usize, q: usize) -> Score {
        self.log_boltz_loop(i, j, p, q).exp()
    }

    pub fn boltz_multi_close(&self, i: usize, j: usize) -> Score {
        self.log_boltz_multi_close(i, j).exp()
    }

    pub fn boltz_multi_open(&self, i: usize, j: usize) -> Score {
        self.log_boltz_multi_open(i, j).exp()
    }

    pub fn boltz_multi_extend(&self, i: usize, j: usize) -> Score {
        self.log_boltz_multi_extend(i, j).exp()
    }

    pub fn boltz_outer_extend(&self, i: usize, j: usize) -> Score {
        self.log_boltz_outer_extend(i, j).exp()
    }

    pub fn boltz_outer_branch(&self, i: usize, j: usize) -> Score {
        self.log_boltz_outer_branch(i, j).exp()
    }

    // Closed-pair wrappers: callers name the literal closing pair(s) and
    // the fixed offsets below translate into DP coordinates.

    /// Hairpin closed by the pair `(a, b)`.
    pub fn log_boltz_hairpin_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_hairpin(a + 1, b - 1)
    }

    pub fn boltz_hairpin_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_hairpin_closed(a, b).exp()
    }

    /// Stack whose outer pair is `(a, b)`.
    pub fn log_boltz_stack_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_stack(a - 1, b)
    }

    pub fn boltz_stack_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_stack_closed(a, b).exp()
    }

    /// Interior/bulge loop with outer pair `(a, b)` and inner pair
    /// `(c, d)`, `a < c < d < b`.
    pub fn log_boltz_interior_closed(&self, a: usize, b: usize, c: usize, d: usize) -> Score {
        self.log_boltz_interior(a, b - 1, c - 1, d)
    }

    pub fn boltz_interior_closed(&self, a: usize, b: usize, c: usize, d: usize) -> Score {
        self.log_boltz_interior_closed(a, b, c, d).exp()
    }

    /// Two-pair loop dispatcher in closed coordinates; the adjacency test
    /// restates as `c == a+1 && d == b-1`.
    pub fn log_boltz_loop_closed(&self, a: usize, b: usize, c: usize, d: usize) -> Score {
        if c == a + 1 && d == b - 1 {
            return self.log_boltz_stack_closed(a, b);
        }
        self.log_boltz_interior_closed(a, b, c, d)
    }

    pub fn boltz_loop_closed(&self, a: usize, b: usize, c: usize, d: usize) -> Score {
        self.log_boltz_loop_closed(a, b, c, d).exp()
    }

    /// Multiloop closed by the pair `(a, b)`.
    pub fn log_boltz_multi_close_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_multi_close(a + 1, b - 1)
    }

    pub fn boltz_multi_close_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_multi_close_closed(a, b).exp()
    }

    /// Multiloop branch helix at the pair `(a, b)`.
    pub fn log_boltz_multi_open_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_multi_open(a - 1, b)
    }

    pub fn boltz_multi_open_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_multi_open_closed(a, b).exp()
    }

    /// Exterior branch helix at the pair `(a, b)`.
    pub fn log_boltz_outer_branch_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_outer_branch(a - 1, b)
    }

    pub fn boltz_outer_branch_closed(&self, a: usize, b: usize) -> Score {
        self.log_boltz_outer_branch_closed(a, b).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tf_energy::{NearestNeighborModel, NucleotideVec};
    use tf_score::impossible;

    fn scorer_for<'a>(model: &'a mut NearestNeighborModel, seq: &str) -> LoopScorer<'a, NearestNeighborModel> {
        let mut scorer = LoopScorer::new(model);
        scorer.initialize().expect("const tables must be valid");
        scorer.set_seq(&NucleotideVec::try_from(seq).unwrap());
        scorer
    }

    // Positions 1-3 are G, 4-6 A, 7-9 C, 10-12 A; pairs (2,8) over (3,7)
    // form a G-C on G-C stack around the GAAAC-style hairpin at (3,7).
    const SEQ: &str = "GGGAAACCCAAA";

    #[test]
    fn test_dispatcher_adjacency() {
        let mut model = NearestNeighborModel::new();
        let scorer = scorer_for(&mut model, SEQ);
        // Adjacent inner pair: the dispatcher must hit the stack path.
        let (i, j) = (1, 8);
        assert_eq!(scorer.log_boltz_loop(i, j, i + 1, j - 1), scorer.log_boltz_stack(i, j));
        // Any other nested pair: the interior path.
        assert_eq!(scorer.log_boltz_loop(2, 7, 4, 6), scorer.log_boltz_interior(2, 7, 4, 6));
    }

    #[test]
    fn test_closed_wrappers_match_dp() {
        let mut model = NearestNeighborModel::new();
        let scorer = scorer_for(&mut model, SEQ);
        assert_eq!(scorer.log_boltz_stack_closed(2, 8), scorer.log_boltz_stack(1, 8));
        assert_eq!(scorer.log_boltz_hairpin_closed(2, 7), scorer.log_boltz_hairpin(3, 6));
        // The outer-pair-(1,10)-over-inner-pair-(2,8) bulge of the
        // DP-coordinate docs, renamed by the closed offsets.
        assert_eq!(scorer.log_boltz_interior_closed(2, 10, 3, 8),
                   scorer.log_boltz_interior(2, 9, 2, 8));
        assert_eq!(scorer.log_boltz_multi_close_closed(2, 11), scorer.log_boltz_multi_close(3, 10));
        assert_eq!(scorer.log_boltz_multi_open_closed(2, 11), scorer.log_boltz_multi_open(1, 11));
        assert_eq!(scorer.log_boltz_outer_branch_closed(2, 11), scorer.log_boltz_outer_branch(1, 11));
    }

    #[test]
    fn test_closed_dispatcher() {
        let mut model = NearestNeighborModel::new();
        let scorer = scorer_for(&mut model, SEQ);
        assert_eq!(scorer.log_boltz_loop_closed(2, 8, 3, 7), scorer.log_boltz_stack_closed(2, 8));
        assert_eq!(scorer.log_boltz_loop_closed(2, 8, 4, 7),
                   scorer.log_boltz_interior_closed(2, 8, 4, 7));
    }

    #[test]
    fn test_boltz_is_exp_of_log() {
        let mut model = NearestNeighborModel::new();
        let scorer = scorer_for(&mut model, SEQ);
        let lb = scorer.log_boltz_hairpin(3, 6);
        assert!(lb.is_finite());
        assert!((scorer.boltz_hairpin(3, 6) - lb.exp()).abs() < 1e-12);
        let lb = scorer.log_boltz_stack(1, 8);
        assert!(lb.is_finite());
        assert!((scorer.boltz_stack(1, 8) - lb.exp()).abs() < 1e-12);
    }

    #[test]
    fn test_stem_close_and_multi_extend() {
        use tf_energy::ML_PARAMS;

        let mut model = NearestNeighborModel::new();
        let scorer = scorer_for(&mut model, SEQ);
        let rt = scorer.rt_kcal_mol();

        // Helix terminated at the G-C pair (2,8): no terminal penalty.
        let lb = scorer.log_boltz_stem_close(1, 8);
        assert_eq!(lb, 0.0);
        assert!((scorer.boltz_stem_close(1, 8) - lb.exp()).abs() < 1e-12);

        // Multiloop extension is the per-base constant.
        let lb = scorer.log_boltz_multi_extend(1, 5);
        let expected = -(ML_PARAMS.base_en37 as f64) / 100.0 / rt;
        assert!((lb - expected).abs() < 1e-12);
        assert!((scorer.boltz_multi_extend(1, 5) - lb.exp()).abs() < 1e-12);
    }

    #[test]
    fn test_forbidden_boltz_weight_is_zero() {
        let mut model = NearestNeighborModel::new();
        // Hairpin span of two unpaired bases: below the minimum.
        let scorer = scorer_for(&mut model, "GAAC");
        assert!(impossible(scorer.log_boltz_hairpin(1, 3)));
        assert_eq!(scorer.boltz_hairpin(1, 3), 0.0);
    }

    #[test]
    fn test_conversion_pass_through() {
        let mut model = NearestNeighborModel::new();
        let scorer = scorer_for(&mut model, "GAAAC");
        let rt = scorer.rt_kcal_mol();
        assert!((scorer.energy_to_score(-rt) + 1.0).abs() < 1e-12);
        assert!((scorer.score_to_energy(scorer.energy_to_score(-2.5)) + 2.5).abs() < 1e-12);
        assert_eq!(scorer.seqlen(), 5);
        assert_eq!(scorer.min_hairpin(), 3);
        assert_eq!(scorer.max_loop(), 30);
    }
}

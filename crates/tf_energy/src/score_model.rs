use std::fmt;

use tf_score::{Score, energy_to_score, score_to_energy};

use crate::Base;

#[derive(Debug)]
pub enum ModelError {
    InvalidLength(&'static str, usize, usize),
    InvalidHairpinMin(usize),
    InvalidSpecialLoop(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidLength(table, expected, got) => {
                write!(f, "Invalid length for parameter table '{}': expected {}, got {}",
                    table, expected, got)
            }
            ModelError::InvalidHairpinMin(n) => {
                write!(f, "Invalid minimum hairpin size: {}", n)
            }
            ModelError::InvalidSpecialLoop(s) => {
                write!(f, "Invalid special hairpin sequence: '{}'", s)
            }
        }
    }
}

impl std::error::Error for ModelError {}


/// What the scoring facade requires of an energy table provider.
///
/// All scoring methods return log-Boltzmann factors, i.e. `-dG/RT`, or the
/// forbidden sentinel for configurations the model rules out. Coordinates
/// follow the DP convention over the padded sequence: positions are 1-based
/// after padding, and a DP pair `(x, y)` denotes the padded pair `(x+1, y)`.
/// The per-method contracts are spelled out on [`LoopScorer`], which is the
/// only intended caller.
///
/// [`LoopScorer`]: https://docs.rs/thermofold
pub trait ScoreModel {
    /// One-time parameter validation/setup; sequence independent.
    fn initialize(&mut self) -> Result<(), ModelError>;

    /// Bind a sequence (applying padding). Must be called before any
    /// scoring query; calling it again rebinds and invalidates all scores
    /// computed against the previous sequence.
    fn set_seq(&mut self, seq: &[Base]);

    /// Unpadded length of the bound sequence.
    fn seqlen(&self) -> usize;

    /// Maximum combined unpaired length of an interior/bulge loop.
    fn max_loop(&self) -> usize;

    /// Minimum number of unpaired bases in a hairpin loop.
    fn min_hairpin(&self) -> usize;

    fn rt_kcal_mol(&self) -> f64;

    fn energy_to_score(&self, energy: f64) -> Score {
        energy_to_score(energy, self.rt_kcal_mol())
    }

    fn score_to_energy(&self, score: Score) -> f64 {
        score_to_energy(score, self.rt_kcal_mol())
    }

    fn score_stack(&self, i: usize, j: usize) -> Score;
    fn score_stem_close(&self, i: usize, j: usize) -> Score;
    fn score_hairpin(&self, i: usize, j: usize) -> Score;
    fn score_interior(&self, i: usize, j: usize, ip: usize, jp: usize) -> Score;
    fn score_multi_close(&self, i: usize, j: usize) -> Score;
    fn score_multi_open(&self, i: usize, j: usize) -> Score;
    fn score_multi_extend(&self, i: usize, j: usize) -> Score;
    fn score_outer_extend(&self, i: usize, j: usize) -> Score;
    fn score_outer_branch(&self, i: usize, j: usize) -> Score;
}

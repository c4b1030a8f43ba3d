use ahash::AHashMap;
use log::debug;

use tf_score::{Score, neg_inf, rt_kcal_mol};

use crate::{Base, NucleotideVec, PaddedSeq, PairTypeRNA};
use crate::{ModelError, ScoreModel};
use crate::nn_tables::*;

/// A compact nearest neighbor score provider at 37C.
///
/// Energies come from the const tables in `nn_tables`; every lookup is
/// converted to a log-Boltzmann factor (`-dG/RT`) on the way out.
/// Configurations the model rules out (hairpins below [`MINHPIN`], loops
/// beyond [`MAXLOOP`], unpairable closing bases) score as the forbidden
/// sentinel. Querying before `initialize()` + `set_seq()` panics.
pub struct NearestNeighborModel {
    temperature: f64,
    rt: f64,
    special_hairpins: AHashMap<[Base; 6], i32>,
    seq: Option<PaddedSeq>,
    initialized: bool,
}

impl Default for NearestNeighborModel {
    fn default() -> Self {
        Self::new()
    }
}

impl NearestNeighborModel {
    pub fn new() -> Self {
        let temperature = 37.0;
        NearestNeighborModel {
            temperature,
            rt: rt_kcal_mol(temperature),
            special_hairpins: AHashMap::new(),
            seq: None,
            initialized: false,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    fn seq(&self) -> &PaddedSeq {
        self.seq.as_ref().expect("set_seq() must complete before scoring")
    }

    /// Centi-kcal free energy to a log-Boltzmann score.
    #[inline]
    fn lb(&self, en37: i32) -> Score {
        -(en37 as f64) / 100.0 / self.rt
    }
}

impl ScoreModel for NearestNeighborModel {
    fn initialize(&mut self) -> Result<(), ModelError> {
        // Guarded slots in the initiation table are zero; every legal
        // hairpin size must carry a real initiation energy.
        if HAIRPIN37[MINHPIN] == 0 {
            return Err(ModelError::InvalidHairpinMin(MINHPIN));
        }
        let mut map = AHashMap::with_capacity(SPECIAL_HAIRPINS.len());
        for (s, en) in SPECIAL_HAIRPINS {
            let bases = NucleotideVec::try_from(*s)
                .map_err(|_| ModelError::InvalidSpecialLoop(s.to_string()))?;
            let key: [Base; 6] = bases[..].try_into()
                .map_err(|_| ModelError::InvalidLength("special_hairpins", 6, bases.len()))?;
            if !PairTypeRNA::from((key[0], key[5])).can_pair() {
                return Err(ModelError::InvalidSpecialLoop(s.to_string()));
            }
            map.insert(key, *en);
        }
        self.special_hairpins = map;
        self.initialized = true;
        debug!("nearest neighbor model ready ({} special hairpins)",
            self.special_hairpins.len());
        Ok(())
    }

    fn set_seq(&mut self, seq: &[Base]) {
        assert!(self.initialized, "initialize() must be called before set_seq()");
        self.seq = Some(PaddedSeq::new(seq));
        debug!("bound sequence of length {}", seq.len());
    }

    fn seqlen(&self) -> usize {
        self.seq().len()
    }

    fn max_loop(&self) -> usize {
        MAXLOOP
    }

    fn min_hairpin(&self) -> usize {
        MINHPIN
    }

    fn rt_kcal_mol(&self) -> f64 {
        self.rt
    }

    // Stack between padded pairs (i+1, j) and (i+2, j-1).
    fn score_stack(&self, i: usize, j: usize) -> Score {
        let seq = self.seq();
        assert!(i + 3 < j, "stack span ({}, {}) leaves no room for the inner pair", i, j);
        let outer = seq.pair(i + 1, j);
        let inner = seq.pair(j - 1, i + 2);
        if !outer.can_pair() || !inner.can_pair() {
            return neg_inf();
        }
        self.lb(STACK37[outer as usize][inner as usize])
    }

    // Helix terminated at the padded pair (i+1, j).
    fn score_stem_close(&self, i: usize, j: usize) -> Score {
        let seq = self.seq();
        assert!(i + 1 < j, "stem close span ({}, {}) is not a pair", i, j);
        let pt = seq.pair(i + 1, j);
        if !pt.can_pair() {
            return neg_inf();
        }
        let en = if pt.is_ru() { MISC.terminal_ru_en37 } else { 0 };
        self.lb(en)
    }

    // i, j are the first/last unpaired positions; closing pair is (i, j+1)
    // in padded coordinates.
    fn score_hairpin(&self, i: usize, j: usize) -> Score {
        let seq = self.seq();
        assert!(i >= 1 && i <= j, "hairpin span ({}, {}) is inverted or hits the padding", i, j);
        let n = j - i;
        if n < MINHPIN {
            return neg_inf();
        }
        let closing = seq.pair(i, j + 1);
        if !closing.can_pair() {
            return neg_inf();
        }
        if n == 4 {
            let key = [seq.at(i), seq.at(i + 1), seq.at(i + 2),
                       seq.at(i + 3), seq.at(i + 4), seq.at(i + 5)];
            if let Some(&en) = self.special_hairpins.get(&key) {
                return self.lb(en);
            }
        }
        let mut en = if n <= MAXLOOP {
            HAIRPIN37[n]
        } else {
            HAIRPIN37[MAXLOOP] + (MISC.lxc * ((n as f64) / 30.0).ln()) as i32
        };
        if closing.is_ru() {
            en += MISC.terminal_ru_en37;
        }
        self.lb(en)
    }

    // Outer pair (i, j+1) and inner pair (ip+1, jp) in padded coordinates;
    // side lengths l1 = ip - i, l2 = j - jp.
    fn score_interior(&self, i: usize, j: usize, ip: usize, jp: usize) -> Score {
        let seq = self.seq();
        assert!(i >= 1 && i <= ip && jp <= j, "interior span ({}, {}, {}, {}) is not nested", i, j, ip, jp);
        assert!(ip + 1 < jp, "inner pair ({}, {}) is not a pair", ip + 1, jp);
        let l1 = ip - i;
        let l2 = j - jp;
        let n = l1 + l2;
        if n > MAXLOOP {
            return neg_inf();
        }
        let outer = seq.pair(i, j + 1);
        let inner = seq.pair(jp, ip + 1); // read 3'->5', the stack table orientation
        if !outer.can_pair() || !inner.can_pair() {
            return neg_inf();
        }
        let en = match (l1, l2) {
            (0, 0) => STACK37[outer as usize][inner as usize],
            (0, _) | (_, 0) => {
                let mut en = BULGE37[n];
                if n == 1 {
                    // A single-base bulge keeps the stacking interaction.
                    en += STACK37[outer as usize][inner as usize];
                } else {
                    if outer.is_ru() { en += MISC.terminal_ru_en37; }
                    if inner.is_ru() { en += MISC.terminal_ru_en37; }
                }
                en
            }
            _ => {
                let mut en = INTERNAL37[n];
                en += NINIO.max.min(l1.abs_diff(l2) as i32 * NINIO.en37);
                if outer.is_ru() { en += MISC.terminal_ru_en37; }
                if inner.is_ru() { en += MISC.terminal_ru_en37; }
                en
            }
        };
        self.lb(en)
    }

    // Multiloop closed at padded pair (i, j+1), inner-bounds addressing.
    fn score_multi_close(&self, i: usize, j: usize) -> Score {
        let seq = self.seq();
        assert!(i >= 1 && i <= j, "multiloop span ({}, {}) is inverted or hits the padding", i, j);
        let closing = seq.pair(i, j + 1);
        if !closing.can_pair() {
            return neg_inf();
        }
        let mut en = ML_PARAMS.closing_en37;
        if closing.is_ru() {
            en += MISC.terminal_ru_en37;
        }
        self.lb(en)
    }

    // Branch helix at padded pair (i+1, j) inside a multiloop.
    fn score_multi_open(&self, i: usize, j: usize) -> Score {
        let seq = self.seq();
        assert!(i + 1 < j, "multiloop branch ({}, {}) is not a pair", i, j);
        let pt = seq.pair(i + 1, j);
        if !pt.can_pair() {
            return neg_inf();
        }
        let mut en = ML_PARAMS.intern_en37;
        if pt.is_ru() {
            en += MISC.terminal_ru_en37;
        }
        self.lb(en)
    }

    // One more unpaired base inside an open multiloop.
    fn score_multi_extend(&self, i: usize, j: usize) -> Score {
        let seq = self.seq();
        assert!(i <= j && j <= seq.len() + 1, "multiloop extension ({}, {}) out of range", i, j);
        self.lb(ML_PARAMS.base_en37)
    }

    // Exterior bases are unconstrained and free.
    fn score_outer_extend(&self, i: usize, j: usize) -> Score {
        let seq = self.seq();
        assert!(i <= j && j <= seq.len() + 1, "exterior extension ({}, {}) out of range", i, j);
        0.0
    }

    // Branch helix at padded pair (i+1, j) in the exterior loop.
    fn score_outer_branch(&self, i: usize, j: usize) -> Score {
        let seq = self.seq();
        assert!(i + 1 < j, "exterior branch ({}, {}) is not a pair", i, j);
        let pt = seq.pair(i + 1, j);
        if !pt.can_pair() {
            return neg_inf();
        }
        let en = if pt.is_ru() { MISC.terminal_ru_en37 } else { 0 };
        self.lb(en)
    }
}

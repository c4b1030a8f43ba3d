use crate::PCOUNT as P;

/// Loop-size limits of the nearest neighbor model.
pub const MAXLOOP: usize = 30;
pub const MINHPIN: usize = 3;

/// Multiloop linear model: `closing + intern * branches + base * unpaired`.
pub struct MultiParams {
    pub base_en37: i32,
    pub closing_en37: i32,
    pub intern_en37: i32,
}

pub struct Ninio {
    pub en37: i32,
    pub max: i32,
}

pub struct Misc {
    pub terminal_ru_en37: i32,
    pub lxc: f64,
}

pub const ML_PARAMS: MultiParams = MultiParams {
    base_en37: 0,
    closing_en37: 340,
    intern_en37: 40,
};

pub const NINIO: Ninio = Ninio { en37: 60, max: 300 };

pub const MISC: Misc = Misc { terminal_ru_en37: 50, lxc: 107.856 };

// All energies below are 37C free energies in 0.01 kcal/mol.
// Pair index order: AU UA CG GC GU UG NN. The NN row/column is never read,
// unpairable configurations are rejected before the lookup.

/// Stacking energies, indexed `[outer][inner]` where the inner pair is read
/// 3'->5' relative to the outer one (so a GC on GC stack reads `[GC][CG]`).
pub const STACK37: [[i32; P]; P] = [
    [-110,  -90, -210, -220, -140,  -60, 0],
    [ -90, -130, -210, -240, -130, -100, 0],
    [-210, -210, -240, -330, -210, -140, 0],
    [-220, -240, -330, -340, -250, -150, 0],
    [-140, -130, -210, -250,  130,  -50, 0],
    [ -60, -100, -140, -150,  -50,   30, 0],
    [   0,    0,    0,    0,    0,    0, 0],
];

/// Hairpin initiation by loop size; sizes below MINHPIN are rejected
/// before the lookup. Sizes beyond 30 extrapolate with `lxc * ln(n/30)`.
pub const HAIRPIN37: [i32; MAXLOOP + 1] = [
      0,   0,   0, 540, 560, 570, 540, 600, 550, 640,
    650, 660, 670, 678, 686, 694, 701, 707, 713, 719,
    725, 730, 735, 740, 744, 749, 753, 757, 761, 765,
    769,
];

/// Bulge initiation by loop size; size 0 is a stack, never a bulge.
pub const BULGE37: [i32; MAXLOOP + 1] = [
      0, 380, 280, 320, 360, 400, 440, 459, 470, 480,
    490, 500, 510, 519, 527, 534, 541, 548, 554, 560,
    565, 571, 576, 580, 585, 589, 594, 598, 602, 605,
    609,
];

/// Interior loop initiation by combined loop size. The 1x1 and 2x1 slots
/// stand in for the dedicated small-loop tables of the full parameter set.
pub const INTERNAL37: [i32; MAXLOOP + 1] = [
      0,   0, 170, 160, 110, 200, 200, 210, 230, 240,
    250, 260, 270, 278, 286, 294, 301, 307, 313, 319,
    325, 330, 335, 340, 345, 349, 353, 357, 361, 365,
    369,
];

/// Hairpins whose full sequence (closing pair included) replaces the
/// generic initiation term.
pub const SPECIAL_HAIRPINS: &[(&str, i32)] = &[
    ("CGAAAG", 350),
    ("CGCAAG", 360),
    ("CGAGAG", 330),
    ("CGUGAG", 370),
    ("CUUCGG", 220),
    ("CUACGG", 280),
    ("GGAAAC", 300),
    ("GGCAAC", 320),
    ("UGAAAA", 330),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PairTypeRNA::*;

    #[test]
    fn test_stack_table_symmetric() {
        // Reading a stack from the other strand must give the same energy.
        for a in [AU, UA, CG, GC, GU, UG] {
            for b in [AU, UA, CG, GC, GU, UG] {
                assert_eq!(STACK37[a as usize][b as usize],
                           STACK37[b as usize][a as usize]);
            }
        }
    }

    #[test]
    fn test_initiation_table_sizes() {
        assert_eq!(HAIRPIN37.len(), MAXLOOP + 1);
        assert_eq!(BULGE37.len(), MAXLOOP + 1);
        assert_eq!(INTERNAL37.len(), MAXLOOP + 1);
    }

    #[test]
    fn test_special_hairpins_are_hexamers() {
        for (s, _) in SPECIAL_HAIRPINS {
            assert_eq!(s.len(), 6);
        }
    }
}

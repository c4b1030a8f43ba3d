use crate::Score;

/// The forbidden sentinel: the score of a configuration that can never
/// occur (hairpin below the minimum size, unpairable closing bases, ...).
/// It loses every maximization and is the identity of [`logadd`].
#[inline]
pub fn neg_inf() -> Score {
    Score::NEG_INFINITY
}

/// True iff `sc` is the forbidden sentinel.
///
/// Finite scores are never impossible, no matter how negative.
#[inline]
pub fn impossible(sc: Score) -> bool {
    sc == Score::NEG_INFINITY
}

/// In-place log-sum-exp: `*acc = ln(exp(*acc) + exp(val))`.
///
/// Computed by factoring out the larger operand, so neither exponential
/// can overflow. The forbidden sentinel acts as the identity element, and
/// two forbidden operands stay forbidden (no NaN from inf - inf).
#[inline]
pub fn logadd(acc: &mut Score, val: Score) {
    if impossible(val) {
        return;
    }
    if impossible(*acc) {
        *acc = val;
        return;
    }
    let (hi, lo) = if *acc >= val { (*acc, val) } else { (val, *acc) };
    *acc = hi + (lo - hi).exp().ln_1p();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neg_inf_is_impossible() {
        assert!(impossible(neg_inf()));
        assert!(!impossible(0.0));
        assert!(!impossible(-1e300));
        assert!(!impossible(42.0));
    }

    #[test]
    fn test_logadd_identity() {
        let mut acc = -3.25;
        logadd(&mut acc, neg_inf());
        assert_eq!(acc, -3.25);

        let mut acc = neg_inf();
        logadd(&mut acc, -3.25);
        assert_eq!(acc, -3.25);
    }

    #[test]
    fn test_logadd_two_forbidden() {
        let mut acc = neg_inf();
        logadd(&mut acc, neg_inf());
        assert!(impossible(acc));
        assert!(!acc.is_nan());
    }

    #[test]
    fn test_logadd_matches_direct() {
        let mut acc = (0.3f64).ln();
        logadd(&mut acc, (0.5f64).ln());
        assert!((acc - (0.8f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_logadd_commutes() {
        let (a, b) = (-700.0, -2.0);
        let mut x = a;
        logadd(&mut x, b);
        let mut y = b;
        logadd(&mut y, a);
        assert!((x - y).abs() < 1e-12);
    }

    #[test]
    fn test_logadd_no_overflow() {
        // Both operands far outside exp() range.
        let mut acc = 1e4;
        logadd(&mut acc, 1e4);
        assert!((acc - (1e4 + std::f64::consts::LN_2)).abs() < 1e-9);

        let mut acc = -1e4;
        logadd(&mut acc, -1e4);
        assert!((acc - (-1e4 + std::f64::consts::LN_2)).abs() < 1e-9);
    }
}

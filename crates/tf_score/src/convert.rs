use crate::Score;

pub const K0: f64 = 273.15;
pub const KB: f64 = 0.001987204285; // kcal/(mol*K)

/// RT in kcal/mol at the given temperature in Celsius.
#[inline]
pub fn rt_kcal_mol(celsius: f64) -> f64 {
    KB * (celsius + K0)
}

/// Free energy (kcal/mol) to dimensionless log-space score.
///
/// This is the bare division by RT; a provider building Boltzmann weights
/// passes `-delta_g` here so that stabilizing loops score higher.
#[inline]
pub fn energy_to_score(energy: f64, rt: f64) -> Score {
    energy / rt
}

/// Inverse of [`energy_to_score`].
#[inline]
pub fn score_to_energy(score: Score, rt: f64) -> f64 {
    score * rt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rt_at_37() {
        let rt = rt_kcal_mol(37.0);
        assert!((rt - 0.61633).abs() < 1e-4);
    }

    #[test]
    fn test_round_trip() {
        let rt = rt_kcal_mol(37.0);
        for e in [-12.3, -0.01, 0.0, 0.5, 7.25] {
            let back = score_to_energy(energy_to_score(e, rt), rt);
            assert!((back - e).abs() < 1e-12);
        }
        for sc in [-20.0, -1.0, 0.0, 3.5] {
            let back = energy_to_score(score_to_energy(sc, rt), rt);
            assert!((back - sc).abs() < 1e-12);
        }
    }
}

use std::fmt;
use std::ops::Deref;

use colored::*;
use log::warn;

#[derive(Debug)]
pub enum SequenceError {
    InvalidChar(char),
    Separator(char),
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::InvalidChar(c) => {
                write!(f, "Unsupported nucleotide: '{}'", c)
            }
            SequenceError::Separator(c) => {
                write!(f, "Multi-strand input is not supported: '{}'", c)
            }
        }
    }
}

impl std::error::Error for SequenceError {}


#[derive(Clone, Hash, Copy, Debug, Eq, PartialEq)]
pub enum Base { A, C, G, U, N }
pub const BCOUNT: usize = 5; // 5 Base variants for tables.

impl TryFrom<char> for Base {
    type Error = SequenceError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Base::A),
            'C' => Ok(Base::C),
            'G' => Ok(Base::G),
            'U' | 'T' => Ok(Base::U),
            'N' => Ok(Base::N),
            '&' | '+' => Err(SequenceError::Separator(c)),
            _ => Err(SequenceError::InvalidChar(c)),
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::U => 'U',
            Base::N => 'N',
        };
        write!(f, "{}", c)
    }
}


#[derive(Clone, Hash, Debug, Eq, PartialEq)]
pub struct NucleotideVec(pub Vec<Base>);

impl Deref for NucleotideVec {
    type Target = [Base];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<&str> for NucleotideVec {
    type Error = SequenceError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut vec = Vec::with_capacity(s.len());
        for c in s.chars() {
            vec.push(Base::try_from(c)?);
        }
        Ok(NucleotideVec(vec))
    }
}

impl fmt::Display for NucleotideVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.0 {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

impl NucleotideVec {
    pub fn from_lossy(s: &str) -> Self {
        let vec = s.chars().map(|c| {
            Base::try_from(c).unwrap_or_else(|e| {
                warn!("{} {} -> converted to 'N'", "WARNING:".red(), e);
                Base::N
            })
        }).collect();
        NucleotideVec(vec)
    }
}


const PAIR_LOOKUP: [[PairTypeRNA; BCOUNT]; BCOUNT] = {
    use Base::*;
    use PairTypeRNA::*;
    let mut table = [[NN; BCOUNT]; BCOUNT];
    table[A as usize][U as usize] = AU;
    table[U as usize][A as usize] = UA;
    table[C as usize][G as usize] = CG;
    table[G as usize][C as usize] = GC;
    table[G as usize][U as usize] = GU;
    table[U as usize][G as usize] = UG;
    table
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PairTypeRNA { AU, UA, CG, GC, GU, UG, NN }
pub const PCOUNT: usize = 7; // 7 Pair variants for tables.

impl From<(Base, Base)> for PairTypeRNA {
    fn from(pair: (Base, Base)) -> Self {
        PAIR_LOOKUP[pair.0 as usize][pair.1 as usize]
    }
}

impl fmt::Display for PairTypeRNA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PairTypeRNA::AU => "A-U",
            PairTypeRNA::UA => "U-A",
            PairTypeRNA::CG => "C-G",
            PairTypeRNA::GC => "G-C",
            PairTypeRNA::GU => "G-U",
            PairTypeRNA::UG => "U-G",
            PairTypeRNA::NN => "N-N",
        };
        write!(f, "{}", s)
    }
}

impl PairTypeRNA {
    /// True for pairs that get the terminal non-GC penalty at helix ends.
    pub fn is_ru(&self) -> bool {
        matches!(self
            , PairTypeRNA::GU | PairTypeRNA::UG
            | PairTypeRNA::AU | PairTypeRNA::UA)
    }

    pub fn can_pair(&self) -> bool {
        self != &PairTypeRNA::NN
    }

    pub fn invert(&self) -> PairTypeRNA {
        use PairTypeRNA::*;
        match self {
            AU => UA,
            UA => AU,
            CG => GC,
            GC => CG,
            GU => UG,
            UG => GU,
            NN => NN,
        }
    }
}


/// The padded sequence representation: one sentinel `N` prepended and one
/// appended, so that table lookups at loop boundaries never fall off the
/// ends. Positions are addressed 1-based; `at(0)` and `at(len()+1)` are the
/// sentinels. `len()` reports the unpadded length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaddedSeq(Vec<Base>);

impl PaddedSeq {
    pub fn new(seq: &[Base]) -> Self {
        let mut padded = Vec::with_capacity(seq.len() + 2);
        padded.push(Base::N);
        padded.extend_from_slice(seq);
        padded.push(Base::N);
        PaddedSeq(padded)
    }

    /// Unpadded sequence length.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len() - 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Base at padded position `k`, valid for `0..=len()+1`.
    #[inline]
    pub fn at(&self, k: usize) -> Base {
        assert!(k < self.0.len(), "padded index {} out of range 0..={}", k, self.0.len() - 1);
        self.0[k]
    }

    /// Pair type of the bases at padded positions `(k, l)`.
    #[inline]
    pub fn pair(&self, k: usize, l: usize) -> PairTypeRNA {
        PairTypeRNA::from((self.at(k), self.at(l)))
    }
}

impl From<&[Base]> for PaddedSeq {
    fn from(seq: &[Base]) -> Self {
        PaddedSeq::new(seq)
    }
}

impl fmt::Display for PaddedSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for base in &self.0[1..self.0.len() - 1] {
            write!(f, "{}", base)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Base::*;

    #[test]
    fn test_base_parsing() {
        assert_eq!(Base::try_from('a').unwrap(), A);
        assert_eq!(Base::try_from('T').unwrap(), U);
        assert!(matches!(Base::try_from('&'), Err(SequenceError::Separator('&'))));
        assert!(matches!(Base::try_from('x'), Err(SequenceError::InvalidChar('x'))));
    }

    #[test]
    fn test_pair_types() {
        assert_eq!(PairTypeRNA::from((G, C)), PairTypeRNA::GC);
        assert_eq!(PairTypeRNA::from((G, U)), PairTypeRNA::GU);
        assert_eq!(PairTypeRNA::from((A, G)), PairTypeRNA::NN);
        assert!(PairTypeRNA::GU.is_ru());
        assert!(!PairTypeRNA::CG.is_ru());
        assert_eq!(PairTypeRNA::AU.invert(), PairTypeRNA::UA);
        assert!(!PairTypeRNA::from((A, A)).can_pair());
    }

    #[test]
    fn test_padded_seq() {
        let seq = NucleotideVec::try_from("GCAU").unwrap();
        let padded = PaddedSeq::new(&seq);
        assert_eq!(padded.len(), 4);
        assert_eq!(padded.at(0), N);
        assert_eq!(padded.at(1), G);
        assert_eq!(padded.at(4), U);
        assert_eq!(padded.at(5), N);
        assert_eq!(padded.pair(1, 2), PairTypeRNA::GC);
        assert_eq!(format!("{}", padded), "GCAU");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_padded_seq_out_of_range() {
        let seq = NucleotideVec::try_from("GCAU").unwrap();
        PaddedSeq::new(&seq).at(6);
    }

    #[test]
    fn test_from_lossy() {
        let seq = NucleotideVec::from_lossy("GxCAU");
        assert_eq!(seq[1], N);
        assert_eq!(seq.len(), 5);
    }
}

use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{BagSeedParseError, Piece, PieceKind};

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator behind the bag. Using the same seed produces the same sequence of
/// pieces, which is what makes a session reproducible in tests.
///
/// Seeds print and parse as 32 hex digits.
///
/// # Example
///
/// ```
/// use blockfall_engine::BagSeed;
/// use rand::Rng as _;
///
/// let seed: BagSeed = rand::rng().random();
/// let parsed: BagSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BagSeed([u8; 16]);

impl BagSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Widens a small integer into a seed, handy for tests and examples.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl fmt::Display for BagSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for BagSeed {
    type Err = BagSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(BagSeedParseError::InvalidLength(s.len()));
        }
        // from_str_radix would also accept a leading sign
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(BagSeedParseError::InvalidDigit(s.to_owned()));
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| BagSeedParseError::InvalidDigit(s.to_owned()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BagSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BagSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `BagSeed` values using the standard random distribution.
impl Distribution<BagSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BagSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BagSeed(seed)
    }
}

/// The 7-bag randomizer.
///
/// Each call to [`Self::draw_bag`] returns all seven kinds in a uniformly random
/// order. The order is built by drawing without replacement: pick a uniform index
/// among the `k` kinds not drawn yet, take that kind out, repeat with `k - 1`.
/// Every one of the 7! orders comes out of exactly one sequence of draws, and each
/// such sequence has probability `1/7 · 1/6 · … · 1/1`, so all orders are equally
/// likely.
#[derive(Debug, Clone)]
pub struct BagRandomizer {
    rng: Pcg32,
}

impl BagRandomizer {
    #[must_use]
    pub fn with_seed(seed: BagSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws one bag: a permutation of all seven kinds.
    pub fn draw_bag(&mut self) -> [PieceKind; PieceKind::LEN] {
        let mut remaining = ArrayVec::from(PieceKind::ALL);
        let mut bag = PieceKind::ALL;
        for slot in &mut bag {
            let index = self.rng.random_range(0..remaining.len());
            *slot = remaining.remove(index);
        }
        bag
    }

    /// Appends one bag of spawn-ready pieces to `queue`.
    pub fn extend<Q>(&mut self, queue: &mut Q)
    where
        Q: Extend<Piece>,
    {
        queue.extend(self.draw_bag().map(Piece::spawn));
    }
}

use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ShapeKind;

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator of a [`NextPieceQueue`]. The same seed always yields the same
/// sequence of pieces. It is written as 32 lowercase hex digits.
///
/// # Example
///
/// ```
/// use blockfall_engine::{NextPieceQueue, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let mut first = NextPieceQueue::with_seed(seed);
/// let mut second = NextPieceQueue::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(first.pop_next(), second.pop_next());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed {input:?}: expected 32 hex digits")]
pub struct ParsePieceSeedError {
    input: String,
}

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Single-slot lookahead of the next piece.
///
/// Every draw is an independent uniform pick over the seven kinds; there is
/// no bag, so repeats and droughts are possible.
#[derive(Debug, Clone)]
pub struct NextPieceQueue {
    rng: Pcg32,
    next: ShapeKind,
}

impl Default for NextPieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl NextPieceQueue {
    /// Creates a queue with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let next = rng.random();
        Self { rng, next }
    }

    /// The piece the next [`Self::pop_next`] returns.
    #[must_use]
    pub fn peek(&self) -> ShapeKind {
        self.next
    }

    /// Takes the queued piece and refills the slot with a fresh draw.
    pub fn pop_next(&mut self) -> ShapeKind {
        let refill = self.rng.random();
        std::mem::replace(&mut self.next, refill)
    }

    /// Discards the queued piece and draws a new one.
    pub fn refill(&mut self) {
        self.next = self.rng.random();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: PieceSeed = SEED.parse().unwrap();
        let mut a = NextPieceQueue::with_seed(seed);
        let mut b = NextPieceQueue::with_seed(seed);
        let seq_a: Vec<_> = (0..50).map(|_| a.pop_next()).collect();
        let seq_b: Vec<_> = (0..50).map(|_| b.pop_next()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_peek_matches_pop() {
        let mut queue = NextPieceQueue::with_seed(SEED.parse().unwrap());
        for _ in 0..20 {
            let peeked = queue.peek();
            assert_eq!(queue.pop_next(), peeked);
        }
    }

    #[test]
    fn test_refill_advances_rng() {
        let seed = SEED.parse().unwrap();
        let mut refilled = NextPieceQueue::with_seed(seed);
        let mut plain = NextPieceQueue::with_seed(seed);
        refilled.refill();
        plain.pop_next();
        assert_eq!(refilled.peek(), plain.peek());
    }

    #[test]
    fn test_seed_display_and_parse() {
        let seed: PieceSeed = SEED.parse().unwrap();
        assert_eq!(seed.to_string(), SEED);
        assert_eq!(
            PieceSeed::from_bytes([0; 16]).to_string(),
            "00000000000000000000000000000000"
        );
    }

    #[test]
    fn test_seed_parse_errors() {
        assert!("".parse::<PieceSeed>().is_err());
        assert!("0123".parse::<PieceSeed>().is_err());
        assert!("+123456789abcdef0123456789abcdef".parse::<PieceSeed>().is_err());
        assert!("g123456789abcdef0123456789abcdef".parse::<PieceSeed>().is_err());
    }

    #[test]
    fn test_seed_serde_json() {
        let seed: PieceSeed = SEED.parse().unwrap();
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, format!("\"{SEED}\""));
        let parsed: PieceSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, seed);
        assert!(serde_json::from_str::<PieceSeed>("\"xyz\"").is_err());
    }
}

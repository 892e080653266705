use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::core::piece::PieceKind;

/// Uniform random piece source.
///
/// Each [`next_kind`](Self::next_kind) call is an independent uniform draw
/// over the 7 kinds — no bag, no fairness guarantee. Backed by a seedable
/// PCG so a run can be reproduced exactly.
#[derive(Debug, Clone)]
pub struct PieceSpawner {
    rng: Pcg32,
}

impl Default for PieceSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSpawner {
    /// Creates a spawner with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a deterministic
    /// piece sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Draws the next piece kind.
    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceSpawner::with_seed(7);
        let mut b = PieceSpawner::with_seed(7);
        for _ in 0..64 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_every_kind_is_reachable() {
        let mut spawner = PieceSpawner::with_seed(42);
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..1_000 {
            seen[spawner.next_kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "draws: {seen:?}");
    }
}

//! RNG module - seeded randomness and the 7-bag piece randomizer
//!
//! The board owns its random source so games are reproducible from a seed.
//! The bag draws by rejection: a candidate already drawn since the last
//! reset is thrown back and redrawn. The bag empties at the start of the
//! draw that follows its seventh piece.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Source of randomness consumed by the board
pub trait RandomSource {
    /// Next raw 32-bit value
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, max)`
    fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f64 {
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// 7-bag piece randomizer
#[derive(Debug, Clone, Default)]
pub struct PieceBag {
    drawn: ArrayVec<PieceKind, 7>,
}

impl PieceBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the next kind
    pub fn draw<R: RandomSource>(&mut self, rng: &mut R) -> PieceKind {
        if self.drawn.is_full() {
            self.drawn.clear();
        }

        loop {
            let candidate = PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize];
            if !self.drawn.contains(&candidate) {
                self.drawn.push(candidate);
                return candidate;
            }
        }
    }

    /// Kinds drawn since the last reset
    pub fn drawn(&self) -> &[PieceKind] {
        &self.drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_rng_ranges() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
            let u = rng.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn test_bag_draws_all_seven() {
        let mut rng = SimpleRng::new(1);
        let mut bag = PieceBag::new();

        let drawn: Vec<_> = (0..7).map(|_| bag.draw(&mut rng)).collect();
        for kind in PieceKind::ALL {
            assert!(drawn.contains(&kind), "Missing piece: {:?}", kind);
        }
    }

    #[test]
    fn test_bag_clears_on_next_draw() {
        let mut rng = SimpleRng::new(99);
        let mut bag = PieceBag::new();

        for _ in 0..7 {
            bag.draw(&mut rng);
        }
        // Seventh piece is in before the reset happens.
        assert_eq!(bag.drawn().len(), 7);

        let eighth = bag.draw(&mut rng);
        assert_eq!(bag.drawn(), &[eighth]);
    }
}

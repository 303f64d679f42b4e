//! Deterministic seeded PRNG for build generation.
//!
//! Park-Miller "minimal standard" Lehmer generator: `s = s * 16807 mod (2^31 - 1)`.
//! The generator is owned by a single build request and threaded through
//! every call that consumes randomness, so the draw order fully determines
//! the output.

/// Lehmer modulus (2^31 - 1, prime).
pub const LEHMER_MODULUS: u64 = 2_147_483_647;

const LEHMER_MULTIPLIER: u64 = 16_807;

/// Seed derived from a prompt: the sum of its character codes.
pub fn seed_from_prompt(prompt: &str) -> u64 {
    prompt.chars().map(|c| c as u64).sum()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// The seed is reduced into `1..LEHMER_MODULUS`. Zero would make the
    /// generator emit zeros forever, so it maps to 1.
    pub fn new(seed: u64) -> Self {
        let state = seed % LEHMER_MODULUS;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    pub fn from_prompt(prompt: &str) -> Self {
        Self::new(seed_from_prompt(prompt))
    }

    /// Next uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * LEHMER_MULTIPLIER % LEHMER_MODULUS;
        (self.state - 1) as f64 / (LEHMER_MODULUS - 1) as f64
    }

    /// Uniform index into a collection of `len` items. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }

    /// Grid cell offset in `-range/2 ..= range - 1 - range/2`.
    pub fn cell(&mut self, range: i32) -> i32 {
        (self.next_f64() * range as f64).floor() as i32 - range / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let mut a = SeededRng::from_prompt("Dragon");
        let mut b = SeededRng::from_prompt("Dragon");
        for _ in 0..1000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }

    #[test]
    fn test_seed_is_char_code_sum() {
        assert_eq!(seed_from_prompt("AB"), 65 + 66);
        assert_eq!(seed_from_prompt(""), 0);
        // Anagrams share a seed
        assert_eq!(seed_from_prompt("stop"), seed_from_prompt("pots"));
    }

    #[test]
    fn test_known_sequence() {
        // Park-Miller reference: seed 1 yields 16807, then 282475249
        let mut rng = SeededRng::new(1);
        assert_eq!(rng.next_f64(), 16806.0 / 2_147_483_646.0);
        assert_eq!(rng.next_f64(), 282_475_248.0 / 2_147_483_646.0);
    }

    #[test]
    fn test_zero_seed_is_not_degenerate() {
        let mut zero = SeededRng::new(0);
        let mut wrapped = SeededRng::new(LEHMER_MODULUS);
        let first = zero.next_f64();
        assert!(first > 0.0);
        assert_eq!(first, wrapped.next_f64());
    }

    #[test]
    fn test_output_range_and_distribution() {
        let mut rng = SeededRng::new(12345);
        let mut low = 0u32;
        for _ in 0..10_000 {
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f), "out of range: {f}");
            if f < 0.5 {
                low += 1;
            }
        }
        let low_frac = low as f64 / 10_000.0;
        assert!(low_frac > 0.45 && low_frac < 0.55, "poor distribution: {low_frac}");
    }

    #[test]
    fn test_index_and_cell_bounds() {
        let mut rng = SeededRng::from_prompt("bounds");
        for _ in 0..1000 {
            assert!(rng.index(7) < 7);
            let c3 = rng.cell(3);
            assert!((-1..=1).contains(&c3), "compact cell {c3}");
            let c5 = rng.cell(5);
            assert!((-2..=2).contains(&c5), "full cell {c5}");
        }
    }
}

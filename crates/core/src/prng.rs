//! Seedable Xorshift64 PRNG used for every random draw during synthesis.
//!
//! Candidate shuffling, granule sizes, shape kinds, and vertex jitter all
//! pull from one generator threaded through the call, so a fixed seed
//! reproduces the same canvas on every platform.

/// Xorshift64 deterministic PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is replaced with a non-zero fallback to avoid the all-zeros
/// fixed point.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform f64 in [0, 1) from the upper 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Multiplicative jitter factor uniform in `[1 - spread, 1 + spread)`.
    pub fn jitter(&mut self, spread: f64) -> f64 {
        self.next_range(1.0 - spread, 1.0 + spread)
    }

    /// Uniform usize in [0, max).
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    pub fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }

    /// Returns `true` if the next uniform draw in [0, 1) is below `p`.
    ///
    /// `p <= 0` never fires and `p >= 1` always fires.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// In-place Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_usize(i + 1);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // Canvases recorded with a seed depend on this exact sequence.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(42);
        let mut b = Xorshift64::new(42);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn chance_extremes() {
        let mut rng = Xorshift64::new(5);
        for _ in 0..1000 {
            assert!(!rng.chance(0.0));
            assert!(rng.chance(1.0));
            assert!(!rng.chance(-0.5));
            assert!(rng.chance(1.5));
        }
    }

    #[test]
    fn chance_matches_probability_roughly() {
        let mut rng = Xorshift64::new(2024);
        let hits = (0..10_000).filter(|_| rng.chance(0.3)).count();
        assert!((2_700..3_300).contains(&hits), "hits = {hits}");
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = Xorshift64::new(77);
        let mut items: Vec<usize> = (0..500).collect();
        rng.shuffle(&mut items);
        assert_ne!(items, (0..500).collect::<Vec<_>>(), "shuffle left order intact");
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let mut a: Vec<u32> = (0..100).collect();
        let mut b = a.clone();
        Xorshift64::new(9).shuffle(&mut a);
        Xorshift64::new(9).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_handles_empty_and_single() {
        let mut rng = Xorshift64::new(1);
        let mut empty: Vec<u8> = Vec::new();
        rng.shuffle(&mut empty);
        let mut one = vec![7];
        rng.shuffle(&mut one);
        assert_eq!(one, vec![7]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v));
                }
            }

            #[test]
            fn jitter_stays_in_band(seed: u64, spread in 0.0_f64..0.9) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let j = rng.jitter(spread);
                    prop_assert!(j >= 1.0 - spread && j <= 1.0 + spread, "jitter {j} for spread {spread}");
                }
            }

            #[test]
            fn next_usize_in_bounds(seed: u64, max in 1_usize..10_000) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    prop_assert!(rng.next_usize(max) < max);
                }
            }
        }
    }
}

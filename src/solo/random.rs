// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Random source abstraction for generation.
//!
//! Generation only ever asks for a uniform draw in `[0, 1)`. Any `rand`
//! generator works as a source; tests can substitute a seeded `StdRng`
//! or a scripted sequence of draws.

use rand::{Rng, RngCore};

/// A source of uniform draws in `[0, 1)`
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// True with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform index in `0..len`; `len` must be non-zero
    fn index(&mut self, len: usize) -> usize {
        let i = (self.next_f64() * len as f64) as usize;
        i.min(len.saturating_sub(1))
    }

    /// Index into `weights`, chosen proportionally to each weight
    ///
    /// Falls back to the last index if rounding leaves the roll unspent.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut roll = self.next_f64() * total;
        for (i, &weight) in weights.iter().enumerate() {
            if roll < weight {
                return i;
            }
            roll -= weight;
        }
        weights.len().saturating_sub(1)
    }
}

impl<R: RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedSource;
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_chance() {
        let mut source = ScriptedSource::new(&[0.1, 0.9]);
        assert!(source.chance(0.5));
        assert!(!source.chance(0.5));
        assert_eq!(source.consumed(), 2);
    }

    #[test]
    fn test_index_bounds() {
        let mut source = ScriptedSource::new(&[0.0, 0.5, 0.999_999]);
        assert_eq!(source.index(4), 0);
        assert_eq!(source.index(4), 2);
        assert_eq!(source.index(4), 3);
    }

    #[test]
    fn test_weighted() {
        let weights = [0.5, 0.3, 0.1, 0.1];
        let mut source = ScriptedSource::new(&[0.0, 0.49, 0.5, 0.79, 0.85, 0.95]);
        let picks: Vec<usize> = (0..6).map(|_| source.weighted(&weights)).collect();
        assert_eq!(picks, vec![0, 0, 1, 1, 2, 3]);
    }

    #[test]
    fn test_rng_draws_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
    }
}

//! Noise generator — white noise with a click plateau on articulation, seeded RNG.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{Articulation, Instrument, PLATEAU};

/// White noise instrument.
///
/// Each sample is an independent uniform draw in `[0.0, 1.0)`, except for a
/// short plateau after every articulation.
pub struct NoiseGen {
    rng: ChaCha8Rng,
    articulation: Articulation,
}

impl NoiseGen {
    pub fn new(seed: u64, articulation_len: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            articulation: Articulation::new(articulation_len),
        }
    }
}

impl Instrument for NoiseGen {
    fn articulate(&mut self, time: u64) {
        self.articulation.restart(time);
    }

    fn sample(&mut self, time: u64) -> f64 {
        if self.articulation.sounding(time) {
            return PLATEAU;
        }
        self.rng.gen::<f64>()
    }

    fn name(&self) -> &str {
        "noise"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_bounded() {
        let mut gen = NoiseGen::new(42, 100);
        for t in 0..10_000 {
            let s = gen.sample(t);
            assert!((0.0..1.0).contains(&s), "sample out of bounds: {s}");
        }
    }

    #[test]
    fn deterministic() {
        let mut a = NoiseGen::new(42, 100);
        let mut b = NoiseGen::new(42, 100);
        for t in 0..1000 {
            assert_eq!(a.sample(t), b.sample(t));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = NoiseGen::new(1, 100);
        let mut b = NoiseGen::new(2, 100);
        let a: Vec<f64> = (0..64).map(|t| a.sample(t)).collect();
        let b: Vec<f64> = (0..64).map(|t| b.sample(t)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn plateau_after_articulation() {
        let mut gen = NoiseGen::new(42, 100);
        gen.articulate(500);
        for t in 500..600 {
            assert_eq!(gen.sample(t), PLATEAU);
        }
        let after: Vec<f64> = (600..700).map(|t| gen.sample(t)).collect();
        assert!(after.iter().any(|&s| s != PLATEAU));
    }

    #[test]
    fn noise_varies() {
        let mut gen = NoiseGen::new(7, 100);
        let first = gen.sample(0);
        assert!((1..100).any(|t| gen.sample(t) != first));
    }

    #[test]
    fn instrument_trait_name() {
        let gen = NoiseGen::new(42, 100);
        assert_eq!(Instrument::name(&gen), "noise");
    }
}

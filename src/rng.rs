use rand::{rngs::SmallRng, Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};

/// Seeded RNG wrapper used throughout mutation, crossover and the starter
/// builder so a fixed seed reproduces a fixed evolutionary trajectory.
///
/// Wraps a `SmallRng` the same way the teacher's `GenomeRng` does, and adds
/// the handful of sampling shapes BIOME's mutation operators need: a
/// standard-normal jitter (weight/bias shift), a bounded uniform draw
/// (weight randomize), and a fair coin (crossover gene choice, mutation
/// acceptance rolls).
#[derive(Debug)]
pub struct BiomeRng {
    small: SmallRng,
    standard_normal: Normal<f64>,
}

impl BiomeRng {
    pub fn new(seed: u64) -> Self {
        Self {
            small: SmallRng::seed_from_u64(seed),
            standard_normal: Normal::new(0.0, 1.0).expect("standard normal is always valid"),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            small: SmallRng::from_entropy(),
            standard_normal: Normal::new(0.0, 1.0).expect("standard normal is always valid"),
        }
    }

    /// Returns `true` with probability `chance`.
    pub fn gamble(&mut self, chance: f64) -> bool {
        self.small.gen::<f64>() < chance
    }

    /// Fair coin, used by crossover to pick a parent's allele for matching genes.
    pub fn coin_flip(&mut self) -> bool {
        self.small.gen::<f64>() < 0.5
    }

    /// A single sample from `N(0, 1)`.
    pub fn standard_normal(&mut self) -> f64 {
        self.standard_normal.sample(&mut self.small)
    }

    /// A uniform sample in `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        Uniform::new(low, high).sample(&mut self.small)
    }

    pub fn gen_range_usize(&mut self, low: usize, high: usize) -> usize {
        self.small.gen_range(low..high)
    }
}

impl RngCore for BiomeRng {
    fn next_u32(&mut self) -> u32 {
        self.small.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.small.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.small.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.small.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = BiomeRng::new(7);
        let mut b = BiomeRng::new(7);

        for _ in 0..100 {
            assert_eq!(a.standard_normal(), b.standard_normal());
        }
    }
}

//! Spawn context for element initialization.
//!
//! Both generators sample their per-element state through a
//! [`SpawnContext`], which owns a small deterministic RNG. The random
//! stream for an element depends only on the configured seed and the
//! element's index, so a given seed reproduces the exact same cloud on
//! every run and on every machine.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Odd multiplier used to spread consecutive indices across the seed space.
const INDEX_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Context handed to element generation with helpers for common
/// sampling patterns.
///
/// ```ignore
/// let mut ctx = SpawnContext::new(i, count, seed);
/// let position = ctx.random_in_cube(100.0);
/// let blend = ctx.random();
/// ```
pub struct SpawnContext {
    /// Index of the element being spawned (0 to count-1).
    pub index: usize,
    /// Total number of elements being spawned.
    pub count: usize,
    rng: SmallRng,
}

impl SpawnContext {
    pub(crate) fn new(index: usize, count: usize, seed: u64) -> Self {
        let stream = seed ^ (index as u64).wrapping_mul(INDEX_MIX);
        Self {
            index,
            count,
            rng: SmallRng::seed_from_u64(stream),
        }
    }

    /// Normalized progress through the spawn (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.count.max(1) as f32
    }

    /// Random f32 in [0, 1).
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given half-open range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen_range(min..max)
    }

    /// Random point inside a cube of given half-size, centered at origin.
    ///
    /// Each axis is sampled independently, so for a cube from -100 to 100
    /// use `half_size = 100.0`.
    pub fn random_in_cube(&mut self, half_size: f32) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-half_size..half_size),
            self.rng.gen_range(-half_size..half_size),
            self.rng.gen_range(-half_size..half_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_context_progress() {
        let ctx = SpawnContext::new(50, 100, 0);
        assert!((ctx.progress() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SpawnContext::new(3, 10, 99);
        let mut b = SpawnContext::new(3, 10, 99);
        for _ in 0..16 {
            assert_eq!(a.random(), b.random());
        }
    }

    #[test]
    fn test_different_index_different_stream() {
        let mut a = SpawnContext::new(0, 10, 99);
        let mut b = SpawnContext::new(1, 10, 99);
        // A shared prefix this long would mean the index mix is broken.
        let same = (0..8).filter(|_| a.random() == b.random()).count();
        assert!(same < 8);
    }

    #[test]
    fn test_random_range_bounds() {
        let mut ctx = SpawnContext::new(0, 1, 7);
        for _ in 0..1000 {
            let v = ctx.random_range(-0.01, 0.01);
            assert!(v >= -0.01 && v < 0.01);
        }
    }

    #[test]
    fn test_random_in_cube_bounds() {
        let mut ctx = SpawnContext::new(0, 1, 7);
        for _ in 0..100 {
            let pos = ctx.random_in_cube(50.0);
            for coord in pos.to_array() {
                assert!((-50.0..50.0).contains(&coord));
            }
        }
    }
}

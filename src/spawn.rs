//! Random source for particle spawning.
//!
//! Every random draw made by the simulator goes through [`SpawnRng`], so a
//! simulator built with a fixed seed replays the same particles frame for frame.

use crate::math::normalize_or;
use crate::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Resample attempts before a direction sample gives up and uses +Y.
const MAX_DIRECTION_ATTEMPTS: u32 = 8;

/// Seeded pseudo-random source with helpers for common spawn draws.
///
/// ```ignore
/// let mut rng = SpawnRng::seeded(7);
/// let size = rng.range(10.0, 50.0);
/// let dir = rng.random_direction();
/// ```
#[derive(Debug, Clone)]
pub struct SpawnRng {
    rng: SmallRng,
}

impl SpawnRng {
    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `(0, 1]`.
    #[inline]
    pub fn random_nonzero(&mut self) -> f32 {
        1.0 - self.rng.gen::<f32>()
    }

    /// Random f32 in `[min, max)`.
    ///
    /// Unlike `Rng::gen_range` this never panics: an empty range returns `min`
    /// and a reversed range samples `(max, min]`.
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        self.random() * (max - min) + min
    }

    /// Random f32 in `[-1, 1)`.
    #[inline]
    pub fn signed(&mut self) -> f32 {
        self.random() * 2.0 - 1.0
    }

    // ========== Direction helpers ==========

    /// Random unit vector built from three independent `[-1, 1)` axis draws.
    ///
    /// The result is biased toward the cube diagonals, not uniform on the
    /// sphere. An all-zero draw is resampled; after repeated failures the
    /// direction falls back to +Y.
    pub fn random_direction(&mut self) -> Vec3 {
        first_direction(|| Vec3::new(self.signed(), self.signed(), self.signed()))
    }

    /// Normalize `v`, falling back to +Y for a degenerate vector.
    #[inline]
    pub fn direction_or_up(v: Vec3) -> Vec3 {
        normalize_or(v, Vec3::Y)
    }
}

/// Normalize the first usable draw from `sample`, giving up with +Y.
fn first_direction(mut sample: impl FnMut() -> Vec3) -> Vec3 {
    for _ in 0..MAX_DIRECTION_ATTEMPTS {
        if let Some(dir) = sample().try_normalize() {
            return dir;
        }
    }
    Vec3::Y
}

impl Default for SpawnRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

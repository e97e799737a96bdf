//! Seeded random stream threaded through every generation stage.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic pseudo-random stream owned by a single level generation.
///
/// Every draw goes through fixed-width integers so the stream does not depend
/// on the pointer width of the host.
#[derive(Clone, Debug)]
pub struct LevelRng {
    seed: u64,
    inner: ChaCha8Rng,
}

impl LevelRng {
    /// Creates a stream seeded with `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed the stream was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws an integer in `lo..=hi`. Returns `lo` without drawing when the range is empty.
    pub fn next_int(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..=hi)
    }

    /// Draws a float in `[0, 1)`.
    pub fn next_float(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Returns `true` with probability `probability`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_float() < probability
    }

    /// Draws a float in `[lo, hi)`. Returns `lo` without drawing when the range is empty.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + (hi - lo) * self.next_float()
    }

    /// Picks one element of `items`, or `None` when the slice is empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let last = i64::try_from(items.len()).ok()?.checked_sub(1)?;
        let index = usize::try_from(self.next_int(0, last)).ok()?;
        items.get(index)
    }

    /// Shuffles `items` in place with a Fisher-Yates pass.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let Ok(len) = i64::try_from(items.len()) else {
            return;
        };
        for upper in (1..len).rev() {
            let other = self.next_int(0, upper);
            if let (Ok(a), Ok(b)) = (usize::try_from(upper), usize::try_from(other)) {
                items.swap(a, b);
            }
        }
    }
}

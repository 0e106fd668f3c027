use crate::RandSource;
use rand::{Rng, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and automatically
/// reseeded periodically.
///
/// The type stores no RNG state of its own; each call borrows the calling
/// thread's generator, so one instance may be shared freely across threads.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn below(&self, bound: usize) -> usize {
        rng().random_range(0..bound)
    }
}

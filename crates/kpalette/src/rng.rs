use rand::{RngExt, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

// pi * 100_000
const RANDOM_SEED: u64 = 314159;

pub fn new() -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(RANDOM_SEED)
}

pub fn with_seed(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

/// A source of uniformly distributed indices.
///
/// Centroid seeding and starved-cluster recovery only ever need "pick one of
/// the `n` samples", so that is the whole interface. Every [`RngExt`] is an
/// index source; tests can plug in a scripted sequence instead.
pub trait IndexSource {
    /// Returns an index in `0..n`. `n` is never zero.
    fn next_index(&mut self, n: usize) -> usize;
}

impl<R: RngExt + ?Sized> IndexSource for R {
    #[inline]
    fn next_index(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }
}

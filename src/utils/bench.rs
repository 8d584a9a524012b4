//! Shared benchmark utilities: reproducible random inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `len` uniformly random signed bytes.
pub fn random_bytes<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<i8> {
    (0..len).map(|_| rng.random::<i8>()).collect()
}

/// A fresh pair of equal-length random byte vectors derived from `seed`.
pub fn random_pair(size: usize, seed: u64) -> (Vec<i8>, Vec<i8>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let a = random_bytes(&mut rng, size);
    let b = random_bytes(&mut rng, size);
    (a, b)
}

// Random helpers shared by content simulators

use rand::{Rng, RngCore};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Uniform integer in `[min, max]`, both ends inclusive.
///
/// Panics if `min > max`.
pub fn rand_int_between(rng: &mut dyn RngCore, min: usize, max: usize) -> usize {
    assert!(min <= max, "rand_int_between: min ({min}) > max ({max})");
    rng.gen_range(min..=max)
}

/// A string of exactly `n` ASCII letters
pub fn rand_string_of_length(rng: &mut dyn RngCore, n: usize) -> String {
    (0..n)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

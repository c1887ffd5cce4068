//! Shared data generators for the benchmarks.
#![allow(dead_code)]
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

/// Random alphanumeric string of `len` characters.
#[inline]
pub fn random_string(len: usize) -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// `count` independent random strings of length `len`.
pub fn generate_strings(count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| random_string(len)).collect()
}

/// `count` uniformly random u64 keys.
pub fn generate_u64s(count: usize) -> Vec<u64> {
    let mut rng = thread_rng();
    (0..count).map(|_| rng.gen()).collect()
}

/// Number of items fed through each benchmark.
pub const ITEMS: usize = 10_000;

//! Keyspace measurements: location estimates, exhaustive search, and
//! collision probes over the 94! permutation space.
//!
//! The searches here are expected to run for a very long time against
//! real keys; they poll an optional wall-clock budget once per iteration
//! and report an elapsed limit as an ordinary outcome, not an error.

use crate::alphabet::{key_charmap, KEY_LENGTH};
use crate::key::{equivalent_integer, generate_key, Clock, Key, KeyGenerator, Seed};
use crate::radix::decode_base94;
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};
use std::time::{Duration, Instant};

/// Number of valid keys: 94!.
pub fn keyspace_size() -> BigInt {
    (1..=KEY_LENGTH as u64).fold(BigInt::one(), |acc, i| acc * i)
}

/// Approximate location of a key in `[0, 1]`, measured as the linear
/// position of its base-94 value between the smallest key (the charmap in
/// ascending order) and the largest (fully reversed).
///
/// This is an integer-distance estimate, not the key's combinatorial rank
/// among permutations; it is intentionally cheap and approximate.
pub fn approx_location(key: &Key) -> f64 {
    let ascending: String = key_charmap().into_iter().collect();
    let descending: String = key_charmap().into_iter().rev().collect();

    // Both bounds are charmap permutations, so decoding cannot fail
    let kmin = decode_base94(&ascending).unwrap();
    let kmax = decode_base94(&descending).unwrap();

    let span = big_to_f64(&(kmax - &kmin));
    let offset = big_to_f64(&(key.to_integer() - kmin));
    offset / span
}

fn big_to_f64(n: &BigInt) -> f64 {
    // Key values stay near 94^94 ~ 1e185, comfortably inside f64 range
    n.to_f64().unwrap_or(f64::MAX)
}

/// Result of a timed search over the keyspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub found: bool,
    pub attempts: u64,
    pub elapsed: Duration,
}

/// Advance `symbols` to the next permutation in lexicographic order.
/// Returns false once `symbols` is the final (descending) permutation.
pub fn next_permutation<T: Ord>(symbols: &mut [T]) -> bool {
    if symbols.len() < 2 {
        return false;
    }

    let mut i = symbols.len() - 1;
    while i > 0 && symbols[i - 1] >= symbols[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    let mut j = symbols.len() - 1;
    while symbols[j] <= symbols[i - 1] {
        j -= 1;
    }
    symbols.swap(i - 1, j);
    symbols[i..].reverse();
    true
}

/// Enumerate the keyspace in lexicographic order until `key` is reached,
/// the enumeration is exhausted, or the optional time budget elapses.
pub fn brute_force(key: &Key, time_limit: Option<Duration>) -> SearchOutcome {
    let target = key.alphabet();
    let mut candidate = key_charmap();
    let start = Instant::now();
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;
        if candidate == target {
            return SearchOutcome {
                found: true,
                attempts,
                elapsed: start.elapsed(),
            };
        }
        if let Some(limit) = time_limit {
            if start.elapsed() >= limit {
                return SearchOutcome {
                    found: false,
                    attempts,
                    elapsed: start.elapsed(),
                };
            }
        }
        if !next_permutation(&mut candidate) {
            return SearchOutcome {
                found: false,
                attempts,
                elapsed: start.elapsed(),
            };
        }
    }
}

/// Repeatedly generate keys from fresh default seeds until one reproduces
/// `key` or the optional time budget elapses.
pub fn collision_by_regeneration<C: Clock>(
    key: &Key,
    generator: &mut KeyGenerator<C>,
    time_limit: Option<Duration>,
) -> SearchOutcome {
    let start = Instant::now();
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;
        if generator.generate() == *key {
            return SearchOutcome {
                found: true,
                attempts,
                elapsed: start.elapsed(),
            };
        }
        if let Some(limit) = time_limit {
            if start.elapsed() >= limit {
                return SearchOutcome {
                    found: false,
                    attempts,
                    elapsed: start.elapsed(),
                };
            }
        }
    }
}

/// An inclusive range of integer seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInterval {
    pub lo: BigInt,
    pub hi: BigInt,
}

impl SeedInterval {
    pub fn new(lo: impl Into<BigInt>, hi: impl Into<BigInt>) -> Self {
        Self {
            lo: lo.into(),
            hi: hi.into(),
        }
    }
}

impl Default for SeedInterval {
    /// The full documented collision interval: `[0, 94! - 1]`.
    fn default() -> Self {
        Self {
            lo: BigInt::from(0),
            hi: keyspace_size() - 1,
        }
    }
}

/// Result of an integer-seed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedScanOutcome {
    /// First scanned seed that reproduced the target key, if any.
    pub collision: Option<BigInt>,
    pub attempts: u64,
    pub elapsed: Duration,
}

/// Scan every integer seed in `interval` for one that generates the same
/// key as `seed`, skipping the seed that trivially produces it (for text
/// seeds, the equivalent integer under the hash construction).
pub fn collision_by_seed_scan(
    seed: &Seed,
    interval: Option<SeedInterval>,
    time_limit: Option<Duration>,
) -> SeedScanOutcome {
    let interval = interval.unwrap_or_default();
    let target = generate_key(seed);
    let skip = equivalent_integer(seed);

    let start = Instant::now();
    let mut attempts: u64 = 0;
    let mut candidate = interval.lo.clone();

    while candidate <= interval.hi {
        if let Some(limit) = time_limit {
            if start.elapsed() >= limit {
                return SeedScanOutcome {
                    collision: None,
                    attempts,
                    elapsed: start.elapsed(),
                };
            }
        }
        if candidate != skip {
            attempts += 1;
            if generate_key(&Seed::Integer(candidate.clone())) == target {
                return SeedScanOutcome {
                    collision: Some(candidate),
                    attempts,
                    elapsed: start.elapsed(),
                };
            }
        }
        candidate += 1;
    }

    SeedScanOutcome {
        collision: None,
        attempts,
        elapsed: start.elapsed(),
    }
}

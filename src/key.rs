//! Key representation, validation, seed hashing, and key generation.
//!
//! A key is a permutation of the 94-symbol charmap. It is at once the
//! secret, the output alphabet of the final base-94 stage, and the seed
//! for every key-derived shuffle.

use crate::alphabet::{key_charmap, KEY_LENGTH};
use crate::error::{Dre94Error, Result};
use crate::radix::decode_base94;
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A validated key: 94 distinct characters drawn from ASCII codes 33-126.
///
/// The charmap has exactly 94 symbols, so a valid key is always a full
/// permutation of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(String);

impl Key {
    /// Validate a candidate key string.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let chars: Vec<char> = key.chars().collect();

        if chars.len() != KEY_LENGTH {
            return Err(Dre94Error::InvalidKeyLength(chars.len()));
        }

        let mut seen = [false; KEY_LENGTH];
        for &ch in &chars {
            let code = ch as u32;
            if !(33..=126).contains(&code) {
                return Err(Dre94Error::InvalidKeyCharset(format!(
                    "character {:?} outside ASCII codes 33 to 126",
                    ch
                )));
            }
            let slot = (code - 33) as usize;
            if seen[slot] {
                return Err(Dre94Error::InvalidKeyCharset(format!(
                    "duplicate character {:?}",
                    ch
                )));
            }
            seen[slot] = true;
        }

        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key's symbols in order, ready to serve as a base-94 alphabet.
    pub fn alphabet(&self) -> Vec<char> {
        self.0.chars().collect()
    }

    /// The key read as one large base-94 integer over the charmap.
    pub fn to_integer(&self) -> BigInt {
        // A validated key contains only charmap symbols, so this cannot fail
        decode_base94(&self.0).unwrap()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Key {
    type Err = Dre94Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// Seed material for key generation: an unbounded integer or free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    Integer(BigInt),
    Text(String),
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Integer(BigInt::from(n))
    }
}

impl From<BigInt> for Seed {
    fn from(n: BigInt) -> Self {
        Seed::Integer(n)
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

/// The fixed base of the text-seed hash: 2^512 - 1. Shares no small
/// factors with the moduli 1..=94, so consecutive integer seeds and text
/// seeds differing only in their trailing characters land on distant keys.
pub(crate) fn m512() -> BigInt {
    (BigInt::one() << 512u32) - 1
}

/// Reduce a seed to an index in `0..size`.
///
/// Integer seeds reduce by floor-mod in O(1). Text seeds are read as a
/// base-M512 numeral, least-significant character first (Horner's rule
/// over the reversed string), so that the trailing characters dominate
/// the result.
pub fn hash_seed(seed: &Seed, size: usize) -> usize {
    match seed {
        Seed::Integer(n) => {
            let modulus = BigInt::from(size);
            let mut rem = n % &modulus;
            if rem.is_negative() {
                rem += &modulus;
            }
            rem.to_usize().unwrap_or(0)
        }
        Seed::Text(s) => {
            if size == 1 {
                return 0;
            }
            // (idx * M512 + code) mod size == (idx * (M512 mod size) + code) mod size,
            // which keeps the whole reduction in machine words
            let size = size as u64;
            let base = (m512() % size).to_u64().unwrap_or(0);
            let mut idx: u64 = 0;
            for ch in s.chars().rev() {
                idx = (idx * base + ch as u64) % size;
            }
            idx as usize
        }
    }
}

/// The integer seed that generates the same key as `seed`: text seeds are
/// interchangeable with `sum(code(ch_i) * M512^i)` by the hash construction.
pub fn equivalent_integer(seed: &Seed) -> BigInt {
    match seed {
        Seed::Integer(n) => n.clone(),
        Seed::Text(s) => {
            let base = m512();
            let mut value = BigInt::zero();
            for ch in s.chars().rev() {
                value = value * &base + BigInt::from(ch as u32);
            }
            value
        }
    }
}

/// Generate a key from an explicit seed.
///
/// Two selection passes run over a shrinking pool: the first over the
/// charmap, the second over the intermediate result. A single pass leaves
/// numerically close seeds with visibly correlated leading characters;
/// the second pass decorrelates them.
///
/// Integer seeds generate in O(94) time, text seeds in O(94 * len).
pub fn generate_key(seed: &Seed) -> Key {
    let intermediate = selection_pass(seed, key_charmap());
    let final_chars = selection_pass(seed, intermediate);
    Key(final_chars.into_iter().collect())
}

fn selection_pass(seed: &Seed, mut pool: Vec<char>) -> Vec<char> {
    let mut picked = Vec::with_capacity(pool.len());
    for size in (1..=pool.len()).rev() {
        let idx = hash_seed(seed, size);
        picked.push(pool.remove(idx));
    }
    picked
}

/// Microsecond clock used for default seeds. Injected so tests can pin time.
pub trait Clock {
    fn micros_since_epoch(&self) -> u64;
}

/// Wall-clock microseconds since the Unix epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn micros_since_epoch(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }
}

/// Generates keys from fresh time-based seeds.
///
/// The generator owns the last default seed it handed out and bumps the
/// clock reading past it when needed, so consecutive no-seed generations
/// on one instance never reuse a seed.
#[derive(Debug)]
pub struct KeyGenerator<C: Clock = SystemClock> {
    clock: C,
    last_seed: Option<u64>,
}

impl KeyGenerator<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for KeyGenerator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> KeyGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            last_seed: None,
        }
    }

    /// Next default seed: current microseconds, strictly greater than any
    /// seed this instance produced before.
    pub fn default_seed(&mut self) -> Seed {
        let mut seed = self.clock.micros_since_epoch();
        if let Some(last) = self.last_seed {
            if seed <= last {
                seed = last + 1;
            }
        }
        self.last_seed = Some(seed);
        Seed::Integer(BigInt::from(seed))
    }

    /// Generate a key from a fresh default seed.
    pub fn generate(&mut self) -> Key {
        let seed = self.default_seed();
        generate_key(&seed)
    }
}

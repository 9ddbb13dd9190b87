//! Arbitrary-base conversion between big integers and numeral strings.
//!
//! A numeral system is described by an ordered, duplicate-free slice of
//! symbols; its base is the slice length. Index 0 is the zero digit, which
//! means a leading `digits[0]` vanishes on a round trip — callers that care
//! (the cipher engine) reserve a sentinel at index 0.

use crate::alphabet::key_charmap;
use crate::error::{Dre94Error, Result};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use std::collections::{HashMap, HashSet};

/// Convert a non-negative integer to its representation over `digits`,
/// most-significant symbol first. Zero encodes as the single zero digit.
pub fn encode(value: &BigInt, digits: &[char]) -> Result<String> {
    check_digits(digits)?;

    if value.is_negative() {
        return Err(Dre94Error::NegativeValue);
    }

    let base = BigInt::from(digits.len());
    if value.is_zero() {
        return Ok(digits[0].to_string());
    }

    let mut symbols = Vec::new();
    let mut n = value.clone();
    while !n.is_zero() {
        let rem = &n % &base;
        // rem < base <= digits.len(), so the index conversion cannot fail
        let idx = rem.to_usize().unwrap_or(0);
        symbols.push(digits[idx]);
        n /= &base;
    }

    Ok(symbols.iter().rev().collect())
}

/// Convert a numeral over `digits` back to an integer using Horner's rule,
/// most-significant symbol first.
pub fn decode(numeral: &str, digits: &[char]) -> Result<BigInt> {
    check_digits(digits)?;

    if numeral.is_empty() {
        return Err(Dre94Error::EmptyNumeral);
    }

    let base = BigInt::from(digits.len());
    let index: HashMap<char, usize> = digits
        .iter()
        .enumerate()
        .map(|(i, &ch)| (ch, i))
        .collect();

    let mut value = BigInt::zero();
    for ch in numeral.chars() {
        let idx = *index
            .get(&ch)
            .ok_or(Dre94Error::SymbolNotInAlphabet(ch))?;
        value = value * &base + BigInt::from(idx);
    }

    Ok(value)
}

/// Encode over the fixed 94-symbol key charmap (ASCII codes 33-126).
pub fn encode_base94(value: &BigInt) -> Result<String> {
    encode(value, &key_charmap())
}

/// Decode a base-94 numeral over the fixed key charmap.
pub fn decode_base94(numeral: &str) -> Result<BigInt> {
    decode(numeral, &key_charmap())
}

fn check_digits(digits: &[char]) -> Result<()> {
    if digits.len() < 2 {
        return Err(Dre94Error::InvalidAlphabet(
            "numeral system needs at least 2 distinct symbols".into(),
        ));
    }

    let mut seen = HashSet::with_capacity(digits.len());
    for &ch in digits {
        if !seen.insert(ch) {
            return Err(Dre94Error::InvalidAlphabet(format!(
                "duplicate symbol {:?}",
                ch
            )));
        }
    }

    Ok(())
}

//! Symbol-set constants and keyed permutation helpers.
//!
//! Everything here works on ordered, duplicate-free character sequences:
//! the fixed 94-symbol key charmap, the printable-ASCII set, per-message
//! alphabets extracted from plaintext, and deterministic shuffles driven
//! by a key's base-94 integer value.

use crate::key::Key;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Length of a key and of the key charmap.
pub const KEY_LENGTH: usize = 94;

/// Zero-value placeholder digit. Reserved as index 0 of every plaintext
/// numeral system so that genuine leading symbols never occupy the
/// vanishing digit-0 slot.
pub const NULL_CHAR: char = '\0';

/// The ordered source alphabet for keys: ASCII codes 33-126.
pub fn key_charmap() -> Vec<char> {
    (33u8..=126).map(char::from).collect()
}

/// Printable ASCII: codes 9-13 (tab through carriage return) and 32-126.
pub fn printable_ascii() -> Vec<char> {
    (9u8..=13).chain(32..=126).map(char::from).collect()
}

/// True for characters in the printable-ASCII set.
pub fn is_printable_ascii(ch: char) -> bool {
    matches!(ch as u32, 9..=13 | 32..=126)
}

/// True for characters in the key charmap (ASCII codes 33-126).
pub fn is_key_symbol(ch: char) -> bool {
    matches!(ch as u32, 33..=126)
}

/// Collect the distinct characters of `text` in first-seen order.
///
/// The order is part of the cipher format: the same input must always
/// produce the same alphabet, so no unordered set is involved.
pub fn derive_message_alphabet(text: &str) -> Vec<char> {
    let mut alphabet = Vec::new();
    for ch in text.chars() {
        if !alphabet.contains(&ch) {
            alphabet.push(ch);
        }
    }
    alphabet
}

/// Deterministically permute `seq`, selecting without replacement with the
/// key's base-94 value as the selector: for each remaining pool size the
/// element at index `K mod size` is taken next.
///
/// For a fixed key this is a pure function of the sequence contents.
/// Distinct keys give distinct shuffles only when their values differ
/// modulo `len!`.
pub fn keyed_shuffle<T: Clone>(seq: &[T], key: &Key) -> Vec<T> {
    let selector = key.to_integer();
    let mut pool: Vec<T> = seq.to_vec();
    let mut shuffled = Vec::with_capacity(pool.len());

    for size in (1..=seq.len()).rev() {
        let idx = (&selector % BigInt::from(size)).to_usize().unwrap_or(0);
        shuffled.push(pool.remove(idx));
    }

    shuffled
}

/// Build the 11-symbol metadata alphabet (digits 0-9 plus SPACE) for a key.
///
/// Only SPACE and '0' may sit at index 0: the zero digit vanishes when
/// leading, and these two are the only symbols that never legitimately
/// lead a tag. The key's parity picks which one; the other ten symbols
/// are keyed-shuffled behind it.
pub fn derive_base11_alphabet(key: &Key) -> Vec<char> {
    let zeros = [' ', '0'];
    let parity = (key.to_integer() % BigInt::from(2))
        .to_usize()
        .unwrap_or(0);
    let zero = zeros[parity];

    let mut non_zero: Vec<char> = ('1'..='9').collect();
    non_zero.push(zeros[1 - parity]);

    let mut alphabet = Vec::with_capacity(11);
    alphabet.push(zero);
    alphabet.extend(keyed_shuffle(&non_zero, key));
    alphabet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{generate_key, Seed};

    fn reversed_key() -> Key {
        let reversed: String = key_charmap().into_iter().rev().collect();
        Key::new(reversed).unwrap()
    }

    #[test]
    fn test_charmap_covers_codes_33_to_126() {
        let charmap = key_charmap();
        assert_eq!(charmap.len(), KEY_LENGTH);
        assert_eq!(charmap[0], '!');
        assert_eq!(charmap[93], '~');
    }

    #[test]
    fn test_printable_ascii_has_100_symbols() {
        let printable = printable_ascii();
        assert_eq!(printable.len(), 100);
        assert!(printable.contains(&'\t'));
        assert!(printable.contains(&' '));
        assert!(!printable.contains(&NULL_CHAR));
    }

    #[test]
    fn test_message_alphabet_keeps_first_seen_order() {
        assert_eq!(derive_message_alphabet("banana"), vec!['b', 'a', 'n']);
        assert_eq!(derive_message_alphabet(""), Vec::<char>::new());
        assert_eq!(derive_message_alphabet("ééé"), vec!['é']);
    }

    #[test]
    fn test_keyed_shuffle_is_a_permutation() {
        let key = generate_key(&Seed::from(777u64));
        let input: Vec<char> = "abcdefghij".chars().collect();
        let shuffled = keyed_shuffle(&input, &key);

        let mut sorted_in = input.clone();
        let mut sorted_out = shuffled.clone();
        sorted_in.sort_unstable();
        sorted_out.sort_unstable();
        assert_eq!(sorted_in, sorted_out);
    }

    #[test]
    fn test_keyed_shuffle_is_deterministic() {
        let key = generate_key(&Seed::from(777u64));
        let input: Vec<char> = "0123456789".chars().collect();
        assert_eq!(keyed_shuffle(&input, &key), keyed_shuffle(&input, &key));
    }

    #[test]
    fn test_keyed_shuffle_depends_on_key() {
        let a = generate_key(&Seed::from(1000u64));
        let b = generate_key(&Seed::from(1001u64));
        let input: Vec<char> = "abcdefghijklmnop".chars().collect();
        assert_ne!(keyed_shuffle(&input, &a), keyed_shuffle(&input, &b));
    }

    #[test]
    fn test_base11_zero_digit_follows_key_parity() {
        // The charmap value mod 2 equals the last symbol's index mod 2:
        // reversed charmap ends on '!' (index 0), so the zero digit is SPACE
        let alphabet = derive_base11_alphabet(&reversed_key());
        assert_eq!(alphabet[0], ' ');
        assert_eq!(alphabet.len(), 11);

        let mut sorted: Vec<char> = alphabet.clone();
        sorted.sort_unstable();
        let mut expected: Vec<char> = " 0123456789".chars().collect();
        expected.sort_unstable();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_base11_alphabet_is_deterministic() {
        let key = generate_key(&Seed::from(424242u64));
        assert_eq!(derive_base11_alphabet(&key), derive_base11_alphabet(&key));
    }
}

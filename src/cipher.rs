//! The cipher engine: mode classification, tag packing, and the final
//! base-94 transcoding stage.
//!
//! ```text
//! encrypt:  classify -> [ascii | general] payload integer -> mode bit -> base-94 (key)
//! decrypt:  base-94 decode (key) -> mode bit -> [strip sentinel frame | unpack tag]
//! ```
//!
//! Printable-ASCII plaintext takes the compact path: the text is framed
//! with the NUL sentinel and read over a fixed 102-symbol alphabet.
//! Everything else takes the general path: the message's own alphabet is
//! keyed-shuffled, recorded as a code-point tag, and packed through the
//! key-derived base-11 metadata alphabet.
//!
//! The low bit of the final integer records which path was taken. The
//! sentinel frame alone cannot carry that: roughly one general payload in
//! seven renders over the ASCII alphabet with a sentinel lead and a fully
//! printable remainder (leading digits follow Benford's law), so a
//! sentinel-only probe misreads it.

use crate::alphabet::{
    derive_base11_alphabet, derive_message_alphabet, is_key_symbol, is_printable_ascii,
    keyed_shuffle, printable_ascii, NULL_CHAR,
};
use crate::error::{Dre94Error, Result};
use crate::key::Key;
use crate::radix;
use crate::source::{load_ciphertext, load_plaintext};
use num_bigint::BigInt;
use std::path::Path;
use std::str::FromStr;

/// Index-0 pad of the ASCII-mode alphabet (code 216). It exists so the
/// NUL sentinel sits at index 1 instead of the vanishing digit-0 slot.
const ASCII_PAD: char = 'Ø';

/// How a plaintext will be encoded, decided by a pure content scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextClass {
    /// Every character is printable ASCII (codes 9-13, 32-126).
    PrintableAscii,
    /// At least one character falls outside the printable-ASCII set.
    General,
}

/// Classify a plaintext by content.
pub fn classify(text: &str) -> TextClass {
    if text.chars().all(is_printable_ascii) {
        TextClass::PrintableAscii
    } else {
        TextClass::General
    }
}

/// A plaintext reduced to its integer payload, tagged with the mode that
/// produced it. The final cipher integer is the payload shifted left once
/// with the mode in the low bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedPayload {
    Ascii(BigInt),
    General(BigInt),
}

/// Reduce a nonempty plaintext to its payload integer.
pub fn encode_payload(plaintext: &str, key: &Key) -> Result<EncodedPayload> {
    match classify(plaintext) {
        TextClass::PrintableAscii => Ok(EncodedPayload::Ascii(ascii_payload(plaintext)?)),
        TextClass::General => Ok(EncodedPayload::General(general_payload(plaintext, key)?)),
    }
}

/// The fixed ASCII-mode alphabet: pad, sentinel, then the 100 printable
/// ASCII symbols. 102 symbols in total.
fn ascii_mode_alphabet() -> Vec<char> {
    let mut alphabet = Vec::with_capacity(102);
    alphabet.push(ASCII_PAD);
    alphabet.push(NULL_CHAR);
    alphabet.extend(printable_ascii());
    alphabet
}

fn ascii_payload(plaintext: &str) -> Result<BigInt> {
    for ch in plaintext.chars() {
        if !is_printable_ascii(ch) {
            return Err(Dre94Error::NonPrintableCharacter(ch));
        }
    }

    let mut framed = String::with_capacity(plaintext.len() + 1);
    framed.push(NULL_CHAR);
    framed.push_str(plaintext);
    radix::decode(&framed, &ascii_mode_alphabet())
}

fn general_payload(plaintext: &str, key: &Key) -> Result<BigInt> {
    if plaintext.starts_with(NULL_CHAR) {
        return Err(Dre94Error::ForbiddenLeadingSentinel);
    }

    // The message's own symbols become its digits, shuffled so ciphers
    // under different keys cannot be compared character for character
    let mut charset = keyed_shuffle(&derive_message_alphabet(plaintext), key);

    // NUL re-enters below as the reserved digit 0
    charset.retain(|&ch| ch != NULL_CHAR);

    let mut digits = Vec::with_capacity(charset.len() + 1);
    digits.push(NULL_CHAR);
    digits.extend(charset.iter().copied());
    let message_value = radix::decode(plaintext, &digits)?;

    // Tag: the shuffled charset as space-joined decimal code points,
    // followed by the message value in plain decimal. Digits and SPACE
    // only, so the whole thing is one base-11 numeral.
    let mut pieces: Vec<String> = charset.iter().map(|&ch| (ch as u32).to_string()).collect();
    pieces.push(message_value.to_string());
    let packed = pieces.join(" ");

    radix::decode(&packed, &derive_base11_alphabet(key))
}

/// Encrypt a plaintext under a key. The empty string encrypts to itself.
pub fn encrypt(plaintext: &str, key: &Key) -> Result<String> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }

    let tagged = match encode_payload(plaintext, key)? {
        EncodedPayload::Ascii(v) => v * 2,
        EncodedPayload::General(v) => v * 2 + 1,
    };
    radix::encode(&tagged, &key.alphabet())
}

/// Encrypt printable-ASCII plaintext, rejecting anything outside the set.
pub fn encrypt_ascii(plaintext: &str, key: &Key) -> Result<String> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }

    let tagged = ascii_payload(plaintext)? * 2;
    radix::encode(&tagged, &key.alphabet())
}

/// Decrypt a ciphertext under a key. The empty string decrypts to itself.
pub fn decrypt(cipher: &str, key: &Key) -> Result<String> {
    if cipher.is_empty() {
        return Ok(String::new());
    }
    check_ciphertext_charset(cipher)?;

    let tagged = radix::decode(cipher, &key.alphabet())?;
    let two = BigInt::from(2);
    let is_general = &tagged % &two == BigInt::from(1);
    let value = tagged / two;

    if is_general {
        return decode_general(&value, key);
    }
    decode_ascii(&value)
}

/// Decrypt a ciphertext that must carry an ASCII-mode payload.
pub fn decrypt_ascii(cipher: &str, key: &Key) -> Result<String> {
    if cipher.is_empty() {
        return Ok(String::new());
    }
    check_ciphertext_charset(cipher)?;

    let tagged = radix::decode(cipher, &key.alphabet())?;
    let two = BigInt::from(2);
    if &tagged % &two == BigInt::from(1) {
        return Err(Dre94Error::MalformedCiphertext(
            "not an ASCII-mode cipher".into(),
        ));
    }
    decode_ascii(&(tagged / two))
}

/// Render an ASCII-mode payload and strip its sentinel frame.
fn decode_ascii(value: &BigInt) -> Result<String> {
    let rendered = radix::encode(value, &ascii_mode_alphabet())?;
    match rendered.strip_prefix(NULL_CHAR) {
        Some(rest) if !rest.is_empty() && rest.chars().all(is_printable_ascii) => {
            Ok(rest.to_string())
        }
        _ => Err(Dre94Error::MalformedCiphertext(
            "damaged ASCII-mode frame".into(),
        )),
    }
}

fn decode_general(value: &BigInt, key: &Key) -> Result<String> {
    let packed = radix::encode(value, &derive_base11_alphabet(key))?;

    let mut tokens: Vec<&str> = packed.split_whitespace().collect();
    let payload_token = tokens
        .pop()
        .ok_or_else(|| Dre94Error::MalformedCiphertext("no payload after tag".into()))?;
    let message_value = BigInt::from_str(payload_token).map_err(|_| {
        Dre94Error::MalformedCiphertext(format!(
            "payload {:?} is not a decimal integer",
            payload_token
        ))
    })?;

    let mut digits = Vec::with_capacity(tokens.len() + 1);
    digits.push(NULL_CHAR);
    for token in tokens {
        let code: u32 = token.parse().map_err(|_| {
            Dre94Error::MalformedCiphertext(format!("tag entry {:?} is not a code point", token))
        })?;
        let ch = char::from_u32(code).ok_or_else(|| {
            Dre94Error::MalformedCiphertext(format!("tag code point {} out of range", code))
        })?;
        digits.push(ch);
    }

    radix::encode(&message_value, &digits)
}

/// Validate that every ciphertext character is a charmap symbol.
pub fn check_ciphertext_charset(cipher: &str) -> Result<()> {
    for ch in cipher.chars() {
        if !is_key_symbol(ch) {
            return Err(Dre94Error::InvalidCiphertextCharset(ch));
        }
    }
    Ok(())
}

/// Encrypt the contents of a text file.
pub fn encrypt_from_file(path: &Path, key: &Key) -> Result<String> {
    encrypt(&load_plaintext(path)?, key)
}

/// Decrypt the contents of a cipher file.
pub fn decrypt_from_file(path: &Path, key: &Key) -> Result<String> {
    decrypt(&load_ciphertext(path)?, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{generate_key, Seed};
    use proptest::prelude::*;

    fn test_key() -> Key {
        generate_key(&Seed::from(20191018u64))
    }

    #[test]
    fn test_classify_printable_and_general() {
        assert_eq!(classify("plain text\twith\nbreaks"), TextClass::PrintableAscii);
        assert_eq!(classify(""), TextClass::PrintableAscii);
        assert_eq!(classify("héllo"), TextClass::General);
        assert_eq!(classify("a\0b"), TextClass::General);
    }

    #[test]
    fn test_ascii_mode_alphabet_shape() {
        let alphabet = ascii_mode_alphabet();
        assert_eq!(alphabet.len(), 102);
        assert_eq!(alphabet[0], ASCII_PAD);
        assert_eq!(alphabet[1], NULL_CHAR);
    }

    #[test]
    fn test_empty_string_is_identity_both_ways() {
        let key = test_key();
        assert_eq!(encrypt("", &key).unwrap(), "");
        assert_eq!(decrypt("", &key).unwrap(), "");
    }

    #[test]
    fn test_leading_nul_is_rejected_in_general_mode() {
        let key = test_key();
        assert!(matches!(
            encrypt("\0whatever", &key),
            Err(Dre94Error::ForbiddenLeadingSentinel)
        ));
    }

    #[test]
    fn test_encrypt_ascii_rejects_non_printable_input() {
        let key = test_key();
        match encrypt_ascii("héllo", &key) {
            Err(Dre94Error::NonPrintableCharacter(ch)) => assert_eq!(ch, 'é'),
            other => panic!("expected NonPrintableCharacter, got {:?}", other),
        }
    }

    #[test]
    fn test_decrypt_rejects_foreign_cipher_characters() {
        let key = test_key();
        assert!(matches!(
            decrypt("abc def", &key),
            Err(Dre94Error::InvalidCiphertextCharset(' '))
        ));
    }

    #[test]
    fn test_decrypt_survives_wrong_key_garbage() {
        // A wrong key must produce either some output or an error, never a panic
        let key_a = generate_key(&Seed::from(111u64));
        let key_b = generate_key(&Seed::from(222u64));
        for text in ["attack at dawn", "héllo wörld", "aaaa"] {
            let cipher = encrypt(text, &key_a).unwrap();
            let _ = decrypt(&cipher, &key_b);
        }
    }

    #[test]
    fn test_decrypt_ascii_rejects_general_mode_ciphers() {
        let key = test_key();
        let cipher = encrypt("ünïcode", &key).unwrap();
        assert!(matches!(
            decrypt_ascii(&cipher, &key),
            Err(Dre94Error::MalformedCiphertext(_))
        ));
    }

    #[test]
    fn test_ascii_and_general_entry_points_agree() {
        let key = test_key();
        let cipher = encrypt_ascii("plain ascii", &key).unwrap();
        assert_eq!(cipher, encrypt("plain ascii", &key).unwrap());
        assert_eq!(decrypt_ascii(&cipher, &key).unwrap(), "plain ascii");
    }

    proptest! {
        #[test]
        fn prop_general_payload_roundtrips(text in ".{1,40}") {
            prop_assume!(!text.starts_with(NULL_CHAR));
            let key = test_key();
            let value = general_payload(&text, &key).unwrap();
            prop_assert_eq!(decode_general(&value, &key).unwrap(), text);
        }

        #[test]
        fn prop_any_text_roundtrips_through_full_dispatch(text in ".{1,40}") {
            prop_assume!(!text.starts_with(NULL_CHAR));
            let key = test_key();
            let cipher = encrypt(&text, &key).unwrap();
            prop_assert_eq!(decrypt(&cipher, &key).unwrap(), text);
        }

        #[test]
        fn prop_ascii_roundtrip_through_full_dispatch(text in "[ -~\t\n]{1,60}") {
            let key = test_key();
            let cipher = encrypt(&text, &key).unwrap();
            prop_assert!(cipher.chars().all(is_key_symbol));
            prop_assert_eq!(decrypt(&cipher, &key).unwrap(), text);
        }

        #[test]
        fn prop_ciphertext_stays_inside_the_charmap(text in ".{1,30}") {
            prop_assume!(!text.starts_with(NULL_CHAR));
            let key = test_key();
            let cipher = encrypt(&text, &key).unwrap();
            prop_assert!(!cipher.is_empty());
            prop_assert!(cipher.chars().all(is_key_symbol));
        }
    }
}

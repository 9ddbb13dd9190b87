//! DRE.94 - private-key text cipher over a 94-symbol ASCII alphabet.
//!
//! A plaintext (any Unicode string) is reduced to one unbounded-precision
//! integer and transcoded into base 94 using the key itself as the output
//! alphabet. The key is a permutation of ASCII codes 33-126, giving a
//! keyspace of 94! (~1.09e146).
//!
//! ## Transform pipeline
//!
//! ```text
//! Plaintext -> Classify -> [ASCII frame | Alphabet + Tag + Base-11 pack] -> Base-94 -> Ciphertext
//! ```
//!
//! - **Classify**: printable-ASCII text (codes 9-13, 32-126) takes the
//!   compact ASCII path; anything else takes the general tagged path
//! - **ASCII frame**: NUL-sentinel framing over a fixed 102-symbol alphabet
//! - **Alphabet + Tag**: the message's own symbols, keyed-shuffled, carried
//!   as a code-point tag next to the payload
//! - **Base-11 pack**: tag and payload joined into one numeral over a
//!   key-derived 11-symbol alphabet
//! - **Base-94**: final transcoding with the key as the digit alphabet
//!
//! This is not a vetted cipher and makes no security claims; the value is
//! in the arbitrary-radix codec and the deterministic keyed-permutation
//! machinery around it.
//!
//! ## Example
//!
//! ```
//! use dre94::{decrypt, encrypt, generate_key, Seed};
//!
//! let key = generate_key(&Seed::from("correct horse battery staple"));
//! let cipher = encrypt("attack at dawn", &key).unwrap();
//! assert_eq!(decrypt(&cipher, &key).unwrap(), "attack at dawn");
//! ```

pub mod alphabet;
pub mod cipher;
pub mod cli;
pub mod error;
pub mod key;
pub mod keyspace;
pub mod radix;
pub mod source;

pub use cipher::{
    classify, decrypt, decrypt_ascii, decrypt_from_file, encrypt, encrypt_ascii,
    encrypt_from_file, EncodedPayload, TextClass,
};
pub use error::{Dre94Error, Result};
pub use key::{generate_key, Clock, Key, KeyGenerator, Seed, SystemClock};
pub use keyspace::{
    approx_location, brute_force, collision_by_regeneration, collision_by_seed_scan,
    keyspace_size, SearchOutcome, SeedInterval, SeedScanOutcome,
};
pub use source::{load_ciphertext, load_plaintext};

use crate::cipher::{decrypt, decrypt_from_file};
use crate::error::Result;
use crate::key::Key;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for the decrypt command
#[derive(Debug, Clone)]
pub struct DecryptOptions {
    pub key: Key,
    /// Write the recovered plaintext here instead of returning it for stdout
    pub output: Option<PathBuf>,
}

/// Decrypt an inline cipher, or the contents of `input` when none is given.
/// Returns the recovered plaintext.
pub fn run_decrypt(
    cipher: Option<&str>,
    input: Option<&Path>,
    options: &DecryptOptions,
) -> Result<String> {
    let plaintext = match (cipher, input) {
        (Some(cipher), _) => decrypt(cipher, &options.key)?,
        (None, Some(path)) => decrypt_from_file(path, &options.key)?,
        (None, None) => String::new(),
    };

    if let Some(path) = &options.output {
        fs::write(path, &plaintext)?;
    }

    Ok(plaintext)
}

use crate::cipher::{encrypt, encrypt_from_file};
use crate::error::Result;
use crate::key::Key;
use std::fs;
use std::path::{Path, PathBuf};

/// Options for the encrypt command
#[derive(Debug, Clone)]
pub struct EncryptOptions {
    pub key: Key,
    /// Write the ciphertext here instead of returning it for stdout
    pub output: Option<PathBuf>,
}

/// Encrypt inline text, or the contents of `input` when no text is given.
/// Returns the ciphertext.
pub fn run_encrypt(
    text: Option<&str>,
    input: Option<&Path>,
    options: &EncryptOptions,
) -> Result<String> {
    let cipher = match (text, input) {
        (Some(text), _) => encrypt(text, &options.key)?,
        (None, Some(path)) => encrypt_from_file(path, &options.key)?,
        (None, None) => String::new(),
    };

    if let Some(path) = &options.output {
        fs::write(path, &cipher)?;
    }

    Ok(cipher)
}

//! Reading plaintext and ciphertext from disk.
//!
//! Files are read in text mode as whole strings. Read failures (including
//! non-UTF-8 content) surface as an error naming the offending path.

use crate::cipher::check_ciphertext_charset;
use crate::error::{Dre94Error, Result};
use std::fs;
use std::path::Path;

/// Read plaintext from a file.
pub fn load_plaintext(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Dre94Error::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Read ciphertext from a file, ignoring layout whitespace, and check the
/// result against the 94-symbol charset.
pub fn load_ciphertext(path: &Path) -> Result<String> {
    let raw = load_plaintext(path)?;
    let cipher: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '\n' | '\r' | '\t' | ' '))
        .collect();
    check_ciphertext_charset(&cipher)?;
    Ok(cipher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_plaintext_reads_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        fs::write(&path, "line one\nline two\n").unwrap();
        assert_eq!(load_plaintext(&path).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn test_load_plaintext_error_names_the_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match load_plaintext(&path) {
            Err(Dre94Error::FileRead { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected FileRead, got {:?}", other),
        }
    }

    #[test]
    fn test_load_ciphertext_strips_layout_whitespace() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cipher.txt");
        fs::write(&path, "abc\ndef\tghi jkl\r\n").unwrap();
        assert_eq!(load_ciphertext(&path).unwrap(), "abcdefghijkl");
    }

    #[test]
    fn test_load_ciphertext_rejects_foreign_characters() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cipher.txt");
        fs::write(&path, "abcü").unwrap();
        assert!(matches!(
            load_ciphertext(&path),
            Err(Dre94Error::InvalidCiphertextCharset('ü'))
        ));
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Dre94Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read text from file: {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("input for base-10 integer cannot be negative")]
    NegativeValue,

    #[error("empty string is not a valid numeral")]
    EmptyNumeral,

    #[error("character {0:?} is not included in the given digits")]
    SymbolNotInAlphabet(char),

    #[error("invalid key: must be exactly 94 characters, got {0}")]
    InvalidKeyLength(usize),

    #[error("invalid key: {0}")]
    InvalidKeyCharset(String),

    #[error("null character (\\x00) forbidden as leading character in plaintext")]
    ForbiddenLeadingSentinel,

    #[error("plaintext character {0:?} is not printable ASCII (codes 9-13, 32-126)")]
    NonPrintableCharacter(char),

    #[error("invalid ciphertext character {0:?}; all characters must be from ASCII codes 33 to 126")]
    InvalidCiphertextCharset(char),

    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),
}

pub type Result<T> = std::result::Result<T, Dre94Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = Dre94Error::SymbolNotInAlphabet('ü');
        assert!(format!("{}", err).contains('ü'));

        let err = Dre94Error::InvalidKeyLength(93);
        assert!(format!("{}", err).contains("93"));
    }
}

use crate::error::Result;
use crate::key::{generate_key, KeyGenerator, Seed};
use std::fs;
use std::path::PathBuf;

/// Options for the keygen command
#[derive(Debug, Clone, Default)]
pub struct KeygenOptions {
    /// Explicit seed; a fresh time-based seed is used when absent
    pub seed: Option<Seed>,
    /// Write the key here instead of returning it for stdout
    pub output: Option<PathBuf>,
}

/// Generate a key and optionally persist it.
/// Returns the key string.
pub fn run_keygen(options: &KeygenOptions) -> Result<String> {
    let key = match &options.seed {
        Some(seed) => generate_key(seed),
        None => KeyGenerator::new().generate(),
    };

    if let Some(path) = &options.output {
        fs::write(path, key.as_str())?;
    }

    Ok(key.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use tempfile::tempdir;

    #[test]
    fn test_keygen_with_seed_is_deterministic() {
        let options = KeygenOptions {
            seed: Some(Seed::from("fixture seed")),
            output: None,
        };
        let first = run_keygen(&options).unwrap();
        let second = run_keygen(&options).unwrap();
        assert_eq!(first, second);
        assert!(Key::new(first).is_ok());
    }

    #[test]
    fn test_keygen_without_seed_yields_valid_keys() {
        let key = run_keygen(&KeygenOptions::default()).unwrap();
        assert!(Key::new(key).is_ok());
    }

    #[test]
    fn test_keygen_writes_the_output_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("key.txt");
        let options = KeygenOptions {
            seed: Some(Seed::from(99u64)),
            output: Some(path.clone()),
        };
        let key = run_keygen(&options).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), key);
    }
}

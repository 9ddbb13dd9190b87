use clap::{Parser, Subcommand};
use dre94::cli::{
    run_brute_force, run_decrypt, run_encrypt, run_inspect, run_keygen, DecryptOptions,
    EncryptOptions, KeygenOptions,
};
use dre94::{load_plaintext, Key, Seed};
use num_bigint::BigInt;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "dre94")]
#[command(version, about = "DRE.94 private-key text cipher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key, from an explicit seed or a fresh time-based one
    #[command(alias = "g")]
    Keygen {
        /// Text seed for reproducible keys
        #[arg(long, conflicts_with = "seed_int")]
        seed: Option<String>,

        /// Integer seed (decimal, arbitrary precision)
        #[arg(long, allow_hyphen_values = true)]
        seed_int: Option<String>,

        /// Write the key to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Encrypt text or a file
    #[command(alias = "e")]
    Encrypt {
        /// The key string
        #[arg(long, conflicts_with = "key_file", allow_hyphen_values = true)]
        key: Option<String>,

        /// Read the key from this file
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Plaintext argument; omit to read --in-file instead
        text: Option<String>,

        /// Read the plaintext from this file
        #[arg(long)]
        in_file: Option<PathBuf>,

        /// Write the ciphertext to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Decrypt a cipher string or a cipher file
    #[command(alias = "d")]
    Decrypt {
        /// The key string
        #[arg(long, conflicts_with = "key_file", allow_hyphen_values = true)]
        key: Option<String>,

        /// Read the key from this file
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Ciphertext argument; omit to read --in-file instead
        cipher: Option<String>,

        /// Read the ciphertext from this file
        #[arg(long)]
        in_file: Option<PathBuf>,

        /// Write the plaintext to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Report a key's approximate location in the keyspace
    #[command(alias = "i")]
    Inspect {
        /// The key string
        #[arg(long, conflicts_with = "key_file", allow_hyphen_values = true)]
        key: Option<String>,

        /// Read the key from this file
        #[arg(long)]
        key_file: Option<PathBuf>,
    },

    /// Exhaustively search the keyspace for a key
    #[command(name = "brute-force", alias = "b")]
    BruteForce {
        /// The key string
        #[arg(long, conflicts_with = "key_file", allow_hyphen_values = true)]
        key: Option<String>,

        /// Read the key from this file
        #[arg(long)]
        key_file: Option<PathBuf>,

        /// Give up after this many seconds
        #[arg(long)]
        time_limit: Option<u64>,
    },
}

/// Resolve a key given inline or as a file, trimming a trailing newline
/// that editors like to append.
fn load_key(key: Option<String>, key_file: Option<PathBuf>) -> dre94::Result<Key> {
    let raw = match (key, key_file) {
        (Some(key), _) => key,
        (None, Some(path)) => load_plaintext(&path)?
            .trim_end_matches(['\n', '\r'])
            .to_string(),
        (None, None) => String::new(),
    };
    Key::new(raw)
}

fn parse_seed(seed: Option<String>, seed_int: Option<String>) -> Result<Option<Seed>, String> {
    if let Some(text) = seed {
        return Ok(Some(Seed::Text(text)));
    }
    if let Some(decimal) = seed_int {
        return match BigInt::from_str(&decimal) {
            Ok(value) => Ok(Some(Seed::Integer(value))),
            Err(e) => Err(format!("invalid integer seed {:?}: {}", decimal, e)),
        };
    }
    Ok(None)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keygen { seed, seed_int, out } => match parse_seed(seed, seed_int) {
            Ok(seed) => {
                let options = KeygenOptions { seed, output: out };
                run_keygen(&options).map(|key| {
                    if options.output.is_none() {
                        println!("{}", key);
                    }
                })
            }
            Err(msg) => {
                eprintln!("Error: {}", msg);
                return ExitCode::FAILURE;
            }
        },

        Commands::Encrypt {
            key,
            key_file,
            text,
            in_file,
            out,
        } => load_key(key, key_file).and_then(|key| {
            let options = EncryptOptions { key, output: out };
            run_encrypt(text.as_deref(), in_file.as_deref(), &options).map(|cipher| {
                if options.output.is_none() {
                    println!("{}", cipher);
                }
            })
        }),

        Commands::Decrypt {
            key,
            key_file,
            cipher,
            in_file,
            out,
        } => load_key(key, key_file).and_then(|key| {
            let options = DecryptOptions { key, output: out };
            run_decrypt(cipher.as_deref(), in_file.as_deref(), &options).map(|plaintext| {
                if options.output.is_none() {
                    println!("{}", plaintext);
                }
            })
        }),

        Commands::Inspect { key, key_file } => load_key(key, key_file).map(|key| {
            print!("{}", run_inspect(&key));
        }),

        Commands::BruteForce {
            key,
            key_file,
            time_limit,
        } => load_key(key, key_file).map(|key| {
            print!("{}", run_brute_force(&key, time_limit));
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

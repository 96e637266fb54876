//! transcrack core
//!
//! Foundation types shared by every transcrack crate.
//!
//! # Modules
//! - `key` - Numeric transposition keys (`Key`)
//! - `text` - Latin-1 helpers for 8-bit ciphertext

pub mod key;
pub mod text;

pub use key::Key;
pub use text::{contains_ignore_ascii_case, encode_latin1, latin1_to_string};

use thiserror::Error;

/// Shortest key the brute-force search generates.
pub const MIN_KEY_LENGTH: u8 = 2;

/// Longest key expressible with distinct non-zero digits.
pub const MAX_KEY_LENGTH: u8 = 9;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Key '{0}' must consist of decimal digits only")]
    NonNumericKey(String),

    #[error("Key '{0}' must not contain the digit 0")]
    ZeroDigitKey(String),

    #[error("Key '{key}' repeats the digit {digit}")]
    DuplicateDigit { key: String, digit: char },

    #[error("Key length {key_len} exceeds text length {text_len}")]
    KeyTooLong { key_len: usize, text_len: usize },

    #[error("Decoding failed: {0}")]
    DecodeFailure(String),

    #[error("Invalid substitution key: {0}")]
    InvalidSubstitutionKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;

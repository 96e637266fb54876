//! Known-word decryption oracle
//!
//! Decrypts with one candidate key and reports a hit only when the known
//! word shows up in the result (ASCII case-insensitive). Bad keys and decode
//! failures are misses, never errors. A known word with characters outside
//! latin-1 cannot occur in 8-bit text, so it never matches.

use crate::transposition::GridCodec;
use crate::validator::validate;
use crate::{Error, Key};
use transcrack_core::{contains_ignore_ascii_case, encode_latin1};

/// Result of trying one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Match { key: Key, plaintext: Vec<u8> },
    Miss,
    /// Key failed validation, or decoding hit an internal inconsistency
    Rejected(Error),
}

impl Attempt {
    pub fn is_match(&self) -> bool {
        matches!(self, Attempt::Match { .. })
    }
}

pub struct DecryptOracle<'a> {
    ciphertext: &'a [u8],
    /// Lowercased latin-1 bytes; `None` when the word is not latin-1
    known_word: Option<Vec<u8>>,
}

impl<'a> DecryptOracle<'a> {
    pub fn new(ciphertext: &'a [u8], known_word: &str) -> Self {
        Self {
            ciphertext,
            known_word: encode_latin1(known_word).map(|word| word.to_ascii_lowercase()),
        }
    }

    pub fn try_key(&self, key: &str) -> Attempt {
        let parsed = match validate(self.ciphertext, key) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::trace!(key, error = %e, "skipping key");
                return Attempt::Rejected(e);
            }
        };

        let Some(word) = &self.known_word else {
            return Attempt::Miss;
        };

        match GridCodec::decode(self.ciphertext, &parsed) {
            Ok(plaintext) if contains_ignore_ascii_case(&plaintext, word) => {
                Attempt::Match { key: parsed, plaintext }
            }
            Ok(_) => Attempt::Miss,
            Err(e) => {
                tracing::trace!(key, error = %e, "decode failed, treating as miss");
                Attempt::Rejected(e)
            }
        }
    }
}

/// One-shot form: the plaintext when `key` reveals `known_word`.
pub fn try_key(ciphertext: &[u8], known_word: &str, key: &str) -> Option<Vec<u8>> {
    match DecryptOracle::new(ciphertext, known_word).try_key(key) {
        Attempt::Match { plaintext, .. } => Some(plaintext),
        Attempt::Miss | Attempt::Rejected(_) => None,
    }
}

//! transcrack cipher engine
//!
//! Classical transposition and substitution ciphers, plus the pieces of the
//! known-word transposition attack.
//!
//! # Modules
//! - `transposition` - Columnar grid encode/decode (`GridCodec`)
//! - `validator` - Key checks against a concrete text
//! - `oracle` - One-key decrypt + known-word test
//! - `keyspace` - Priority keys, then exhaustive permutations
//! - `cracker` - First-match-wins search over a key space
//! - `substitution` - 256-entry seeded substitution cipher
//! - `analysis` - Byte frequency statistics and reports

pub mod transposition;
pub mod validator;
pub mod oracle;
pub mod keyspace;
pub mod cracker;
pub mod substitution;
pub mod analysis;

pub use transposition::GridCodec;
pub use validator::validate;
pub use oracle::{try_key, Attempt, DecryptOracle};
pub use keyspace::{exhaustive_keys, priority_keys, ExhaustiveKeys, KeySpace};
pub use cracker::{CrackReport, CrackStats, Cracked, Cracker};
pub use substitution::{
    substitution_decrypt, substitution_encrypt, validate_substitution_key, SubstitutionKey,
};
pub use analysis::FrequencyAnalysis;

pub use transcrack_core::{Error, Key, Result};

/// Ciphers available for whole-file encryption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherKind {
    Transposition,
    Substitution,
}

impl CipherKind {
    pub fn name(&self) -> &'static str {
        match self {
            CipherKind::Transposition => "Columnar Transposition",
            CipherKind::Substitution => "Monoalphabetic Substitution",
        }
    }

    /// Accepts full names and the one-letter shorthands `t` / `s`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "t" | "transposition" | "columnar" => Some(CipherKind::Transposition),
            "s" | "substitution" => Some(CipherKind::Substitution),
            _ => None,
        }
    }

    pub fn encrypt(&self, text: &[u8], key: &str) -> Result<Vec<u8>> {
        match self {
            CipherKind::Transposition => {
                let key = validate(text, key)?;
                Ok(GridCodec::encode(text, &key))
            }
            CipherKind::Substitution => substitution_encrypt(text, key),
        }
    }

    pub fn decrypt(&self, text: &[u8], key: &str) -> Result<Vec<u8>> {
        match self {
            CipherKind::Transposition => {
                let key = validate(text, key)?;
                GridCodec::decode(text, &key)
            }
            CipherKind::Substitution => substitution_decrypt(text, key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(CipherKind::from_name("T"), Some(CipherKind::Transposition));
        assert_eq!(CipherKind::from_name(" substitution "), Some(CipherKind::Substitution));
        assert_eq!(CipherKind::from_name("vigenere"), None);
    }

    #[test]
    fn test_kind_roundtrip() {
        for (kind, key) in [(CipherKind::Transposition, "2413"), (CipherKind::Substitution, "qwerty")] {
            let encrypted = kind.encrypt(b"attack at dawn", key).unwrap();
            assert_eq!(kind.decrypt(&encrypted, key).unwrap(), b"attack at dawn");
        }
    }

    #[test]
    fn test_transposition_validates_against_text() {
        assert!(matches!(
            CipherKind::Transposition.encrypt(b"A", "132"),
            Err(Error::KeyTooLong { .. })
        ));
        assert!(matches!(
            CipherKind::Transposition.encrypt(b"test message", "12a3"),
            Err(Error::NonNumericKey(_))
        ));
    }
}

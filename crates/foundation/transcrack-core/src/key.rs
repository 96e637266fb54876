//! Transposition keys
//!
//! A key is a run of distinct digits 1-9. Its length is the number of grid
//! columns and the relative order of its digits is the column read order.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Well-formed transposition key.
///
/// Only [`Key::parse`] builds one, so every `Key` is non-empty, all digits,
/// zero-free and without repeats. Whether it fits a particular text is
/// checked separately by the cipher crate's validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Key {
    digits: Vec<u8>,
}

impl Key {
    /// Parse the intrinsic key rules, in order: digits only, no zero, no repeats.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::NonNumericKey(raw.to_string()));
        }

        if raw.contains('0') {
            return Err(Error::ZeroDigitKey(raw.to_string()));
        }

        let mut seen = [false; 10];
        let mut digits = Vec::with_capacity(raw.len());
        for b in raw.bytes() {
            let d = b - b'0';
            if seen[d as usize] {
                return Err(Error::DuplicateDigit {
                    key: raw.to_string(),
                    digit: b as char,
                });
            }
            seen[d as usize] = true;
            digits.push(d);
        }

        Ok(Self { digits })
    }

    /// Number of grid columns.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Column indices sorted by digit value, ties kept in index order.
    pub fn column_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.digits.len()).collect();
        order.sort_by_key(|&i| self.digits[i]);
        order
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.digits {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for Key {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

//! Candidate key space
//!
//! Search order for one ciphertext: the priority list first, then every
//! permutation of `1..=n` for n = 2, 3, ... max_length, each in lexicographic
//! order. Shorter keys are tried before longer ones, and a key already tried
//! as a priority key is not repeated.

use std::collections::HashSet;
use transcrack_core::{MAX_KEY_LENGTH, MIN_KEY_LENGTH};

/// Memorable numeric keys: digit runs, their reversals, odd/even strides.
pub const COMMON_KEYS: &[&str] = &[
    "123", "1234", "12345", "123456", "1234567", "12345678", "12345689",
    "321", "4321", "54321", "654321", "7654321", "87654321", "987654321",
    "15973", "35791", "97431", "987654", "13579", "8642",
];

/// Common keys followed by the years 1900-1999 that contain no `0`.
pub fn priority_keys() -> Vec<String> {
    let mut keys: Vec<String> = COMMON_KEYS.iter().map(|k| k.to_string()).collect();
    keys.extend(
        (1900..2000)
            .map(|year: u32| year.to_string())
            .filter(|year| !year.contains('0')),
    );
    keys
}

/// Exhaustive keys for lengths `MIN_KEY_LENGTH..=max_length`.
pub fn exhaustive_keys(max_length: u8) -> ExhaustiveKeys {
    ExhaustiveKeys::new(max_length)
}

/// Lazy lexicographic permutations of the digits `1..=n`, n growing from 2.
#[derive(Debug, Clone)]
pub struct ExhaustiveKeys {
    current: Vec<u8>,
    max_length: usize,
    exhausted: bool,
}

impl ExhaustiveKeys {
    pub fn new(max_length: u8) -> Self {
        let max_length = max_length.min(MAX_KEY_LENGTH) as usize;
        let start = MIN_KEY_LENGTH as usize;
        Self {
            current: (1..=start as u8).collect(),
            max_length,
            exhausted: max_length < start,
        }
    }

    /// Total keys this iterator yields from the start.
    pub fn total(max_length: u8) -> u64 {
        let max_length = max_length.min(MAX_KEY_LENGTH) as u64;
        (MIN_KEY_LENGTH as u64..=max_length)
            .map(|n| (1..=n).product::<u64>())
            .sum()
    }

    /// Step `current` to the next permutation; false once it was the last one.
    fn advance(&mut self) -> bool {
        let digits = &mut self.current;
        let Some(pivot) = (1..digits.len()).rev().find(|&i| digits[i - 1] < digits[i]) else {
            return false;
        };
        let pivot = pivot - 1;
        let successor = (pivot + 1..digits.len())
            .rev()
            .find(|&j| digits[j] > digits[pivot])
            .unwrap_or(pivot + 1);
        digits.swap(pivot, successor);
        digits[pivot + 1..].reverse();
        true
    }
}

impl Iterator for ExhaustiveKeys {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let key: String = self.current.iter().map(|&d| (b'0' + d) as char).collect();

        if !self.advance() {
            let next_len = self.current.len() + 1;
            if next_len > self.max_length {
                self.exhausted = true;
            } else {
                self.current = (1..=next_len as u8).collect();
            }
        }

        Some(key)
    }
}

/// Ordered, restartable candidate sequence for one search
#[derive(Debug, Clone)]
pub struct KeySpace {
    priority: Vec<String>,
    max_length: u8,
}

impl KeySpace {
    /// Built-in priority keys, exhaustive search up to `max_length`.
    pub fn new(max_length: u8) -> Self {
        Self::with_priority(priority_keys(), max_length)
    }

    pub fn with_priority(priority: Vec<String>, max_length: u8) -> Self {
        Self { priority, max_length }
    }

    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    pub fn max_length(&self) -> u8 {
        self.max_length
    }

    /// Upper bound on the number of keys `iter()` yields.
    pub fn len_hint(&self) -> u64 {
        self.priority.len() as u64 + ExhaustiveKeys::total(self.max_length)
    }

    pub fn iter(&self) -> KeySpaceIter<'_> {
        KeySpaceIter {
            priority: self.priority.iter(),
            exhaustive: exhaustive_keys(self.max_length),
            seen: HashSet::with_capacity(self.priority.len()),
        }
    }
}

impl<'a> IntoIterator for &'a KeySpace {
    type Item = String;
    type IntoIter = KeySpaceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct KeySpaceIter<'a> {
    priority: std::slice::Iter<'a, String>,
    exhaustive: ExhaustiveKeys,
    seen: HashSet<String>,
}

impl Iterator for KeySpaceIter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        for key in self.priority.by_ref() {
            if self.seen.insert(key.clone()) {
                return Some(key.clone());
            }
        }
        self.exhaustive.by_ref().find(|key| !self.seen.contains(key))
    }
}

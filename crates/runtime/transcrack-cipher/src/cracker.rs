//! Known-word Transposition Cracker
//!
//! Walks a `KeySpace` in order and stops at the first key whose decryption
//! contains the known word. First match wins, even if a later key would
//! produce a "better" plaintext.

use crate::keyspace::KeySpace;
use crate::oracle::{Attempt, DecryptOracle};
use crate::Key;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CrackStats {
    /// Keys handed to the oracle, rejected ones included
    pub candidates_tried: u64,
    /// Keys that failed validation for this ciphertext
    pub rejected: u64,
    pub elapsed: Duration,
}

impl CrackStats {
    /// Candidates per second
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.candidates_tried as f64 / secs
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cracked {
    pub key: Key,
    pub plaintext: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct CrackReport {
    pub found: Option<Cracked>,
    pub stats: CrackStats,
}

pub struct Cracker<'a> {
    keys: &'a KeySpace,
}

impl<'a> Cracker<'a> {
    pub fn new(keys: &'a KeySpace) -> Self {
        Self { keys }
    }

    pub fn crack(&self, ciphertext: &[u8], known_word: &str) -> CrackReport {
        let start = Instant::now();
        let oracle = DecryptOracle::new(ciphertext, known_word);
        let mut stats = CrackStats::default();
        let mut found = None;

        for candidate in self.keys.iter() {
            stats.candidates_tried += 1;
            match oracle.try_key(&candidate) {
                Attempt::Match { key, plaintext } => {
                    found = Some(Cracked { key, plaintext });
                    break;
                }
                Attempt::Miss => {}
                Attempt::Rejected(_) => stats.rejected += 1,
            }
        }

        stats.elapsed = start.elapsed();
        tracing::debug!(
            tried = stats.candidates_tried,
            rejected = stats.rejected,
            found = found.is_some(),
            "key search finished"
        );
        CrackReport { found, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transposition::GridCodec;

    #[test]
    fn test_cracks_known_scenario() {
        let space = KeySpace::new(3);
        let report = Cracker::new(&space).crack(b"tteasmsee sg", "test");

        let cracked = report.found.expect("key should be found");
        assert_eq!(cracked.key.to_string(), "132");
        assert_eq!(cracked.plaintext, b"test message");
        // 101 priority keys, then 12, 21, 132
        assert_eq!(report.stats.candidates_tried, 104);
    }

    #[test]
    fn test_first_match_wins() {
        let ciphertext = GridCodec::encode(b"see the sea", &Key::parse("123").unwrap());
        assert_eq!(ciphertext, b"s eeet aehs");

        // a later exhaustive key also reveals the word...
        let oracle = DecryptOracle::new(&ciphertext, "the");
        assert!(oracle.try_key("231").is_match());
        assert!(oracle.try_key("312").is_match());

        // ...but the priority key comes first
        let space = KeySpace::new(3);
        let report = Cracker::new(&space).crack(&ciphertext, "the");
        let cracked = report.found.unwrap();
        assert_eq!(cracked.key.to_string(), "123");
        assert_eq!(cracked.plaintext, b"see the sea");
        assert_eq!(report.stats.candidates_tried, 1);
    }

    #[test]
    fn test_exhaustion_reports_not_found() {
        let space = KeySpace::new(4);
        let report = Cracker::new(&space).crack(b"zzzz yyyy", "test");
        assert!(report.found.is_none());
        assert_eq!(report.stats.candidates_tried, space.iter().count() as u64);
    }

    #[test]
    fn test_short_ciphertext_rejects_long_keys() {
        let space = KeySpace::new(3);
        let report = Cracker::new(&space).crack(b"ab", "zz");
        assert!(report.found.is_none());
        // only "12" and "21" fit a two byte text
        assert_eq!(report.stats.candidates_tried - report.stats.rejected, 2);
    }

    #[test]
    fn test_rate() {
        let stats = CrackStats {
            candidates_tried: 10,
            rejected: 0,
            elapsed: Duration::from_secs(2),
        };
        assert_eq!(stats.rate(), 5.0);
        assert_eq!(CrackStats::default().rate(), 0.0);
    }
}

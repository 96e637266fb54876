//! Search run data: per-file jobs, their outcomes and the run summary.

use crate::files::file_name_of;
use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use transcrack_core::Key;

/// One ciphertext file, loaded by the worker that owns it
#[derive(Debug, Clone)]
pub struct CipherJob {
    pub file_name: String,
    pub path: PathBuf,
    pub ciphertext: Vec<u8>,
    pub known_word: String,
    pub max_key_length: u8,
}

impl CipherJob {
    pub fn load(path: &Path, known_word: &str, max_key_length: u8) -> Result<Self> {
        let ciphertext = std::fs::read(path).map_err(|source| Error::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            file_name: file_name_of(path),
            path: path.to_path_buf(),
            ciphertext,
            known_word: known_word.to_string(),
            max_key_length,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Found {
        key: Key,
        #[serde(skip)]
        plaintext: Vec<u8>,
    },
    NotFound,
    Unreadable {
        reason: String,
    },
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found { .. })
    }

    pub fn key(&self) -> Option<&Key> {
        match self {
            Outcome::Found { key, .. } => Some(key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub file_name: String,
    pub outcome: Outcome,
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs")]
    pub elapsed: Duration,
    pub keys_tried: u64,
    /// Written `.decrypted` file; `None` when nothing was found or the write failed
    pub artifact: Option<PathBuf>,
}

impl SearchResult {
    /// A key was found but its plaintext never reached disk
    pub fn artifact_missing(&self) -> bool {
        self.outcome.is_found() && self.artifact.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total_files: usize,
    pub succeeded: usize,
    pub unreadable: usize,
    /// Cracked files whose `.decrypted` artifact could not be written
    pub artifact_failures: usize,
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs")]
    pub elapsed: Duration,
    pub output_dir: PathBuf,
    pub log_path: PathBuf,
    /// Per-file results in submission order
    pub results: Vec<SearchResult>,
}

impl RunSummary {
    pub fn new(
        results: Vec<SearchResult>,
        elapsed: Duration,
        output_dir: PathBuf,
        log_path: PathBuf,
    ) -> Self {
        let succeeded = results.iter().filter(|r| r.outcome.is_found()).count();
        let unreadable = results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Unreadable { .. }))
            .count();
        let artifact_failures = results.iter().filter(|r| r.artifact_missing()).count();

        Self {
            total_files: results.len(),
            succeeded,
            unreadable,
            artifact_failures,
            elapsed,
            output_dir,
            log_path,
            results,
        }
    }

    /// Percentage of files cracked; 0 for an empty run
    pub fn success_rate(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.total_files as f64 * 100.0
    }
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn result(name: &str, outcome: Outcome) -> SearchResult {
        SearchResult {
            file_name: name.to_string(),
            outcome,
            elapsed: Duration::from_millis(10),
            keys_tried: 1,
            artifact: None,
        }
    }

    #[test]
    fn test_success_rate() {
        let found = Outcome::Found {
            key: Key::parse("132").unwrap(),
            plaintext: b"x".to_vec(),
        };
        let summary = RunSummary::new(
            vec![
                result("a.txt", found),
                result("b.txt", Outcome::NotFound),
                result("c.txt", Outcome::Unreadable { reason: "gone".into() }),
                result("d.txt", Outcome::NotFound),
            ],
            Duration::from_secs(1),
            PathBuf::from("out"),
            PathBuf::from("out/run.log"),
        );

        assert_eq!(summary.total_files, 4);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.unreadable, 1);
        assert_eq!(summary.artifact_failures, 1);
        assert_eq!(summary.success_rate(), 25.0);
    }

    #[test]
    fn test_artifact_missing_only_for_found() {
        let found = Outcome::Found {
            key: Key::parse("21").unwrap(),
            plaintext: b"x".to_vec(),
        };
        let mut saved = result("a.txt", found.clone());
        saved.artifact = Some(PathBuf::from("out/a.txt.decrypted"));
        assert!(!saved.artifact_missing());
        assert!(result("b.txt", found).artifact_missing());
        assert!(!result("c.txt", Outcome::NotFound).artifact_missing());

        let summary = RunSummary::new(vec![saved], Duration::ZERO, PathBuf::new(), PathBuf::new());
        assert_eq!(summary.artifact_failures, 0);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["results"][0]["artifact"], "out/a.txt.decrypted");
        assert_eq!(json["artifact_failures"], 0);
    }

    #[test]
    fn test_empty_run_rate_is_zero() {
        let summary = RunSummary::new(Vec::new(), Duration::ZERO, PathBuf::new(), PathBuf::new());
        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.success_rate(), 0.0);
    }

    #[test]
    fn test_outcome_json() {
        let found = Outcome::Found {
            key: Key::parse("312").unwrap(),
            plaintext: b"secret".to_vec(),
        };
        let json = serde_json::to_value(result("a.txt", found)).unwrap();
        assert_eq!(json["outcome"]["status"], "found");
        assert_eq!(json["outcome"]["key"], "312");
        assert!(json["outcome"].get("plaintext").is_none());
        assert_eq!(json["elapsed_secs"], 0.01);

        let json = serde_json::to_value(Outcome::NotFound).unwrap();
        assert_eq!(json["status"], "not_found");
    }

    #[test]
    fn test_job_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("msg.txt");
        std::fs::write(&path, b"tteasmsee sg").unwrap();

        let job = CipherJob::load(&path, "test", 3).unwrap();
        assert_eq!(job.file_name, "msg.txt");
        assert_eq!(job.path, path);
        assert_eq!(job.max_key_length, 3);
        assert_eq!(job.ciphertext, b"tteasmsee sg");

        let missing = CipherJob::load(&dir.path().join("gone.txt"), "test", 3);
        assert!(matches!(missing, Err(Error::FileUnreadable { .. })));
    }
}

//! transcrack search
//!
//! Runs the known-word transposition attack over every ciphertext file in a
//! folder on a fixed-size worker pool.
//!
//! ```text
//!   folder ──► discover ──► one job per file ──► rayon pool (N workers)
//!                                                   │
//!                          KeySpace × DecryptOracle ┤ first match wins
//!                                                   ▼
//!                       LogSink (mutex) ◄── outcome line + .decrypted artifact
//!                                                   │
//!                           barrier ──► RunSummary ─┘
//! ```

pub mod files;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod sink;

pub use models::{CipherJob, Outcome, RunSummary, SearchResult};
pub use report::{analyze_folder, AnalysisRun};
pub use scheduler::SearchScheduler;
pub use sink::LogSink;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Folder '{0}' does not exist")]
    FolderNotFound(PathBuf),

    #[error("Known word must not be empty")]
    EmptyKnownWord,

    #[error("Known word '{0}' has characters outside latin-1 and can never match 8-bit text")]
    KnownWordNotLatin1(String),

    #[error("Invalid max_key_length: {0}. It must be between 2 and 9 (since 0 is not allowed in transposition keys)")]
    InvalidKeyLength(u8),

    #[error("Could not read {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Config(#[from] transcrack_config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

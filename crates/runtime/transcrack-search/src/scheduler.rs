//! Search Scheduler
//!
//! Fans a folder of ciphertext files out over a fixed-size rayon pool. Each
//! file is one independent job: load, walk the key space until the first
//! known-word hit, then report through the shared [`LogSink`].

use crate::files::{create_run_dir, discover, file_name_of, run_stamp, write_artifact};
use crate::models::{CipherJob, Outcome, RunSummary, SearchResult};
use crate::sink::LogSink;
use crate::{Error, Result};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use transcrack_cipher::{Cracker, KeySpace};
use transcrack_config::SearchConfig;
use transcrack_core::{encode_latin1, latin1_to_string, MAX_KEY_LENGTH, MIN_KEY_LENGTH};

const RULE: &str = "=======================================";

pub struct SearchScheduler {
    config: SearchConfig,
}

/// What every worker of one run shares
struct RunContext<'a> {
    known_word: &'a str,
    max_key_length: u8,
    keys: &'a KeySpace,
    sink: Arc<LogSink>,
    run_dir: &'a Path,
}

impl SearchScheduler {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Key space for one run, honoring configured priority keys.
    pub fn key_space(&self, max_key_length: u8) -> KeySpace {
        match &self.config.priority_keys {
            Some(keys) => KeySpace::with_priority(keys.clone(), max_key_length),
            None => KeySpace::new(max_key_length),
        }
    }

    /// Crack every matching file in `folder`.
    ///
    /// Argument errors are returned before anything is written. After that a
    /// file that cannot be read or cracked only affects its own outcome.
    pub fn run(&self, folder: &Path, known_word: &str, max_key_length: u8) -> Result<RunSummary> {
        if !folder.is_dir() {
            return Err(Error::FolderNotFound(folder.to_path_buf()));
        }
        if known_word.trim().is_empty() {
            return Err(Error::EmptyKnownWord);
        }
        if encode_latin1(known_word).is_none() {
            return Err(Error::KnownWordNotLatin1(known_word.to_string()));
        }
        if !(MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&max_key_length) {
            return Err(Error::InvalidKeyLength(max_key_length));
        }

        let files = discover(folder, &self.config.extension)?;

        let (run_dir, stamp) = create_run_dir(&self.config.log_root.join("trans"), &run_stamp())?;
        let log_path = run_dir.join(format!("transposition_decryption_{stamp}.log"));
        let sink = Arc::new(LogSink::create(&log_path, self.config.echo)?);

        self.write_header(&sink, &stamp, folder, known_word, max_key_length)?;

        tracing::info!(
            folder = %folder.display(),
            files = files.len(),
            workers = self.config.workers,
            max_key_length,
            "starting search run"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("transcrack-worker-{i}"))
            .build()?;

        let keys = self.key_space(max_key_length);
        let ctx = RunContext {
            known_word,
            max_key_length,
            keys: &keys,
            sink: Arc::clone(&sink),
            run_dir: &run_dir,
        };

        let start = Instant::now();
        let results: Vec<SearchResult> =
            pool.install(|| files.par_iter().map(|path| self.process(path, &ctx)).collect());
        let elapsed = start.elapsed();

        let summary = RunSummary::new(results, elapsed, run_dir.clone(), log_path);
        self.write_summary(&sink, &summary)?;

        tracing::info!(
            total = summary.total_files,
            succeeded = summary.succeeded,
            unreadable = summary.unreadable,
            elapsed_secs = summary.elapsed.as_secs_f64(),
            "search run finished"
        );

        Ok(summary)
    }

    fn write_header(
        &self,
        sink: &LogSink,
        stamp: &str,
        folder: &Path,
        known_word: &str,
        max_key_length: u8,
    ) -> Result<()> {
        let mut guard = sink.lock();
        guard.line("=== Transposition Cipher Brute-Force Log ===")?;
        guard.line(&format!("Timestamp: {stamp}"))?;
        guard.line(&format!("Folder: {}", folder.display()))?;
        guard.line(&format!("Keyword: {known_word}"))?;
        guard.line(&format!("Max Key Length: {max_key_length}"))?;
        guard.line(RULE)?;
        guard.line("")?;
        Ok(())
    }

    fn write_summary(&self, sink: &LogSink, summary: &RunSummary) -> Result<()> {
        let mut guard = sink.lock();
        guard.line("")?;
        guard.line(RULE)?;
        guard.line(&format!(
            "📊 {} files successfully decrypted out of {} ({:.2}%)",
            summary.succeeded,
            summary.total_files,
            summary.success_rate()
        ))?;
        guard.line(&format!(
            "⏱️ Total brute-force time: {:.2} seconds",
            summary.elapsed.as_secs_f64()
        ))?;
        if summary.artifact_failures > 0 {
            guard.line(&format!(
                "❗ {} decrypted files could not be saved",
                summary.artifact_failures
            ))?;
        }
        guard.terminal(&format!("📁 Logs saved to: {}", summary.output_dir.display()));
        if !self.config.show_plaintext {
            guard.terminal("❕ Plaintext output suppressed; see the .decrypted files for results.");
        }
        Ok(())
    }

    /// One job, start to finish. Runs on a pool thread.
    fn process(&self, path: &Path, ctx: &RunContext<'_>) -> SearchResult {
        let file_name = file_name_of(path);
        let start = Instant::now();

        tracing::debug!(
            file = %file_name,
            worker = ?rayon::current_thread_index(),
            "job dispatched"
        );

        let job = match CipherJob::load(path, ctx.known_word, ctx.max_key_length) {
            Ok(job) => job,
            Err(e) => {
                let reason = match &e {
                    Error::FileUnreadable { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                tracing::warn!(file = %file_name, error = %reason, "could not read file");
                let mut result = SearchResult {
                    file_name,
                    outcome: Outcome::Unreadable { reason },
                    elapsed: start.elapsed(),
                    keys_tried: 0,
                    artifact: None,
                };
                self.record(&mut result, ctx);
                return result;
            }
        };

        tracing::debug!(
            path = %job.path.display(),
            bytes = job.ciphertext.len(),
            max_key_length = job.max_key_length,
            "job loaded"
        );

        ctx.sink.lock().terminal(&format!(
            "🔍 Attempting to decrypt: {}. Assigned to 🤖 worker {}",
            job.file_name,
            rayon::current_thread_index().unwrap_or(0)
        ));

        let report = Cracker::new(ctx.keys).crack(&job.ciphertext, &job.known_word);
        let outcome = match report.found {
            Some(cracked) => Outcome::Found {
                key: cracked.key,
                plaintext: cracked.plaintext,
            },
            None => Outcome::NotFound,
        };

        let mut result = SearchResult {
            file_name: job.file_name,
            outcome,
            elapsed: start.elapsed(),
            keys_tried: report.stats.candidates_tried,
            artifact: None,
        };

        tracing::debug!(
            file = %result.file_name,
            found = result.outcome.is_found(),
            keys_tried = result.keys_tried,
            "job completed"
        );

        self.record(&mut result, ctx);
        result
    }

    /// Line, artifact and plaintext echo under a single lock. Sets
    /// `result.artifact` when the plaintext was saved.
    fn record(&self, result: &mut SearchResult, ctx: &RunContext<'_>) {
        let secs = result.elapsed.as_secs_f64();
        let mut guard = ctx.sink.lock();
        let mut artifact_error = None;

        let line = match &result.outcome {
            Outcome::Found { key, plaintext } => {
                match write_artifact(ctx.run_dir, &result.file_name, plaintext) {
                    Ok(path) => result.artifact = Some(path),
                    Err(e) => {
                        tracing::warn!(file = %result.file_name, error = %e, "failed to write artifact");
                        artifact_error = Some(e);
                    }
                }
                if self.config.show_plaintext {
                    guard.terminal(&format!(
                        "🔓 Decrypted text ({}):\n{}",
                        result.file_name,
                        latin1_to_string(plaintext)
                    ));
                }
                format!(
                    "✅ Decryption successful for file: {} (Time: {:.2} seconds) | Key Used: {}",
                    result.file_name, secs, key
                )
            }
            Outcome::NotFound => format!(
                "❌ No key found for file: {} (Time: {:.2} seconds)",
                result.file_name, secs
            ),
            Outcome::Unreadable { reason } => {
                format!("⚠️ Could not read file: {} ({})", result.file_name, reason)
            }
        };

        if let Err(e) = guard.line(&line) {
            tracing::warn!(file = %result.file_name, error = %e, "failed to write log line");
        }
        if let Some(e) = artifact_error {
            let note = format!(
                "❗ Decrypted text not saved for file: {} ({})",
                result.file_name, e
            );
            if let Err(e) = guard.line(&note) {
                tracing::warn!(file = %result.file_name, error = %e, "failed to write log line");
            }
        }
    }
}

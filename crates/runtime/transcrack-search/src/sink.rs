//! Run log shared by all workers.
//!
//! One mutex covers the log file and the terminal mirror. Holding a
//! [`SinkGuard`] keeps a worker's line, artifact write and plaintext echo
//! together, so lines from different files never interleave.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct LogSink {
    path: PathBuf,
    state: Mutex<SinkState>,
}

struct SinkState {
    file: File,
    echo: bool,
}

pub struct SinkGuard<'a> {
    state: MutexGuard<'a, SinkState>,
}

impl LogSink {
    /// Create the log at `path`, which must not exist yet. With `echo`,
    /// every line is also printed to stdout.
    pub fn create(path: &Path, echo: bool) -> io::Result<Self> {
        let file = OpenOptions::new().write(true).create_new(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(SinkState { file, echo }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A worker that panicked mid-write leaves at worst a partial line, so a
    /// poisoned lock is still usable.
    pub fn lock(&self) -> SinkGuard<'_> {
        SinkGuard {
            state: self.state.lock().unwrap_or_else(PoisonError::into_inner),
        }
    }

    pub fn line(&self, text: &str) -> io::Result<()> {
        self.lock().line(text)
    }
}

impl SinkGuard<'_> {
    /// Append one line to the log and mirror it.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        let state = &mut *self.state;
        state.file.write_all(format!("{text}\n").as_bytes())?;
        state.file.flush()?;
        if state.echo {
            println!("{text}");
        }
        Ok(())
    }

    /// Terminal only; nothing reaches the log file.
    pub fn terminal(&mut self, text: &str) {
        if self.state.echo {
            println!("{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    #[test]
    fn test_lines_written_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let sink = LogSink::create(&path, false).unwrap();

        sink.line("first").unwrap();
        {
            let mut guard = sink.lock();
            guard.line("second").unwrap();
            guard.terminal("not logged");
            guard.line("third").unwrap();
        }

        assert_eq!(sink.path(), path);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\nthird\n");
    }

    #[test]
    fn test_existing_log_is_not_truncated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let err = LogSink::create(&path, false).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "earlier run\n");
    }

    #[test]
    fn test_concurrent_lines_stay_whole() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let sink = Arc::new(LogSink::create(&path, false).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for i in 0..50 {
                        sink.line(&format!("thread {t} line {i} {}", "x".repeat(200))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let log = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 400);
        assert!(lines
            .iter()
            .all(|l| l.starts_with("thread ") && l.ends_with(&"x".repeat(200))));
    }

    #[test]
    fn test_poisoned_lock_still_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        let sink = Arc::new(LogSink::create(&path, false).unwrap());

        let poisoner = Arc::clone(&sink);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("worker died holding the sink");
        })
        .join();

        sink.line("after").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "after\n");
    }
}

//! Folder scanning and run-directory helpers shared by the crack and
//! analysis batches.

use crate::{Error, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use transcrack_core::latin1_to_string;

/// Files in `folder` whose extension is `extension`, sorted by name.
///
/// Entries are not opened here. A dangling symlink is still listed so its
/// job can report it as unreadable.
pub fn discover(folder: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(Error::FolderNotFound(folder.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_dir() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// `YYYYmmdd_HHMMSS` in local time
pub fn run_stamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Create a fresh `<parent>/<stamp>` directory. Runs started within the same
/// second get `<stamp>_1`, `<stamp>_2`, ... Returns the directory and the
/// stamp actually used.
pub fn create_run_dir(parent: &Path, stamp: &str) -> io::Result<(PathBuf, String)> {
    fs::create_dir_all(parent)?;
    let mut attempt = 0u32;
    loop {
        let name = if attempt == 0 {
            stamp.to_string()
        } else {
            format!("{stamp}_{attempt}")
        };
        let dir = parent.join(&name);
        match fs::create_dir(&dir) {
            Ok(()) => return Ok((dir, name)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}

pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Write `<dir>/<file_name>.decrypted`, decoding the bytes as latin-1 and
/// storing them as UTF-8.
pub fn write_artifact(dir: &Path, file_name: &str, plaintext: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(format!("{file_name}.decrypted"));
    fs::write(&path, latin1_to_string(plaintext))?;
    Ok(path)
}

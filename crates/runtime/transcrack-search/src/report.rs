//! Frequency reports for a folder of substitution ciphertexts.

use crate::files::{create_run_dir, discover, file_name_of, run_stamp};
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use transcrack_cipher::FrequencyAnalysis;

#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub output_dir: PathBuf,
    /// Written report paths, in file-name order
    pub reports: Vec<PathBuf>,
    /// Files that could not be read, with the reason
    pub skipped: Vec<(String, String)>,
}

/// Write `<log_root>/sub/<stamp>/<file>_report.txt` for every matching file.
pub fn analyze_folder(folder: &Path, log_root: &Path, extension: &str) -> Result<AnalysisRun> {
    let files = discover(folder, extension)?;

    let (output_dir, _) = create_run_dir(&log_root.join("sub"), &run_stamp())?;

    let mut run = AnalysisRun {
        output_dir,
        reports: Vec::new(),
        skipped: Vec::new(),
    };

    if files.is_empty() {
        tracing::info!(folder = %folder.display(), "no files to analyze");
        return Ok(run);
    }

    for path in files {
        let name = file_name_of(&path);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "could not read file");
                run.skipped.push((name, e.to_string()));
                continue;
            }
        };

        let analysis = FrequencyAnalysis::analyze(&bytes);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.clone());
        let report_path = run.output_dir.join(format!("{stem}_report.txt"));
        fs::write(&report_path, analysis.render_report(&name))?;

        tracing::debug!(file = %name, distinct = analysis.distinct(), "report written");
        run.reports.push(report_path);
    }

    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;
    use transcrack_cipher::substitution_encrypt;

    #[test]
    fn test_reports_per_file() {
        let input = TempDir::new().unwrap();
        let logs = TempDir::new().unwrap();
        let cipher = substitution_encrypt(b"meet me at the usual place", "qwerty").unwrap();
        fs::write(input.path().join("one.txt"), &cipher).unwrap();
        fs::write(input.path().join("two.txt"), b"aab").unwrap();
        fs::write(input.path().join("skip.md"), b"ignored").unwrap();

        let run = analyze_folder(input.path(), logs.path(), "txt").unwrap();

        assert!(run.output_dir.starts_with(logs.path().join("sub")));
        assert_eq!(
            run.reports,
            vec![
                run.output_dir.join("one_report.txt"),
                run.output_dir.join("two_report.txt"),
            ]
        );

        let report = fs::read_to_string(&run.reports[1]).unwrap();
        assert!(report.starts_with("Character Frequency Analysis for two.txt"));
        assert!(report.contains("Total Characters: 3"));
        assert!(report.contains("  'a'  |  2  |  66.67%"));
    }

    #[test]
    fn test_empty_folder() {
        let input = TempDir::new().unwrap();
        let logs = TempDir::new().unwrap();

        let run = analyze_folder(input.path(), logs.path(), "txt").unwrap();
        assert!(run.reports.is_empty());
        assert!(run.skipped.is_empty());
    }

    #[test]
    fn test_repeated_runs_get_own_dirs() {
        let input = TempDir::new().unwrap();
        let logs = TempDir::new().unwrap();
        fs::write(input.path().join("one.txt"), b"abc").unwrap();

        let first = analyze_folder(input.path(), logs.path(), "txt").unwrap();
        let second = analyze_folder(input.path(), logs.path(), "txt").unwrap();
        assert_ne!(first.output_dir, second.output_dir);
        assert!(first.reports[0].is_file());
        assert!(second.reports[0].is_file());
    }

    #[test]
    fn test_missing_folder() {
        let logs = TempDir::new().unwrap();
        let result = analyze_folder(&logs.path().join("absent"), logs.path(), "txt");
        assert!(matches!(result, Err(Error::FolderNotFound(_))));
    }
}

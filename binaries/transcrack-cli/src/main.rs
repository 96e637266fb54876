//! transcrack CLI
//!
//! Known-word brute force for columnar transposition ciphertexts, plus file
//! encryption and frequency reports.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use transcrack_cipher::{CipherKind, FrequencyAnalysis};
use transcrack_config::{check_key_length, SearchConfig};
use transcrack_search::{analyze_folder, SearchScheduler};

#[derive(Parser)]
#[command(name = "transcrack")]
#[command(about = "Columnar transposition cracker and classical cipher toolkit")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ~/.config/transcrack/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Brute-force every ciphertext file in a folder
    Crack {
        /// Folder of ciphertext files
        folder: PathBuf,

        /// Word known to appear in every plaintext
        known_word: String,

        /// Longest key length to search exhaustively (2-9)
        max_key_length: Option<u8>,

        /// Do not print decrypted text to the terminal
        #[arg(long)]
        no_show: bool,

        /// Worker threads
        #[arg(short, long)]
        workers: Option<usize>,

        /// Root directory for run logs and artifacts
        #[arg(long)]
        log_root: Option<PathBuf>,

        /// Print the run summary as JSON instead of the log mirror
        #[arg(long)]
        json: bool,
    },

    /// Encrypt a file
    Encrypt {
        /// Cipher: transposition (t) or substitution (s)
        #[arg(short, long, default_value = "transposition")]
        method: String,

        /// Digit key for transposition, any text for substitution
        #[arg(short, long)]
        key: String,

        input: PathBuf,

        /// Output file (default: <input>.enc)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decrypt a file
    Decrypt {
        /// Cipher: transposition (t) or substitution (s)
        #[arg(short, long, default_value = "transposition")]
        method: String,

        /// Digit key for transposition, any text for substitution
        #[arg(short, long)]
        key: String,

        input: PathBuf,

        /// Output file (default: <input>.dec)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write character frequency reports for a folder
    Analyze {
        folder: PathBuf,

        /// Root directory for reports
        #[arg(long)]
        log_root: Option<PathBuf>,

        /// Also print a bar chart of the N most frequent characters per file
        #[arg(long)]
        chart: Option<usize>,
    },

    /// Show the key search order
    Keys {
        /// Longest exhaustive key length
        #[arg(short = 'n', long)]
        max_length: Option<u8>,

        /// Keys to print
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SearchConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Crack {
            folder,
            known_word,
            max_key_length,
            no_show,
            workers,
            log_root,
            json,
        } => cmd_crack(config, folder, known_word, max_key_length, no_show, workers, log_root, json),
        Commands::Encrypt { method, key, input, output } => {
            cmd_transform(Direction::Encrypt, &method, &key, &input, output)
        }
        Commands::Decrypt { method, key, input, output } => {
            cmd_transform(Direction::Decrypt, &method, &key, &input, output)
        }
        Commands::Analyze { folder, log_root, chart } => cmd_analyze(config, folder, log_root, chart),
        Commands::Keys { max_length, limit } => cmd_keys(config, max_length, limit),
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[allow(clippy::too_many_arguments)]
fn cmd_crack(
    mut config: SearchConfig,
    folder: PathBuf,
    known_word: String,
    max_key_length: Option<u8>,
    no_show: bool,
    workers: Option<usize>,
    log_root: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    if let Some(workers) = workers {
        config.workers = workers;
    }
    if let Some(log_root) = log_root {
        config.log_root = log_root;
    }
    if no_show {
        config.show_plaintext = false;
    }
    if json {
        config.echo = false;
        config.show_plaintext = false;
    }
    config.validate()?;

    let max_key_length = max_key_length.unwrap_or(config.max_key_length);
    let scheduler = SearchScheduler::new(config);
    let summary = scheduler.run(&folder, &known_word, max_key_length)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    fn suffix(self) -> &'static str {
        match self {
            Direction::Encrypt => "enc",
            Direction::Decrypt => "dec",
        }
    }
}

fn cmd_transform(
    direction: Direction,
    method: &str,
    key: &str,
    input: &Path,
    output: Option<PathBuf>,
) -> Result<()> {
    let Some(kind) = CipherKind::from_name(method) else {
        anyhow::bail!("Unknown method: {}. Use: transposition (t), substitution (s)", method);
    };

    let data = std::fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let result = match direction {
        Direction::Encrypt => kind.encrypt(&data, key)?,
        Direction::Decrypt => kind.decrypt(&data, key)?,
    };

    let output = output.unwrap_or_else(|| default_output(input, direction));
    std::fs::write(&output, &result).with_context(|| format!("writing {}", output.display()))?;

    println!("\n  {:?} ({})", direction, kind.name());
    println!("  Key:    {}", key);
    println!("  Input:  {} ({} bytes)", input.display(), data.len());
    println!("  Output: {} ({} bytes)", output.display(), result.len());
    Ok(())
}

/// `<input>.enc` / `<input>.dec`
fn default_output(input: &Path, direction: Direction) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(direction.suffix());
    PathBuf::from(name)
}

fn cmd_analyze(
    config: SearchConfig,
    folder: PathBuf,
    log_root: Option<PathBuf>,
    chart: Option<usize>,
) -> Result<()> {
    let log_root = log_root.unwrap_or(config.log_root);
    let run = analyze_folder(&folder, &log_root, &config.extension)?;

    if run.reports.is_empty() && run.skipped.is_empty() {
        println!("No .{} files found in {}", config.extension, folder.display());
        return Ok(());
    }

    for report in &run.reports {
        println!("📄 {}", report.display());
        if let Some(top) = chart {
            let source = report_source(&folder, report, &config.extension);
            match std::fs::read(&source) {
                Ok(bytes) => println!("{}\n", FrequencyAnalysis::analyze(&bytes).render_ascii(top)),
                Err(e) => tracing::warn!(file = %source.display(), error = %e, "chart skipped"),
            }
        }
    }
    for (file, reason) in &run.skipped {
        println!("⚠️ Could not read file: {} ({})", file, reason);
    }
    println!("📁 Reports saved to: {}", run.output_dir.display());
    Ok(())
}

/// `<folder>/<stem>.<ext>` for a `<stem>_report.txt`
fn report_source(folder: &Path, report: &Path, extension: &str) -> PathBuf {
    let stem = report
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.strip_suffix("_report").unwrap_or(&stem);
    folder.join(format!("{stem}.{extension}"))
}

fn cmd_keys(config: SearchConfig, max_length: Option<u8>, limit: usize) -> Result<()> {
    let max_length = max_length.unwrap_or(config.max_key_length);
    check_key_length(max_length)?;

    let scheduler = SearchScheduler::new(config);
    let keys = scheduler.key_space(max_length);

    println!("\n  KEY SEARCH ORDER (max length {})", keys.max_length());
    println!("  Priority keys: {}", keys.priority().len());
    println!("  Upper bound:   {}\n", keys.len_hint());

    for (i, key) in keys.iter().take(limit).enumerate() {
        println!("  {:>6}  {}", i + 1, key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_crack() {
        let cli = Cli::try_parse_from([
            "transcrack", "crack", "cipher_texts", "attack", "7", "--no-show", "-w", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Crack { folder, known_word, max_key_length, no_show, workers, json, .. } => {
                assert_eq!(folder, PathBuf::from("cipher_texts"));
                assert_eq!(known_word, "attack");
                assert_eq!(max_key_length, Some(7));
                assert!(no_show);
                assert_eq!(workers, Some(3));
                assert!(!json);
            }
            _ => panic!("expected crack"),
        }
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("dir/msg.txt"), Direction::Encrypt),
            PathBuf::from("dir/msg.txt.enc")
        );
        assert_eq!(
            default_output(Path::new("msg.txt.enc"), Direction::Decrypt),
            PathBuf::from("msg.txt.enc.dec")
        );
    }

    #[test]
    fn test_report_source() {
        assert_eq!(
            report_source(Path::new("in"), Path::new("logs/sub/x/one_report.txt"), "txt"),
            PathBuf::from("in/one.txt")
        );
    }
}

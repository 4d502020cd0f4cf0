//! # ffind CLI
//!
//! ```bash
//! # Every C source or header under the home directory with "prime" in its name
//! ffind ~ prime -e c,h,cpp
//!
//! # Paths containing "source" anywhere, eight workers
//! ffind / source -f -t 8
//! ```
//!
//! Matches go to stdout, one path per line. The summary and any log output
//! go to stderr.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ffind::{Results, WriterSink};

/// Parallel file name search
#[derive(Parser, Debug)]
#[command(name = "ffind")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to start from
    root: PathBuf,

    /// Case-insensitive substring to look for ("" matches every file)
    needle: String,

    /// Only report files with these extensions (e.g. "c,h,cpp")
    #[arg(short = 'e', value_name = "EXTS")]
    extensions: Option<String>,

    /// Match the needle against the full path, not just the file name
    #[arg(short = 'f')]
    full_path: bool,

    /// Worker threads; 0, negative or unparsable means one per logical CPU
    #[arg(
        short = 't',
        value_name = "N",
        default_value = "0",
        allow_hyphen_values = true,
        value_parser = parse_threads
    )]
    threads: usize,

    /// Skip entries whose path is longer than this many bytes
    #[arg(long = "max-path", value_name = "BYTES")]
    max_path: Option<usize>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    quiet: bool,
}

/// Lenient worker-count parsing: an optional sign and leading digits are
/// read, anything else counts as 0 (use every CPU).
fn parse_threads(s: &str) -> Result<usize, String> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let n = digits[..end].parse::<usize>().unwrap_or(0);
    Ok(if negative { 0 } else { n })
}

fn init_logging(cli: &Cli) {
    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::new(log_level))
        .init();
}

fn print_summary(results: &Results) {
    eprintln!("Found {} match(es)", results.matches);
    eprintln!(
        "Scanned {} dirs, {} files",
        results.stats.dirs, results.stats.files
    );
    eprintln!("Threads: {}", results.stats.threads);
    eprintln!("Time: {:.3} s", results.stats.duration.as_secs_f64());
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let out = Arc::new(WriterSink::new(BufWriter::new(io::stdout())));

    let mut search = ffind::search()
        .root(&cli.root)
        .needle(cli.needle.as_str())
        .extensions(cli.extensions.as_deref().unwrap_or(""))
        .full_path(cli.full_path)
        .threads(cli.threads)
        .sink(Arc::clone(&out));
    if let Some(bytes) = cli.max_path {
        search = search.max_path_len(bytes);
    }

    let results = search
        .run()
        .with_context(|| format!("cannot search {}", cli.root.display()))?;

    if let Err(e) = out.flush() {
        debug!(error = %e, "failed to flush stdout");
    }
    print_summary(&results);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_threads_is_lenient() {
        assert_eq!(parse_threads("8"), Ok(8));
        assert_eq!(parse_threads("+3"), Ok(3));
        assert_eq!(parse_threads("12abc"), Ok(12));
        assert_eq!(parse_threads("abc"), Ok(0));
        assert_eq!(parse_threads("-4"), Ok(0));
        assert_eq!(parse_threads(""), Ok(0));
    }

    #[test]
    fn test_cli_accepts_original_flags() {
        let cli = Cli::try_parse_from(["ffind", "/tmp", "", "-e", "c,h", "-f", "-t", "-1"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("/tmp"));
        assert_eq!(cli.needle, "");
        assert_eq!(cli.extensions.as_deref(), Some("c,h"));
        assert!(cli.full_path);
        assert_eq!(cli.threads, 0);
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        let err = Cli::try_parse_from(["ffind", "/tmp", "x", "-z"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_cli_requires_both_positionals() {
        assert!(Cli::try_parse_from(["ffind", "/tmp"]).is_err());
    }
}

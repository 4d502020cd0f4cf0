use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::FfindError;

/// Counters shared by every worker.
///
/// Each is incremented independently with relaxed ordering. They are only
/// read as a whole after all workers have been joined.
#[derive(Debug, Default)]
pub struct Counters {
    pub dirs:    AtomicU64,
    pub files:   AtomicU64,
    pub matches: AtomicU64,
    pub dropped: AtomicU64,
}

impl Counters {
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn load(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}

/// The output of a completed search.
///
/// `paths` and `errors` are both opt-in and disabled by default to avoid
/// allocation overhead in the common case. Enable them on the builder:
/// `.collect_paths(true)` and `.collect_errors(true)`.
#[derive(Debug)]
pub struct Results {
    /// Total number of files that matched the query.
    pub matches: u64,

    /// Paths of matched files, in the order they were found.
    /// Only populated if `.collect_paths(true)` was set on the builder.
    pub paths: Vec<PathBuf>,

    /// Scan statistics.
    pub stats: ScanStats,

    /// Non-fatal errors encountered during the search (unreadable
    /// directories, skipped entries, dropped subtrees).
    /// Only populated if `.collect_errors(true)` was set on the builder.
    pub errors: Vec<FfindError>,
}

/// Statistics for a completed scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanStats {
    /// Directories popped from the queue, including ones that could not be
    /// listed.
    pub dirs: u64,

    /// Files encountered, matched or not.
    pub files: u64,

    /// Subdirectories discovered but never queued because the queue could
    /// not grow.
    pub dropped: u64,

    /// Worker threads that actually ran.
    pub threads: usize,

    /// Wall-clock time from the first worker launch to the last join.
    pub duration: Duration,
}

impl ScanStats {
    pub(crate) fn compute(counters: &Counters, threads: usize, duration: Duration) -> Self {
        Self {
            dirs:    Counters::load(&counters.dirs),
            files:   Counters::load(&counters.files),
            dropped: Counters::load(&counters.dropped),
            threads,
            duration,
        }
    }
}

impl Results {
    pub(crate) fn assemble(
        counters: &Counters,
        threads: usize,
        duration: Duration,
        paths: Vec<PathBuf>,
        errors: Vec<FfindError>,
    ) -> Self {
        Self {
            matches: Counters::load(&counters.matches),
            paths,
            stats: ScanStats::compute(counters, threads, duration),
            errors,
        }
    }
}

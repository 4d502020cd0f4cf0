use std::path::PathBuf;

use crate::engine::{run, EngineOptions, WalkConfig};
use crate::error::FfindError;
use crate::fs::FsEnumerator;
use crate::matcher::{parse_extensions, SearchQuery};
use crate::results::Results;
use crate::traits::{Enumerator, Matcher, Sink};

// ---------------------------------------------------------------------------
// SearchBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a search.
///
/// Created via [`ffind::search()`](crate::search). Configure with chained
/// builder methods, then call [`run()`](SearchBuilder::run) to execute.
///
/// # Example
///
/// ```rust,ignore
/// let results = ffind::search()
///     .root("/srv/projects")
///     .needle("invoice")
///     .extensions("pdf, txt")
///     .threads(8)
///     .collect_paths(true)
///     .run()?;
/// ```
pub struct SearchBuilder {
    root:           Option<PathBuf>,
    needle:         String,
    extensions:     Vec<String>,
    full_path:      bool,
    matcher:        Option<Box<dyn Matcher>>,
    enumerator:     Option<Box<dyn Enumerator>>,
    sink:           Option<Box<dyn Sink>>,
    threads:        usize,
    max_path_len:   Option<usize>,
    collect_paths:  bool,
    collect_errors: bool,
}

impl Default for SearchBuilder {
    fn default() -> Self {
        Self {
            root:           None,
            needle:         String::new(),
            extensions:     Vec::new(),
            full_path:      false,
            matcher:        None,
            enumerator:     None,
            sink:           None,
            threads:        0,
            max_path_len:   None,
            collect_paths:  false,
            collect_errors: false,
        }
    }
}

impl SearchBuilder {
    // ── Where ─────────────────────────────────────────────────────────────

    /// Directory the walk starts from. Required.
    ///
    /// A root that does not exist or cannot be listed is not an error: it is
    /// counted as one scanned directory and yields no matches.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Replace the filesystem with another [`Enumerator`].
    pub fn enumerator(mut self, e: impl Enumerator + 'static) -> Self {
        self.enumerator = Some(Box::new(e));
        self
    }

    // ── What ──────────────────────────────────────────────────────────────

    /// Case-insensitive substring to look for. Empty (the default) matches
    /// every file.
    pub fn needle(mut self, needle: impl Into<String>) -> Self {
        self.needle = needle.into();
        self
    }

    /// Restrict matches to these extensions, given as a comma and/or space
    /// separated list without dots (`"c,h, cpp"`). Case-insensitive.
    /// Empty allows every extension.
    pub fn extensions(mut self, csv: &str) -> Self {
        self.extensions = parse_extensions(csv);
        self
    }

    /// Like [`extensions`](Self::extensions) but from already split values.
    pub fn extension_list<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = exts.into_iter().map(|e| e.as_ref().to_owned()).collect();
        self
    }

    /// Match the needle against the full path instead of the base name.
    pub fn full_path(mut self, yes: bool) -> Self {
        self.full_path = yes;
        self
    }

    /// Set a custom matcher.
    ///
    /// Replaces the built-in [`SearchQuery`] entirely; `needle`,
    /// `extensions` and `full_path` are then ignored.
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    // ── Output ────────────────────────────────────────────────────────────

    /// Send every match to `sink` as it is found.
    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Collect matched paths into [`Results::paths`].
    ///
    /// Disabled by default to avoid allocation overhead when paths aren't needed.
    pub fn collect_paths(mut self, yes: bool) -> Self {
        self.collect_paths = yes;
        self
    }

    /// Collect non-fatal errors into [`Results::errors`].
    ///
    /// Disabled by default. When enabled, unreadable directories, skipped
    /// entries and dropped subtrees are stored in [`Results::errors`] rather
    /// than silently skipped.
    pub fn collect_errors(mut self, yes: bool) -> Self {
        self.collect_errors = yes;
        self
    }

    // ── Tuning ────────────────────────────────────────────────────────────

    /// Number of worker threads. `0` (the default) uses the logical CPU count.
    pub fn threads(mut self, n: usize) -> Self {
        self.threads = n;
        self
    }

    /// Skip any entry whose joined path is longer than `bytes`.
    /// Unlimited by default.
    pub fn max_path_len(mut self, bytes: usize) -> Self {
        self.max_path_len = Some(bytes);
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Execute the search and return results.
    ///
    /// Blocks until every reachable directory has been scanned. There is no
    /// early exit.
    ///
    /// # Errors
    ///
    /// Returns `Err` for fatal errors only: no root provided, allocation
    /// failure before launch, or no worker thread could be started.
    /// Per-directory problems never fail the run; they are collected into
    /// [`Results::errors`] when `.collect_errors(true)` is set.
    pub fn run(self) -> Result<Results, FfindError> {
        let root = self.root.ok_or(FfindError::MissingRoot)?;

        let matcher: Box<dyn Matcher> = match self.matcher {
            Some(m) => m,
            None    => Box::new(SearchQuery::with_extensions(
                &self.needle,
                self.extensions,
                self.full_path,
            )),
        };

        let opts = EngineOptions {
            root,
            config: WalkConfig {
                threads:      resolve_threads(self.threads),
                max_path_len: self.max_path_len,
            },
            enumerator: self.enumerator.unwrap_or_else(|| Box::new(FsEnumerator)),
            matcher,
            sink: self.sink,
            collect_paths:  self.collect_paths,
            collect_errors: self.collect_errors,
        };

        run(opts)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `0` means one worker per logical CPU.
fn resolve_threads(requested: usize) -> usize {
    if requested > 0 {
        requested
    } else {
        num_cpus()
    }
}

/// Get the logical CPU count, with a safe fallback.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

//! # ffind
//!
//! Parallel directory-tree search by file name.
//!
//! Starting from a root directory, a fixed pool of worker threads pulls
//! directories off a shared queue, lists them, pushes every real
//! subdirectory back and reports each file whose name (or full path)
//! contains a case-insensitive needle, optionally restricted to a set of
//! extensions. Symbolic links and junctions to directories are never
//! followed, so link cycles cannot keep the walk alive.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let results = ffind::search()
//!     .root(".")
//!     .needle("invoice")
//!     .extensions("pdf,txt")
//!     .collect_paths(true)
//!     .run()
//!     .unwrap();
//!
//! for path in &results.paths {
//!     println!("{}", path.display());
//! }
//! eprintln!("Found {} matches in {:.3}s",
//!     results.matches,
//!     results.stats.duration.as_secs_f64()
//! );
//! ```
//!
//! # Custom Enumerators and Sinks
//!
//! Implement [`Enumerator`] to walk something other than the local
//! filesystem, and [`Sink`] to receive matches as they are found:
//!
//! ```rust
//! use std::io;
//! use std::path::Path;
//! use ffind::{CollectSink, Entries, Entry, Enumerator};
//!
//! struct Flat;
//!
//! impl Enumerator for Flat {
//!     fn read_dir<'a>(&'a self, _dir: &Path) -> io::Result<Entries<'a>> {
//!         let names = ["invoice_jan.txt", "invoice_feb.txt", "report.txt"];
//!         Ok(Box::new(names.into_iter().map(|n| io::Result::Ok(Entry::file(n)))))
//!     }
//! }
//!
//! let sink = std::sync::Arc::new(CollectSink::new());
//! let results = ffind::search()
//!     .root("mem")
//!     .enumerator(Flat)
//!     .needle("INVOICE")
//!     .sink(sink.clone())
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(results.matches, 2);
//! assert_eq!(sink.paths().len(), 2);
//! ```

#![forbid(unsafe_code)]

mod builder;
mod engine;
mod entry;
mod error;
mod fs;
mod matcher;
mod queue;
mod results;
mod sink;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::SearchBuilder;
pub use entry::Entry;
pub use error::FfindError;
pub use fs::FsEnumerator;
pub use matcher::{parse_extensions, SearchQuery};
pub use queue::{Claim, PushError, WorkQueue};
pub use results::{Results, ScanStats};
pub use sink::{CollectSink, WriterSink};
pub use traits::{Entries, Enumerator, Matcher, Sink};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`SearchBuilder`] to configure and run a search.
///
/// # Example
///
/// ```rust
/// // A missing root is scanned as one unreadable directory.
/// let results = ffind::search()
///     .root(std::env::temp_dir().join("ffind-no-such-dir-4d1f"))
///     .needle("anything")
///     .threads(2)
///     .run()
///     .unwrap();
///
/// assert_eq!(results.matches, 0);
/// assert_eq!(results.stats.dirs, 1);
/// ```
pub fn search() -> SearchBuilder {
    SearchBuilder::default()
}

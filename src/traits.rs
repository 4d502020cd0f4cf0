use std::io;
use std::path::Path;

use crate::entry::Entry;

/// Lazy sequence of the immediate children of one directory.
pub type Entries<'a> = Box<dyn Iterator<Item = io::Result<Entry>> + 'a>;

/// Lists the immediate children of a directory.
///
/// The engine only consumes this interface. [`FsEnumerator`](crate::FsEnumerator)
/// is the default and reads the real filesystem; tests and embedders can
/// substitute any other tree.
///
/// # Error Handling
///
/// An `Err` from `read_dir` abandons the whole directory. An `Err` yielded by
/// the iterator skips that one item and the walk carries on with its
/// siblings. Neither aborts the search.
///
/// # Thread Safety
///
/// `Send + Sync` are required: one enumerator is shared by every worker.
pub trait Enumerator: Send + Sync {
    /// Open `dir` and return its children. `.` and `..` may be included;
    /// the engine skips them.
    fn read_dir<'a>(&'a self, dir: &Path) -> io::Result<Entries<'a>>;
}

/// Receives matched paths, one call per match.
///
/// Called concurrently from every worker. Implementations are responsible
/// for keeping each emitted path whole (no interleaving between calls).
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use ffind::Sink;
///
/// struct Stderr;
///
/// impl Sink for Stderr {
///     fn matched(&self, path: &Path) {
///         eprintln!("{}", path.display());
///     }
/// }
/// ```
pub trait Sink: Send + Sync {
    fn matched(&self, path: &Path);
}

/// Decides whether a file is reported.
///
/// [`SearchQuery`](crate::SearchQuery) is the built-in implementation;
/// supply another through
/// [`SearchBuilder::with_matcher`](crate::SearchBuilder::with_matcher).
///
/// # Thread Safety
///
/// `Send + Sync` are required: matchers are shared across threads and called
/// concurrently on different entries.
///
/// # Example
///
/// ```rust
/// use std::ffi::OsStr;
/// use std::path::Path;
/// use ffind::Matcher;
///
/// struct Rust;
///
/// impl Matcher for Rust {
///     fn is_match(&self, _path: &Path, name: &OsStr) -> bool {
///         name.to_string_lossy().ends_with(".rs")
///     }
/// }
/// ```
pub trait Matcher: Send + Sync {
    /// Returns `true` if the file at `path` (whose base name is `name`)
    /// should be reported.
    fn is_match(&self, path: &Path, name: &std::ffi::OsStr) -> bool;
}

use std::ffi::OsString;

/// One immediate child of a directory, as produced by an
/// [`Enumerator`](crate::traits::Enumerator).
///
/// Ephemeral: the engine classifies it and drops it straight away. Only the
/// joined path of a subdirectory outlives the classification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The entry's name, without any directory prefix.
    pub name: OsString,

    /// Whether the entry is (or, for a link, points at) a directory.
    pub is_dir: bool,

    /// Whether the entry is a symbolic link, junction or other reparse point.
    /// Linked directories are never descended into.
    pub is_link: bool,
}

impl Entry {
    /// A plain file entry.
    pub fn file(name: impl Into<OsString>) -> Self {
        Self { name: name.into(), is_dir: false, is_link: false }
    }

    /// A real (non-link) directory entry.
    pub fn dir(name: impl Into<OsString>) -> Self {
        Self { name: name.into(), is_dir: true, is_link: false }
    }

    /// A link entry. `is_dir` says whether its target is a directory.
    pub fn link(name: impl Into<OsString>, is_dir: bool) -> Self {
        Self { name: name.into(), is_dir, is_link: true }
    }

    /// `.` and `..` pseudo-entries, which some platforms report.
    pub(crate) fn is_self_or_parent(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

use std::fs;
use std::io;
use std::path::Path;

use crate::entry::Entry;
use crate::traits::{Entries, Enumerator};

/// Lists directories with [`std::fs::read_dir`].
///
/// File types come from the directory listing itself and never follow links.
/// For a link the target is stat-ed once to learn whether it is a directory,
/// so a linked directory is reported as a directory link (skipped by the
/// engine) and a linked file as a file link (matched like any file).
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEnumerator;

impl Enumerator for FsEnumerator {
    fn read_dir<'a>(&'a self, dir: &Path) -> io::Result<Entries<'a>> {
        let iter = fs::read_dir(dir)?.map(|res| -> io::Result<Entry> {
            let entry = res?;
            let ft = entry.file_type()?;
            let name = entry.file_name();

            Ok(if ft.is_symlink() {
                // Dangling links fall through as files.
                let target_is_dir = fs::metadata(entry.path())
                    .map(|m| m.is_dir())
                    .unwrap_or(false);
                Entry::link(name, target_is_dir)
            } else if ft.is_dir() {
                Entry::dir(name)
            } else {
                Entry::file(name)
            })
        });
        Ok(Box::new(iter))
    }
}

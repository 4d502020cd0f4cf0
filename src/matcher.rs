use std::ffi::OsStr;
use std::path::Path;

use crate::traits::Matcher;

// ---------------------------------------------------------------------------
// SearchQuery
// ---------------------------------------------------------------------------

/// The built-in file matcher: an extension allow-list AND a case-insensitive
/// substring test.
///
/// Immutable once built and shared by every worker.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use ffind::{Matcher, SearchQuery};
///
/// let q = SearchQuery::new("rep", "txt, md", false);
/// assert!(q.is_match(Path::new("docs/Report.TXT"), "Report.TXT".as_ref()));
/// assert!(!q.is_match(Path::new("docs/report.text"), "report.text".as_ref()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    needle:     String,
    extensions: Vec<String>,
    full_path:  bool,
}

impl SearchQuery {
    /// Build a query from the raw needle and the raw comma/space separated
    /// extension list. `full_path` matches the needle against the whole
    /// path instead of the base name.
    pub fn new(needle: &str, extensions: &str, full_path: bool) -> Self {
        Self::with_extensions(needle, parse_extensions(extensions), full_path)
    }

    /// Build a query from an already split extension list.
    pub fn with_extensions<I, S>(needle: &str, extensions: I, full_path: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            needle: needle.to_lowercase(),
            extensions: extensions
                .into_iter()
                .filter_map(|e| normalize_extension(e.as_ref()))
                .collect(),
            full_path,
        }
    }

    /// Extension filter. Compares the text after the last `.` of `name`.
    pub fn extension_allowed(&self, name: &str) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        let ext = match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
            _ => return false,
        };
        self.extensions.iter().any(|e| *e == ext)
    }

    /// Substring filter on an arbitrary haystack.
    pub fn contains_needle(&self, haystack: &str) -> bool {
        self.needle.is_empty() || haystack.to_lowercase().contains(&self.needle)
    }
}

impl Matcher for SearchQuery {
    fn is_match(&self, path: &Path, name: &OsStr) -> bool {
        let name = name.to_string_lossy();
        if !self.extension_allowed(&name) {
            return false;
        }
        if self.full_path {
            self.contains_needle(&path.to_string_lossy())
        } else {
            self.contains_needle(&name)
        }
    }
}

// ---------------------------------------------------------------------------
// Extension list parsing
// ---------------------------------------------------------------------------

/// Split a raw `-e` value such as `"c, h,CPP"` into normalized extensions.
pub fn parse_extensions(csv: &str) -> Vec<String> {
    csv.split(|c: char| c == ',' || c.is_whitespace())
        .filter_map(normalize_extension)
        .collect()
}

fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim();
    let ext = ext.strip_prefix('.').unwrap_or(ext);
    (!ext.is_empty()).then(|| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(q: &SearchQuery, path: &str) -> bool {
        let p = Path::new(path);
        q.is_match(p, p.file_name().unwrap())
    }

    #[test]
    fn test_parse_extensions() {
        assert_eq!(parse_extensions("c,h,cpp"), ["c", "h", "cpp"]);
        assert_eq!(parse_extensions(" C , .H,,\tcpp "), ["c", "h", "cpp"]);
        assert_eq!(parse_extensions("rs md"), ["rs", "md"]);
        assert!(parse_extensions("").is_empty());
        assert!(parse_extensions(" , ").is_empty());
    }

    #[test]
    fn test_extension_filter_is_case_insensitive_and_exact() {
        let q = SearchQuery::new("", "txt", false);
        assert!(matches(&q, "dir/a.TXT"));
        assert!(matches(&q, "dir/a.txt"));
        assert!(!matches(&q, "dir/a.text"));
        assert!(!matches(&q, "dir/a.tx"));
    }

    #[test]
    fn test_extension_uses_last_dot() {
        let q = SearchQuery::new("", "gz", false);
        assert!(matches(&q, "x/archive.tar.gz"));
        assert!(!SearchQuery::new("", "tar", false).is_match(
            Path::new("x/archive.tar.gz"),
            OsStr::new("archive.tar.gz"),
        ));
    }

    #[test]
    fn test_no_extension_fails_filter() {
        let q = SearchQuery::new("", "c", false);
        assert!(!matches(&q, "src/Makefile"));
        assert!(!matches(&q, "src/trailing."));
    }

    #[test]
    fn test_dotfile_extension_is_whole_suffix() {
        let q = SearchQuery::new("", "bashrc", false);
        assert!(matches(&q, "home/.bashrc"));
    }

    #[test]
    fn test_empty_extension_list_allows_all() {
        let q = SearchQuery::new("", "", false);
        assert!(matches(&q, "a/Makefile"));
        assert!(matches(&q, "a/b.weird"));
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        let q = SearchQuery::new("", "", false);
        assert!(q.contains_needle(""));
        assert!(q.contains_needle("anything"));
    }

    #[test]
    fn test_needle_is_case_insensitive() {
        let q = SearchQuery::new("InVoice", "", false);
        assert!(matches(&q, "x/INVOICE_jan.txt"));
        assert!(matches(&q, "x/my-invoice"));
        assert!(!matches(&q, "x/report.txt"));
    }

    #[test]
    fn test_basename_mode_ignores_directories() {
        let q = SearchQuery::new("projects", "", false);
        assert!(!matches(&q, "projects/readme.md"));
    }

    #[test]
    fn test_full_path_mode_sees_directories() {
        let q = SearchQuery::new("projects", "", true);
        assert!(matches(&q, "Projects/readme.md"));
    }

    #[test]
    fn test_filters_are_anded() {
        let q = SearchQuery::new("main", "rs", false);
        assert!(matches(&q, "src/main.rs"));
        assert!(!matches(&q, "src/main.c"));
        assert!(!matches(&q, "src/lib.rs"));
    }
}

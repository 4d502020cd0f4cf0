use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use crate::traits::Sink;

/// Writes one matched path per line to `W`.
///
/// Paths are written as their raw OS bytes, so a name that is not valid
/// UTF-8 still comes out exactly as it sits on disk.
///
/// The writer sits behind a mutex so concurrent workers never interleave
/// partial lines. Write failures (a closed pipe, a full disk) are logged and
/// otherwise ignored; the walk still runs to completion.
pub struct WriterSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn flush(&self) -> io::Result<()> {
        self.out.lock().flush()
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn matched(&self, path: &Path) {
        let mut out = self.out.lock();
        let written = out
            .write_all(path.as_os_str().as_encoded_bytes())
            .and_then(|()| out.write_all(b"\n"));
        if let Err(e) = written {
            debug!(path = %path.display(), error = %e, "failed to write match");
        }
    }
}

/// Keeps every matched path in memory.
#[derive(Debug, Default)]
pub struct CollectSink {
    paths: Mutex<Vec<PathBuf>>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the paths collected so far, in arrival order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.paths.lock().clone()
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths.into_inner()
    }
}

impl Sink for CollectSink {
    fn matched(&self, path: &Path) {
        self.paths.lock().push(path.to_path_buf());
    }
}

impl<S: Sink + ?Sized> Sink for std::sync::Arc<S> {
    fn matched(&self, path: &Path) {
        (**self).matched(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_writer_sink_one_line_per_match() {
        let sink = WriterSink::new(Vec::new());
        sink.matched(Path::new("a/b.txt"));
        sink.matched(Path::new("c.rs"));
        sink.flush().unwrap();

        assert_eq!(sink.into_inner(), b"a/b.txt\nc.rs\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_writer_sink_keeps_raw_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let sink = WriterSink::new(Vec::new());
        sink.matched(Path::new(OsStr::from_bytes(b"dir/caf\xe9.txt")));

        assert_eq!(sink.into_inner(), b"dir/caf\xe9.txt\n");
    }

    #[test]
    fn test_writer_sink_lines_never_interleave() {
        let sink = Arc::new(WriterSink::new(Vec::new()));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || {
                    for i in 0..200 {
                        sink.matched(&PathBuf::from(format!("worker{t}/file{i}.txt")));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let sink = Arc::try_unwrap(sink).ok().unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 1600);
        assert!(lines
            .iter()
            .all(|l| l.starts_with("worker") && l.ends_with(".txt")));
    }

    #[test]
    fn test_collect_sink_keeps_arrival_order() {
        let sink = CollectSink::new();
        sink.matched(Path::new("one"));
        sink.matched(Path::new("two"));

        assert_eq!(sink.paths(), [PathBuf::from("one"), PathBuf::from("two")]);
        assert_eq!(sink.into_paths(), [PathBuf::from("one"), PathBuf::from("two")]);
    }
}

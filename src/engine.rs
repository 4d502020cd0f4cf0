use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::entry::Entry;
use crate::error::FfindError;
use crate::queue::WorkQueue;
use crate::results::{Counters, Results};
use crate::traits::{Enumerator, Matcher, Sink};

// ---------------------------------------------------------------------------
// WalkConfig
// ---------------------------------------------------------------------------

/// Traversal parameters passed from the builder to the engine.
pub(crate) struct WalkConfig {
    /// Already resolved: always at least 1.
    pub threads:      usize,
    pub max_path_len: Option<usize>,
}

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub root:           PathBuf,
    pub config:         WalkConfig,
    pub enumerator:     Box<dyn Enumerator>,
    pub matcher:        Box<dyn Matcher>,
    pub sink:           Option<Box<dyn Sink>>,
    pub collect_paths:  bool,
    pub collect_errors: bool,
}

// ---------------------------------------------------------------------------
// Shared worker state
// ---------------------------------------------------------------------------

/// Everything a worker touches, borrowed by all of them for the duration of
/// the scope.
struct Shared<'a> {
    queue:        WorkQueue,
    counters:     Counters,
    enumerator:   &'a dyn Enumerator,
    matcher:      &'a dyn Matcher,
    sink:         Option<&'a dyn Sink>,
    max_path_len: Option<usize>,
    paths:        Option<Mutex<Vec<PathBuf>>>,
    errors:       Option<Mutex<Vec<FfindError>>>,
}

impl Shared<'_> {
    /// List one popped directory: queue its real subdirectories and test
    /// its files.
    fn scan(&self, dir: &Path) {
        Counters::bump(&self.counters.dirs);

        let entries = match self.enumerator.read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "cannot list directory");
                self.record(FfindError::from_io(dir.to_path_buf(), e));
                return;
            }
        };

        for res in entries {
            match res {
                Ok(entry) => self.classify(dir, entry),
                Err(e) => {
                    debug!(dir = %dir.display(), error = %e, "unreadable entry");
                    self.record(FfindError::from_io(dir.to_path_buf(), e));
                }
            }
        }
    }

    fn classify(&self, dir: &Path, entry: Entry) {
        if entry.is_self_or_parent() {
            return;
        }

        let path = dir.join(&entry.name);
        if let Some(limit) = self.max_path_len {
            if path.as_os_str().len() > limit {
                debug!(path = %path.display(), limit, "path too long, skipped");
                self.record(FfindError::PathTooLong { path, limit });
                return;
            }
        }

        if entry.is_dir {
            if entry.is_link {
                trace!(path = %path.display(), "not following link");
                return;
            }
            if let Err(e) = self.queue.push(path) {
                Counters::bump(&self.counters.dropped);
                warn!(dir = %e.dir.display(), "work queue full, subtree dropped");
                self.record(FfindError::QueueFull(e.dir));
            }
        } else {
            Counters::bump(&self.counters.files);
            self.test_file(&path, &entry.name);
        }
    }

    fn test_file(&self, path: &Path, name: &OsStr) {
        if !self.matcher.is_match(path, name) {
            return;
        }
        Counters::bump(&self.counters.matches);

        if let Some(sink) = self.sink {
            sink.matched(path);
        }
        if let Some(paths) = &self.paths {
            paths.lock().push(path.to_path_buf());
        }
    }

    fn record(&self, err: FfindError) {
        if let Some(errors) = &self.errors {
            errors.lock().push(err);
        }
    }
}

fn worker_loop(id: usize, shared: &Shared<'_>) {
    trace!(worker = id, "worker started");
    while let Some(dir) = shared.queue.pop() {
        shared.scan(&dir);
        dir.finish();
    }
    trace!(worker = id, "worker stopped");
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Execute a parallel search rooted at `opts.root`.
///
/// This is the core engine; all parallelism lives here.
/// Called by `SearchBuilder::run()` after validating inputs.
///
/// Seeds the queue with the root, launches up to `threads` workers and
/// waits for all of them. A worker that fails to launch is tolerated as long
/// as at least one runs; if none does the run fails with `WorkerSpawn`.
///
/// The launch-failure branches have no test: `std::thread::Builder` offers
/// no hook to make a spawn fail on demand, and exhausting the process's
/// thread limit from a test would destabilize the whole test binary.
pub(crate) fn run(opts: EngineOptions) -> Result<Results, FfindError> {
    let requested = opts.config.threads;

    let shared = Shared {
        queue:        WorkQueue::new(),
        counters:     Counters::default(),
        enumerator:   opts.enumerator.as_ref(),
        matcher:      opts.matcher.as_ref(),
        sink:         opts.sink.as_deref(),
        max_path_len: opts.config.max_path_len,
        paths:        opts.collect_paths.then(|| Mutex::new(Vec::new())),
        errors:       opts.collect_errors.then(|| Mutex::new(Vec::new())),
    };

    shared
        .queue
        .push(opts.root.clone())
        .map_err(|e| FfindError::StartupAlloc(e.source))?;

    info!(root = %opts.root.display(), threads = requested, "starting search");
    let start = Instant::now();

    let started = thread::scope(|scope| -> Result<usize, FfindError> {
        let mut handles = Vec::new();
        handles.try_reserve_exact(requested)?;

        let shared = &shared;
        for id in 0..requested {
            let spawned = thread::Builder::new()
                .name(format!("ffind-{id}"))
                .spawn_scoped(scope, move || worker_loop(id, shared));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) if handles.is_empty() => return Err(FfindError::WorkerSpawn(e)),
                Err(e) => {
                    warn!(started = handles.len(), requested, error = %e, "could not start all workers");
                    break;
                }
            }
        }

        let started = handles.len();
        for handle in handles {
            if handle.join().is_err() {
                warn!("worker panicked");
            }
        }
        Ok(started)
    })?;

    let duration = start.elapsed();

    let paths  = shared.paths.map(Mutex::into_inner).unwrap_or_default();
    let errors = shared.errors.map(Mutex::into_inner).unwrap_or_default();
    let results = Results::assemble(&shared.counters, started, duration, paths, errors);

    debug!(
        matches = results.matches,
        dirs = results.stats.dirs,
        files = results.stats.files,
        dropped = results.stats.dropped,
        "search finished"
    );
    Ok(results)
}

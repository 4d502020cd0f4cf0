use std::collections::{TryReserveError, VecDeque};
use std::ops::Deref;
use std::path::{Path, PathBuf};

use parking_lot::{Condvar, Mutex};
use thiserror::Error;

/// A directory the queue could not make room for.
#[derive(Error, Debug)]
#[error("work queue could not grow")]
pub struct PushError {
    pub dir: PathBuf,
    #[source]
    pub source: TryReserveError,
}

#[derive(Debug, Default)]
struct State {
    pending: VecDeque<PathBuf>,
    active:  usize,
    stop:    bool,
}

/// Unbounded FIFO of directories still to scan, with termination detection.
///
/// All state lives behind one mutex: the FIFO of pending directories, the
/// number of workers currently holding a popped directory, and the terminal
/// stop flag. A worker that finds the FIFO empty while nobody is active can
/// conclude the walk is over, because only active workers ever push.
#[derive(Debug, Default)]
pub struct WorkQueue {
    state: Mutex<State>,
    ready: Condvar,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `dir` and wake one waiting worker.
    ///
    /// Never blocks. If the queue cannot grow, `dir` is handed back and
    /// nothing is queued; the caller decides how to account for the loss.
    pub fn push(&self, dir: PathBuf) -> Result<(), PushError> {
        let mut state = self.state.lock();
        if let Err(source) = state.pending.try_reserve(1) {
            return Err(PushError { dir, source });
        }
        state.pending.push_back(dir);
        drop(state);
        self.ready.notify_one();
        Ok(())
    }

    /// Take the next directory, blocking while other workers may still
    /// produce more.
    ///
    /// Must only be called by a worker that holds no [`Claim`]. Returns
    /// `None` once the walk is finished: the FIFO is empty and no worker is
    /// active. The first worker to observe that sets the stop flag and
    /// wakes everyone else.
    pub fn pop(&self) -> Option<Claim<'_>> {
        let mut state = self.state.lock();
        loop {
            if state.stop {
                return None;
            }
            if let Some(dir) = state.pending.pop_front() {
                state.active += 1;
                return Some(Claim { queue: self, dir });
            }
            if state.active == 0 {
                state.stop = true;
                drop(state);
                self.ready.notify_all();
                return None;
            }
            self.ready.wait(&mut state);
        }
    }

    fn done(&self) {
        let mut state = self.state.lock();
        debug_assert!(state.active > 0, "done() without a matching pop()");
        state.active -= 1;
        drop(state);
        // Any waiter may now be the one that observes empty-and-idle.
        self.ready.notify_all();
    }

    /// Number of directories waiting to be popped.
    pub fn len(&self) -> usize {
        self.state.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of workers holding a claim.
    pub fn active(&self) -> usize {
        self.state.lock().active
    }

    /// Whether the terminal transition has happened.
    pub fn is_stopped(&self) -> bool {
        self.state.lock().stop
    }
}

// ---------------------------------------------------------------------------
// Claim
// ---------------------------------------------------------------------------

/// Ownership of one popped directory.
///
/// The holder counts as an active worker until the claim is finished or
/// dropped, which is what keeps idle workers waiting instead of stopping
/// while subdirectories may still be pushed.
pub struct Claim<'q> {
    queue: &'q WorkQueue,
    dir:   PathBuf,
}

impl Claim<'_> {
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Mark the directory as fully processed.
    pub fn finish(self) {}
}

impl Deref for Claim<'_> {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.dir
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        self.queue.done();
    }
}

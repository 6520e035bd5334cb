//! Background tasks for fire-and-forget handler tails.
//!
//! A handler that needs data from a remote collaborator does not hold up
//! dispatch: it spawns a task that appends its result to the sink whenever
//! the answer arrives. There is no cancellation — a started task always runs
//! to completion — and output ordering across in-flight tasks is explicitly
//! not guaranteed. The spawner retains join handles so that tests (and an
//! orderly shutdown) can wait for the tail work instead of sleeping.

use std::sync::{Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

/// Spawns and tracks named background tasks.
#[derive(Debug, Default)]
pub struct TaskSpawner {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl TaskSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns a named task. The caller gets nothing back; the task reports
    /// through whatever sink handle it captured.
    pub fn spawn<F>(&self, name: &str, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        debug!(task = name, "spawning background task");
        match thread::Builder::new().name(name.to_string()).spawn(task) {
            Ok(handle) => self.lock().push(handle),
            Err(err) => error!(task = name, %err, "failed to spawn background task"),
        }
    }

    /// Blocks until every task spawned so far has completed.
    pub fn wait_idle(&self) {
        let handles = std::mem::take(&mut *self.lock());
        for handle in handles {
            if handle.join().is_err() {
                error!("background task panicked");
            }
        }
    }

    /// Number of tasks spawned and not yet waited for.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.handles.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_wait_idle_joins_all_spawned_tasks() {
        let spawner = TaskSpawner::new();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..4 {
            let counter = Arc::clone(&counter);
            spawner.spawn("unit", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }

        assert_eq!(spawner.pending(), 4);
        spawner.wait_idle();
        assert_eq!(counter.load(Ordering::SeqCst), 4);
        assert_eq!(spawner.pending(), 0);
    }
}

//! Hand-off of completed work to the main thread.
//!
//! Worker threads never touch game state. They queue a callback through a
//! [`DispatchHandle`]; the main thread runs queued callbacks in FIFO order
//! whenever it calls [`Dispatcher::poll`], typically once per host tick.
//!
//! One mutex guards the queue. Producers hold it for a single push, the
//! consumer only long enough to take the whole batch, so callbacks always run
//! with the lock released and may queue further callbacks themselves.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::error;

use crate::error::panic_message;

/// A unit of deferred main-thread work.
type Callback = Box<dyn FnOnce() + Send + 'static>;

type Queue = Arc<Mutex<VecDeque<Callback>>>;

/// Queue drain owned by the main thread.
///
/// Not `Send`: the thread that creates the dispatcher is the only one that
/// can poll it.
pub struct Dispatcher {
    queue: Queue,
    _main_thread: PhantomData<Rc<()>>,
}

impl Dispatcher {
    /// Create a dispatcher bound to the current thread.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            _main_thread: PhantomData,
        }
    }

    /// A handle worker threads can queue callbacks through.
    #[must_use]
    pub fn handle(&self) -> DispatchHandle {
        DispatchHandle {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Number of callbacks waiting for the next poll.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.queue).len()
    }

    /// Run every callback queued so far, oldest first.
    ///
    /// Callbacks queued while this runs wait for the next poll. A panicking
    /// callback is logged and skipped; the rest of the batch still runs.
    /// Returns the number of callbacks run.
    pub fn poll(&self) -> usize {
        let batch = std::mem::take(&mut *lock(&self.queue));
        let count = batch.len();
        for callback in batch {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(callback)) {
                error!(
                    panic = %panic_message(&*payload),
                    "Dispatched callback panicked"
                );
            }
        }
        count
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Thread-safe enqueue side of a [`Dispatcher`].
#[derive(Clone)]
pub struct DispatchHandle {
    queue: Queue,
}

impl DispatchHandle {
    /// Queue `callback` to run on the main thread at its next poll.
    pub fn dispatch<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        lock(&self.queue).push_back(Box::new(callback));
    }
}

impl std::fmt::Debug for DispatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchHandle").finish_non_exhaustive()
    }
}

/// Callbacks cannot leave the queue half-updated, so a poisoned lock is safe to reuse.
fn lock(queue: &Queue) -> MutexGuard<'_, VecDeque<Callback>> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

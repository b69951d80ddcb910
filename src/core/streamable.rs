//! A single-slot broadcast cell connecting one producer to any number of
//! lagging readers.
//!
//! [`StreamableValue`] decouples the lifetime of a producer task from the
//! lifetime of its consumers: the writer replaces the held value as often
//! as it likes without ever blocking, and each reader observes the most
//! recent value at its own pace. A reader that falls behind skips the
//! intermediate values and catches up on the latest one; a reader that
//! subscribes late starts from the currently held value. Memory stays
//! constant in the number of updates because only the newest value is
//! retained.
//!
//! The cell has a three-state lifecycle: open (`update` may still be
//! called), done, or failed with an [`Error`]. The terminal states are
//! permanent, and writing past them is treated as a bug in the producer,
//! not a recoverable condition.

use crate::error::{Error, Result};
use futures::Stream;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

// ============================================================================
// Section: shared state
// ============================================================================

/// Lifecycle of the cell. `Done` and `Failed` are terminal.
#[derive(Debug)]
enum Status {
    Pending,
    Done,
    Failed(Error),
}

#[derive(Debug)]
struct State<T> {
    /// Most recent value written, if any.
    value: Option<T>,
    /// Bumped on every `update`; readers compare it against their cursor.
    version: u64,
    status: Status,
}

#[derive(Debug)]
struct Shared<T> {
    state: Mutex<State<T>>,
    notify: Notify,
}

impl<T> Shared<T> {
    /// The lock is only poisoned if a value's `Clone` panics mid-read,
    /// which leaves the state itself untouched, so recover the guard.
    fn lock_state(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_closed(&self) -> bool {
        !matches!(self.lock_state().status, Status::Pending)
    }
}

// ============================================================================
// Section: handles
// ============================================================================

/// Read side of the cell. Cloning is cheap and every clone observes the
/// same underlying value; call [`StreamableValue::subscribe`] to start an
/// independent traversal.
#[derive(Debug)]
pub struct StreamableValue<T> {
    shared: Arc<Shared<T>>,
}

/// The unique write side of a [`StreamableValue`].
///
/// There is exactly one writer per cell. Dropping it while the cell is
/// still open marks the cell failed, so readers are never left waiting on
/// a producer that no longer exists.
#[derive(Debug)]
pub struct StreamableWriter<T> {
    shared: Arc<Shared<T>>,
}

/// One traversal over a [`StreamableValue`], holding its own cursor.
#[derive(Debug)]
pub struct StreamableReader<T> {
    shared: Arc<Shared<T>>,
    /// Version of the last value this traversal yielded.
    seen: u64,
    /// Set once the traversal has delivered its terminal outcome.
    finished: bool,
}

impl<T> StreamableValue<T> {
    /// Creates a new cell in the open state, holding no value, and returns
    /// its paired writer and read handle.
    pub fn new() -> (StreamableWriter<T>, StreamableValue<T>) {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                value: None,
                version: 0,
                status: Status::Pending,
            }),
            notify: Notify::new(),
        });
        (
            StreamableWriter {
                shared: Arc::clone(&shared),
            },
            StreamableValue { shared },
        )
    }

    /// Opens a new traversal starting from "no value observed". If the
    /// cell already holds a value the traversal yields it immediately,
    /// then follows subsequent updates live.
    pub fn subscribe(&self) -> StreamableReader<T> {
        StreamableReader {
            shared: Arc::clone(&self.shared),
            seen: 0,
            finished: false,
        }
    }

    /// Returns a copy of the most recent value, if any was written yet.
    pub fn latest(&self) -> Option<T>
    where
        T: Clone,
    {
        self.shared.lock_state().value.clone()
    }

    /// Whether the cell has reached `done` or `failed`.
    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }
}

impl<T> Clone for StreamableValue<T> {
    fn clone(&self) -> Self {
        StreamableValue {
            shared: Arc::clone(&self.shared),
        }
    }
}

// ============================================================================
// Section: writer
// ============================================================================

impl<T> StreamableWriter<T> {
    /// Replaces the held value and wakes every waiting reader.
    ///
    /// `update` never blocks on reader progress; a slow reader simply
    /// skips to the newest value on its next read.
    ///
    /// # Panics
    ///
    /// Panics if the cell was already closed by [`done`](Self::done) or
    /// [`fail`](Self::fail). Writing past a terminal state is a producer
    /// bug and must not be silently dropped.
    pub fn update(&self, value: T) {
        let mut state = self.shared.lock_state();
        if !matches!(state.status, Status::Pending) {
            drop(state);
            panic!("called `update` on a StreamableValue that is already closed");
        }
        state.value = Some(value);
        state.version += 1;
        drop(state);
        self.shared.notify.notify_waiters();
    }

    /// Closes the cell normally. Readers drain any not-yet-seen value and
    /// then terminate cleanly.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already closed.
    pub fn done(&self) {
        self.close(Status::Done, "done");
    }

    /// Closes the cell with an error. Every open traversal receives its
    /// own copy of `error` on its next read.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already closed.
    pub fn fail(&self, error: Error) {
        self.close(Status::Failed(error), "fail");
    }

    /// Whether the cell has reached `done` or `failed`.
    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    fn close(&self, status: Status, op: &str) {
        let mut state = self.shared.lock_state();
        if !matches!(state.status, Status::Pending) {
            drop(state);
            panic!("called `{op}` on a StreamableValue that is already closed");
        }
        state.status = status;
        drop(state);
        self.shared.notify.notify_waiters();
    }
}

impl<T> Drop for StreamableWriter<T> {
    fn drop(&mut self) {
        let mut state = self.shared.lock_state();
        if matches!(state.status, Status::Pending) {
            state.status = Status::Failed(Error::StreamAborted(
                "writer dropped before reaching a terminal state".to_string(),
            ));
            drop(state);
            self.shared.notify.notify_waiters();
        }
    }
}

// ============================================================================
// Section: reader
// ============================================================================

impl<T: Clone> StreamableReader<T> {
    /// Waits for the next value this traversal has not seen yet.
    ///
    /// Returns `Some(Ok(value))` for each newer value (intermediate values
    /// may be coalesced, order is never violated), `Some(Err(error))`
    /// exactly once if the cell failed, and `None` once the traversal is
    /// over. Dropping the reader mid-traversal is allowed and invisible to
    /// the writer.
    pub async fn recv(&mut self) -> Option<Result<T>> {
        if self.finished {
            return None;
        }
        loop {
            let notified = self.shared.notify.notified();
            tokio::pin!(notified);
            // Register as a waiter before inspecting state so a write
            // landing between the check and the await still wakes us.
            notified.as_mut().enable();

            {
                let state = self.shared.lock_state();
                if state.version > self.seen
                    && let Some(value) = &state.value
                {
                    self.seen = state.version;
                    return Some(Ok(value.clone()));
                }
                match &state.status {
                    Status::Pending => {}
                    Status::Done => {
                        self.finished = true;
                        return None;
                    }
                    Status::Failed(error) => {
                        self.finished = true;
                        return Some(Err(error.clone()));
                    }
                }
            }

            notified.await;
        }
    }

    /// Adapts the traversal into a [`futures::Stream`].
    pub fn into_stream(self) -> Pin<Box<dyn Stream<Item = Result<T>> + Send>>
    where
        T: Send + 'static,
    {
        Box::pin(futures::stream::unfold(self, |mut reader| async move {
            reader.recv().await.map(|item| (item, reader))
        }))
    }
}

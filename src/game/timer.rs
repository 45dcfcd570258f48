//! Runs display-delay continuations on the tokio runtime.
//!
//! Sessions hand back a [`Continuation`]; `DisplayTimer` sleeps for its delay
//! and then resumes the session. Every spawned task can be cancelled, and the
//! session itself drops any ticket it no longer expects, so a task that slips
//! through after a restart does nothing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::game::{Continuation, Resumable, Ticket};

#[derive(Default)]
pub struct DisplayTimer {
    tasks: HashMap<Ticket, JoinHandle<()>>,
}

impl DisplayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes `session` with the continuation's ticket once its delay has passed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<S>(&mut self, session: Arc<Mutex<S>>, continuation: Continuation)
    where
        S: Resumable + Send + 'static,
    {
        self.tasks.retain(|_, task| !task.is_finished());

        let Continuation { ticket, delay } = continuation;
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut session = match session.lock() {
                Ok(guard) => guard,
                Err(_) => {
                    log::warn!("session lock poisoned, dropping continuation {:?}", ticket);
                    return;
                }
            };
            match session.resume(ticket) {
                Ok(true) => log::debug!("continuation {:?} applied", ticket),
                Ok(false) => log::debug!("continuation {:?} was stale", ticket),
                Err(err) => log::warn!("continuation {:?} failed: {}", ticket, err),
            }
        });

        if let Some(previous) = self.tasks.insert(ticket, task) {
            previous.abort();
        }
    }

    /// Cancels one pending continuation. Returns `false` if it was unknown or already done.
    pub fn cancel(&mut self, ticket: Ticket) -> bool {
        match self.tasks.remove(&ticket) {
            Some(task) if !task.is_finished() => {
                task.abort();
                true
            }
            _ => false,
        }
    }

    /// Cancels everything, e.g. when the shell switches game or tier.
    pub fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }

    pub fn pending(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }
}

impl Drop for DisplayTimer {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

//! In-process snapshot bus with a bounded backlog per subscriber.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};

use thiserror::Error;

use crate::bus::{Backlog, EventBus, Subscription};

/// Snapshots kept per subscriber unless configured otherwise.
pub const DEFAULT_BACKLOG: usize = 16;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    #[error("subscriber list lock poisoned")]
    Poisoned,
}

/// In-memory snapshot fan-out.
///
/// The bus only holds weak handles to subscriber backlogs: dropping a
/// `Subscription` detaches it, and it is pruned on the next publish. A full
/// backlog evicts its oldest snapshot to make room.
#[derive(Debug)]
pub struct InMemoryEventBus<M> {
    subscribers: Mutex<Vec<Weak<Mutex<VecDeque<M>>>>>,
    backlog: usize,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::with_backlog(DEFAULT_BACKLOG)
    }

    /// Keep at most `backlog` unread snapshots per subscriber (at least one).
    pub fn with_backlog(backlog: usize) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            backlog: backlog.max(1),
        }
    }

    /// Number of subscribers still attached as of the last publish.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().map(|subs| subs.len()).unwrap_or(0)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        let mut subs = self.subscribers.lock().map_err(|_| InMemoryBusError::Poisoned)?;

        subs.retain(|weak| {
            let Some(backlog) = weak.upgrade() else {
                return false;
            };
            // A poisoned backlog belongs to a subscriber that panicked mid-read.
            let Ok(mut queue) = backlog.lock() else {
                return false;
            };
            if queue.len() >= self.backlog {
                queue.pop_front();
            }
            queue.push_back(message.clone());
            true
        });

        Ok(())
    }

    fn subscribe(&self) -> Subscription<M> {
        let backlog: Backlog<M> = Arc::new(Mutex::new(VecDeque::new()));

        // A poisoned lock still yields a subscription; it just never receives.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(Arc::downgrade(&backlog));
        }

        Subscription::new(backlog)
    }
}

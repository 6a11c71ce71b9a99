//! Publish/subscribe abstraction for view snapshots.
//!
//! The view controller publishes one snapshot per recomputation; renderers
//! subscribe and redraw from the newest one. The bus does not replay: a
//! subscriber only sees what is published after it subscribed.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Snapshots waiting for one subscriber, oldest first.
pub(crate) type Backlog<M> = Arc<Mutex<VecDeque<M>>>;

/// A subscription to published snapshots.
///
/// Each subscription holds its own bounded backlog. When a renderer falls
/// behind, the oldest snapshots are dropped first, so the newest one is
/// always available.
///
/// ```ignore
/// let updates = controller.subscribe();
/// // ... user changes a filter ...
/// if let Some(view) = updates.latest() {
///     render(&view);
/// }
/// ```
#[derive(Debug)]
pub struct Subscription<M> {
    backlog: Backlog<M>,
}

impl<M> Subscription<M> {
    pub(crate) fn new(backlog: Backlog<M>) -> Self {
        Self { backlog }
    }

    /// Take every queued snapshot, oldest first.
    pub fn drain(&self) -> Vec<M> {
        self.backlog
            .lock()
            .map(|mut queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// The newest queued snapshot; older ones are discarded.
    pub fn latest(&self) -> Option<M> {
        let mut queue = self.backlog.lock().ok()?;
        let newest = queue.pop_back();
        queue.clear();
        newest
    }

    /// Number of snapshots waiting.
    pub fn pending(&self) -> usize {
        self.backlog.lock().map(|queue| queue.len()).unwrap_or(0)
    }
}

/// Transport-agnostic pub/sub bus.
///
/// Broadcast semantics: every live subscriber gets every published message,
/// subject to its backlog bound. `publish` fails only when the implementation
/// itself is broken (e.g. a poisoned lock); a subscriber that went away is
/// silently dropped.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

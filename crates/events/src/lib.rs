//! View update distribution.
//!
//! A small pub/sub layer: the view controller publishes snapshots, renderers
//! subscribe to them.

pub mod bus;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use in_memory_bus::{DEFAULT_BACKLOG, InMemoryBusError, InMemoryEventBus};

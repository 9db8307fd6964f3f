//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to runtime events emitted by the promotion service,
//! transition actors and subscriber workers.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Promotions` (create/shutdown), `TransitionActor`,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: `Promotions::subscriber_listener()` (fans out to `SubscriberSet`)
//!   and any receiver obtained from `Promotions::subscribe()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};

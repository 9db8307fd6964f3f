//! # Event subscribers for the promovisor runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`SubscriberSet`] fan-out
//! and the built-in [`LogWriter`] for handling runtime events broadcast
//! through the [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! TransitionActor ── publish(Event) ──► Bus ──► subscriber_listener ──► SubscriberSet::emit
//!                                                                     ┌──────┴──────┐
//!                                                                     ▼             ▼
//!                                                                 LogWriter      Custom
//! ```

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscriber;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::{Subscribe, DEFAULT_QUEUE_CAPACITY};

//! # Banner event consumers.
//!
//! A [`Subscribe`] implementation receives every [`Event`] the service
//! publishes, delivered by the [`SubscriberSet`](super::SubscriberSet) worker
//! that owns it.
//!
//! ## What a subscriber sees for one banner
//! ```text
//! BannerCreated(status)                       once, from create()
//!   ├─ Expired at creation → nothing else
//!   └─ TransitionArmed(status, wait)          next deadline registered
//!        StatusChanged(Active)                start reached
//!        TransitionArmed(Active, wait)        end registered
//!        StatusChanged(Expired)               end reached
//!        BannerEvicted                        name freed
//! BannerRejected(reason)                      instead of all of the above
//! ```
//! A banner created inside its window skips the first `StatusChanged`.
//! Events of one banner arrive in this order; events of different banners
//! interleave freely. Shutdown adds `ShutdownRequested` followed by
//! `AllStoppedWithin` or `GraceExceeded`.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use promovisor::{Event, EventKind, Subscribe};
//!
//! struct Evictions;
//!
//! #[async_trait]
//! impl Subscribe for Evictions {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::BannerEvicted {
//!             println!("{} is gone", ev.banner.as_deref().unwrap_or("?"));
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "evictions"
//!     }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Queue length used when a subscriber does not pick its own.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Consumer of banner lifecycle and runtime events.
///
/// `on_event` runs on the subscriber's own worker, one event at a time. A
/// slow subscriber fills only its own queue; events that do not fit are
/// dropped for it and reported as `SubscriberOverflow`. A panic is caught and
/// reported as `SubscriberPanicked`; the worker keeps going.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event.
    async fn on_event(&self, event: &Event);

    /// Short stable name, reported in overflow and panic events.
    fn name(&self) -> &'static str;

    /// Bound of this subscriber's queue (values below 1 are raised to 1).
    fn queue_capacity(&self) -> usize {
        DEFAULT_QUEUE_CAPACITY
    }
}

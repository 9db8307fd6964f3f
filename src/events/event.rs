//! # Runtime events emitted by the promotion service and transition actors.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Banner events**: creation, rejection, armed deadlines, status changes, eviction
//! - **Shutdown events**: shutdown request and its outcome
//! - **Subscriber events**: overflow and panics inside subscriber workers
//!
//! The [`Event`] struct carries additional metadata such as the banner name,
//! the reached status, and the armed delay.
//!
//! ## Ordering guarantees
//! [`Bus`](crate::events::Bus) stamps every published event with a sequence
//! number (`seq`) that increases monotonically per service instance.
//!
//! ## Example
//! ```rust
//! use chrono::Utc;
//! use promovisor::{Event, EventKind, Status};
//!
//! let ev = Event::new(EventKind::StatusChanged, Utc::now())
//!     .with_banner("Banner1")
//!     .with_status(Status::Active);
//!
//! assert_eq!(ev.kind, EventKind::StatusChanged);
//! assert_eq!(ev.banner.as_deref(), Some("Banner1"));
//! assert_eq!(ev.status, Some(Status::Active));
//! ```

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::banners::Status;

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Banner events ===
    /// Banner created.
    ///
    /// Sets:
    /// - `banner`: banner name
    /// - `status`: initial status (`Expired` banners are created but never registered)
    BannerCreated,

    /// Banner creation rejected.
    ///
    /// Sets:
    /// - `banner`: requested name
    /// - `reason`: error label
    BannerRejected,

    /// Transition actor is waiting for the next deadline.
    ///
    /// Sets:
    /// - `banner`: banner name
    /// - `status`: status the banner is waiting in
    /// - `delay`: wait computed at arm time (never negative)
    TransitionArmed,

    /// Banner moved to a new status.
    ///
    /// Sets:
    /// - `banner`: banner name
    /// - `status`: new status
    StatusChanged,

    /// Expired banner removed from the registry.
    ///
    /// Sets:
    /// - `banner`: banner name
    BannerEvicted,

    // === Shutdown events ===
    /// Shutdown requested; pending transitions are being cancelled.
    ShutdownRequested,

    /// All transition actors stopped within the grace period.
    AllStoppedWithin,

    /// Grace period exceeded; some transition actors did not stop in time.
    GraceExceeded,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `banner`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `banner`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: per-service monotonic sequence, assigned on publish
/// - `at`: instant read from the service clock
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Monotonically increasing sequence number (0 until published).
    pub seq: u64,
    /// Clock instant the event was produced at.
    pub at: DateTime<Utc>,
    /// Event classification.
    pub kind: EventKind,
    /// Banner (or subscriber) name, if applicable.
    pub banner: Option<Arc<str>>,
    /// Banner status, if applicable.
    pub status: Option<Status>,
    /// Armed wait, if applicable.
    pub delay: Option<Duration>,
    /// Human-readable reason (errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind produced at `at`.
    pub fn new(kind: EventKind, at: DateTime<Utc>) -> Self {
        Self {
            seq: 0,
            at,
            kind,
            banner: None,
            status: None,
            delay: None,
            reason: None,
        }
    }

    /// Attaches a banner name.
    #[inline]
    pub fn with_banner(mut self, banner: impl Into<Arc<str>>) -> Self {
        self.banner = Some(banner.into());
        self
    }

    /// Attaches a status.
    #[inline]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches an armed delay.
    #[inline]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str, at: DateTime<Utc>) -> Self {
        Event::new(EventKind::SubscriberOverflow, at)
            .with_banner(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String, at: DateTime<Utc>) -> Self {
        Event::new(EventKind::SubscriberPanicked, at)
            .with_banner(subscriber)
            .with_reason(info)
    }

    /// True if this event reports a subscriber queue overflow.
    ///
    /// Overflow events are never re-reported when they overflow themselves.
    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }
}

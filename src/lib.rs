//! # promovisor
//!
//! **Promovisor** manages time-bounded promotional banners.
//!
//! Each banner is displayable only inside its window `[start, end)`. Status
//! changes are driven by per-banner deadline tasks rather than polling, and at
//! query time the service picks the single best banner eligible for a client.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   create(name, start, end)                         choose(client)
//!            │                                             │
//!            ▼                                             ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Promotions (service instance)                                    │
//! │  - Clock (SystemClock / MockClock)                                │
//! │  - Registry (live banners by name)                                │
//! │  - Scheduler (one TransitionActor per pending deadline)           │
//! │  - Selector (EarliestEnd by default)                              │
//! │  - Bus + SubscriberSet (events fan-out)                           │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!  │TransitionAct.│   │TransitionAct.│   │TransitionAct.│
//!  │  (Banner1)   │   │  (Banner2)   │   │  (Banner3)   │
//!  └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!         │ StatusChanged / TransitionArmed / BannerEvicted
//!         ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                             SubscriberSet ──► LogWriter / custom
//! ```
//!
//! ### Lifecycle
//! ```text
//! create ──► Inactive ──(start)──► Active ──(end)──► Expired ──► evicted from Registry
//!    │                                                  ▲
//!    └──────────── window already closed ───────────────┘ (never registered)
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                     |
//! |-------------------|----------------------------------------------------------|----------------------------------------|
//! | **Banners**       | Time-windowed entity with atomic lifecycle status.       | [`Banner`], [`BannerRef`], [`Status`]  |
//! | **Service**       | Creation, selection, graceful shutdown.                  | [`Promotions`], [`PromotionsBuilder`]  |
//! | **Policies**      | QA visibility and pluggable selection.                   | [`DisplayPolicy`], [`Selector`]        |
//! | **Time**          | Real and manually advanced clocks.                       | [`Clock`], [`SystemClock`], [`MockClock`] |
//! | **Events**        | Lifecycle events and subscriber fan-out.                 | [`Event`], [`Subscribe`]               |
//! | **Errors**        | Typed creation and runtime errors.                       | [`BannerError`], [`RuntimeError`]      |
//!
//! ## Optional features
//! - `logging` (default): exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use chrono::{Duration, TimeZone, Utc};
//! use promovisor::{Clock, Config, MockClock, Promotions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clock = Arc::new(MockClock::at(Utc.with_ymd_and_hms(2019, 4, 5, 12, 45, 0).unwrap()));
//!     let promos = Promotions::builder(Config::default())
//!         .with_clock(clock.clone())
//!         .build();
//!
//!     let at = |h, m| Utc.with_ymd_and_hms(2019, 4, 5, h, m, 0).unwrap();
//!     promos.create("Banner1", at(13, 0), at(17, 0))?;
//!     promos.create("Banner2", at(14, 0), at(16, 0))?;
//!
//!     assert!(promos.choose("192.168.0.1").is_none());
//!     // QA clients preview banners before they go live.
//!     assert!(promos.choose("10.0.0.1").is_some());
//!
//!     clock.advance(Duration::minutes(90)).await; // 14:15
//!     assert_eq!(promos.choose("192.168.0.1").unwrap().name(), "Banner2");
//!     assert_eq!(clock.now(), at(14, 15));
//!     Ok(())
//! }
//! ```
mod banners;
mod clock;
mod core;
mod error;
mod events;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use banners::{Banner, BannerRef, Status};
pub use clock::{Clock, MockClock, Sleep, SystemClock};
pub use crate::core::{Config, Promotions, PromotionsBuilder, Registry};
pub use error::{BannerError, RuntimeError};
pub use events::{Bus, Event, EventKind};
pub use policies::{DisplayPolicy, EarliestEnd, Selector, DEFAULT_QA_CLIENTS};
pub use subscribers::{Subscribe, SubscriberSet, DEFAULT_QUEUE_CAPACITY};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;

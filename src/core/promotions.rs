//! # Promotions: owns the live banner set, schedules transitions, selects banners.
//!
//! The [`Promotions`] service owns the registry, the transition scheduler, the
//! event bus and the selection policy. Each instance is independent; there is
//! no process-wide banner state.
//!
//! ## Key responsibilities
//! - create banners: initial status from `clock.now()`, register, arm the next deadline
//! - choose the banner to display for a client (read-only scan)
//! - fan events out to subscribers
//! - stop all transition actors on shutdown (bounded by [`Config::grace`])
//!
//! ## High-level architecture
//! ```text
//! create(name, start, end):
//!   now = clock.now()
//!   banner = Banner::new(.., now)            (status from now vs [start, end))
//!     ├─ name taken          → BannerRejected, Err(DuplicateName)   (no side effects)
//!     ├─ Expired             → BannerCreated, Ok(banner)             (never registered)
//!     └─ Inactive / Active   → registry.insert ─► BannerCreated ─► scheduler.arm(banner)
//!
//! choose(client):
//!   selector.select(registry.snapshot(), client)
//!
//! Shutdown path:
//!   shutdown()
//!     └─► Bus.publish(ShutdownRequested)
//!     └─► runtime_token.cancel()      → every TransitionActor exits
//!     └─► scheduler.wait() within cfg.grace:
//!            ├─ Ok       → Bus.publish(AllStoppedWithin)
//!            └─ Timeout  → Bus.publish(GraceExceeded), Err(RuntimeError::GraceExceeded)
//! ```
//!
//! ## Example
//! ```rust
//! use chrono::{Duration, Utc};
//! use promovisor::{Config, Promotions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let promos = Promotions::builder(Config::default()).build();
//!
//!     let now = Utc::now();
//!     let banner = promos.create("spring-sale", now - Duration::minutes(5), now + Duration::hours(2))?;
//!     assert_eq!(banner.status().as_str(), "Active");
//!
//!     let chosen = promos.choose("192.168.0.1").expect("active banner");
//!     assert_eq!(chosen.name(), "spring-sale");
//!
//!     promos.shutdown().await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use super::{
    builder::PromotionsBuilder, config::Config, registry::Registry, scheduler::Scheduler,
};
use crate::{
    banners::{Banner, BannerRef, Status},
    clock::Clock,
    error::{BannerError, RuntimeError},
    events::{Bus, Event, EventKind},
    policies::{DisplayPolicy, Selector},
    subscribers::SubscriberSet,
};

/// Banner lifecycle and selection service.
pub struct Promotions {
    cfg: Config,
    clock: Arc<dyn Clock>,
    display: Arc<DisplayPolicy>,
    selector: Arc<dyn Selector>,
    bus: Bus,
    registry: Arc<Registry>,
    scheduler: Scheduler,
    runtime_token: CancellationToken,
    listener_token: CancellationToken,
}

impl Promotions {
    /// Returns a builder for configuring the service.
    pub fn builder(cfg: Config) -> PromotionsBuilder {
        PromotionsBuilder::new(cfg)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_internal(
        cfg: Config,
        clock: Arc<dyn Clock>,
        display: Arc<DisplayPolicy>,
        selector: Arc<dyn Selector>,
        bus: Bus,
        registry: Arc<Registry>,
        scheduler: Scheduler,
        runtime_token: CancellationToken,
    ) -> Self {
        Self {
            cfg,
            clock,
            display,
            selector,
            bus,
            registry,
            scheduler,
            runtime_token,
            listener_token: CancellationToken::new(),
        }
    }

    /// Creates a banner displayable during `[start, end)`.
    ///
    /// - Fails with [`BannerError::DuplicateName`] if a live banner holds `name`;
    ///   nothing is registered or scheduled in that case.
    /// - Fails with [`BannerError::ServiceStopped`] once [`shutdown`](Self::shutdown)
    ///   has started: no actor could drive the banner through its window.
    /// - A window that already closed yields an `Expired` banner that is never
    ///   registered and never selectable.
    /// - Otherwise the banner is registered and its next transition is armed.
    ///
    /// `start` and `end` may use any time zone; only the absolute instants matter.
    /// Must be called from within a Tokio runtime.
    pub fn create<S, E>(
        &self,
        name: impl Into<String>,
        start: DateTime<S>,
        end: DateTime<E>,
    ) -> Result<BannerRef, BannerError>
    where
        S: TimeZone,
        E: TimeZone,
    {
        let banner = Arc::new(Banner::new(
            name,
            start.with_timezone(&Utc),
            end.with_timezone(&Utc),
            self.clock.now(),
            Arc::clone(&self.display),
        ));

        let registered = if self.runtime_token.is_cancelled() {
            Err(self.stopped(&banner))
        } else if banner.status() == Status::Expired {
            if self.registry.contains(banner.name()) {
                Err(BannerError::DuplicateName {
                    name: banner.name().to_string(),
                })
            } else {
                Ok(())
            }
        } else {
            self.registry.insert(Arc::clone(&banner)).and_then(|()| {
                // Shutdown may have started between the check and the insert.
                if self.runtime_token.is_cancelled() {
                    self.registry.evict(&banner);
                    Err(self.stopped(&banner))
                } else {
                    Ok(())
                }
            })
        };

        if let Err(e) = registered {
            self.bus.publish(
                Event::new(EventKind::BannerRejected, self.clock.now())
                    .with_banner(banner.name())
                    .with_reason(e.as_label()),
            );
            return Err(e);
        }

        self.bus.publish(
            Event::new(EventKind::BannerCreated, self.clock.now())
                .with_banner(banner.name())
                .with_status(banner.status()),
        );
        self.scheduler.arm(Arc::clone(&banner));
        Ok(banner)
    }

    fn stopped(&self, banner: &Banner) -> BannerError {
        BannerError::ServiceStopped {
            name: banner.name().to_string(),
        }
    }

    /// Returns the banner to display for `client`, or `None` if none is eligible.
    ///
    /// Runs on the caller's thread and never changes banner state.
    pub fn choose(&self, client: &str) -> Option<BannerRef> {
        self.selector.select(&self.registry.snapshot(), client)
    }

    /// Returns the live banner registered under `name`.
    pub fn get(&self, name: &str) -> Option<BannerRef> {
        self.registry.get(name)
    }

    /// Returns sorted names of live banners.
    pub fn list(&self) -> Vec<String> {
        self.registry.list()
    }

    /// Number of live banners.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no banner is live.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Number of transition actors still waiting for a deadline.
    pub fn pending_transitions(&self) -> usize {
        self.scheduler.pending()
    }

    /// The service clock.
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Creates a receiver for runtime events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Stops all pending transitions and waits up to [`Config::grace`] for them.
    ///
    /// Banners keep their current status afterwards; no further transition fires.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.bus
            .publish(Event::new(EventKind::ShutdownRequested, self.clock.now()));
        self.runtime_token.cancel();

        let grace = self.cfg.grace;
        match tokio::time::timeout(grace, self.scheduler.wait()).await {
            Ok(()) => {
                self.bus
                    .publish(Event::new(EventKind::AllStoppedWithin, self.clock.now()));
                Ok(())
            }
            Err(_) => {
                self.bus
                    .publish(Event::new(EventKind::GraceExceeded, self.clock.now()));
                Err(RuntimeError::GraceExceeded {
                    grace,
                    pending: self.scheduler.pending_names(),
                })
            }
        }
    }

    /// Subscribes to the bus and forwards events to the subscriber set (fire-and-forget).
    pub(crate) fn subscriber_listener(&self, set: Arc<SubscriberSet>) {
        if set.is_empty() {
            return;
        }
        let mut rx = self.bus.subscribe();
        let token = self.listener_token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(ev) => set.emit(&ev),
                        Err(broadcast::error::RecvError::Lagged(_)) => continue,
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            }
        });
    }
}

impl Drop for Promotions {
    fn drop(&mut self) {
        self.runtime_token.cancel();
        self.listener_token.cancel();
    }
}

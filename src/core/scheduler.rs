//! # Transition scheduling: one actor per banner with a pending deadline.
//!
//! [`Scheduler::arm`] computes the first wait, registers it with the
//! [`Clock`], and spawns a [`TransitionActor`] on the scheduler's
//! [`TaskTracker`]. The actor sleeps, advances the banner, and either re-arms
//! for the next deadline or evicts the banner and exits.
//!
//! ## Actor loop
//! ```text
//! arm(banner) ──► wait = clock.after(deadline - now) ──► spawn actor
//!
//! loop {
//!   ├─► select { wait fired, runtime_token cancelled → exit }
//!   ├─► banner.advance()  ─► publish StatusChanged
//!   ├─► Active  → wait = clock.after(end - now), publish TransitionArmed
//!   └─► Expired → registry.evict(banner), publish BannerEvicted, exit
//! }
//! ```
//!
//! ## Rules
//! - At most **one** pending deadline per banner (one actor, sequential waits)
//! - Waits are computed **once**, at arm time; late deadlines resolve immediately
//! - No per-banner cancellation; only service shutdown stops an armed actor
//! - Cancellation wins over a deadline that is ready in the same poll

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::{
    banners::{BannerRef, Status},
    clock::{Clock, Sleep},
    core::registry::Registry,
    events::{Bus, Event, EventKind},
};

/// Spawns and tracks transition actors.
pub struct Scheduler {
    clock: Arc<dyn Clock>,
    registry: Arc<Registry>,
    bus: Bus,
    tracker: TaskTracker,
    runtime_token: CancellationToken,
    running: Arc<Running>,
}

/// Names of banners whose actor has not exited yet, keyed by actor id.
#[derive(Default)]
struct Running {
    next_id: AtomicU64,
    names: Mutex<HashMap<u64, String>>,
}

/// Removes its actor from [`Running`] when the actor future is dropped.
struct RunningGuard {
    id: u64,
    running: Arc<Running>,
}

impl Running {
    fn enter(self: &Arc<Self>, name: &str) -> RunningGuard {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.names.lock().insert(id, name.to_string());
        RunningGuard {
            id,
            running: Arc::clone(self),
        }
    }
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.running.names.lock().remove(&self.id);
    }
}

impl Scheduler {
    /// Creates a scheduler that evicts expired banners from `registry`.
    pub fn new(
        clock: Arc<dyn Clock>,
        registry: Arc<Registry>,
        bus: Bus,
        runtime_token: CancellationToken,
    ) -> Self {
        Self {
            clock,
            registry,
            bus,
            tracker: TaskTracker::new(),
            runtime_token,
            running: Arc::default(),
        }
    }

    /// Arms the next transition of `banner`.
    ///
    /// Does nothing for a banner with no pending deadline (`Expired`).
    /// Must be called from within a Tokio runtime.
    pub fn arm(&self, banner: BannerRef) {
        let Some(deadline) = banner.next_deadline() else {
            return;
        };

        let actor = TransitionActor {
            banner,
            clock: Arc::clone(&self.clock),
            registry: Arc::clone(&self.registry),
            bus: self.bus.clone(),
        };
        let wait = actor.wait_until(deadline);
        let token = self.runtime_token.clone();
        let guard = self.running.enter(actor.banner.name());
        self.tracker.spawn(async move {
            let _guard = guard;
            actor.run(wait, token).await;
        });
    }

    /// Number of transition actors still running.
    pub fn pending(&self) -> usize {
        self.tracker.len()
    }

    /// Sorted names of banners whose transition actor is still running.
    pub fn pending_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.running.names.lock().values().cloned().collect();
        names.sort();
        names
    }

    /// Stops accepting new actors and waits for the running ones to finish.
    ///
    /// Callers cancel the runtime token first; otherwise this waits for every
    /// armed banner to expire.
    pub async fn wait(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}

/// Drives one banner through its remaining transitions.
pub struct TransitionActor {
    banner: BannerRef,
    clock: Arc<dyn Clock>,
    registry: Arc<Registry>,
    bus: Bus,
}

impl TransitionActor {
    /// Runs until the banner expires or the runtime token is cancelled.
    pub async fn run(self, mut wait: Sleep, runtime_token: CancellationToken) {
        loop {
            select! {
                biased;
                _ = runtime_token.cancelled() => { return; }
                _ = &mut wait => {}
            }

            let Some(status) = self.banner.advance() else {
                return;
            };
            self.publish(EventKind::StatusChanged, status);

            match status {
                Status::Active => wait = self.wait_until(self.banner.end()),
                Status::Expired => {
                    if self.registry.evict(&self.banner) {
                        self.bus.publish(
                            Event::new(EventKind::BannerEvicted, self.clock.now())
                                .with_banner(self.banner.name()),
                        );
                    }
                    return;
                }
                Status::Inactive => return,
            }
        }
    }

    /// Registers a wait for `deadline` with the clock and reports it.
    fn wait_until(&self, deadline: DateTime<Utc>) -> Sleep {
        let delay = (deadline - self.clock.now()).max(Duration::zero());
        self.bus.publish(
            Event::new(EventKind::TransitionArmed, self.clock.now())
                .with_banner(self.banner.name())
                .with_status(self.banner.status())
                .with_delay(delay),
        );
        self.clock.after(delay)
    }

    fn publish(&self, kind: EventKind, status: Status) {
        self.bus.publish(
            Event::new(kind, self.clock.now())
                .with_banner(self.banner.name())
                .with_status(status),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::MockClock, policies::DisplayPolicy};
    use crate::banners::Banner;
    use chrono::TimeZone;

    fn fixture(clock: &Arc<MockClock>) -> (Scheduler, Arc<Registry>, CancellationToken) {
        let registry = Registry::new();
        let token = CancellationToken::new();
        let scheduler = Scheduler::new(
            clock.clone(),
            Arc::clone(&registry),
            Bus::new(64),
            token.clone(),
        );
        (scheduler, registry, token)
    }

    fn banner(clock: &MockClock, name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> BannerRef {
        Arc::new(Banner::new(
            name,
            start,
            end,
            clock.now(),
            Arc::new(DisplayPolicy::default()),
        ))
    }

    #[tokio::test]
    async fn test_actor_walks_full_lifecycle() {
        let t0 = Utc.with_ymd_and_hms(2019, 4, 5, 12, 0, 0).unwrap();
        let clock = Arc::new(MockClock::at(t0));
        let (scheduler, registry, _token) = fixture(&clock);

        let b = banner(&clock, "b", t0 + Duration::hours(1), t0 + Duration::hours(2));
        registry.insert(Arc::clone(&b)).unwrap();
        scheduler.arm(Arc::clone(&b));
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(clock.pending(), 1);

        clock.advance(Duration::hours(1)).await;
        assert_eq!(b.status(), Status::Active);
        assert!(registry.contains("b"));
        assert_eq!(clock.pending(), 1);

        clock.advance(Duration::hours(1)).await;
        assert_eq!(b.status(), Status::Expired);
        assert!(!registry.contains("b"));
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(clock.pending(), 0);
    }

    #[tokio::test]
    async fn test_expired_banner_is_not_armed() {
        let t0 = Utc.with_ymd_and_hms(2019, 4, 5, 12, 0, 0).unwrap();
        let clock = Arc::new(MockClock::at(t0));
        let (scheduler, _registry, _token) = fixture(&clock);

        let b = banner(&clock, "old", t0 - Duration::hours(2), t0 - Duration::hours(1));
        scheduler.arm(b);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(clock.pending(), 0);
    }

    #[tokio::test]
    async fn test_cancel_stops_actor_without_transition() {
        let t0 = Utc.with_ymd_and_hms(2019, 4, 5, 12, 0, 0).unwrap();
        let clock = Arc::new(MockClock::at(t0));
        let (scheduler, registry, token) = fixture(&clock);

        let b = banner(&clock, "b", t0 + Duration::hours(1), t0 + Duration::hours(2));
        registry.insert(Arc::clone(&b)).unwrap();
        scheduler.arm(Arc::clone(&b));

        token.cancel();
        scheduler.wait().await;
        assert_eq!(scheduler.pending(), 0);

        clock.advance(Duration::hours(3)).await;
        assert_eq!(b.status(), Status::Inactive);
        assert!(registry.contains("b"));
    }

    #[tokio::test]
    async fn test_cancel_wins_over_ready_deadline() {
        let t0 = Utc.with_ymd_and_hms(2019, 4, 5, 12, 0, 0).unwrap();
        let clock = Arc::new(MockClock::at(t0));
        let (scheduler, registry, token) = fixture(&clock);

        let b = banner(&clock, "b", t0, t0 + Duration::hours(1));
        registry.insert(Arc::clone(&b)).unwrap();
        token.cancel();
        scheduler.arm(Arc::clone(&b));

        // The end deadline fires before the actor is first polled.
        clock.advance(Duration::hours(2)).await;
        scheduler.wait().await;
        assert_eq!(b.status(), Status::Active);
        assert!(registry.contains("b"));
    }

    #[tokio::test]
    async fn test_pending_names_track_running_actors() {
        let t0 = Utc.with_ymd_and_hms(2019, 4, 5, 12, 0, 0).unwrap();
        let clock = Arc::new(MockClock::at(t0));
        let (scheduler, _registry, _token) = fixture(&clock);

        scheduler.arm(banner(&clock, "late", t0, t0 + Duration::hours(3)));
        scheduler.arm(banner(&clock, "early", t0, t0 + Duration::hours(1)));
        assert_eq!(scheduler.pending_names(), vec!["early", "late"]);

        clock.advance(Duration::hours(2)).await;
        assert_eq!(scheduler.pending_names(), vec!["late"]);

        clock.advance(Duration::hours(2)).await;
        assert!(scheduler.pending_names().is_empty());
    }
}

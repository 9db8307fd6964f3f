//! # Manually advanced virtual clock.
//!
//! [`MockClock`] never moves on its own. Tests move it with [`MockClock::set`]
//! or [`MockClock::advance`], which fire every timer whose deadline has been
//! reached, in deadline order.
//!
//! ## Firing loop
//! ```text
//! advance(d):
//!   target = now + d
//!   loop {
//!     ├─► earliest timer with deadline <= target?
//!     │     ├─ yes → now = deadline, fire it, yield to the runtime
//!     │     └─ no  → now = target, break
//!   }
//! ```
//!
//! ## Rules
//! - Timers register **synchronously** inside `after()`, so a deadline re-armed
//!   by a woken task is visible to the same `advance` call.
//! - Yielding after each fire lets woken tasks run before the next deadline is
//!   considered. This is deterministic on a current-thread runtime.
//! - Moving the clock backwards fires nothing.
//! - Pending timers of a dropped clock never resolve.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use tokio::sync::oneshot;

use super::{Clock, Sleep};

/// Number of scheduler yields after each fired timer.
const SETTLE_YIELDS: usize = 8;

struct Timer {
    deadline: DateTime<Utc>,
    id: u64,
    tx: oneshot::Sender<()>,
}

struct MockState {
    now: DateTime<Utc>,
    timers: Vec<Timer>,
    next_id: u64,
}

impl MockState {
    /// Removes the earliest timer due at or before `target` (ties by registration order).
    fn pop_due(&mut self, target: DateTime<Utc>) -> Option<Timer> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= target)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;
        Some(self.timers.swap_remove(idx))
    }
}

/// Deterministic clock for tests.
pub struct MockClock {
    state: Mutex<MockState>,
}

impl MockClock {
    /// Creates a clock positioned at the Unix epoch.
    pub fn new() -> Self {
        Self::at(DateTime::<Utc>::default())
    }

    /// Creates a clock positioned at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(MockState {
                now,
                timers: Vec::new(),
                next_id: 0,
            }),
        }
    }

    /// Number of timers registered and not yet fired.
    pub fn pending(&self) -> usize {
        self.state.lock().timers.len()
    }

    /// Moves the clock forward by `delta`, firing due timers along the way.
    pub async fn advance(&self, delta: Duration) {
        let target = {
            let st = self.state.lock();
            st.now.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC)
        };
        self.set(target).await;
    }

    /// Moves the clock to `target`, firing due timers along the way.
    pub async fn set(&self, target: DateTime<Utc>) {
        loop {
            let due = {
                let mut st = self.state.lock();
                match st.pop_due(target) {
                    Some(timer) => {
                        if timer.deadline > st.now {
                            st.now = timer.deadline;
                        }
                        Some(timer)
                    }
                    None => {
                        st.now = target;
                        None
                    }
                }
            };

            match due {
                Some(timer) => {
                    let _ = timer.tx.send(());
                    settle().await;
                }
                None => break,
            }
        }
        settle().await;
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        self.state.lock().now
    }

    fn after(&self, delay: Duration) -> Sleep {
        if delay <= Duration::zero() {
            return Box::pin(std::future::ready(()));
        }

        let (tx, rx) = oneshot::channel();
        {
            let mut st = self.state.lock();
            let deadline = st.now.checked_add_signed(delay).unwrap_or(DateTime::<Utc>::MAX_UTC);
            let id = st.next_id;
            st.next_id += 1;
            st.timers.push(Timer { deadline, id, tx });
        }

        Box::pin(async move {
            if rx.await.is_err() {
                std::future::pending::<()>().await;
            }
        })
    }
}

async fn settle() {
    for _ in 0..SETTLE_YIELDS {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_starts_at_epoch() {
        let clock = MockClock::new();
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap());
    }

    #[tokio::test]
    async fn test_timer_fires_only_when_deadline_reached() {
        let clock = Arc::new(MockClock::new());
        let fired = Arc::new(AtomicBool::new(false));

        let sleep = clock.after(Duration::hours(1));
        let f = fired.clone();
        tokio::spawn(async move {
            sleep.await;
            f.store(true, Ordering::SeqCst);
        });

        clock.advance(Duration::minutes(59)).await;
        assert!(!fired.load(Ordering::SeqCst));
        assert_eq!(clock.pending(), 1);

        clock.advance(Duration::minutes(1)).await;
        assert!(fired.load(Ordering::SeqCst));
        assert_eq!(clock.pending(), 0);
    }

    #[tokio::test]
    async fn test_zero_and_negative_delay_are_immediate() {
        let clock = MockClock::new();
        clock.after(Duration::zero()).await;
        clock.after(Duration::seconds(-10)).await;
        assert_eq!(clock.pending(), 0);
    }

    #[tokio::test]
    async fn test_now_moves_to_each_deadline_while_firing() {
        let clock = Arc::new(MockClock::new());
        let seen = Arc::new(Mutex::new(Vec::new()));

        for mins in [30, 10, 20] {
            let sleep = clock.after(Duration::minutes(mins));
            let c = clock.clone();
            let s = seen.clone();
            tokio::spawn(async move {
                sleep.await;
                s.lock().push(c.now());
            });
        }

        let base = clock.now();
        clock.advance(Duration::hours(1)).await;

        let seen = seen.lock().clone();
        assert_eq!(
            seen,
            vec![
                base + Duration::minutes(10),
                base + Duration::minutes(20),
                base + Duration::minutes(30),
            ]
        );
        assert_eq!(clock.now(), base + Duration::hours(1));
    }

    #[tokio::test]
    async fn test_setting_backwards_fires_nothing() {
        let clock = MockClock::at(Utc.with_ymd_and_hms(2019, 4, 5, 12, 0, 0).unwrap());
        let _sleep = clock.after(Duration::minutes(5));
        clock.set(Utc.with_ymd_and_hms(2019, 4, 5, 11, 0, 0).unwrap()).await;
        assert_eq!(clock.pending(), 1);
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2019, 4, 5, 11, 0, 0).unwrap());
    }
}

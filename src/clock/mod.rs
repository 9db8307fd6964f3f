//! # Time source for the promotion runtime.
//!
//! Every read of "now" and every deadline wait goes through a [`Clock`]:
//! - [`SystemClock`] real wall-clock time backed by tokio timers;
//! - [`MockClock`] manually advanced virtual time for deterministic tests.
//!
//! ## Rules
//! - `after(delay)` fixes its deadline **at call time** (`now() + delay`).
//! - A zero or negative delay resolves immediately.
//! - No other module calls `Utc::now()` or `tokio::time` directly.

mod mock;
mod system;

use chrono::{DateTime, Duration, Utc};
use futures::future::BoxFuture;

pub use mock::MockClock;
pub use system::SystemClock;

/// One-shot notification returned by [`Clock::after`].
pub type Sleep = BoxFuture<'static, ()>;

/// Source of wall-clock time and delayed notifications.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns a future that resolves once the clock reaches `now() + delay`.
    ///
    /// The deadline is computed when this method is called, not when the
    /// future is first polled.
    fn after(&self, delay: Duration) -> Sleep;
}

use chrono::{DateTime, Duration, Utc};

use super::{Clock, Sleep};

/// Real wall-clock time.
///
/// Delays are converted to [`std::time::Duration`] and awaited with
/// [`tokio::time::sleep`]; negative delays collapse to zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn after(&self, delay: Duration) -> Sleep {
        let delay = delay.to_std().unwrap_or(std::time::Duration::ZERO);
        Box::pin(tokio::time::sleep(delay))
    }
}

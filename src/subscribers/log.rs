//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout in a human-readable format.
//!
//! ## Output format
//! ```text
//! 2019-04-05T13:00:00Z [created] banner=Banner1 status=Inactive
//! 2019-04-05T13:00:00Z [armed] banner=Banner1 status=Inactive wait=3600s
//! 2019-04-05T13:00:00Z [status] banner=Banner1 status=Active
//! 2019-04-05T17:00:00Z [evicted] banner=Banner1
//! 2019-04-05T17:00:00Z [rejected] banner=Banner1 reason=banner_duplicate_name
//! ```

use async_trait::async_trait;

use super::Subscribe;
use crate::events::{Event, EventKind};

/// Simple stdout logging subscriber.
///
/// Enabled via the `logging` feature. Not intended for production use -
/// implement a custom [`Subscribe`] for structured logging or metrics.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWriter;

impl LogWriter {
    /// Renders one event as a log line.
    pub fn render(e: &Event) -> String {
        let at = e.at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let banner = e.banner.as_deref().unwrap_or("-");
        let status = e.status.map(|s| s.as_str()).unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("-");
        match e.kind {
            EventKind::BannerCreated => format!("{at} [created] banner={banner} status={status}"),
            EventKind::BannerRejected => {
                format!("{at} [rejected] banner={banner} reason={reason}")
            }
            EventKind::TransitionArmed => {
                let wait = e.delay.map(|d| d.num_seconds()).unwrap_or(0);
                format!("{at} [armed] banner={banner} status={status} wait={wait}s")
            }
            EventKind::StatusChanged => format!("{at} [status] banner={banner} status={status}"),
            EventKind::BannerEvicted => format!("{at} [evicted] banner={banner}"),
            EventKind::ShutdownRequested => format!("{at} [shutdown-requested]"),
            EventKind::AllStoppedWithin => format!("{at} [all-stopped-within-grace]"),
            EventKind::GraceExceeded => format!("{at} [grace-exceeded]"),
            EventKind::SubscriberPanicked => {
                format!("{at} [subscriber-panicked] subscriber={banner} info={reason}")
            }
            EventKind::SubscriberOverflow => {
                format!("{at} [subscriber-overflow] subscriber={banner} {reason}")
            }
        }
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        println!("{}", Self::render(e));
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banners::Status;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_render_lines() {
        let at = Utc.with_ymd_and_hms(2019, 4, 5, 13, 0, 0).unwrap();

        let armed = Event::new(EventKind::TransitionArmed, at)
            .with_banner("Banner1")
            .with_status(Status::Inactive)
            .with_delay(Duration::hours(1));
        assert_eq!(
            LogWriter::render(&armed),
            "2019-04-05T13:00:00Z [armed] banner=Banner1 status=Inactive wait=3600s"
        );

        let evicted = Event::new(EventKind::BannerEvicted, at).with_banner("Banner1");
        assert_eq!(
            LogWriter::render(&evicted),
            "2019-04-05T13:00:00Z [evicted] banner=Banner1"
        );
    }
}

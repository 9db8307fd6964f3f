//! # Banner selection.
//!
//! [`Selector`] picks one banner out of the live set for a client. The
//! default [`EarliestEnd`] scans every candidate on each call:
//!
//! ```text
//! for banner in snapshot:
//!   ├─► skip unless banner.allow_display(client)
//!   └─► keep the one with the smallest (end, name)
//! ```
//!
//! Equal `end` instants are resolved by the smallest name, so the result does
//! not depend on registry iteration order.

use crate::banners::BannerRef;

/// Chooses the banner to display for a client.
///
/// Implementations must not mutate banners; they only read status through
/// [`Banner::allow_display`](crate::Banner::allow_display).
pub trait Selector: Send + Sync + 'static {
    /// Picks one of `banners` for `client`, or `None` if none is eligible.
    fn select(&self, banners: &[BannerRef], client: &str) -> Option<BannerRef>;
}

/// Eligible banner whose window closes first wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct EarliestEnd;

impl Selector for EarliestEnd {
    fn select(&self, banners: &[BannerRef], client: &str) -> Option<BannerRef> {
        banners
            .iter()
            .filter(|b| b.allow_display(client))
            .min_by(|a, b| a.end().cmp(&b.end()).then_with(|| a.name().cmp(b.name())))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banners::{Banner, Status};
    use crate::policies::DisplayPolicy;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    const CLIENT: &str = "192.168.0.1";
    const QA: &str = "10.0.0.2";

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2019, 4, 5, h, m, 0).unwrap()
    }

    fn banner(name: &str, start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> BannerRef {
        Arc::new(Banner::new(name, start, end, now, Arc::new(DisplayPolicy::default())))
    }

    #[test]
    fn test_empty_set_selects_nothing() {
        assert!(EarliestEnd.select(&[], CLIENT).is_none());
    }

    #[test]
    fn test_earliest_end_among_active() {
        let now = at(14, 15);
        let banners = vec![
            banner("Banner1", at(13, 0), at(17, 0), now),
            banner("Banner2", at(14, 0), at(16, 0), now),
            banner("Banner3", at(13, 30), at(17, 30), now),
        ];
        let got = EarliestEnd.select(&banners, CLIENT).unwrap();
        assert_eq!(got.name(), "Banner2");
    }

    #[test]
    fn test_inactive_banners_only_reach_qa() {
        let now = at(12, 0);
        let banners = vec![
            banner("Soon", at(13, 0), at(14, 0), now),
            banner("Live", at(11, 0), at(18, 0), now),
        ];
        assert_eq!(EarliestEnd.select(&banners, CLIENT).unwrap().name(), "Live");
        assert_eq!(EarliestEnd.select(&banners, QA).unwrap().name(), "Soon");
    }

    #[test]
    fn test_expired_banners_are_never_selected() {
        let b = banner("Old", at(9, 0), at(10, 0), at(11, 0));
        assert_eq!(b.status(), Status::Expired);
        assert!(EarliestEnd.select(&[b.clone()], CLIENT).is_none());
        assert!(EarliestEnd.select(&[b], QA).is_none());
    }

    #[test]
    fn test_equal_end_resolved_by_name() {
        let now = at(13, 0);
        let banners = vec![
            banner("Zeta", at(12, 0), at(16, 0), now),
            banner("Alpha", at(12, 30), at(16, 0), now),
        ];
        assert_eq!(EarliestEnd.select(&banners, CLIENT).unwrap().name(), "Alpha");
    }
}

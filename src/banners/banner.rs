//! # Time-windowed banner entity.
//!
//! A [`Banner`] is displayable inside its window `[start, end)`. The initial
//! status is derived from the creation instant; later transitions are applied
//! only by the scheduler through [`Banner::advance`].
//!
//! ## Initial status
//! ```text
//! start <= now < end  → Active    (next deadline: end)
//! now >= end          → Expired   (no deadline)
//! otherwise           → Inactive  (next deadline: start)
//! ```
//!
//! An inverted window (`start > end`) is accepted as given: the banner waits
//! for `start`, becomes `Active`, and expires as soon as the already-passed
//! `end` deadline fires.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::status::{Status, StatusCell};
use crate::policies::DisplayPolicy;

/// Shared handle to a banner.
pub type BannerRef = Arc<Banner>;

/// Named promotional banner with a display window and a lifecycle status.
#[derive(Debug)]
pub struct Banner {
    name: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    status: StatusCell,
    display: Arc<DisplayPolicy>,
}

impl Banner {
    /// Creates a banner whose status reflects `now` against `[start, end)`.
    pub(crate) fn new(
        name: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
        display: Arc<DisplayPolicy>,
    ) -> Self {
        let status = initial_status(start, end, now);
        Self {
            name: name.into(),
            start,
            end,
            status: StatusCell::new(status),
            display,
        }
    }

    /// Unique banner name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Instant the display window opens.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Instant the display window closes.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Current status.
    ///
    /// A concurrent transition may land just before or just after this read.
    pub fn status(&self) -> Status {
        self.status.load()
    }

    /// Whether this banner may be shown to `client`.
    ///
    /// QA clients see anything not yet expired; other clients only see
    /// active banners. Pure read, never triggers a transition.
    pub fn allow_display(&self, client: &str) -> bool {
        self.display.allows(self.status(), client)
    }

    /// Deadline of the next transition, if any.
    pub(crate) fn next_deadline(&self) -> Option<DateTime<Utc>> {
        match self.status() {
            Status::Inactive => Some(self.start),
            Status::Active => Some(self.end),
            Status::Expired => None,
        }
    }

    /// Applies the next transition. Called only by the banner's transition actor.
    pub(crate) fn advance(&self) -> Option<Status> {
        self.status.advance()
    }
}

fn initial_status(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Status {
    if start <= now && now < end {
        Status::Active
    } else if now >= end {
        Status::Expired
    } else {
        Status::Inactive
    }
}

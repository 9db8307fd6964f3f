//! # Banner lifecycle status.
//!
//! ```text
//! Inactive ──(now reaches start)──► Active ──(now reaches end)──► Expired
//! ```
//!
//! [`StatusCell`] stores the status as an `AtomicU8` so that transitions made by
//! a scheduler task are data-race free with respect to concurrent readers.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Current state of a banner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// Before the display window opens (initial state).
    #[default]
    Inactive,
    /// Inside the display window.
    Active,
    /// After the display window (terminal).
    Expired,
}

impl Status {
    /// Returns the display name: `"Inactive"`, `"Active"` or `"Expired"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Inactive => "Inactive",
            Status::Active => "Active",
            Status::Expired => "Expired",
        }
    }

    /// Returns the status reached from this one when its deadline fires.
    pub fn next(self) -> Option<Status> {
        match self {
            Status::Inactive => Some(Status::Active),
            Status::Active => Some(Status::Expired),
            Status::Expired => None,
        }
    }

    fn to_u8(self) -> u8 {
        match self {
            Status::Inactive => 0,
            Status::Active => 1,
            Status::Expired => 2,
        }
    }

    fn from_u8(raw: u8) -> Status {
        match raw {
            0 => Status::Inactive,
            1 => Status::Active,
            _ => Status::Expired,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Atomic status storage.
#[derive(Debug)]
pub(crate) struct StatusCell(AtomicU8);

impl StatusCell {
    pub(crate) fn new(status: Status) -> Self {
        Self(AtomicU8::new(status.to_u8()))
    }

    pub(crate) fn load(&self) -> Status {
        Status::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Moves to the next status with a single compare-and-swap.
    ///
    /// Returns the new status, or `None` when already terminal.
    pub(crate) fn advance(&self) -> Option<Status> {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            let next = Status::from_u8(current).next()?;
            match self.0.compare_exchange_weak(
                current,
                next.to_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Some(next),
                Err(actual) => current = actual,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        let cases = [
            (Status::Inactive, "Inactive"),
            (Status::Active, "Active"),
            (Status::Expired, "Expired"),
        ];
        for (status, want) in cases {
            assert_eq!(status.as_str(), want);
            assert_eq!(status.to_string(), want);
        }
    }

    #[test]
    fn test_default_is_inactive() {
        assert_eq!(Status::default(), Status::Inactive);
    }

    #[test]
    fn test_cell_advances_to_terminal_and_stops() {
        let cell = StatusCell::new(Status::Inactive);
        assert_eq!(cell.advance(), Some(Status::Active));
        assert_eq!(cell.load(), Status::Active);
        assert_eq!(cell.advance(), Some(Status::Expired));
        assert_eq!(cell.advance(), None);
        assert_eq!(cell.load(), Status::Expired);
    }
}

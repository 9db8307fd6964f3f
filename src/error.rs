//! Error types used by the promovisor runtime.
//!
//! This module defines two error enums:
//!
//! - [`BannerError`]: rejections of banner creation requests.
//! - [`RuntimeError`]: errors raised by the runtime itself during shutdown.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logs/events.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced when creating a banner.
///
/// Creation fails without side effects: no banner is registered and no
/// transition is armed.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BannerError {
    /// A live (non-expired) banner already holds this name.
    #[error("banner name {name:?} is already in use")]
    DuplicateName {
        /// The rejected name.
        name: String,
    },
    /// The service was shut down; no new banner is accepted.
    #[error("banner {name:?} rejected: service is shut down")]
    ServiceStopped {
        /// The rejected name.
        name: String,
    },
}

impl BannerError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use promovisor::BannerError;
    ///
    /// let err = BannerError::DuplicateName { name: "Banner1".into() };
    /// assert_eq!(err.as_label(), "banner_duplicate_name");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            BannerError::DuplicateName { .. } => "banner_duplicate_name",
            BannerError::ServiceStopped { .. } => "banner_service_stopped",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            BannerError::DuplicateName { name } => format!("duplicate name: {name}"),
            BannerError::ServiceStopped { name } => format!("service stopped: {name}"),
        }
    }
}

/// # Errors produced by the promovisor runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; some transition actors were still running.
    #[error("shutdown timeout {grace:?} exceeded; pending: {pending:?}")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Sorted names of banners whose transition actors were still running when the grace expired.
        pending: Vec<String>,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/events.
    ///
    /// # Example
    /// ```
    /// use promovisor::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), pending: vec![] };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace, pending } => {
                format!("grace exceeded after {grace:?}; pending banners={pending:?}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_name_display() {
        let err = BannerError::DuplicateName {
            name: "Banner1".into(),
        };
        assert_eq!(err.to_string(), "banner name \"Banner1\" is already in use");
        assert_eq!(err.as_message(), "duplicate name: Banner1");
    }

    #[test]
    fn test_service_stopped_label() {
        let err = BannerError::ServiceStopped {
            name: "Late".into(),
        };
        assert_eq!(err.as_label(), "banner_service_stopped");
        assert_eq!(err.to_string(), "banner \"Late\" rejected: service is shut down");
    }
}

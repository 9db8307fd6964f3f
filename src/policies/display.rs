//! # Display eligibility.
//!
//! [`DisplayPolicy`] decides whether a banner in a given [`Status`] may be
//! shown to a client:
//!
//! ```text
//! client in QA allow-list → status != Expired   (preview upcoming banners)
//! any other client        → status == Active
//! ```

use std::collections::HashSet;

use crate::banners::Status;

/// Client identifiers granted QA visibility by default.
pub const DEFAULT_QA_CLIENTS: [&str; 2] = ["10.0.0.1", "10.0.0.2"];

/// QA allow-list and the eligibility rule built on it.
#[derive(Clone, Debug)]
pub struct DisplayPolicy {
    qa_clients: HashSet<String>,
}

impl DisplayPolicy {
    /// Creates a policy with the given QA client identifiers.
    pub fn new<I, S>(qa_clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            qa_clients: qa_clients.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `client` is on the QA allow-list.
    pub fn is_qa(&self, client: &str) -> bool {
        self.qa_clients.contains(client)
    }

    /// Whether a banner in `status` may be displayed to `client`.
    pub fn allows(&self, status: Status, client: &str) -> bool {
        if self.is_qa(client) {
            status != Status::Expired
        } else {
            status == Status::Active
        }
    }
}

impl Default for DisplayPolicy {
    /// Uses [`DEFAULT_QA_CLIENTS`].
    fn default() -> Self {
        Self::new(DEFAULT_QA_CLIENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qa_clients_see_inactive_and_active() {
        let policy = DisplayPolicy::default();
        for qa in DEFAULT_QA_CLIENTS {
            assert!(policy.allows(Status::Inactive, qa));
            assert!(policy.allows(Status::Active, qa));
            assert!(!policy.allows(Status::Expired, qa));
        }
    }

    #[test]
    fn test_normal_clients_see_only_active() {
        let policy = DisplayPolicy::default();
        assert!(!policy.allows(Status::Inactive, "192.168.0.2"));
        assert!(policy.allows(Status::Active, "192.168.0.2"));
        assert!(!policy.allows(Status::Expired, "192.168.0.2"));
    }

    #[test]
    fn test_custom_allow_list_replaces_defaults() {
        let policy = DisplayPolicy::new(["172.16.0.9"]);
        assert!(policy.is_qa("172.16.0.9"));
        assert!(!policy.is_qa("10.0.0.1"));
        assert!(policy.allows(Status::Inactive, "172.16.0.9"));
        assert!(!policy.allows(Status::Inactive, "10.0.0.1"));
    }
}

//! Display and selection policies.
//!
//! This module groups the rules that decide **who** may see a banner and
//! **which** banner wins when several are eligible.
//!
//! ## Contents
//! - [`DisplayPolicy`] QA allow-list and the per-status eligibility rule
//! - [`Selector`]      pluggable choice over the live banner set
//! - [`EarliestEnd`]   default selector: eligible banner ending first wins
//!
//! ## Quick wiring
//! ```text
//! Promotions::choose(client)
//!      └─► selector.select(registry.snapshot(), client)
//!            └─► banner.allow_display(client) ─► DisplayPolicy::allows(status, client)
//! ```

mod display;
mod selection;

pub use display::{DisplayPolicy, DEFAULT_QA_CLIENTS};
pub use selection::{EarliestEnd, Selector};

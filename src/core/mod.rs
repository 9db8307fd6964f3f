//! Runtime core: banner registry, transition scheduling and the service facade.
//!
//! The public API from this module is [`Promotions`] (with its builder and
//! [`Config`]) and the read surface of [`Registry`].
//!
//! Internal modules:
//! - [`promotions`]: creation, selection, shutdown;
//! - [`scheduler`]: one transition actor per banner with a pending deadline;
//! - [`registry`]: live banners by name;
//! - [`builder`]: wiring of clock, selector, bus and subscribers;
//! - [`config`]: runtime settings.

mod builder;
mod config;
mod promotions;
mod registry;
mod scheduler;

pub use builder::PromotionsBuilder;
pub use config::Config;
pub use promotions::Promotions;
pub use registry::Registry;

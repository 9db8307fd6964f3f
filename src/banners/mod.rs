//! # Banner entity and lifecycle status.
//!
//! - [`Banner`] named display window with an atomic status
//! - [`BannerRef`] shared handle (`Arc<Banner>`) returned to callers
//! - [`Status`] `Inactive` → `Active` → `Expired`

mod banner;
mod status;

pub use banner::{Banner, BannerRef};
pub use status::Status;

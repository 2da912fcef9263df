//! HTTP handlers
//!
//! Axum request handlers for the viewer. They translate requests into
//! controller and service calls and return rendered HTML.

pub mod feed;
pub mod profile;

pub use feed::{feed_state, index, next_page, trending_tags};
pub use profile::get_profile;

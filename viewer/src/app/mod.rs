//! Application layer
//!
//! The feed controller and the services behind the tag sidebar and
//! profile view. Each coordinates calls through the `RemoteFeedApi` port.

pub mod feed_controller;
pub mod profile_service;
pub mod tag_service;

pub use feed_controller::{FeedController, PageOutcome};
pub use profile_service::ProfileService;
pub use tag_service::TagService;

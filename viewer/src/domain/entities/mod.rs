//! Domain entities
//!
//! Models for the records the Blurt API returns and for the feed
//! controller's own state.

pub mod account;
pub mod feed_query;
pub mod post;
pub mod tag;

pub use account::{Account, FollowCount, UserProfile};
pub use feed_query::{Cursor, FeedFilter, FeedQuery, FetchState};
pub use post::Post;
pub use tag::TrendingTag;

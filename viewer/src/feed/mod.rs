//! Feed module
//!
//! HTML rendering of posts, tags and profiles, plus the text helpers used
//! for post previews.

pub mod renderer;
pub mod text;

pub use renderer::{
    render_end_of_feed, render_error_toast, render_page, render_posts, render_profile,
    render_profile_error, render_trending_tags, PageView,
};

//! Trending tag entity

use serde::{Deserialize, Serialize};

use super::post::deserialize_null_default;

/// A tag as returned by `get_trending_tags`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingTag {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub total_payouts: String,
    #[serde(default)]
    pub net_votes: i64,
    #[serde(default)]
    pub top_posts: i64,
    #[serde(default)]
    pub comments: i64,
}

//! Trending tag service

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::TrendingTag;
use crate::domain::ports::{decode_result, RemoteFeedApi};
use crate::error::FeedError;

/// Number of tags requested from `get_trending_tags`
pub const TRENDING_TAG_LIMIT: u32 = 20;

pub struct TagService<A: RemoteFeedApi + ?Sized> {
    api: Arc<A>,
}

impl<A: RemoteFeedApi + ?Sized> TagService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Fetch trending tags. The chain lists an empty-named tag for
    /// untagged posts; it is dropped.
    pub async fn trending_tags(&self) -> Result<Vec<TrendingTag>, FeedError> {
        let method = "get_trending_tags";
        let result = self
            .api
            .call(method, json!(["", TRENDING_TAG_LIMIT]))
            .await
            .inspect_err(|e| tracing::error!("Error fetching trending tags: {}", e))?;

        let tags: Vec<TrendingTag> = decode_result(method, result)?;
        Ok(tags.into_iter().filter(|t| !t.name.is_empty()).collect())
    }
}

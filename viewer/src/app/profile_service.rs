//! Profile service
//!
//! Looks up an account, then loads its recent posts and follow counts
//! concurrently. A failed post lookup degrades to an empty list; the account
//! and follow-count lookups are required.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Account, FollowCount, Post, UserProfile};
use crate::domain::ports::{decode_result, RemoteFeedApi};
use crate::error::{FeedError, RpcError};

/// Number of recent posts shown on a profile
pub const RECENT_POST_LIMIT: u32 = 5;

/// Upper date bound for `get_discussions_by_author_before_date`
const BEFORE_DATE: &str = "2030-01-01T00:00:00";

pub struct ProfileService<A: RemoteFeedApi + ?Sized> {
    api: Arc<A>,
}

impl<A: RemoteFeedApi + ?Sized> ProfileService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    pub async fn fetch_profile(&self, username: &str) -> Result<UserProfile, FeedError> {
        let username = username.trim().trim_start_matches('@');
        if username.is_empty() {
            return Err(FeedError::Validation("Username is required".to_string()));
        }

        let account = self.fetch_account(username).await?;

        let (posts, follow_count) =
            tokio::join!(self.recent_posts(username), self.follow_count(username));

        Ok(UserProfile {
            account,
            posts,
            follow_count: follow_count?,
        })
    }

    async fn fetch_account(&self, username: &str) -> Result<Account, FeedError> {
        let method = "get_accounts";
        let result = self
            .api
            .call(method, json!([[username]]))
            .await
            .and_then(|value| decode_result::<Vec<Account>>(method, value));

        let accounts = match result {
            Ok(accounts) => accounts,
            Err(RpcError::MalformedResponse(e)) => {
                tracing::debug!("Unusable account lookup for {}: {}", username, e);
                Vec::new()
            }
            Err(e) => {
                tracing::error!("Error fetching user profile: {}", e);
                return Err(e.into());
            }
        };

        accounts
            .into_iter()
            .next()
            .ok_or_else(|| FeedError::UserNotFound(username.to_string()))
    }

    async fn recent_posts(&self, username: &str) -> Vec<Post> {
        let method = "get_discussions_by_author_before_date";
        let params = json!([username, "", BEFORE_DATE, RECENT_POST_LIMIT]);

        let result = self
            .api
            .call(method, params)
            .await
            .and_then(|value| decode_result::<Vec<Post>>(method, value));

        match result {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!("Error fetching user posts for {}: {}", username, e);
                Vec::new()
            }
        }
    }

    async fn follow_count(&self, username: &str) -> Result<FollowCount, FeedError> {
        let method = "get_follow_count";
        let result = self.api.call(method, json!([username])).await?;
        Ok(decode_result(method, result)?)
    }
}

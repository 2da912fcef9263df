//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use serde_json::{json, Value};

use crate::domain::entities::post::Vote;
use crate::domain::entities::Post;

/// Create a test post with default values
pub fn test_post(author: &str, permlink: &str) -> Post {
    Post {
        author: author.to_string(),
        permlink: permlink.to_string(),
        title: format!("Post {}", permlink),
        body: "Hello **Blurt**! <img src=\"https://img.example/cover.jpg\">".to_string(),
        category: "blurt".to_string(),
        created: "2024-01-05T12:30:00".to_string(),
        pending_payout_value: "1.2345 BLURT".to_string(),
        active_votes: vec![Vote {
            voter: "bob".to_string(),
        }],
        children: 2,
        url: format!("/blurt/@{}/{}", author, permlink),
        json_metadata: json!("{\"tags\":[\"blurt\",\"photography\"]}"),
    }
}

/// Create `count` posts whose last entry is (`last_author`, `last_permlink`)
pub fn test_page(count: usize, last_author: &str, last_permlink: &str) -> Vec<Post> {
    let mut posts: Vec<Post> = (1..count)
        .map(|i| test_post(&format!("author{}", i), &format!("permlink-{}", i)))
        .collect();
    posts.push(test_post(last_author, last_permlink));
    posts
}

/// Serialize posts the way the API returns them
pub fn posts_json(posts: &[Post]) -> Value {
    serde_json::to_value(posts).unwrap()
}

/// A `get_accounts` result for one account
pub fn test_accounts_json(name: &str) -> Value {
    json!([{
        "name": name,
        "json_metadata": "{\"profile\":{\"about\":\"Street photographer\",\"location\":\"Lisbon\",\"website\":\"https://example.com\"}}",
    }])
}

pub fn test_follow_count_json(name: &str, followers: u64, following: u64) -> Value {
    json!({
        "account": name,
        "follower_count": followers,
        "following_count": following,
    })
}

pub fn test_tags_json() -> Value {
    json!([
        {"name": "", "total_payouts": "0.000 BLURT", "net_votes": 0, "top_posts": 0, "comments": 0},
        {"name": "photography", "total_payouts": "120.000 BLURT", "net_votes": 40, "top_posts": 12, "comments": 30},
        {"name": "blurt", "total_payouts": "90.000 BLURT", "net_votes": 20, "top_posts": 8, "comments": 10},
    ])
}

//! Account and profile entities

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::post::parse_metadata;
use super::Post;

/// An account as returned by `get_accounts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(default)]
    pub json_metadata: Value,
    #[serde(default)]
    pub posting_json_metadata: Value,
}

/// The `profile` section of account metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

impl Account {
    /// Profile metadata, preferring `json_metadata` over
    /// `posting_json_metadata`. Malformed metadata yields an empty profile.
    pub fn profile(&self) -> ProfileMetadata {
        [&self.json_metadata, &self.posting_json_metadata]
            .into_iter()
            .filter_map(|raw| parse_metadata(raw).get("profile").cloned())
            .find_map(|profile| serde_json::from_value(profile).ok())
            .unwrap_or_default()
    }

    /// Avatar URL, falling back to the Blurt image service
    pub fn avatar_url(&self) -> String {
        self.profile()
            .profile_image
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| format!("https://images.blurt.blog/u/{}/avatar/medium", self.name))
    }
}

/// Result of `get_follow_count`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowCount {
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub following_count: u64,
}

/// Everything shown in the profile view
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub account: Account,
    pub posts: Vec<Post>,
    pub follow_count: FollowCount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn account(json_metadata: Value) -> Account {
        serde_json::from_value(json!({
            "name": "alice",
            "json_metadata": json_metadata,
        }))
        .unwrap()
    }

    #[test]
    fn profile_from_string_metadata() {
        let account = account(json!(
            "{\"profile\":{\"about\":\"Photographer\",\"location\":\"Lisbon\"}}"
        ));
        let profile = account.profile();
        assert_eq!(profile.about.as_deref(), Some("Photographer"));
        assert_eq!(profile.location.as_deref(), Some("Lisbon"));
        assert!(profile.website.is_none());
    }

    #[test]
    fn profile_from_object_metadata() {
        let account = account(json!({"profile": {"website": "https://alice.example"}}));
        assert_eq!(
            account.profile().website.as_deref(),
            Some("https://alice.example")
        );
    }

    #[test]
    fn malformed_metadata_gives_empty_profile() {
        let account = account(json!("{not json"));
        assert_eq!(account.profile(), ProfileMetadata::default());
    }

    #[test]
    fn posting_metadata_is_a_fallback() {
        let account: Account = serde_json::from_value(json!({
            "name": "alice",
            "json_metadata": "",
            "posting_json_metadata": "{\"profile\":{\"about\":\"hi\"}}",
        }))
        .unwrap();
        assert_eq!(account.profile().about.as_deref(), Some("hi"));
    }

    #[test]
    fn avatar_falls_back_to_image_service() {
        let account = account(Value::Null);
        assert_eq!(
            account.avatar_url(),
            "https://images.blurt.blog/u/alice/avatar/medium"
        );
    }

    #[test]
    fn follow_count_defaults_missing_fields() {
        let count: FollowCount =
            serde_json::from_value(json!({"account": "alice", "follower_count": 7})).unwrap();
        assert_eq!(count.follower_count, 7);
        assert_eq!(count.following_count, 0);
    }
}

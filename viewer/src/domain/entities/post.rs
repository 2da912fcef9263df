//! Post domain entity
//!
//! A discussion as returned by the `get_discussions_by_*` methods. Posts are
//! passed through as the API orders them; no identity or dedup is kept.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Timestamp format used by the chain (`2024-01-05T12:30:00`, no zone)
const CHAIN_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Helper to deserialize null as default (empty string, empty vec, etc.)
pub(crate) fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a `json_metadata` field, which the chain stores either as a JSON
/// encoded string or as an inline object.
pub(crate) fn parse_metadata(raw: &Value) -> Value {
    match raw {
        Value::String(s) if !s.trim().is_empty() => {
            serde_json::from_str(s).unwrap_or(Value::Null)
        }
        Value::Object(_) => raw.clone(),
        _ => Value::Null,
    }
}

/// A single vote on a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(default)]
    pub voter: String,
}

/// A post on the Blurt chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub author: String,
    pub permlink: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub body: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub created: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub pending_payout_value: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub active_votes: Vec<Vote>,
    #[serde(default)]
    pub children: u32,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub url: String,
    #[serde(default)]
    pub json_metadata: Value,
}

impl Post {
    /// Creation time, if the chain timestamp parses
    pub fn created_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.created, CHAIN_TIME_FORMAT).ok()
    }

    pub fn vote_count(&self) -> usize {
        self.active_votes.len()
    }

    /// Tags from the post metadata, falling back to the category
    pub fn tags(&self) -> Vec<String> {
        let tags: Vec<String> = parse_metadata(&self.json_metadata)
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if tags.is_empty() && !self.category.is_empty() {
            vec![self.category.clone()]
        } else {
            tags
        }
    }

    /// First image listed in the post metadata
    pub fn metadata_image(&self) -> Option<String> {
        parse_metadata(&self.json_metadata)
            .get("image")
            .and_then(Value::as_array)
            .and_then(|images| images.iter().find_map(Value::as_str))
            .map(str::to_string)
    }
}

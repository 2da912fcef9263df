//! Feed query, cursor and fetch state
//!
//! These three values are everything the feed controller tracks between
//! page fetches.

use serde::Serialize;
use serde_json::{json, Value};

use super::Post;

/// Sort order of the public feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedFilter {
    #[default]
    Created,
    Trending,
    Hot,
}

impl FeedFilter {
    pub const ALL: [FeedFilter; 3] = [FeedFilter::Created, FeedFilter::Trending, FeedFilter::Hot];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedFilter::Created => "created",
            FeedFilter::Trending => "trending",
            FeedFilter::Hot => "hot",
        }
    }
}

impl std::fmt::Display for FeedFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FeedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "created" => Ok(FeedFilter::Created),
            "trending" => Ok(FeedFilter::Trending),
            "hot" => Ok(FeedFilter::Hot),
            _ => Err(format!("Unknown feed filter: {}", s)),
        }
    }
}

/// What the feed is showing: a sort filter, or a tag
///
/// A tag feed is always sorted by creation, so a non-empty tag resets the
/// filter to `Created`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub filter: FeedFilter,
    pub tag: Option<String>,
}

impl FeedQuery {
    pub fn new(filter: FeedFilter, tag: Option<&str>) -> Self {
        let tag = tag
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let filter = if tag.is_some() {
            FeedFilter::Created
        } else {
            filter
        };
        Self { filter, tag }
    }

    /// Build the RPC request for the page that follows `cursor`
    pub fn page_request(&self, cursor: &Cursor, limit: u32) -> PageRequest {
        let page = PageParams {
            limit,
            start_author: &cursor.last_author,
            start_permlink: &cursor.last_permlink,
        };

        match &self.tag {
            Some(tag) => PageRequest {
                method: "get_discussions_by_created".to_string(),
                params: json!([tag, page]),
            },
            None => PageRequest {
                method: format!("get_discussions_by_{}", self.filter),
                params: json!([page]),
            },
        }
    }
}

#[derive(Serialize)]
struct PageParams<'a> {
    limit: u32,
    start_author: &'a str,
    start_permlink: &'a str,
}

/// A ready-to-send page request
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub method: String,
    pub params: Value,
}

/// Pagination watermark: the last post of the most recent page
///
/// Empty strings mean "start of feed".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub last_author: String,
    pub last_permlink: String,
}

impl Cursor {
    pub fn after(post: &Post) -> Self {
        Self {
            last_author: post.author.clone(),
            last_permlink: post.permlink.clone(),
        }
    }

    pub fn is_start(&self) -> bool {
        self.last_author.is_empty() && self.last_permlink.is_empty()
    }
}

/// Loading guard and terminal flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchState {
    pub is_loading: bool,
    pub has_more: bool,
}

impl Default for FetchState {
    fn default() -> Self {
        Self {
            is_loading: false,
            has_more: true,
        }
    }
}

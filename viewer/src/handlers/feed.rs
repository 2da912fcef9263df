//! Feed handlers
//!
//! The page shell, incremental page loads and the trending tag sidebar.
//! Each request maps onto one controller call: a query change resets the
//! controller, a scroll trigger asks for the next page.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::PageOutcome;
use crate::domain::entities::FeedFilter;
use crate::error::AppError;
use crate::feed::{
    render_end_of_feed, render_error_toast, render_page, render_posts, render_trending_tags,
    PageView,
};
use crate::AppState;

/// Header set on the fragment that ends the feed
pub const FEED_EXHAUSTED_HEADER: &str = "x-feed-exhausted";

/// Query string for GET /
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    pub filter: Option<String>,
    pub tag: Option<String>,
}

/// GET /?filter=&tag=
///
/// Switches the feed to the requested filter or tag and renders the full
/// page with its first page of posts. A failed first page is shown as a
/// notification inside the page.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Html<String>, AppError> {
    let filter = params
        .filter
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .map(str::parse::<FeedFilter>)
        .transpose()
        .map_err(AppError::BadRequest)?
        .unwrap_or_default();

    state.feed.reset_query(filter, params.tag.as_deref());
    let query = state.feed.query();

    let (tags, first_page) = tokio::join!(
        state.tags.trending_tags(),
        state.feed.request_next_page()
    );

    let tags = tags.unwrap_or_else(|e| {
        tracing::warn!("Trending tags unavailable: {}", e);
        Vec::new()
    });

    let feed_html = match first_page {
        Ok(PageOutcome::Page(posts)) => render_posts(&posts),
        Ok(PageOutcome::Exhausted) => render_end_of_feed(),
        Ok(PageOutcome::InFlight | PageOutcome::Stale) => String::new(),
        Err(_) => render_error_toast("Failed to load posts. Please try again later."),
    };

    Ok(Html(render_page(&PageView {
        query: &query,
        tags: &tags,
        feed_html,
    })))
}

/// GET /feed/next
///
/// Next page as a fragment of post cards.
/// - Exhausted → end-of-feed marker with `X-Feed-Exhausted: true`
/// - Already loading, or answer belongs to an old query → 204
/// - Upstream failure → 502 with a dismissible notification
pub async fn next_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let response = match state.feed.request_next_page().await? {
        PageOutcome::Page(posts) => Html(render_posts(&posts)).into_response(),
        PageOutcome::Exhausted => (
            [(FEED_EXHAUSTED_HEADER, "true")],
            Html(render_end_of_feed()),
        )
            .into_response(),
        PageOutcome::InFlight | PageOutcome::Stale => StatusCode::NO_CONTENT.into_response(),
    };

    Ok(response)
}

/// Snapshot of the feed session
#[derive(Debug, Serialize)]
pub struct FeedStateResponse {
    pub filter: FeedFilter,
    pub tag: Option<String>,
    pub start_author: String,
    pub start_permlink: String,
    pub at_start: bool,
    pub is_loading: bool,
    pub has_more: bool,
    pub page_size: u32,
}

/// GET /feed/state
pub async fn feed_state(State(state): State<AppState>) -> Json<FeedStateResponse> {
    let query = state.feed.query();
    let cursor = state.feed.cursor();
    let fetch = state.feed.fetch_state();

    Json(FeedStateResponse {
        filter: query.filter,
        tag: query.tag,
        at_start: cursor.is_start(),
        start_author: cursor.last_author,
        start_permlink: cursor.last_permlink,
        is_loading: fetch.is_loading,
        has_more: fetch.has_more,
        page_size: state.feed.page_size(),
    })
}

/// GET /tags
pub async fn trending_tags(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let tags = state.tags.trending_tags().await?;
    let active = state.feed.query().tag;

    Ok(Html(render_trending_tags(&tags, active.as_deref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum_test::TestServer;
    use serde_json::json;

    use crate::config::Config;
    use crate::test_utils::{posts_json, test_page, test_tags_json, MockFeedApi, MockReply};

    const CREATED: &str = "get_discussions_by_created";

    fn server(api: Arc<MockFeedApi>) -> TestServer {
        let state = AppState::new(api, &Config::default());
        TestServer::new(crate::router(state)).unwrap()
    }

    #[tokio::test]
    async fn index_renders_first_page_and_tags() {
        let api = Arc::new(
            MockFeedApi::new()
                .with_result(CREATED, posts_json(&test_page(10, "alice", "post-1")))
                .with_result("get_trending_tags", test_tags_json()),
        );
        let server = server(api.clone());

        let response = server.get("/").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("Post post-1"));
        assert!(html.contains("#photography"));
        assert!(html.contains("Created posts"));
    }

    #[tokio::test]
    async fn index_with_tag_resets_to_tag_feed() {
        let api = Arc::new(MockFeedApi::new());
        let server = server(api.clone());

        server
            .get("/")
            .add_query_param("tag", "photography")
            .await
            .assert_status_ok();

        let calls = api.calls();
        let feed_call = calls.iter().find(|(method, _)| method == CREATED).unwrap();
        assert_eq!(
            feed_call.1,
            json!(["photography", {"limit": 10, "start_author": "", "start_permlink": ""}])
        );
    }

    #[tokio::test]
    async fn index_rejects_unknown_filter() {
        let server = server(Arc::new(MockFeedApi::new()));

        server
            .get("/")
            .add_query_param("filter", "cold")
            .expect_failure()
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn index_survives_upstream_failure() {
        let api = Arc::new(
            MockFeedApi::new()
                .with_reply(CREATED, MockReply::Transport(500))
                .with_reply("get_trending_tags", MockReply::Transport(500)),
        );
        let server = server(api);

        let response = server.get("/").await;

        response.assert_status_ok();
        assert!(response.text().contains("Failed to load posts"));
    }

    #[tokio::test]
    async fn next_page_walks_the_feed_until_exhausted() {
        let api = Arc::new(
            MockFeedApi::new()
                .with_result(CREATED, posts_json(&test_page(10, "alice", "post-1")))
                .with_result(CREATED, posts_json(&test_page(10, "bob", "post-2")))
                .with_result(CREATED, json!([])),
        );
        let server = server(api.clone());

        server.get("/").await.assert_status_ok();

        let second = server.get("/feed/next").await;
        second.assert_status_ok();
        assert!(second.text().contains("Post post-2"));
        assert_eq!(
            api.calls().last().unwrap().1,
            json!([{"limit": 10, "start_author": "alice", "start_permlink": "post-1"}])
        );

        let end = server.get("/feed/next").await;
        end.assert_status_ok();
        assert_eq!(end.header(FEED_EXHAUSTED_HEADER), "true");
        assert!(end.text().contains("No more posts"));

        let calls_before = api.call_count();
        let again = server.get("/feed/next").await;
        assert_eq!(again.header(FEED_EXHAUSTED_HEADER), "true");
        assert_eq!(api.call_count(), calls_before);
    }

    #[tokio::test]
    async fn next_page_failure_is_bad_gateway_and_retryable() {
        let api = Arc::new(
            MockFeedApi::new()
                .with_result(CREATED, posts_json(&test_page(10, "alice", "post-1")))
                .with_reply(CREATED, MockReply::Transport(500)),
        );
        let server = server(api.clone());

        server.get("/").await.assert_status_ok();

        let failed = server.get("/feed/next").expect_failure().await;
        failed.assert_status(StatusCode::BAD_GATEWAY);
        assert!(failed.text().contains("alert-dismissible"));

        api.replace_reply(
            CREATED,
            MockReply::Result(posts_json(&test_page(3, "carol", "post-3"))),
        );
        let retried = server.get("/feed/next").await;
        retried.assert_status_ok();

        let calls = api.calls();
        let n = calls.len();
        assert_eq!(calls[n - 1].1, calls[n - 2].1);
    }

    #[tokio::test]
    async fn state_reflects_query_and_cursor() {
        let api = Arc::new(
            MockFeedApi::new().with_result(
                "get_discussions_by_trending",
                posts_json(&test_page(10, "alice", "post-1")),
            ),
        );
        let server = server(api);

        let initial: serde_json::Value = server.get("/feed/state").await.json();
        assert_eq!(initial["at_start"], true);
        assert_eq!(initial["has_more"], true);
        assert_eq!(initial["page_size"], 10);

        server
            .get("/")
            .add_query_param("filter", "trending")
            .await
            .assert_status_ok();
        let after_first: serde_json::Value = server.get("/feed/state").await.json();
        assert_eq!(after_first["filter"], "trending");
        assert_eq!(after_first["start_author"], "alice");
        assert_eq!(after_first["start_permlink"], "post-1");
        assert_eq!(after_first["is_loading"], false);
        assert_eq!(after_first["has_more"], true);
    }

    #[tokio::test]
    async fn tag_search_reports_created_filter() {
        let server = server(Arc::new(MockFeedApi::new()));

        server
            .get("/")
            .add_query_param("filter", "hot")
            .add_query_param("tag", "photography")
            .await
            .assert_status_ok();

        let state: serde_json::Value = server.get("/feed/state").await.json();
        assert_eq!(state["filter"], "created");
        assert_eq!(state["tag"], "photography");
    }

    #[tokio::test]
    async fn tags_fragment() {
        let api = Arc::new(MockFeedApi::new().with_result("get_trending_tags", test_tags_json()));
        let server = server(api);

        let response = server.get("/tags").await;

        response.assert_status_ok();
        assert!(response.text().contains(r#"href="/?tag=photography""#));
    }
}

//! Feed renderer
//!
//! Renders posts, tags and profiles to HTML. Fragments are returned by the
//! incremental endpoints; `render_page` wraps them in the full page shell.

use urlencoding::encode;

use super::text::{
    first_image, format_date, format_payout, html_escape, post_link, remove_markdown,
    truncate_text,
};
use crate::domain::entities::{FeedFilter, FeedQuery, Post, TrendingTag, UserProfile};
use crate::error::FeedError;

/// Length of the body preview on a post card
const SUMMARY_CHARS: usize = 150;

/// Error notifications remove themselves after this long
const TOAST_DISMISS_MS: u32 = 5000;

const DEFAULT_AVATAR: &str = "https://via.placeholder.com/150";
const SMALL_AVATAR: &str = "https://via.placeholder.com/40";

/// Everything the full page needs
pub struct PageView<'a> {
    pub query: &'a FeedQuery,
    pub tags: &'a [TrendingTag],
    /// Pre-rendered first page (cards, end marker or error toast)
    pub feed_html: String,
}

/// Render one post as a card
pub fn render_post_card(post: &Post) -> String {
    let thumbnail = first_image(post)
        .map(|src| {
            format!(
                r#"<img src="{}" class="card-img-top post-thumbnail" alt="" loading="lazy">"#,
                html_escape(&src)
            )
        })
        .unwrap_or_default();

    let title = if post.title.is_empty() {
        "Untitled Post"
    } else {
        post.title.as_str()
    };
    let summary = truncate_text(&remove_markdown(&post.body), SUMMARY_CHARS);

    let tags: String = post
        .tags()
        .iter()
        .take(3)
        .map(|tag| {
            format!(
                r#"<a href="/?tag={}" class="badge bg-secondary me-1">#{}</a>"#,
                encode(tag),
                html_escape(tag)
            )
        })
        .collect();

    let author = html_escape(&post.author);

    format!(
        r#"<div class="col-md-6 col-lg-4 mb-4">
  <div class="card post-card h-100">
    {thumbnail}
    <div class="card-body">
      <div class="d-flex align-items-center mb-2">
        <img src="https://images.blurt.blog/u/{author}/avatar/small" class="rounded-circle me-2" width="32" height="32" alt="{author}" onerror="this.src='{SMALL_AVATAR}'">
        <a href="/users/{author}" class="post-author" data-profile="{author}">@{author}</a>
        <small class="text-muted ms-auto">{date}</small>
      </div>
      <h5 class="card-title"><a href="{link}" target="_blank" rel="noopener">{title}</a></h5>
      <p class="card-text">{summary}</p>
      <div class="mb-2">{tags}</div>
    </div>
    <div class="card-footer d-flex justify-content-between">
      <span><i class="fas fa-heart text-danger"></i> {votes}</span>
      <span><i class="fas fa-comment text-primary"></i> {comments}</span>
      <span>{payout} BLURT</span>
    </div>
  </div>
</div>
"#,
        date = html_escape(&format_date(post)),
        link = html_escape(&post_link(post)),
        title = html_escape(title),
        summary = html_escape(&summary),
        votes = post.vote_count(),
        comments = post.children,
        payout = format_payout(&post.pending_payout_value),
    )
}

/// Render a page of posts
pub fn render_posts(posts: &[Post]) -> String {
    posts.iter().map(render_post_card).collect()
}

/// Marker appended once the feed is exhausted
pub fn render_end_of_feed() -> String {
    r#"<div class="col-12 text-center text-muted my-4 feed-end">No more posts to show.</div>
"#
    .to_string()
}

/// A dismissible error notification
pub fn render_error_toast(message: &str) -> String {
    format!(
        r#"<div class="alert alert-danger alert-dismissible fade show error-toast" role="alert">
  {}
  <button type="button" class="btn-close" data-bs-dismiss="alert" aria-label="Close"></button>
</div>
"#,
        html_escape(message)
    )
}

/// Render the trending tag sidebar, highlighting the active tag
pub fn render_trending_tags(tags: &[TrendingTag], active: Option<&str>) -> String {
    if tags.is_empty() {
        return r#"<p class="text-muted small">No trending tags.</p>"#.to_string();
    }

    tags.iter()
        .map(|tag| {
            let class = if active == Some(tag.name.as_str()) {
                "trending-tag active"
            } else {
                "trending-tag"
            };
            let summary = format!(
                "{} posts, {} comments, {} votes, {}",
                tag.top_posts, tag.comments, tag.net_votes, tag.total_payouts
            );
            format!(
                r#"<a href="/?tag={}" class="{}" title="{}">#{}</a>
"#,
                encode(&tag.name),
                class,
                html_escape(summary.trim_end_matches(", ")),
                html_escape(&tag.name)
            )
        })
        .collect()
}

/// Render the profile view
pub fn render_profile(profile: &UserProfile) -> String {
    let account = &profile.account;
    let meta = account.profile();
    let name = html_escape(&account.name);

    let mut details = String::new();
    if let Some(about) = meta.about.as_deref().filter(|s| !s.is_empty()) {
        details.push_str(&format!(
            r#"<p class="text-muted">{}</p>"#,
            html_escape(about)
        ));
    }
    if let Some(location) = meta.location.as_deref().filter(|s| !s.is_empty()) {
        details.push_str(&format!(
            r#"<p><i class="fas fa-map-marker-alt me-2"></i>{}</p>"#,
            html_escape(location)
        ));
    }

    let website = meta
        .website
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|url| {
            format!(
                r#"<a href="{}" class="btn btn-outline-primary btn-sm" target="_blank" rel="noopener"><i class="fas fa-globe me-1"></i> Website</a>"#,
                html_escape(url)
            )
        })
        .unwrap_or_default();

    let posts = if profile.posts.is_empty() {
        r#"<div class="alert alert-info">No recent posts found for this user.</div>"#.to_string()
    } else {
        let items: String = profile.posts.iter().map(render_profile_post).collect();
        format!(r#"<div class="list-group">{}</div>"#, items)
    };

    format!(
        r#"<div class="row user-profile">
  <div class="col-md-4 text-center">
    <img src="{avatar}" alt="{name}" class="modal-profile-img" onerror="this.src='{DEFAULT_AVATAR}'">
    <h4>@{name}</h4>
    {details}
    <div class="d-flex justify-content-center gap-4 my-3">
      <div class="text-center"><div class="h5">{followers}</div><small>Followers</small></div>
      <div class="text-center"><div class="h5">{following}</div><small>Following</small></div>
    </div>
    {website}
    <p class="mt-3"><a href="https://blurt.blog/@{name}" target="_blank" rel="noopener">View on Blurt</a></p>
  </div>
  <div class="col-md-8">
    <h5 class="mb-3">Recent Posts</h5>
    {posts}
  </div>
</div>
"#,
        avatar = html_escape(&account.avatar_url()),
        followers = profile.follow_count.follower_count,
        following = profile.follow_count.following_count,
    )
}

fn render_profile_post(post: &Post) -> String {
    let title = if post.title.is_empty() {
        "Untitled Post"
    } else {
        post.title.as_str()
    };

    format!(
        r#"<a href="{link}" class="list-group-item list-group-item-action" target="_blank" rel="noopener">
  <div class="d-flex w-100 justify-content-between">
    <h6 class="mb-1">{title}</h6>
    <small>{date}</small>
  </div>
  <small class="text-muted"><i class="fas fa-heart text-danger"></i> {votes} | <i class="fas fa-comment text-primary"></i> {comments} | {payout} BLURT</small>
</a>
"#,
        link = html_escape(&post_link(post)),
        title = html_escape(title),
        date = html_escape(&format_date(post)),
        votes = post.vote_count(),
        comments = post.children,
        payout = format_payout(&post.pending_payout_value),
    )
}

/// Inline error shown in place of the profile content
pub fn render_profile_error(err: &FeedError) -> String {
    let message = match err {
        FeedError::UserNotFound(_) => "User not found".to_string(),
        other => other.to_string(),
    };

    format!(
        r#"<div class="alert alert-danger">
  Error loading profile: {}
  <br><small>Please check the username and try again</small>
</div>
"#,
        html_escape(&message)
    )
}

/// Render the full page shell around the first page of the feed
pub fn render_page(view: &PageView<'_>) -> String {
    let active_tag = view.query.tag.as_deref();

    let filters: String = FeedFilter::ALL
        .iter()
        .map(|filter| {
            let class = if active_tag.is_none() && *filter == view.query.filter {
                "nav-link active"
            } else {
                "nav-link"
            };
            format!(
                r#"<li class="nav-item"><a class="{}" href="/?filter={}">{}</a></li>"#,
                class,
                filter,
                capitalize(filter.as_str())
            )
        })
        .collect();

    let heading = match active_tag {
        Some(tag) => format!("#{}", html_escape(tag)),
        None => format!("{} posts", capitalize(view.query.filter.as_str())),
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Blurt Viewer</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
  <link href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css" rel="stylesheet">
</head>
<body>
<nav class="navbar navbar-expand-lg navbar-dark bg-dark mb-4">
  <div class="container">
    <a class="navbar-brand" href="/">Blurt Viewer</a>
    <ul class="navbar-nav me-auto">{filters}</ul>
    <form class="d-flex me-2" action="/" method="get" id="searchForm">
      <input class="form-control me-2" type="search" name="tag" placeholder="Search tag" value="{tag_value}">
      <button class="btn btn-outline-light" type="submit">Search</button>
    </form>
    <form class="d-flex" id="usernameSearchForm">
      <input class="form-control me-2" type="search" id="usernameSearchInput" placeholder="Username">
      <button class="btn btn-outline-light" type="submit">Find user</button>
    </form>
  </div>
</nav>
<div class="container">
  <div class="row">
    <div class="col-lg-9">
      <h2 class="mb-3">{heading}</h2>
      <div id="toastContainer"></div>
      <div class="row" id="postsContainer">
{feed}
      </div>
      <div id="loadingSpinner" class="text-center my-4" style="display:none">
        <div class="spinner-border" role="status"></div>
      </div>
    </div>
    <aside class="col-lg-3">
      <h5>Trending tags</h5>
      <div id="trendingTags">{tags}</div>
    </aside>
  </div>
</div>
<div class="modal fade" id="userProfileModal" tabindex="-1">
  <div class="modal-dialog modal-lg"><div class="modal-content">
    <div class="modal-header">
      <h5 class="modal-title" id="userProfileModalTitle"></h5>
      <button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="Close"></button>
    </div>
    <div class="modal-body" id="userProfileContent"></div>
  </div></div>
</div>
<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js"></script>
<script>
(function () {{
  const posts = document.getElementById('postsContainer');
  const spinner = document.getElementById('loadingSpinner');
  const toasts = document.getElementById('toastContainer');
  let done = posts.querySelector('.feed-end') !== null;
  let busy = false;

  function showToast(html) {{
    toasts.insertAdjacentHTML('beforeend', html);
    const el = toasts.lastElementChild;
    if (el) setTimeout(() => el.remove(), {toast_ms});
  }}

  async function loadMore() {{
    if (busy || done) return;
    busy = true;
    spinner.style.display = 'block';
    try {{
      const res = await fetch('/feed/next');
      if (res.status === 204) {{
        if (!posts.children.length) setTimeout(loadMore, 500);
        return;
      }}
      const html = await res.text();
      if (!res.ok) {{ showToast(html); return; }}
      if (res.headers.get('X-Feed-Exhausted') === 'true') done = true;
      posts.insertAdjacentHTML('beforeend', html);
    }} finally {{
      busy = false;
      spinner.style.display = 'none';
    }}
  }}

  let last = 0;
  window.addEventListener('scroll', function () {{
    const now = Date.now();
    if (now - last < 300) return;
    last = now;
    if (window.innerHeight + window.scrollY >= document.body.offsetHeight - 1000) loadMore();
  }});
  if (!posts.children.length) loadMore();

  const modal = new bootstrap.Modal(document.getElementById('userProfileModal'));
  async function showProfile(name) {{
    document.getElementById('userProfileModalTitle').textContent = '@' + name;
    const content = document.getElementById('userProfileContent');
    content.innerHTML = '<div class="text-center"><div class="spinner-border"></div></div>';
    modal.show();
    const res = await fetch('/users/' + encodeURIComponent(name));
    content.innerHTML = await res.text();
  }}

  document.addEventListener('click', function (e) {{
    const link = e.target.closest('[data-profile]');
    if (!link) return;
    e.preventDefault();
    showProfile(link.dataset.profile);
  }});

  document.getElementById('usernameSearchForm').addEventListener('submit', function (e) {{
    e.preventDefault();
    const name = document.getElementById('usernameSearchInput').value.trim();
    if (name) showProfile(name);
  }});
}})();
</script>
</body>
</html>
"##,
        tag_value = html_escape(active_tag.unwrap_or("")),
        feed = view.feed_html,
        toast_ms = TOAST_DISMISS_MS,
        tags = render_trending_tags(view.tags, active_tag),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

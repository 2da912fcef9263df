//! Text helpers for post previews

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::entities::Post;

fn markdown_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[#*_`\[\]]").expect("valid regex"))
}

fn html_tags() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid regex"))
}

fn html_image() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("valid regex"))
}

fn markdown_image() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[[^\]]*\]\((\S+?)\)").expect("valid regex"))
}

/// Escape text for interpolation into HTML
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip markdown punctuation and HTML tags, flattening to one line
pub fn remove_markdown(text: &str) -> String {
    let text = markdown_chars().replace_all(text, "");
    let text = html_tags().replace_all(&text, "");
    text.replace('\n', " ").trim().to_string()
}

/// Cut `text` to at most `max_chars` characters, appending `...` when cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Amount part of a payout like `"1.2345 BLURT"`, to two decimals
pub fn format_payout(value: &str) -> String {
    let amount = value
        .split_whitespace()
        .next()
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0);
    format!("{:.2}", amount)
}

/// Display date like `Jan 5, 2024`; the raw timestamp if it does not parse
pub fn format_date(post: &Post) -> String {
    post.created_at()
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| post.created.clone())
}

/// Thumbnail for a post: first image in the body, else from metadata
pub fn first_image(post: &Post) -> Option<String> {
    html_image()
        .captures(&post.body)
        .or_else(|| markdown_image().captures(&post.body))
        .map(|caps| caps[1].to_string())
        .or_else(|| post.metadata_image())
}

/// Link to a post on blurt.blog
pub fn post_link(post: &Post) -> String {
    if post.url.is_empty() {
        format!("https://blurt.blog/@{}/{}", post.author, post.permlink)
    } else {
        format!("https://blurt.blog/{}", post.url.trim_start_matches('/'))
    }
}

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.blurt.blog";
pub const DEFAULT_RELAY_URL: &str = "https://corsproxy.io/?";
pub const DEFAULT_POSTS_PER_PAGE: u32 = 10;
pub const DEFAULT_RPC_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    /// Primary Blurt JSON-RPC endpoint
    pub api_url: String,
    /// Relay prefix; the url-encoded API URL is appended to it.
    /// `None` disables the fallback attempt.
    pub relay_url: Option<String>,
    pub posts_per_page: u32,
    /// Per-request timeout; `RPC_TIMEOUT_SECS=0` disables it
    pub rpc_timeout: Option<Duration>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or unparseable
    /// values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let relay_url = match lookup("BLURT_RELAY_URL") {
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url),
            None => Some(DEFAULT_RELAY_URL.to_string()),
        };

        let posts_per_page = parse_or(lookup("POSTS_PER_PAGE"), DEFAULT_POSTS_PER_PAGE);

        Self {
            api_url: lookup("BLURT_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            relay_url,
            posts_per_page: if posts_per_page == 0 {
                DEFAULT_POSTS_PER_PAGE
            } else {
                posts_per_page
            },
            rpc_timeout: match parse_or(lookup("RPC_TIMEOUT_SECS"), DEFAULT_RPC_TIMEOUT_SECS) {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

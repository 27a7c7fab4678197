use std::time::Duration;

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::window::{PAGE_SIZE, SCROLL_TOLERANCE};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:6780";

const API_ENV: &str = "ACTIVITY_FEED_API";
const PAGE_SIZE_ENV: &str = "ACTIVITY_FEED_PAGE_SIZE";
const DEBOUNCE_ENV: &str = "ACTIVITY_FEED_DEBOUNCE_MS";

/// Tunables of the feed and of the HTTP loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub api_base: String,
    pub page_size: usize,
    pub debounce: Duration,
    pub scroll_tolerance: usize,
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            scroll_tolerance: SCROLL_TOLERANCE,
            connect_timeout: Duration::from_millis(2000),
            read_timeout: Duration::from_millis(5000),
        }
    }
}

impl FeedConfig {
    /// Defaults overridden by `ACTIVITY_FEED_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`FeedConfig::from_env`], reading variables through `lookup`.
    /// Unparseable values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(api) = lookup(API_ENV).filter(|value| !value.trim().is_empty()) {
            config.api_base = api.trim().to_string();
        }
        if let Some(page_size) = lookup(PAGE_SIZE_ENV)
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|size| *size > 0)
        {
            config.page_size = page_size;
        }
        if let Some(millis) = lookup(DEBOUNCE_ENV).and_then(|value| value.parse::<u64>().ok()) {
            config.debounce = Duration::from_millis(millis);
        }

        config
    }
}

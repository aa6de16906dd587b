use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use crate::detail::RetryPolicy;

const DEFAULT_LISTING_URL: &str =
    "https://www.topcv.vn/tim-viec-lam-moi-nhat?type_keyword=1&page={page}&sba=1";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub target_table: String,
    /// Directory for the optional CSV artifact; nothing is written when unset.
    pub data_path: Option<String>,
    pub crawl: CrawlConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let max_pages = match env::var("MAX_PAGES") {
            Ok(value) => value.parse().context("MAX_PAGES must be a valid number")?,
            Err(_) => 4,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            target_table: env::var("TARGET_TABLE").unwrap_or_else(|_| "job_listings".to_string()),
            data_path: env::var("DATA_PATH").ok(),
            crawl: CrawlConfig::default().with_max_pages(max_pages),
        })
    }
}

/// Tuning for one crawl run. Delays are fixed constants, no jitter; the
/// volume is low enough that nothing smarter is warranted.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Listing URL template; `{page}` is replaced with the page number.
    pub listing_url_template: String,
    pub start_page: u32,
    /// Safety cap on pagination, counted from `start_page`.
    pub max_pages: u32,
    /// Worker pool size for detail fetches within one page.
    pub workers: usize,
    /// Politeness delay between listing pages.
    pub page_delay: Duration,
    /// Delay between extracting a page and fanning out its detail fetches.
    pub pre_detail_delay: Duration,
    pub detail_retry: RetryPolicy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            listing_url_template: DEFAULT_LISTING_URL.to_string(),
            start_page: 1,
            max_pages: 4,
            workers: 5,
            page_delay: Duration::from_secs(10),
            pre_detail_delay: Duration::from_secs(2),
            detail_retry: RetryPolicy::default(),
        }
    }
}

impl CrawlConfig {
    pub fn listing_url(&self, page: u32) -> String {
        self.listing_url_template.replace("{page}", &page.to_string())
    }

    pub fn with_listing_url(mut self, template: impl Into<String>) -> Self {
        self.listing_url_template = template.into();
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_detail_retry(mut self, retry: RetryPolicy) -> Self {
        self.detail_retry = retry;
        self
    }

    /// Zero out every sleep; used by tests.
    pub fn without_delays(mut self) -> Self {
        self.page_delay = Duration::ZERO;
        self.pre_detail_delay = Duration::ZERO;
        self.detail_retry.backoff = Duration::ZERO;
        self
    }
}

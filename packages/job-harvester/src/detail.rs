//! Detail-page enrichment: per-link fetch of the fields the listing page
//! does not carry (remaining time, description), with bounded retries.

use std::time::Duration;

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use tracing::warn;

use crate::extract::element_text;
use crate::fetch::PageFetcher;
use crate::types::DetailInfo;

lazy_static! {
    static ref DEADLINE: Selector = Selector::parse("span.deadline").unwrap();
    static ref DESCRIPTION: Selector = Selector::parse("div.job-description__item--content").unwrap();
}

/// Retry bounds for one detail fetch. The site sometimes returns an empty
/// shell when hit too fast; a short wait and a second attempt usually works.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 2,
            backoff: Duration::from_secs(10),
        }
    }
}

pub fn parse_detail_page(html: &str) -> DetailInfo {
    let document = Html::parse_document(html);
    DetailInfo {
        time_remaining: document
            .select(&DEADLINE)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty()),
        description: document
            .select(&DESCRIPTION)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty()),
    }
}

/// Fetch and parse one job's detail page.
///
/// Never fails: transport errors, non-success statuses and pages missing both
/// fragments degrade to an empty `DetailInfo` once the attempts are spent.
pub async fn fetch_detail(fetcher: &dyn PageFetcher, link: &str, policy: &RetryPolicy) -> DetailInfo {
    for attempt in 1..=policy.attempts {
        match fetcher.fetch(link).await {
            Ok(page) if page.is_success() => {
                let detail = parse_detail_page(&page.body);
                if detail.time_remaining.is_some() || detail.description.is_some() {
                    return detail;
                }
                warn!(link = %link, attempt, "detail page missing deadline and description");
            }
            Ok(page) => {
                warn!(link = %link, status = page.status, attempt, "detail fetch returned non-success status");
            }
            Err(e) => {
                warn!(link = %link, attempt, error = %e, "detail fetch failed");
                continue;
            }
        }

        if attempt < policy.attempts {
            tokio::time::sleep(policy.backoff).await;
        }
    }

    DetailInfo::default()
}

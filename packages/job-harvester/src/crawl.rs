//! Crawl controller: sequential pagination with per-page concurrent detail
//! enrichment.
//!
//! The loop stops on the first of: page cap reached, non-success listing
//! response, a page with no listings, or a page whose first link was already
//! seen (the site has wrapped onto earlier content). Failures end the crawl
//! but never the process; whatever was accumulated is returned.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Local;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::CrawlConfig;
use crate::detail::fetch_detail;
use crate::extract::{convert_created_date, parse_listing_page};
use crate::fetch::PageFetcher;
use crate::types::{DetailInfo, JobRecord, ListingSummary};

/// Crawl listing pages and return the assembled records, in listing order.
pub async fn crawl_jobs<F>(fetcher: Arc<F>, config: &CrawlConfig) -> Vec<JobRecord>
where
    F: PageFetcher + 'static,
{
    let mut records = Vec::new();
    // Scoped to this invocation; duplicate detection never spans runs.
    let mut seen_links: HashSet<String> = HashSet::new();

    for page in config.start_page..config.start_page + config.max_pages {
        let url = config.listing_url(page);
        info!(page, url = %url, "crawling listing page");

        let fetched = match fetcher.fetch(&url).await {
            Ok(fetched) => fetched,
            Err(e) => {
                error!(page, error = %e, "listing fetch failed, stopping crawl");
                break;
            }
        };
        if !fetched.is_success() {
            warn!(page, status = fetched.status, "non-success listing response, treating as end of data");
            break;
        }

        let base = match Url::parse(&url) {
            Ok(base) => base,
            Err(e) => {
                error!(page, error = %e, "listing URL is not a valid base, stopping crawl");
                break;
            }
        };

        let summaries = parse_listing_page(&fetched.body, &base);
        if summaries.is_empty() {
            info!(page, "no listings found, end of pagination");
            break;
        }

        // A repeated first link means the site served content from an
        // earlier page; continuing would loop forever.
        if seen_links.contains(&summaries[0].link) {
            info!(page, link = %summaries[0].link, "duplicate page detected, stopping crawl");
            break;
        }

        let mut kept = Vec::new();
        for summary in summaries {
            if !seen_links.insert(summary.link.clone()) {
                debug!(link = %summary.link, "already seen, skipping listing");
                continue;
            }
            kept.push(summary);
        }

        tokio::time::sleep(config.pre_detail_delay).await;
        let details = fetch_page_details(fetcher.clone(), &kept, config).await;

        let today = Local::now().date_naive();
        for summary in kept {
            let detail = details.get(&summary.link).cloned().unwrap_or_default();
            let created_date = summary
                .created_date_text
                .as_deref()
                .and_then(|text| convert_created_date(text, today));
            records.push(JobRecord::from_parts(summary, detail, created_date));
        }

        info!(page, total = records.len(), "page complete");
        tokio::time::sleep(config.page_delay).await;
    }

    info!(records = records.len(), "crawl finished");
    records
}

/// Fetch details for one page's kept summaries through a bounded worker pool,
/// joining results back by link. All workers finish before this returns.
async fn fetch_page_details<F>(
    fetcher: Arc<F>,
    summaries: &[ListingSummary],
    config: &CrawlConfig,
) -> HashMap<String, DetailInfo>
where
    F: PageFetcher + 'static,
{
    let semaphore = Arc::new(Semaphore::new(config.workers));
    let mut handles = Vec::with_capacity(summaries.len());

    for summary in summaries {
        let link = summary.link.clone();
        let fetcher = fetcher.clone();
        let semaphore = semaphore.clone();
        let retry = config.detail_retry.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await.ok()?;
            let detail = fetch_detail(fetcher.as_ref(), &link, &retry).await;
            Some((link, detail))
        }));
    }

    let mut details = HashMap::new();
    for handle in handles {
        match handle.await {
            Ok(Some((link, detail))) => {
                details.insert(link, detail);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "detail worker panicked"),
        }
    }
    details
}

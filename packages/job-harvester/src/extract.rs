//! Listing-page extraction: CSS-selector scraping of job summaries plus the
//! small text cleanups the listing markup requires.

use chrono::{Duration, Months, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;
use url::Url;

use crate::types::ListingSummary;

/// Everything from this marker onward is per-impression tracking noise.
const TRACKING_MARKER: &str = "&u_sr_id=";

lazy_static! {
    static ref JOB_ITEM: Selector = Selector::parse("div.job-item-search-result").unwrap();
    static ref TITLE_LINK: Selector = Selector::parse("h3.title a").unwrap();
    static ref TITLE_TEXT: Selector = Selector::parse("h3.title a span").unwrap();
    static ref COMPANY: Selector = Selector::parse("span.company-name").unwrap();
    static ref SALARY: Selector = Selector::parse("div.info label.salary span").unwrap();
    static ref ADDRESS: Selector = Selector::parse("div.info label.address").unwrap();
    static ref CREATED: Selector = Selector::parse("label.label-update").unwrap();
    static ref ADDRESS_ITEM: Regex = Regex::new(r"<li>(.*?)</li>").unwrap();
    static ref BR_TAG: Regex = Regex::new(r"<br\s*/?>").unwrap();
    static ref ANY_TAG: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref RELATIVE_DATE: Regex = Regex::new(r"(\d+)\s+(ngày|tuần|tháng|năm)\s+trước").unwrap();
}

/// Collect an element's text nodes, trimmed and joined with single spaces.
pub(crate) fn element_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Canonical form of a job link: tracking suffix cut, relative hrefs
/// resolved against the listing page URL.
pub fn canonical_link(href: &str, base: &Url) -> Option<String> {
    let cut = href.split(TRACKING_MARKER).next().unwrap_or(href);
    base.join(cut).ok().map(|u| u.to_string())
}

/// Parse one listing page into its job summaries.
///
/// Items missing a link or a title cannot satisfy the record invariants and
/// are skipped.
pub fn parse_listing_page(html: &str, base: &Url) -> Vec<ListingSummary> {
    let document = Html::parse_document(html);
    let mut summaries = Vec::new();

    for item in document.select(&JOB_ITEM) {
        let link = item
            .select(&TITLE_LINK)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| canonical_link(href, base));
        let Some(link) = link else {
            warn!("listing item without a job link, skipping");
            continue;
        };

        let title = item
            .select(&TITLE_TEXT)
            .next()
            .map(element_text)
            .and_then(non_empty);
        let Some(title) = title else {
            warn!(link = %link, "listing item without a title, skipping");
            continue;
        };

        summaries.push(ListingSummary {
            link,
            title,
            company: item.select(&COMPANY).next().map(element_text).and_then(non_empty),
            raw_salary: item.select(&SALARY).next().map(element_text).and_then(non_empty),
            raw_address: item
                .select(&ADDRESS)
                .next()
                .and_then(|el| el.value().attr("title"))
                .map(clean_address_attr)
                .and_then(non_empty),
            created_date_text: item.select(&CREATED).next().map(element_text).and_then(non_empty),
        });
    }

    summaries
}

/// The address lives in a `title` attribute as an HTML fragment. Two shapes
/// occur: a `<li>` list (joined with `:`), or free text with `<br>` breaks.
pub fn clean_address_attr(raw: &str) -> String {
    let items: Vec<&str> = ADDRESS_ITEM
        .captures_iter(raw)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()).trim())
        .collect();
    if !items.is_empty() {
        return items.join(":");
    }

    let with_separators = BR_TAG.replace_all(raw, ": ");
    ANY_TAG.replace_all(&with_separators, "").trim().to_string()
}

/// Turn the site's relative posted-date text ("3 ngày trước", "hôm nay", …)
/// into a calendar date. Unrecognised text yields `None`.
pub fn convert_created_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if text.contains("hôm nay") || text.contains("phút") || text.contains("giờ") {
        return Some(today);
    }

    let caps = RELATIVE_DATE.captures(text)?;
    let diff: u32 = caps[1].parse().ok()?;

    match &caps[2] {
        "ngày" => Some(today - Duration::days(i64::from(diff))),
        "tuần" => Some(today - Duration::weeks(i64::from(diff))),
        "tháng" => today.checked_sub_months(Months::new(diff)),
        "năm" => today.checked_sub_months(Months::new(diff * 12)),
        _ => Some(today),
    }
}

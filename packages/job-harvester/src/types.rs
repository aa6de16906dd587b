use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One job as it appears on a listing page. Ephemeral: held only while the
/// owning page is being processed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSummary {
    /// Canonical job URL with the tracking query parameter stripped.
    pub link: String,
    pub title: String,
    pub company: Option<String>,
    pub raw_salary: Option<String>,
    pub raw_address: Option<String>,
    pub created_date_text: Option<String>,
}

/// Fields only present on a job's detail page. Both may be absent; the site
/// regularly omits them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailInfo {
    pub time_remaining: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyUnit {
    Vnd,
    Usd,
}

impl CurrencyUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyUnit::Vnd => "VND",
            CurrencyUnit::Usd => "USD",
        }
    }
}

impl std::fmt::Display for CurrencyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical unit flowing through the pipeline: listing summary plus
/// detail fields, with the derived columns filled in by the normalizer.
///
/// `link` is unique across one crawl run; `title` is always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub link: String,
    pub title: String,
    pub company: Option<String>,
    pub raw_salary: Option<String>,
    pub raw_address: Option<String>,
    pub time_remaining: Option<String>,
    pub description: Option<String>,
    pub created_date: Option<NaiveDate>,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub currency_unit: Option<CurrencyUnit>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub job_group: Option<String>,
}

impl JobRecord {
    /// Assemble a record once both the summary and its detail data exist.
    /// Derived fields start empty and are attached by `normalize::enrich`.
    pub fn from_parts(
        summary: ListingSummary,
        detail: DetailInfo,
        created_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            link: summary.link,
            title: summary.title,
            company: summary.company,
            raw_salary: summary.raw_salary,
            raw_address: summary.raw_address,
            time_remaining: detail.time_remaining,
            description: detail.description,
            created_date,
            min_salary: None,
            max_salary: None,
            currency_unit: None,
            city: None,
            district: None,
            job_group: None,
        }
    }
}

/// Durable row shape, as the reporting stage reads it back with `SELECT *`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PersistedJob {
    pub id: i32,
    pub created_date: Option<NaiveDate>,
    pub job_title: String,
    pub company: Option<String>,
    pub salary: Option<String>,
    pub address: Option<String>,
    pub time_remaining: Option<String>,
    pub link: String,
    pub min_salary: Option<f64>,
    pub max_salary: Option<f64>,
    pub unit: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub job_group: Option<String>,
}

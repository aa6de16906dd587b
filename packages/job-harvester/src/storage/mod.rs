use std::collections::HashSet;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::types::{JobRecord, PersistedJob};

pub mod postgres;
pub use postgres::PostgresJobStore;

/// Persistence boundary for normalized job records.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Merge a batch into `target_table` atomically: either every row lands
    /// or none do. Records sharing a `link` within the batch are not
    /// deduplicated here; such a batch fails as a whole.
    async fn load_jobs(&self, records: &[JobRecord], target_table: &str) -> Result<()>;

    /// Read the whole table back, as the reporting stage does.
    async fn fetch_jobs(&self, target_table: &str) -> Result<Vec<PersistedJob>>;
}

/// Data-quality gate run before any SQL: a batch with an empty business key
/// or a repeated one is refused outright.
pub fn validate_batch(records: &[JobRecord]) -> Result<()> {
    let mut links = HashSet::new();
    for record in records {
        if record.link.is_empty() {
            bail!("record {:?} has an empty link", record.title);
        }
        if record.title.is_empty() {
            bail!("record {} has an empty title", record.link);
        }
        if !links.insert(record.link.as_str()) {
            bail!("batch contains duplicate link {}", record.link);
        }
    }
    Ok(())
}

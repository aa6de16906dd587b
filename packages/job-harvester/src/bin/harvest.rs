//! End-to-end run: crawl the listing site, normalize the batch, write the
//! optional CSV artifact, then merge into Postgres.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use job_harvester::config::Config;
use job_harvester::crawl::crawl_jobs;
use job_harvester::fetch::HttpFetcher;
use job_harvester::storage::{validate_batch, JobStore, PostgresJobStore};
use job_harvester::{export, normalize};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let fetcher = Arc::new(HttpFetcher::new()?);

    let mut records = crawl_jobs(fetcher, &config.crawl).await;
    if records.is_empty() {
        warn!("no records scraped, nothing to load");
        return Ok(());
    }

    normalize::enrich(&mut records);

    if let Some(dir) = &config.data_path {
        let path = Path::new(dir).join("jobs.csv");
        export::write_csv(&path, &records)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote csv artifact");
    }

    validate_batch(&records)?;

    let store = PostgresJobStore::connect(&config.database_url).await?;
    store.load_jobs(&records, &config.target_table).await?;
    info!(rows = records.len(), table = %config.target_table, "harvest complete");

    Ok(())
}

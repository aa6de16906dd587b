pub mod config;
pub mod crawl;
pub mod detail;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod storage;
pub mod types;

// Re-exports for clean API
pub use config::{Config, CrawlConfig};
pub use crawl::crawl_jobs;
pub use detail::{fetch_detail, RetryPolicy};
pub use fetch::{FetchedPage, HttpFetcher, PageFetcher};
pub use normalize::{classify_title, parse_salary, split_address, ParsedSalary};
pub use storage::{validate_batch, JobStore, PostgresJobStore};
pub use types::{CurrencyUnit, DetailInfo, JobRecord, ListingSummary, PersistedJob};

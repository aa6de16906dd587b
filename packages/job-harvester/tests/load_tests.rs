//! Loader integration tests against a disposable Postgres container.
//!
//! If no container runtime is available the tests log a skip and pass, the
//! same way the legacy suite skipped when its test database was unreachable.

use chrono::NaiveDate;
use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::postgres::Postgres;

use job_harvester::storage::{JobStore, PostgresJobStore};
use job_harvester::types::{CurrencyUnit, DetailInfo, JobRecord, ListingSummary};

async fn start_store() -> Option<(ContainerAsync<Postgres>, PostgresJobStore)> {
    let container = match Postgres::default().start().await {
        Ok(container) => container,
        Err(e) => {
            eprintln!("skipping loader tests: cannot start Postgres container: {e}");
            return None;
        }
    };

    let host = container.get_host().await.ok()?;
    let port = container.get_host_port_ipv4(5432).await.ok()?;
    let url = format!("postgresql://postgres:postgres@{host}:{port}/postgres");

    let store = PostgresJobStore::connect(&url)
        .await
        .expect("connect to container database");
    Some((container, store))
}

fn record(link: &str, title: &str, min_salary: Option<f64>) -> JobRecord {
    let mut record = JobRecord::from_parts(
        ListingSummary {
            link: link.to_string(),
            title: title.to_string(),
            company: Some("Test Company".to_string()),
            raw_salary: Some("10 - 20 triệu".to_string()),
            raw_address: Some("Hà Nội: Cầu Giấy".to_string()),
            created_date_text: None,
        },
        DetailInfo {
            time_remaining: Some("Còn 10 ngày".to_string()),
            description: Some("Mô tả".to_string()),
        },
        NaiveDate::from_ymd_opt(2025, 1, 1),
    );
    record.min_salary = min_salary;
    record.max_salary = min_salary.map(|v| v * 2.0);
    record.currency_unit = Some(CurrencyUnit::Vnd);
    record.city = Some("Hà Nội".to_string());
    record.district = Some("Cầu Giấy".to_string());
    record.job_group = Some("Software Engineer".to_string());
    record
}

#[tokio::test]
async fn load_then_read_back() {
    let Some((_container, store)) = start_store().await else {
        return;
    };

    let records = vec![
        record("https://example.vn/viec-lam/a", "Java Developer", Some(10_000_000.0)),
        record("https://example.vn/viec-lam/b", "Tester", None),
    ];
    store.load_jobs(&records, "jobs_read_back").await.unwrap();

    let rows = store.fetch_jobs("jobs_read_back").await.unwrap();
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    assert_eq!(first.id, 1);
    assert_eq!(first.job_title, "Java Developer");
    assert_eq!(first.link, "https://example.vn/viec-lam/a");
    assert_eq!(first.created_date, NaiveDate::from_ymd_opt(2025, 1, 1));
    assert_eq!(first.min_salary, Some(10_000_000.0));
    assert_eq!(first.max_salary, Some(20_000_000.0));
    assert_eq!(first.unit.as_deref(), Some("VND"));
    assert_eq!(first.city.as_deref(), Some("Hà Nội"));
    assert_eq!(first.district.as_deref(), Some("Cầu Giấy"));
    assert_eq!(first.job_group.as_deref(), Some("Software Engineer"));
    assert_eq!(first.time_remaining.as_deref(), Some("Còn 10 ngày"));

    assert_eq!(rows[1].min_salary, None);
}

#[tokio::test]
async fn reloading_same_link_updates_in_place() {
    let Some((_container, store)) = start_store().await else {
        return;
    };

    let table = "jobs_idempotent";
    store
        .load_jobs(
            &[record("https://example.vn/viec-lam/a", "Java Developer", Some(10_000_000.0))],
            table,
        )
        .await
        .unwrap();

    store
        .load_jobs(
            &[record("https://example.vn/viec-lam/a", "Senior Java Developer", Some(20_000_000.0))],
            table,
        )
        .await
        .unwrap();

    let rows = store.fetch_jobs(table).await.unwrap();
    assert_eq!(rows.len(), 1, "second load must update, not insert");
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[0].job_title, "Senior Java Developer");
    assert_eq!(rows[0].min_salary, Some(20_000_000.0));
}

#[tokio::test]
async fn duplicate_link_batch_rolls_back_to_empty() {
    let Some((_container, store)) = start_store().await else {
        return;
    };

    let table = "jobs_rollback_empty";
    let batch = vec![
        record("https://example.vn/viec-lam/a", "Java Developer", Some(10_000_000.0)),
        record("https://example.vn/viec-lam/a", "Tester", None),
    ];

    let result = store.load_jobs(&batch, table).await;
    assert!(result.is_err(), "staging unique constraint must fail the load");

    // The whole transaction rolled back, including the target-table creation.
    assert!(store.fetch_jobs(table).await.is_err());
}

#[tokio::test]
async fn failed_load_leaves_existing_rows_untouched() {
    let Some((_container, store)) = start_store().await else {
        return;
    };

    let table = "jobs_rollback_existing";
    store
        .load_jobs(
            &[record("https://example.vn/viec-lam/a", "Java Developer", Some(10_000_000.0))],
            table,
        )
        .await
        .unwrap();

    let bad_batch = vec![
        record("https://example.vn/viec-lam/b", "Tester", None),
        record("https://example.vn/viec-lam/b", "DevOps", None),
    ];
    assert!(store.load_jobs(&bad_batch, table).await.is_err());

    let rows = store.fetch_jobs(table).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].job_title, "Java Developer");
}

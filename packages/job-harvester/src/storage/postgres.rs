use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use super::JobStore;
use crate::types::{JobRecord, PersistedJob};

/// Non-key columns shared by the target and staging tables, in insert order.
const COLUMNS: &str = "created_date, job_title, company, salary, address, \
                       time_remaining, link, min_salary, max_salary, unit, \
                       city, district, job_group";

pub struct PostgresJobStore {
    pool: PgPool,
}

impl PostgresJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Table names are interpolated into DDL and cannot be bound; only plain
/// identifiers are accepted.
fn validate_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if !valid {
        bail!("invalid table name: {name:?}");
    }
    Ok(())
}

#[async_trait]
impl JobStore for PostgresJobStore {
    async fn load_jobs(&self, records: &[JobRecord], target_table: &str) -> Result<()> {
        validate_table_name(target_table)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to open load transaction")?;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {target_table} (
                id SERIAL PRIMARY KEY,
                created_date DATE,
                job_title TEXT NOT NULL,
                company TEXT,
                salary TEXT,
                address TEXT,
                time_remaining VARCHAR(256),
                link TEXT NOT NULL,
                min_salary DOUBLE PRECISION,
                max_salary DOUBLE PRECISION,
                unit VARCHAR(25),
                city TEXT,
                district TEXT,
                job_group TEXT
            )
            "#
        ))
        .persistent(false)
        .execute(&mut *tx)
        .await
        .context("Failed to create target table")?;

        // Session-scoped staging table; UNIQUE (link) makes a batch that
        // repeats a business key fail as a whole. ON COMMIT DROP guarantees
        // no staging table survives the transaction either way.
        sqlx::query(
            r#"
            CREATE TEMP TABLE staging_jobs (
                id SERIAL PRIMARY KEY,
                created_date DATE,
                job_title TEXT NOT NULL,
                company TEXT,
                salary TEXT,
                address TEXT,
                time_remaining VARCHAR(256),
                link TEXT NOT NULL UNIQUE,
                min_salary DOUBLE PRECISION,
                max_salary DOUBLE PRECISION,
                unit VARCHAR(25),
                city TEXT,
                district TEXT,
                job_group TEXT
            ) ON COMMIT DROP
            "#,
        )
        .persistent(false)
        .execute(&mut *tx)
        .await
        .context("Failed to create staging table")?;

        // The staging serial assigns 1..N here; the merge below is keyed on
        // those ids, so a re-run updates the same target rows in place.
        for record in records {
            sqlx::query(&format!(
                "INSERT INTO staging_jobs ({COLUMNS}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
            ))
            // temp-table OIDs change per call; skip the prepared-statement cache
            .persistent(false)
            .bind(record.created_date)
            .bind(&record.title)
            .bind(&record.company)
            .bind(&record.raw_salary)
            .bind(&record.raw_address)
            .bind(&record.time_remaining)
            .bind(&record.link)
            .bind(record.min_salary)
            .bind(record.max_salary)
            .bind(record.currency_unit.map(|unit| unit.as_str()))
            .bind(&record.city)
            .bind(&record.district)
            .bind(&record.job_group)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to stage record {}", record.link))?;
        }

        sqlx::query(&format!(
            r#"
            INSERT INTO {target_table} (id, {COLUMNS})
            SELECT id, {COLUMNS} FROM staging_jobs
            ON CONFLICT (id) DO UPDATE
            SET created_date = EXCLUDED.created_date,
                job_title = EXCLUDED.job_title,
                company = EXCLUDED.company,
                salary = EXCLUDED.salary,
                address = EXCLUDED.address,
                time_remaining = EXCLUDED.time_remaining,
                link = EXCLUDED.link,
                min_salary = EXCLUDED.min_salary,
                max_salary = EXCLUDED.max_salary,
                unit = EXCLUDED.unit,
                city = EXCLUDED.city,
                district = EXCLUDED.district,
                job_group = EXCLUDED.job_group
            "#
        ))
        .persistent(false)
        .execute(&mut *tx)
        .await
        .context("Failed to merge staging rows into target table")?;

        tx.commit().await.context("Failed to commit load transaction")?;

        info!(rows = records.len(), table = target_table, "load committed");
        Ok(())
    }

    async fn fetch_jobs(&self, target_table: &str) -> Result<Vec<PersistedJob>> {
        validate_table_name(target_table)?;

        sqlx::query_as::<_, PersistedJob>(&format!(
            "SELECT * FROM {target_table} ORDER BY id"
        ))
        .persistent(false)
        .fetch_all(&self.pool)
        .await
        .context("Failed to read jobs table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_name_validation() {
        assert!(validate_table_name("job_listings").is_ok());
        assert!(validate_table_name("_staging2").is_ok());
        assert!(validate_table_name("").is_err());
        assert!(validate_table_name("2fast").is_err());
        assert!(validate_table_name("jobs; drop table jobs").is_err());
    }
}

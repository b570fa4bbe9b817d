//! PostgreSQL implementation of LedgerSource
//!
//! `snapshot` reads both tables inside one read-only REPEATABLE READ
//! transaction so productions and transfers come from the same view.

use async_trait::async_trait;
use sqlx::PgExecutor;

use medbill::{DomainError, LedgerSnapshot, LedgerSource, Production, RecordFilter, Transfer};

use super::production_repository::ProductionRow;
use super::transfer_repository::TransferRow;
use super::{map_db_error, PgRecordStore};

async fn fetch_productions<'e, E: PgExecutor<'e>>(
    executor: E,
    filter: &RecordFilter,
) -> Result<Vec<Production>, DomainError> {
    let rows = sqlx::query_as::<_, ProductionRow>(
        r#"
        SELECT * FROM productions
        WHERE ($1::uuid IS NULL OR doctor_id = $1)
          AND ($2::uuid IS NULL OR hospital_id = $2)
          AND ($3::date IS NULL OR production_date >= $3)
          AND ($4::date IS NULL OR production_date <= $4)
        ORDER BY production_date DESC, created_at DESC
        "#,
    )
    .bind(filter.doctor)
    .bind(filter.hospital)
    .bind(filter.period.start)
    .bind(filter.period.end)
    .fetch_all(executor)
    .await
    .map_err(map_db_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

async fn fetch_transfers<'e, E: PgExecutor<'e>>(
    executor: E,
    filter: &RecordFilter,
) -> Result<Vec<Transfer>, DomainError> {
    let rows = sqlx::query_as::<_, TransferRow>(
        r#"
        SELECT * FROM transfers
        WHERE ($1::uuid IS NULL OR doctor_id = $1)
          AND ($2::uuid IS NULL OR hospital_id = $2)
          AND ($3::date IS NULL OR transfer_date >= $3)
          AND ($4::date IS NULL OR transfer_date <= $4)
        ORDER BY transfer_date DESC, created_at DESC
        "#,
    )
    .bind(filter.doctor)
    .bind(filter.hospital)
    .bind(filter.period.start)
    .bind(filter.period.end)
    .fetch_all(executor)
    .await
    .map_err(map_db_error)?;

    Ok(rows.into_iter().map(Into::into).collect())
}

#[async_trait]
impl LedgerSource for PgRecordStore {
    async fn list_productions(&self, filter: &RecordFilter) -> Result<Vec<Production>, DomainError> {
        fetch_productions(&self.pool, filter).await
    }

    async fn list_transfers(&self, filter: &RecordFilter) -> Result<Vec<Transfer>, DomainError> {
        fetch_transfers(&self.pool, filter).await
    }

    async fn snapshot(&self, filter: &RecordFilter) -> Result<LedgerSnapshot, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let productions = fetch_productions(&mut *tx, filter).await?;
        let transfers = fetch_transfers(&mut *tx, filter).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(LedgerSnapshot {
            productions,
            transfers,
        })
    }
}

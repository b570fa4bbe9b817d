//! PostgreSQL implementation of TransferRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use medbill::{DomainError, Transfer, TransferRepository};

use super::{map_db_error, PgRecordStore};

#[derive(sqlx::FromRow)]
pub(super) struct TransferRow {
    id: Uuid,
    doctor_id: Uuid,
    hospital_id: Uuid,
    amount: Decimal,
    transfer_date: NaiveDate,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<TransferRow> for Transfer {
    fn from(row: TransferRow) -> Self {
        Self {
            id: row.id,
            doctor: row.doctor_id,
            hospital: row.hospital_id,
            amount: row.amount,
            transfer_date: row.transfer_date,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TransferRepository for PgRecordStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Transfer>, DomainError> {
        let row = sqlx::query_as::<_, TransferRow>("SELECT * FROM transfers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, transfer: &Transfer) -> Result<Transfer, DomainError> {
        let row = sqlx::query_as::<_, TransferRow>(
            r#"
            INSERT INTO transfers (id, doctor_id, hospital_id, amount, transfer_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET doctor_id = EXCLUDED.doctor_id, hospital_id = EXCLUDED.hospital_id,
                amount = EXCLUDED.amount, transfer_date = EXCLUDED.transfer_date
            RETURNING *
            "#,
        )
        .bind(transfer.id)
        .bind(transfer.doctor)
        .bind(transfer.hospital)
        .bind(transfer.amount)
        .bind(transfer.transfer_date)
        .bind(transfer.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM transfers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

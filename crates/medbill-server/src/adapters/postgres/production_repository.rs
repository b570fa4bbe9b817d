//! PostgreSQL implementation of ProductionRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use medbill::{DomainError, Production, ProductionRepository};

use super::{map_db_error, PgRecordStore};

#[derive(sqlx::FromRow)]
pub(super) struct ProductionRow {
    id: Uuid,
    doctor_id: Uuid,
    hospital_id: Uuid,
    amount: Decimal,
    production_date: NaiveDate,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProductionRow> for Production {
    fn from(row: ProductionRow) -> Self {
        Self {
            id: row.id,
            doctor: row.doctor_id,
            hospital: row.hospital_id,
            amount: row.amount,
            production_date: row.production_date,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ProductionRepository for PgRecordStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Production>, DomainError> {
        let row = sqlx::query_as::<_, ProductionRow>("SELECT * FROM productions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn save(&self, production: &Production) -> Result<Production, DomainError> {
        let row = sqlx::query_as::<_, ProductionRow>(
            r#"
            INSERT INTO productions (id, doctor_id, hospital_id, amount, production_date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET doctor_id = EXCLUDED.doctor_id, hospital_id = EXCLUDED.hospital_id,
                amount = EXCLUDED.amount, production_date = EXCLUDED.production_date
            RETURNING *
            "#,
        )
        .bind(production.id)
        .bind(production.doctor)
        .bind(production.hospital)
        .bind(production.amount)
        .bind(production.production_date)
        .bind(production.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM productions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

//! PostgreSQL implementation of HospitalRepository

use async_trait::async_trait;
use uuid::Uuid;

use medbill::{DomainError, Hospital, HospitalRepository};

use super::{map_db_error, PgRecordStore};

#[derive(sqlx::FromRow)]
struct HospitalRow {
    id: Uuid,
    name: String,
    code: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<HospitalRow> for Hospital {
    fn from(row: HospitalRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            code: row.code,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl HospitalRepository for PgRecordStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Hospital>, DomainError> {
        let row = sqlx::query_as::<_, HospitalRow>("SELECT * FROM hospitals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Hospital>, DomainError> {
        let rows = sqlx::query_as::<_, HospitalRow>("SELECT * FROM hospitals ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save(&self, hospital: &Hospital) -> Result<Hospital, DomainError> {
        let row = sqlx::query_as::<_, HospitalRow>(
            r#"
            INSERT INTO hospitals (id, name, code, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, code = EXCLUDED.code
            RETURNING *
            "#,
        )
        .bind(hospital.id)
        .bind(&hospital.name)
        .bind(&hospital.code)
        .bind(hospital.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM hospitals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM hospitals WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

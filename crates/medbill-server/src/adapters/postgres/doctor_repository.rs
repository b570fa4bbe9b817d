//! PostgreSQL implementation of DoctorRepository

use async_trait::async_trait;
use uuid::Uuid;

use medbill::{Doctor, DoctorRepository, DomainError};

use super::{map_db_error, PgRecordStore};

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct DoctorRow {
    id: Uuid,
    name: String,
    crm: String,
    specialty: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<DoctorRow> for Doctor {
    fn from(row: DoctorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            crm: row.crm,
            specialty: row.specialty,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl DoctorRepository for PgRecordStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError> {
        let row = sqlx::query_as::<_, DoctorRow>("SELECT * FROM doctors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Doctor>, DomainError> {
        let rows = sqlx::query_as::<_, DoctorRow>("SELECT * FROM doctors ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn save(&self, doctor: &Doctor) -> Result<Doctor, DomainError> {
        let row = sqlx::query_as::<_, DoctorRow>(
            r#"
            INSERT INTO doctors (id, name, crm, specialty, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, crm = EXCLUDED.crm, specialty = EXCLUDED.specialty
            RETURNING *
            "#,
        )
        .bind(doctor.id)
        .bind(&doctor.name)
        .bind(&doctor.crm)
        .bind(&doctor.specialty)
        .bind(doctor.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM doctors WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

//! PostgreSQL Repository Implementations
//!
//! One `PgRecordStore` implements every repository port; each port lives
//! in its own file.

mod doctor_repository;
mod hospital_repository;
mod ledger_source;
mod production_repository;
mod transfer_repository;

use medbill::DomainError;
use sqlx::PgPool;

/// PostgreSQL-backed record store
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error, turning constraint violations into domain errors
fn map_db_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return DomainError::Conflict(db.message().to_string());
        }
        if db.is_foreign_key_violation() {
            return DomainError::Validation(db.message().to_string());
        }
        if db.is_check_violation() {
            return DomainError::Validation(db.message().to_string());
        }
    }
    DomainError::Repository(e.to_string())
}

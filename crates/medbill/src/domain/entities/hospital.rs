//! Hospital - Place where production happens

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::doctor::NAME_MAX_LEN;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::require_text;

/// Maximum length of a hospital code
pub const CODE_MAX_LEN: usize = 50;

/// Hospital - identified by a stable id and a unique code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl Hospital {
    /// Create a new Hospital with generated ID and timestamp
    pub fn new(name: String, code: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            code: code.trim().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name, NAME_MAX_LEN)?;
        require_text("code", &self.code, CODE_MAX_LEN)?;
        Ok(())
    }
}

//! Doctor - Professional who produces billable work
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::value_objects::require_text;

/// Maximum length of a CRM license code
pub const CRM_MAX_LEN: usize = 50;
/// Maximum length of a specialty label
pub const SPECIALTY_MAX_LEN: usize = 100;
/// Maximum length of a display name
pub const NAME_MAX_LEN: usize = 255;

/// Doctor - identified by a stable id, licensed by a unique CRM code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub crm: String,
    pub specialty: String,
    pub created_at: DateTime<Utc>,
}

impl Doctor {
    /// Create a new Doctor with generated ID and timestamp
    pub fn new(name: String, crm: String, specialty: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            crm: crm.trim().to_string(),
            specialty: specialty.trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Check field presence and length limits
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name, NAME_MAX_LEN)?;
        require_text("crm", &self.crm, CRM_MAX_LEN)?;
        require_text("specialty", &self.specialty, SPECIALTY_MAX_LEN)?;
        Ok(())
    }
}

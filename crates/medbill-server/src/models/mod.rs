//! Medbill Data Models
//!
//! Request/response DTOs for the HTTP API.
//! - Doctor, Hospital: registry entries
//! - Production, Transfer: ledger records
//! - Summary: financial summary and its query

mod doctor;
mod hospital;
mod ledger;
mod summary;

pub use doctor::*;
pub use hospital::*;
pub use ledger::*;
pub use summary::*;

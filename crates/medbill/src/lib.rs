//! Medbill Domain Library
//!
//! Core domain types and interfaces for the Medbill record keeper.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Doctor, Hospital, Production, Transfer)
//!   - `value_objects/`: Immutable value types (DateRange, RecordFilter, money helpers)
//!   - `services/`: The financial summary engine
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!
//! - **Adapters** (`adapters/`): Infrastructure-free port implementations
//!   - `memory`: In-memory record store
//!
//! # Usage
//!
//! ```rust,ignore
//! use medbill::domain::{FinancialSummaryEngine, SummaryQuery};
//! use medbill::adapters::InMemoryRecordStore;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use adapters::InMemoryRecordStore;
pub use domain::{
    format_brl, parse_optional_date, round_currency, summarize, DateRange, Doctor, DomainError,
    FinancialSummary, FinancialSummaryEngine, Hospital, LedgerEntry, LedgerSnapshot, Production,
    RecordFilter, SummaryQuery, Transfer, ISO_DATE_FORMAT,
};
pub use ports::{
    DoctorRepository, HospitalRepository, LedgerSource, ProductionRepository, RecordStore,
    TransferRepository,
};

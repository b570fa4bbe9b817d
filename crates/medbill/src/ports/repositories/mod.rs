//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod doctor_repository;
mod hospital_repository;
mod ledger_source;
mod production_repository;
mod record_store;
mod transfer_repository;

pub use doctor_repository::*;
pub use hospital_repository::*;
pub use ledger_source::*;
pub use production_repository::*;
pub use record_store::*;
pub use transfer_repository::*;

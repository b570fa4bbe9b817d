//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Doctor: Professional who produces billable work
//! - Hospital: Place where production happens
//! - Production: Billable amount generated by a doctor
//! - Transfer: Payment made to a doctor
//! - LedgerEntry: Common view over productions and transfers

mod doctor;
mod hospital;
mod ledger;
mod production;
mod transfer;

pub use doctor::*;
pub use hospital::*;
pub use ledger::*;
pub use production::*;
pub use transfer::*;

//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the domain layer
//! interacts with the record store.
//!
//! Implementations of these traits live in the adapter layers
//! (in-memory here, PostgreSQL in the server, HTTP in the CLI).

pub mod repositories;

// Re-exports
pub use repositories::*;

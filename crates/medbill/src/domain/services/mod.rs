//! Domain Services
//!
//! Computations that span several entities.

mod summary;

pub use summary::*;

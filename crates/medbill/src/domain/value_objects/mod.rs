//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod date_range;
mod money;
mod record_filter;
mod text;

pub use date_range::*;
pub use money::*;
pub use record_filter::*;
pub use text::*;

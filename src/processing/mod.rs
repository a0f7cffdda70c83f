//! Range processing.
//!
//! - [`covering_set`] - decompose an address range into aligned CIDR blocks

mod covering_set;

// Re-export public functions
pub use covering_set::covering_set;

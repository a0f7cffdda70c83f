//! Immutable bit strings, with IPv4 addresses and CIDR ranges built on top.
//!
//! - [`models`] - [`BitString`], [`IpV4`], [`CidrV4`]
//! - [`processing`] - [`covering_set`] of an address range
//! - [`output`] - hex and aligned bit tables
//!
//! ```
//! use bitbased::{covering_set, CidrV4, IpV4};
//!
//! let cidr = CidrV4::parse("1.14.32.0/13").unwrap();
//! assert!(cidr.contains(&IpV4::parse("1.14.35.200").unwrap()));
//!
//! let blocks = covering_set(&cidr.net_address(), &cidr.broadcast_address());
//! assert_eq!(blocks, vec![cidr]);
//! ```

pub mod cli;
pub mod errors;
pub mod models;
pub mod output;
pub mod processing;
mod util;

pub use errors::{BitError, Result};
pub use models::{BitString, ByteOrder, CidrV4, IpV4};
pub use processing::covering_set;

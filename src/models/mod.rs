//! Value types.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`BitString`] - immutable, fixed-length big endian bit string
//! - [`IpV4`] - IPv4 address on top of a 32-bit [`BitString`]
//! - [`CidrV4`] - aligned address block described by its prefix bits

mod bitstring;
mod cidr;
mod ipv4;

// Re-export public types
pub use bitstring::{BitString, Bits, ByteOrder, Chunks};
pub use cidr::{AddressIter, CidrV4, Member};
pub use ipv4::{IpV4, MAX_LENGTH};

//! Display helpers for bit strings.
//!
//! This module handles formatting bit strings as text:
//! - [`tables`] - hex and aligned bit tables as lines
//! - [`terminal`] - writing those tables to a stream

mod tables;
mod terminal;

pub use tables::{aligned_bit_table, hex_table};
pub use terminal::{print_aligned_bit_table, print_hex_table};

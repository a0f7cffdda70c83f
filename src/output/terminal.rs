//! Writing tables to a stream.

use super::tables::{aligned_bit_table, hex_table};
use crate::errors::Result;
use crate::models::{BitString, ByteOrder};
use std::io::Write;

/// Write the hex table for `bs` to `out`, one line per row.
///
/// # Examples
/// ```
/// use bitbased::models::{BitString, ByteOrder};
/// use bitbased::output::print_hex_table;
///
/// let mut out = Vec::new();
/// print_hex_table(&BitString::parse("0xbeef").unwrap(), 8, ByteOrder::Big, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), " ___|  0  1  2  3  4  5  6  7\n  0 | be ef\n");
/// ```
pub fn print_hex_table<W: Write>(
    bs: &BitString,
    bytes_per_row: usize,
    order: ByteOrder,
    out: &mut W,
) -> Result<()> {
    for line in hex_table(bs, bytes_per_row, order)? {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Write the aligned bit table for `bitstrings` to `out`.
pub fn print_aligned_bit_table<W: Write>(
    bitstrings: &[BitString],
    sep: &str,
    out: &mut W,
) -> Result<()> {
    for line in aligned_bit_table(bitstrings, sep)? {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

//! Text tables for bit strings.

use crate::errors::{BitError, Result};
use crate::models::{BitString, ByteOrder};
use crate::util::group_digits;
use itertools::Itertools;

/// Lines of a hex table for these bits.
///
/// The first line holds the column labels. The bits are left-padded with
/// zeroes to a byte boundary. `ByteOrder::Little` lists the least
/// significant byte first.
///
/// ```text
///  ___|  0  1  2  3  4  5  6  7
///   0 | 73 6f 6d 65 20 61 73 63
///   1 | 69 69 20 74 65 78 74
/// ```
///
/// # Errors
/// [`BitError::Argument`] if `bytes_per_row` is 0.
pub fn hex_table(bs: &BitString, bytes_per_row: usize, order: ByteOrder) -> Result<Vec<String>> {
    if bytes_per_row == 0 {
        return Err(BitError::Argument("bytes_per_row must be non-zero".into()));
    }

    let header = std::iter::once(" ___|".to_string())
        .chain((0..bytes_per_row).map(|i| format!("{i:2x}")))
        .join(" ");

    let bytes = bs.iter_bytes(true)?;
    let cells: Vec<String> = match order {
        ByteOrder::Big => bytes.map(|b| format!("{:02x}", b.value())).collect(),
        ByteOrder::Little => bytes.rev().map(|b| format!("{:02x}", b.value())).collect(),
    };

    let mut lines = vec![header];
    for (row, chunk) in cells.chunks(bytes_per_row).enumerate() {
        lines.push(format!("{row:>3x} | {}", chunk.join(" ")));
    }
    Ok(lines)
}

/// Lines of a table showing bit strings right-aligned against each other,
/// with digits grouped in fours by `sep`.
///
/// ```text
///    8↓   4↓   0↓
///     1_0000_0000
///       1111_1111
///  0000_1111_1111
/// ```
///
/// # Errors
/// [`BitError::Argument`] unless `sep` is exactly one character.
pub fn aligned_bit_table(bitstrings: &[BitString], sep: &str) -> Result<Vec<String>> {
    let mut sep_chars = sep.chars();
    let sep = match (sep_chars.next(), sep_chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(BitError::Argument(format!(
                "Delimiter must be a single character, but got: '{sep}'"
            )))
        }
    };

    let max_len = bitstrings.iter().map(BitString::len).max().unwrap_or(0);
    let maxquads = max_len.div_ceil(4);
    let width = maxquads * 5;

    let header: String = (0..maxquads)
        .rev()
        .map(|n| format!("{:>4}↓", 4 * n))
        .collect();

    let mut lines = vec![header];
    for bs in bitstrings {
        let grouped = group_digits(&bs.to_bin(), 4, sep);
        lines.push(format!("{grouped:>width$}"));
    }
    Ok(lines)
}

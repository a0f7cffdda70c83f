//! Small helpers shared by the bit string and display code.

use crate::errors::{BitError, Result};

/// Digit-group separator accepted (and ignored) in bit string literals.
pub(crate) const DIGIT_SEPARATOR: char = '_';

/// Parse a string of `0`/`1` characters into bits, most significant first.
///
/// Digit-group separators are skipped; any other character is rejected.
pub(crate) fn parse_bits(s: &str) -> Result<Vec<bool>> {
    s.chars()
        .filter(|&c| c != DIGIT_SEPARATOR)
        .map(|c| match c {
            '1' => Ok(true),
            '0' => Ok(false),
            other => Err(BitError::Parse(format!("Not 0/1: {other:?}"))),
        })
        .collect()
}

/// Number of bits needed to bring `length` up to a multiple of `alignment`.
pub(crate) fn alignment_padding(length: usize, alignment: usize) -> Result<usize> {
    if alignment == 0 {
        return Err(BitError::Argument("alignment must be non-zero".into()));
    }
    let rem = length % alignment;
    if rem == 0 {
        Ok(0)
    } else {
        Ok(alignment - rem)
    }
}

/// Resolve a possibly negative index against `length`.
pub(crate) fn check_idx(index: isize, length: usize) -> Result<usize> {
    let resolved = if index >= 0 {
        index
    } else {
        length as isize + index
    };
    if resolved < 0 || resolved as usize >= length {
        return Err(BitError::Index { index, length });
    }
    Ok(resolved as usize)
}

/// Positions selected by a stepped slice, resolved the way sequence slicing
/// with `start:stop:step` does: negative bounds count from the end and
/// out-of-range bounds are clamped.
pub(crate) fn slice_indices(
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
    length: usize,
) -> Result<Vec<usize>> {
    if step == 0 {
        return Err(BitError::Argument("slice step cannot be zero".into()));
    }
    let len = length as isize;
    let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };

    let clamp = |bound: isize| {
        if bound < 0 {
            (bound + len).max(lower)
        } else {
            bound.min(upper)
        }
    };
    let start = start.map_or(if step < 0 { upper } else { lower }, clamp);
    let stop = stop.map_or(if step < 0 { lower } else { upper }, clamp);

    let mut out = Vec::new();
    let mut i = start;
    while (step > 0 && i < stop) || (step < 0 && i > stop) {
        out.push(i as usize);
        match i.checked_add(step) {
            Some(next) => i = next,
            None => break,
        }
    }
    Ok(out)
}

/// Group the characters of `digits` into runs of `size`, counted from the
/// right, joined by `sep`.
pub(crate) fn group_digits(digits: &str, size: usize, sep: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / size.max(1));
    for (i, c) in chars.iter().enumerate() {
        let remaining = chars.len() - i;
        if i > 0 && size > 0 && remaining % size == 0 {
            out.push(sep);
        }
        out.push(*c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bits() {
        assert_eq!(parse_bits("01_1").unwrap(), vec![false, true, true]);
        assert!(parse_bits("").unwrap().is_empty());
        assert!(matches!(parse_bits("012"), Err(BitError::Parse(_))));
    }

    #[test]
    fn test_alignment_padding() {
        assert_eq!(alignment_padding(0, 8).unwrap(), 0);
        assert_eq!(alignment_padding(1, 8).unwrap(), 7);
        assert_eq!(alignment_padding(16, 8).unwrap(), 0);
        assert_eq!(alignment_padding(9, 4).unwrap(), 3);
        assert!(matches!(
            alignment_padding(3, 0),
            Err(BitError::Argument(_))
        ));
    }

    #[test]
    fn test_check_idx() {
        assert_eq!(check_idx(0, 2).unwrap(), 0);
        assert_eq!(check_idx(-1, 2).unwrap(), 1);
        assert_eq!(check_idx(-2, 2).unwrap(), 0);
        for bad in [-10, -3, 2, 10] {
            assert!(matches!(check_idx(bad, 2), Err(BitError::Index { .. })));
        }
        assert!(check_idx(0, 0).is_err());
    }

    #[test]
    fn test_slice_indices() {
        assert_eq!(slice_indices(None, None, 1, 4).unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(slice_indices(None, None, -1, 4).unwrap(), vec![3, 2, 1, 0]);
        assert_eq!(slice_indices(Some(-2), None, 1, 4).unwrap(), vec![2, 3]);
        assert_eq!(slice_indices(None, Some(-1), 2, 5).unwrap(), vec![0, 2]);
        assert_eq!(slice_indices(Some(10), None, 1, 4).unwrap(), Vec::<usize>::new());
        assert_eq!(slice_indices(Some(-10), Some(2), 1, 4).unwrap(), vec![0, 1]);
        assert!(slice_indices(None, None, 0, 4).is_err());
    }

    #[test]
    fn test_slice_indices_huge_step() {
        assert_eq!(slice_indices(Some(1), None, isize::MAX, 6).unwrap(), vec![1]);
        assert_eq!(slice_indices(None, None, isize::MAX, 6).unwrap(), vec![0]);
        assert_eq!(slice_indices(None, None, isize::MIN, 6).unwrap(), vec![5]);
        assert_eq!(slice_indices(Some(-2), None, isize::MIN, 6).unwrap(), vec![4]);
        assert!(slice_indices(None, None, isize::MIN, 0).unwrap().is_empty());
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("100000000", 4, '_'), "1_0000_0000");
        assert_eq!(group_digits("11111111", 4, '_'), "1111_1111");
        assert_eq!(group_digits("", 4, '_'), "");
        assert_eq!(group_digits("101", 4, ' '), "101");
    }
}

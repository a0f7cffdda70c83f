//! Immutable, arbitrary-length bit strings.
//!
//! A [`BitString`] is a magnitude plus an explicit length, read big endian:
//! bit 0 is the most significant. Every operation returns a new value.

use crate::errors::{BitError, Result};
use crate::util::{alignment_padding, check_idx, parse_bits, slice_indices, DIGIT_SEPARATOR};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, ToPrimitive, Zero};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::FusedIterator;
use std::ops::{Bound, Not, RangeBounds, Shl, Shr};
use std::str::FromStr;

/// Byte order used when converting to and from raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
}

/// Immutable array of bits, interpreted as a big endian value
/// (like a string, the most significant part comes first).
///
/// Equality compares both value and length. Ordering is by value first and
/// length second, so strings of different lengths sort by magnitude.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitString {
    value: BigUint,
    length: usize,
}

fn low_mask(width: usize) -> BigUint {
    (BigUint::one() << width) - BigUint::one()
}

impl BitString {
    // ----- Constructors ----- //

    /// Create a bit string of `length` bits holding `value`.
    ///
    /// # Errors
    /// [`BitError::Length`] if `value` needs more than `length` bits.
    ///
    /// # Examples
    /// ```
    /// use bitbased::models::BitString;
    /// let bs = BitString::new(1u32, 2).unwrap();
    /// assert_eq!(bs.to_string(), "01");
    /// assert!(BitString::new(4u32, 2).is_err());
    /// ```
    pub fn new(value: impl Into<BigUint>, length: usize) -> Result<Self> {
        let value = value.into();
        if value.bits() > length as u64 {
            return Err(BitError::Length(format!(
                "value {value} is too large for bit length {length}"
            )));
        }
        Ok(Self { value, length })
    }

    /// Create a bit string whose length is the minimal bit width of `value`.
    pub fn from_value(value: impl Into<BigUint>) -> Self {
        let value = value.into();
        let length = value.bits() as usize;
        Self { value, length }
    }

    /// Create a bit string from signed inputs, rejecting what the unsigned
    /// constructor cannot represent.
    ///
    /// # Errors
    /// - [`BitError::UnsupportedValue`] for a negative `value`
    /// - [`BitError::Argument`] for a negative `length`
    /// - [`BitError::Length`] if `value` does not fit in `length` bits
    pub fn from_signed(value: &BigInt, length: i64) -> Result<Self> {
        if value.sign() == Sign::Minus {
            return Err(BitError::UnsupportedValue(value.to_string()));
        }
        let length = usize::try_from(length)
            .map_err(|_| BitError::Argument(format!("negative length {length}")))?;
        Self::new(value.magnitude().clone(), length)
    }

    /// Build from bits, most significant first. An empty iterator gives the
    /// empty bit string.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let mut value = BigUint::zero();
        let mut length = 0;
        for bit in bits {
            value <<= 1usize;
            if bit {
                value += 1u32;
            }
            length += 1;
        }
        Self { value, length }
    }

    /// Interpret `data` as an unsigned integer in the given byte order.
    /// The length is always `8 * data.len()`.
    pub fn from_bytes(data: &[u8], order: ByteOrder) -> Self {
        let value = match order {
            ByteOrder::Big => BigUint::from_bytes_be(data),
            ByteOrder::Little => BigUint::from_bytes_le(data),
        };
        Self {
            value,
            length: 8 * data.len(),
        }
    }

    /// All-ones bit string of length `length`.
    pub fn ones(length: usize) -> Self {
        Self {
            value: low_mask(length),
            length,
        }
    }

    /// All-zeroes bit string of length `length`.
    pub fn zeroes(length: usize) -> Self {
        Self {
            value: BigUint::zero(),
            length,
        }
    }

    /// Parse a bit string literal.
    ///
    /// - `0b…` binary digits
    /// - `0x…` hex digits, four bits per digit
    /// - anything else is read as bare binary digits
    ///
    /// `_` may be used as a digit-group separator in all forms.
    ///
    /// # Examples
    /// ```
    /// use bitbased::models::BitString;
    /// assert_eq!(BitString::parse("0x0f").unwrap(), BitString::new(15u32, 8).unwrap());
    /// assert_eq!(BitString::parse("0b1_01").unwrap().to_string(), "101");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        if let Some(bin) = s.strip_prefix("0b") {
            Ok(Self::from_bits(parse_bits(bin)?))
        } else if let Some(hex) = s.strip_prefix("0x") {
            let digits: String = hex.chars().filter(|&c| c != DIGIT_SEPARATOR).collect();
            if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
                return Err(BitError::Parse(format!("Not a hex digit: {bad:?}")));
            }
            let value = BigUint::parse_bytes(digits.as_bytes(), 16)
                .ok_or_else(|| BitError::Parse(format!("No hex digits in {s:?}")))?;
            Self::new(value, 4 * digits.len())
        } else {
            Ok(Self::from_bits(parse_bits(s)?))
        }
    }

    // ----- Accessors ----- //

    /// The underlying magnitude.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The value as `u64`, if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    // ----- String representations ----- //

    /// Exactly `len()` characters of `0`/`1`, most significant first.
    pub fn to_bin(&self) -> String {
        self.iter().map(|b| if b { '1' } else { '0' }).collect()
    }

    /// Lowercase hex digits including leading zeroes, without a `0x` prefix.
    ///
    /// # Errors
    /// [`BitError::Alignment`] if the length is not a multiple of 4 and
    /// `autopad` is false.
    pub fn to_hex(&self, autopad: bool) -> Result<String> {
        let bs = if autopad {
            self.pad_left_to_alignment(4)?
        } else {
            self.clone()
        };
        if bs.length % 4 != 0 {
            return Err(BitError::Alignment(format!(
                "length {} must be divisible by 4, or pass autopad",
                bs.length
            )));
        }
        if bs.length == 0 {
            return Ok(String::new());
        }
        Ok(format!("{:0width$x}", bs.value, width = bs.length / 4))
    }

    /// Raw bytes in the given order.
    ///
    /// # Errors
    /// [`BitError::Alignment`] if the length is not a multiple of 8 and
    /// `autopad` is false.
    pub fn to_bytes(&self, order: ByteOrder, autopad: bool) -> Result<Vec<u8>> {
        let mut bytes = self
            .iter_bytes(autopad)?
            .map(|b| b.value.to_u8().unwrap_or_default())
            .collect::<Vec<u8>>();
        if order == ByteOrder::Little {
            bytes.reverse();
        }
        Ok(bytes)
    }

    // ----- Math ----- //

    fn ensure_compat_length(&self, other: &BitString) -> Result<()> {
        if self.length != other.length {
            return Err(BitError::Length(format!(
                "operation not defined for bit strings of different lengths ({} and {})",
                self.length, other.length
            )));
        }
        Ok(())
    }

    /// Add `n` (which may be negative) modulo `2^len()`.
    ///
    /// Overflow wraps silently; adding `-1` decrements.
    pub fn wrapping_add(&self, n: impl Into<BigInt>) -> BitString {
        let modulus = BigInt::from(BigUint::one() << self.length);
        let mut sum = (BigInt::from(self.value.clone()) + n.into()) % &modulus;
        if sum.sign() == Sign::Minus {
            sum += &modulus;
        }
        BitString {
            value: sum.magnitude().clone(),
            length: self.length,
        }
    }

    /// Add another bit string of the same length, wrapping on overflow.
    pub fn wrapping_add_bits(&self, other: &BitString) -> Result<BitString> {
        self.ensure_compat_length(other)?;
        Ok(self.wrapping_add(BigInt::from(other.value.clone())))
    }

    pub fn bit_and(&self, other: &BitString) -> Result<BitString> {
        self.ensure_compat_length(other)?;
        Ok(BitString {
            value: &self.value & &other.value,
            length: self.length,
        })
    }

    pub fn bit_or(&self, other: &BitString) -> Result<BitString> {
        self.ensure_compat_length(other)?;
        Ok(BitString {
            value: &self.value | &other.value,
            length: self.length,
        })
    }

    pub fn bit_xor(&self, other: &BitString) -> Result<BitString> {
        self.ensure_compat_length(other)?;
        Ok(BitString {
            value: &self.value ^ &other.value,
            length: self.length,
        })
    }

    /// Flip every bit, keeping the length.
    pub fn negate(&self) -> BitString {
        BitString {
            value: low_mask(self.length) - &self.value,
            length: self.length,
        }
    }

    /// Append `n` zero bits at the low end. The length grows by `n`.
    pub fn shift_left(&self, n: usize) -> BitString {
        self.pad_right(n)
    }

    /// Drop the `n` lowest bits. The length shrinks by `n`, never below 0.
    pub fn shift_right(&self, n: usize) -> BitString {
        BitString {
            value: &self.value >> n,
            length: self.length.saturating_sub(n),
        }
    }

    // ----- Iterators ----- //

    /// Iterate over bits, most significant first. Use `.rev()` for least
    /// significant first.
    pub fn iter(&self) -> Bits<'_> {
        Bits {
            bits: self,
            front: 0,
            back: self.length,
        }
    }

    /// Iterate over consecutive chunks of `chunk_len` bits, most significant
    /// chunk first. Reversing yields the chunks in reverse order; each chunk
    /// keeps its own bit order.
    ///
    /// # Errors
    /// - [`BitError::Argument`] if `chunk_len` is 0
    /// - [`BitError::Alignment`] if the length is not a multiple of
    ///   `chunk_len` and `autopad` is false. With `autopad` the string is
    ///   first left-padded with zeroes.
    pub fn iter_chunks(&self, chunk_len: usize, autopad: bool) -> Result<Chunks> {
        let padding = alignment_padding(self.length, chunk_len)?;
        if padding != 0 && !autopad {
            return Err(BitError::Alignment(format!(
                "bit string length ({}) not divisible by {chunk_len}",
                self.length
            )));
        }
        let source = self.pad_left(padding);
        let count = source.length / chunk_len;
        Ok(Chunks {
            source,
            chunk_len,
            front: 0,
            back: count,
        })
    }

    /// Shorthand for `iter_chunks(8, autopad)`.
    pub fn iter_bytes(&self, autopad: bool) -> Result<Chunks> {
        self.iter_chunks(8, autopad)
    }

    // ----- Indexing ----- //

    /// The bit at `index`. Negative indices count from the end.
    ///
    /// # Errors
    /// [`BitError::Index`] if the resolved index is out of range.
    pub fn get(&self, index: isize) -> Result<bool> {
        let idx = check_idx(index, self.length)?;
        Ok(self.bit_at(idx))
    }

    fn bit_at(&self, idx: usize) -> bool {
        !((&self.value >> (self.length - idx - 1)) & BigUint::one()).is_zero()
    }

    /// Bits within `range`. Bounds past the end are clamped, an empty or
    /// inverted range gives the empty string.
    pub fn slice<R: RangeBounds<usize>>(&self, range: R) -> BitString {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(self.length);
        let end = match range.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.length,
        }
        .min(self.length);
        if start >= end {
            return BitString::zeroes(0);
        }
        let width = end - start;
        BitString {
            value: (&self.value >> (self.length - end)) & low_mask(width),
            length: width,
        }
    }

    /// Stepped slice with sequence-slicing semantics: negative bounds count
    /// from the end, a negative step walks backwards.
    ///
    /// # Errors
    /// [`BitError::Argument`] if `step` is 0.
    pub fn slice_step(
        &self,
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
    ) -> Result<BitString> {
        let indices = slice_indices(start, stop, step, self.length)?;
        Ok(BitString::from_bits(indices.into_iter().map(|i| self.bit_at(i))))
    }

    /// Copy with the bit at `index` forced to `bit`.
    pub fn set_bit(&self, index: isize, bit: bool) -> Result<BitString> {
        if self.get(index)? == bit {
            Ok(self.clone())
        } else {
            self.flip_bit(index)
        }
    }

    /// Copy with the bit at `index` toggled.
    pub fn flip_bit(&self, index: isize) -> Result<BitString> {
        let idx = check_idx(index, self.length)?;
        Ok(BitString {
            value: &self.value ^ (BigUint::one() << (self.length - idx - 1)),
            length: self.length,
        })
    }

    // ----- Mutations (as new values) ----- //

    /// `self` as the high bits followed by `other` as the low bits.
    pub fn concat(&self, other: &BitString) -> BitString {
        BitString {
            value: (&self.value << other.length) | &other.value,
            length: self.length + other.length,
        }
    }

    /// Insert `n` zero bits at the high end.
    pub fn pad_left(&self, n: usize) -> BitString {
        if n == 0 {
            return self.clone();
        }
        BitString {
            value: self.value.clone(),
            length: self.length + n,
        }
    }

    /// Insert `n` zero bits at the low end.
    pub fn pad_right(&self, n: usize) -> BitString {
        if n == 0 {
            return self.clone();
        }
        BitString {
            value: &self.value << n,
            length: self.length + n,
        }
    }

    /// Left-pad the minimal amount to make the length a multiple of `alignment`.
    pub fn pad_left_to_alignment(&self, alignment: usize) -> Result<BitString> {
        Ok(self.pad_left(alignment_padding(self.length, alignment)?))
    }

    /// Right-pad the minimal amount to make the length a multiple of `alignment`.
    pub fn pad_right_to_alignment(&self, alignment: usize) -> Result<BitString> {
        Ok(self.pad_right(alignment_padding(self.length, alignment)?))
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_bin())
    }
}

impl fmt::Debug for BitString {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<BitString: {} ({})>", self.to_bin(), self.value)
    }
}

impl FromStr for BitString {
    type Err = BitError;

    fn from_str(s: &str) -> Result<Self> {
        BitString::parse(s)
    }
}

impl TryFrom<&str> for BitString {
    type Error = BitError;

    fn try_from(s: &str) -> Result<Self> {
        BitString::parse(s)
    }
}

impl From<u64> for BitString {
    fn from(value: u64) -> Self {
        BitString::from_value(value)
    }
}

impl From<&[u8]> for BitString {
    fn from(data: &[u8]) -> Self {
        BitString::from_bytes(data, ByteOrder::Big)
    }
}

impl Not for BitString {
    type Output = BitString;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl Shl<usize> for BitString {
    type Output = BitString;

    fn shl(self, rhs: usize) -> Self::Output {
        self.shift_left(rhs)
    }
}

impl Shr<usize> for BitString {
    type Output = BitString;

    fn shr(self, rhs: usize) -> Self::Output {
        self.shift_right(rhs)
    }
}

impl<'bits> IntoIterator for &'bits BitString {
    type Item = bool;
    type IntoIter = Bits<'bits>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for BitString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&format!("0b{}", self.to_bin()))
    }
}

impl<'de> Deserialize<'de> for BitString {
    fn deserialize<D>(deserializer: D) -> std::result::Result<BitString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BitString::parse(&s).map_err(|e| de::Error::custom(format!("invalid bit string {s}: {e}")))
    }
}

/// Iterator over the bits of a [`BitString`].
///
/// Returned by [`BitString::iter()`].
#[derive(Clone)]
pub struct Bits<'bits> {
    bits: &'bits BitString,
    front: usize,
    back: usize,
}

impl Iterator for Bits<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let bit = self.bits.bit_at(self.front);
        self.front += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Bits<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.bits.bit_at(self.back))
    }
}

impl ExactSizeIterator for Bits<'_> {}

impl FusedIterator for Bits<'_> {}

/// Iterator over fixed-size chunks of a [`BitString`].
///
/// Owns the (possibly padded) source, so it can be cloned to restart.
/// Returned by [`BitString::iter_chunks()`] and [`BitString::iter_bytes()`].
#[derive(Clone, Debug)]
pub struct Chunks {
    source: BitString,
    chunk_len: usize,
    front: usize,
    back: usize,
}

impl Chunks {
    fn chunk(&self, idx: usize) -> BitString {
        self.source.slice(idx * self.chunk_len..(idx + 1) * self.chunk_len)
    }
}

impl Iterator for Chunks {
    type Item = BitString;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let chunk = self.chunk(self.front);
        self.front += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Chunks {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.chunk(self.back))
    }
}

impl ExactSizeIterator for Chunks {}

impl FusedIterator for Chunks {}

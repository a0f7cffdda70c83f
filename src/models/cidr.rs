//! IPv4 CIDR ranges described by their fixed prefix bits.
//!
//! The number after the slash counts the *free* (host) bits, not the prefix
//! length: `10.0.0.0/8` is the 256 addresses `10.0.0.0 - 10.0.0.255`.

use super::ipv4::MAX_LENGTH;
use super::{BitString, IpV4};
use crate::errors::{BitError, Result};
use num_traits::Zero;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::iter::FusedIterator;
use std::str::FromStr;

/// Power-of-two aligned block of IPv4 addresses.
///
/// Covers `prefix ++ 0…0` to `prefix ++ 1…1` inclusive.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CidrV4 {
    prefix: BitString,
}

/// Something that can sit inside a [`CidrV4`]: a single address or a range.
#[derive(Debug, Clone, Copy)]
pub enum Member<'a> {
    Address(&'a IpV4),
    Range(&'a CidrV4),
}

impl<'a> From<&'a IpV4> for Member<'a> {
    fn from(ip: &'a IpV4) -> Self {
        Member::Address(ip)
    }
}

impl<'a> From<&'a CidrV4> for Member<'a> {
    fn from(cidr: &'a CidrV4) -> Self {
        Member::Range(cidr)
    }
}

impl CidrV4 {
    /// # Errors
    /// [`BitError::Length`] if `prefix` is longer than 32 bits.
    pub fn new(prefix: BitString) -> Result<CidrV4> {
        if prefix.len() > MAX_LENGTH {
            return Err(BitError::Length(format!(
                "CIDR prefix must be at most {MAX_LENGTH} bits, got {}",
                prefix.len()
            )));
        }
        Ok(CidrV4 { prefix })
    }

    /// Single-address block: the whole address is the prefix.
    pub fn from_address(ip: &IpV4) -> CidrV4 {
        CidrV4 {
            prefix: ip.bits().clone(),
        }
    }

    /// Parse `"<ip>/<free bits>"`.
    ///
    /// # Errors
    /// - [`BitError::Parse`] for a malformed literal
    /// - [`BitError::Length`] if the free-bit count exceeds 32
    /// - [`BitError::Alignment`] if the address has set bits in the free range
    ///
    /// # Examples
    /// ```
    /// use bitbased::models::CidrV4;
    /// let cidr = CidrV4::parse("123.12.0.0/16").unwrap();
    /// assert_eq!(cidr.nbits(), 16);
    /// assert!(CidrV4::parse("123.12.0.1/16").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<CidrV4> {
        let (ip_s, nbits_s) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| BitError::Parse(format!("Invalid CIDR {s}: expected <ip>/<bits>")))?;
        let nbits: usize = nbits_s
            .parse()
            .map_err(|_| BitError::Parse(format!("Invalid CIDR {s}: bad bit count {nbits_s:?}")))?;
        if nbits > MAX_LENGTH {
            return Err(BitError::Length(format!(
                "Invalid CIDR {s}: at most {MAX_LENGTH} free bits"
            )));
        }
        let ip = IpV4::parse(ip_s)?;
        let split = MAX_LENGTH - nbits;
        if !ip.bits().slice(split..).value().is_zero() {
            return Err(BitError::Alignment(format!(
                "Invalid CIDR {s}: not aligned to {nbits}-bit boundary"
            )));
        }
        CidrV4::new(ip.bits().slice(..split))
    }

    pub fn prefix(&self) -> &BitString {
        &self.prefix
    }

    /// Number of free (host) bits.
    pub fn nbits(&self) -> usize {
        MAX_LENGTH - self.prefix.len()
    }

    /// True if `item` lies entirely inside this block. A block contains
    /// itself; a wider block is never inside a narrower one.
    pub fn contains<'a>(&self, item: impl Into<Member<'a>>) -> bool {
        let plen = self.prefix.len();
        match item.into() {
            Member::Address(ip) => ip.bits().slice(..plen) == self.prefix,
            Member::Range(other) => {
                other.prefix.len() >= plen && other.prefix.slice(..plen) == self.prefix
            }
        }
    }

    /// The first address in the range.
    pub fn net_address(&self) -> IpV4 {
        IpV4::from_bits_unchecked(self.prefix.pad_right(self.nbits()))
    }

    /// The last address in the range.
    pub fn broadcast_address(&self) -> IpV4 {
        IpV4::from_bits_unchecked(self.prefix.concat(&BitString::ones(self.nbits())))
    }

    /// Addresses excluding network and broadcast.
    pub fn usable_addresses(&self) -> u64 {
        (1u64 << self.nbits()).saturating_sub(2)
    }

    /// Lazily iterate over every address in the block, ascending.
    pub fn iter_addresses(&self) -> AddressIter {
        AddressIter {
            front: self.net_address(),
            back: self.broadcast_address(),
            remaining: 1u64 << self.nbits(),
        }
    }

    /// The block of the same size just below this one (wrapping).
    pub fn prev(&self) -> CidrV4 {
        CidrV4 {
            prefix: self.prefix.wrapping_add(-1),
        }
    }

    /// The block of the same size just above this one (wrapping).
    pub fn next(&self) -> CidrV4 {
        CidrV4 {
            prefix: self.prefix.wrapping_add(1),
        }
    }

    /// The block twice the size that starts or ends with this one.
    /// `None` for the whole address space.
    pub fn supernet(&self) -> Option<CidrV4> {
        if self.prefix.is_empty() {
            return None;
        }
        Some(CidrV4 {
            prefix: self.prefix.slice(..self.prefix.len() - 1),
        })
    }

    /// Lowest prefix bit. `false` means this block is the low half of its
    /// supernet.
    pub fn last_prefix_bit(&self) -> Option<bool> {
        self.prefix.iter().next_back()
    }

    /// Octet-wise rendering with ranges for partially or fully free octets.
    ///
    /// # Examples
    /// ```
    /// use bitbased::models::CidrV4;
    /// let cidr = CidrV4::parse("128.25.16.0/12").unwrap();
    /// assert_eq!(cidr.human_readable_range(), "128.25.[16-31].[0-255]");
    /// ```
    pub fn human_readable_range(&self) -> String {
        let n_full_octets = self.prefix.len() / 8;
        let mut fields: Vec<String> = (0..n_full_octets)
            .map(|octet| self.prefix.slice(8 * octet..8 * (octet + 1)).value().to_string())
            .collect();

        // the octet straddling the prefix boundary, if any
        let partial = self.prefix.slice(8 * n_full_octets..);
        if !partial.is_empty() {
            let freebits = 8 - partial.len();
            let min_val = partial.concat(&BitString::zeroes(freebits));
            let max_val = partial.concat(&BitString::ones(freebits));
            fields.push(format!("[{}-{}]", min_val.value(), max_val.value()));
        }

        while fields.len() < 4 {
            fields.push("[0-255]".to_string());
        }
        fields.join(".")
    }
}

impl std::fmt::Display for CidrV4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.net_address(), self.nbits())
    }
}

impl std::fmt::Debug for CidrV4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "<CidrV4: {self}>")
    }
}

impl FromStr for CidrV4 {
    type Err = BitError;

    fn from_str(s: &str) -> Result<Self> {
        CidrV4::parse(s)
    }
}

impl TryFrom<&str> for CidrV4 {
    type Error = BitError;

    fn try_from(s: &str) -> Result<Self> {
        CidrV4::parse(s)
    }
}

impl Serialize for CidrV4 {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CidrV4 {
    fn deserialize<D>(deserializer: D) -> std::result::Result<CidrV4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CidrV4::parse(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

/// Lazy iterator over the addresses of a [`CidrV4`].
///
/// Returned by [`CidrV4::iter_addresses()`]. Clone it to restart.
#[derive(Clone, Debug)]
pub struct AddressIter {
    front: IpV4,
    back: IpV4,
    remaining: u64,
}

impl Iterator for AddressIter {
    type Item = IpV4;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let ip = self.front.clone();
        self.front = self.front.next();
        Some(ip)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl DoubleEndedIterator for AddressIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let ip = self.back.clone();
        self.back = self.back.prev();
        Some(ip)
    }
}

impl FusedIterator for AddressIter {}

//! Minimal set of aligned CIDR blocks spanning two addresses.

use crate::models::{CidrV4, IpV4};

/// Minimal contiguous list of CIDR blocks covering `ip1..=ip2`.
///
/// The input order does not matter. Blocks come back in ascending order, each
/// one the largest aligned block that starts at its base address and stays
/// within the range.
///
/// # Examples
/// ```
/// use bitbased::models::IpV4;
/// use bitbased::processing::covering_set;
///
/// let start = IpV4::parse("1.1.1.0").unwrap();
/// let end = IpV4::parse("1.1.2.255").unwrap();
/// let blocks: Vec<String> = covering_set(&start, &end).iter().map(|c| c.to_string()).collect();
/// assert_eq!(blocks, vec!["1.1.1.0/8", "1.1.2.0/8"]);
/// ```
pub fn covering_set(ip1: &IpV4, ip2: &IpV4) -> Vec<CidrV4> {
    if ip1 == ip2 {
        return vec![CidrV4::from_address(ip1)];
    }
    let (start, end) = if ip1 < ip2 { (ip1, ip2) } else { (ip2, ip1) };
    log::debug!("covering_set({start} - {end})");

    let mut result = Vec::new();
    // start with a single address block
    let mut cidr = CidrV4::from_address(start);

    loop {
        if cidr.contains(end) {
            debug_assert_eq!(&cidr.broadcast_address(), end);
            log::trace!("last block {cidr}");
            result.push(cidr);
            break;
        }

        match grow(&cidr, end) {
            Some(wider) => cidr = wider,
            None => {
                // can't grow without going over, save it and move on
                let next = CidrV4::from_address(&cidr.broadcast_address().next());
                log::trace!("block {cidr}, next starts at {}", next.net_address());
                result.push(cidr);
                cidr = next;
            }
        }
    }

    log::debug!("covering_set({start} - {end}) -> {} blocks", result.len());
    result
}

/// Double `cidr` if it is the low half of its supernet and the supernet
/// does not reach past `end`.
fn grow(cidr: &CidrV4, end: &IpV4) -> Option<CidrV4> {
    if cidr.last_prefix_bit()? {
        return None;
    }
    cidr.supernet().filter(|wider| wider.broadcast_address() <= *end)
}

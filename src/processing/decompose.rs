//! Splitting an address range into CIDR blocks.
//!
//! Walks the range left to right, emitting at each step the biggest block that
//! both starts aligned at the current address and stays inside the range.

use crate::models::{Address, IpNetwork, IpRange};

/// Convert a range into the minimal ordered list of CIDR blocks covering it.
///
/// Returns an empty list for an inverted range.
///
/// # Examples
/// ```
/// use cidr_merger::models::IpRange;
/// use cidr_merger::processing::range_to_networks;
/// let range: IpRange = "192.168.1.0-192.168.1.255".parse().unwrap();
/// let nets = range_to_networks(&range);
/// assert_eq!(nets.len(), 1);
/// assert_eq!(nets[0].to_string(), "192.168.1.0/24");
/// ```
pub fn range_to_networks(range: &IpRange) -> Vec<IpNetwork> {
    let end = range.end();
    let mut start = range.start();
    let mut result = Vec::new();

    while start <= end {
        let prefix_len = boundary_prefix(start, end).max(alignment_prefix(start));
        let net = IpNetwork::from_aligned(start, prefix_len);
        log::trace!("range {range}: emit {net}");
        result.push(net);

        let last = net.last();
        if last >= end {
            break;
        }
        start = last.increment();
    }

    log::debug!("range {range} -> {} networks", result.len());
    result
}

/// Longest prefix whose block at `start` can not reach past the range end.
///
/// `start` and `end + 1` share exactly `n` leading bits; a block of prefix `n`
/// at `start` would contain `end + 1`, one of prefix `n + 1` never does.
/// When `end` is the top of the address space nothing can overrun it.
fn boundary_prefix(start: Address, end: Address) -> u8 {
    match end.checked_increment() {
        Some(after_end) => after_end.xor(start).leading_zeros() + 1,
        None => 0,
    }
}

/// Longest prefix for which `start` is a valid base address.
fn alignment_prefix(start: Address) -> u8 {
    start.bits() - start.trailing_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Family;

    fn nets(range: &str) -> Vec<String> {
        let range: IpRange = range.parse().unwrap();
        range_to_networks(&range)
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_whole_class_c() {
        assert_eq!(nets("192.168.1.0-192.168.1.255"), vec!["192.168.1.0/24"]);
    }

    #[test]
    fn test_single_address() {
        assert_eq!(nets("10.0.0.5-10.0.0.5"), vec!["10.0.0.5/32"]);
        assert_eq!(nets("::1-::1"), vec!["::1/128"]);
    }

    #[test]
    fn test_unaligned_range() {
        assert_eq!(
            nets("10.0.0.1-10.0.0.6"),
            vec!["10.0.0.1/32", "10.0.0.2/31", "10.0.0.4/31", "10.0.0.6/32"]
        );
        assert_eq!(
            nets("10.6.2.80-10.6.7.255"),
            vec![
                "10.6.2.80/28",
                "10.6.2.96/27",
                "10.6.2.128/25",
                "10.6.3.0/24",
                "10.6.4.0/22"
            ]
        );
    }

    #[test]
    fn test_ipv6_range() {
        assert_eq!(
            nets("2001:200:141::-2001:200:142:ffff:ffff:ffff:ffff:ffff"),
            vec!["2001:200:141::/48", "2001:200:142::/48"]
        );
        assert_eq!(
            nets("2001:200:142::-2001:200:143:ffff:ffff:ffff:ffff:ffff"),
            vec!["2001:200:142::/47"]
        );
    }

    #[test]
    fn test_top_of_address_space() {
        assert_eq!(nets("0.0.0.0-255.255.255.255"), vec!["0.0.0.0/0"]);
        assert_eq!(
            nets("255.255.255.0-255.255.255.255"),
            vec!["255.255.255.0/24"]
        );
        assert_eq!(
            nets("255.255.255.254-255.255.255.255"),
            vec!["255.255.255.254/31"]
        );
        assert_eq!(
            nets("::-ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"),
            vec!["::/0"]
        );
        assert_eq!(nets("128.0.0.0-255.255.255.255"), vec!["128.0.0.0/1"]);
    }

    #[test]
    fn test_bottom_of_address_space() {
        assert_eq!(nets("0.0.0.0-0.0.0.0"), vec!["0.0.0.0/32"]);
        assert_eq!(nets("0.0.0.0-127.255.255.255"), vec!["0.0.0.0/1"]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = IpRange::new("10.0.0.9".parse().unwrap(), "10.0.0.1".parse().unwrap());
        assert!(range_to_networks(&range).is_empty());
    }

    #[test]
    fn test_exact_coverage_small_window() {
        // every [s, e] inside 10.0.0.0/27
        let base = 0x0a00_0000u32;
        for s in 0..32u32 {
            for e in s..32u32 {
                let range = IpRange::new(
                    Address::V4((base + s).to_be_bytes()),
                    Address::V4((base + e).to_be_bytes()),
                );
                let blocks = range_to_networks(&range);
                let mut next = range.start();
                for b in &blocks {
                    assert_eq!(b.family(), Family::V4);
                    assert_eq!(b.base(), next, "gap or overlap in {range}");
                    assert_eq!(
                        b.base().with_host_bits_cleared(b.prefix_len()),
                        b.base(),
                        "misaligned {b}"
                    );
                    next = b.last().increment();
                }
                assert_eq!(blocks.last().unwrap().last(), range.end(), "{range}");
            }
        }
    }
}

//! Coalescing of overlapping and adjacent address ranges.

use crate::models::{IpBlock, IpNetwork, IpRange};
use itertools::Itertools;

/// Merge any mix of addresses, networks and ranges into sorted disjoint ranges.
///
/// Overlapping and directly adjacent ranges are coalesced. IPv4 ranges come
/// before IPv6 ranges and the two families are never joined.
///
/// # Examples
/// ```
/// use cidr_merger::models::IpBlock;
/// use cidr_merger::processing::merge_blocks;
/// let blocks: Vec<IpBlock> = ["10.0.0.0-10.0.0.9", "10.0.0.10-10.0.0.20"]
///     .iter()
///     .map(|s| s.parse().unwrap())
///     .collect();
/// let merged = merge_blocks(&blocks);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].to_string(), "10.0.0.0-10.0.0.20");
/// ```
pub fn merge_blocks(blocks: &[IpBlock]) -> Vec<IpRange> {
    merge_ranges(blocks.iter().map(IpBlock::to_range))
}

/// Merge ranges into the minimal sorted list of disjoint, non-adjacent ranges.
pub fn merge_ranges<I>(ranges: I) -> Vec<IpRange>
where
    I: IntoIterator<Item = IpRange>,
{
    let mut sorted = ranges.into_iter().sorted_by_key(|r| r.start());
    let mut current = match sorted.next() {
        Some(first) => first,
        None => return Vec::new(),
    };

    let mut result = Vec::new();
    let mut input_count = 1;
    for next in sorted {
        input_count += 1;
        if touches(&current, &next) {
            if next.end() > current.end() {
                current = current.with_end(next.end());
            }
            log::trace!("merged {next} into {current}");
        } else {
            result.push(current);
            current = next;
        }
    }
    result.push(current);

    log::debug!("merged {input_count} ranges into {}", result.len());
    result
}

/// Merge, then split every merged range into CIDR blocks.
pub fn merge_to_networks(blocks: &[IpBlock]) -> Vec<IpNetwork> {
    merge_blocks(blocks)
        .iter()
        .flat_map(IpRange::to_networks)
        .collect()
}

/// Whether `next` (starting at or after `current`) overlaps or directly follows it.
///
/// A range ending at the top of the address space has no following address,
/// so anything starting after its start overlaps it.
fn touches(current: &IpRange, next: &IpRange) -> bool {
    if current.family() != next.family() {
        return false;
    }
    match current.end().checked_increment() {
        Some(after_end) => after_end >= next.start(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(items: &[&str]) -> Vec<IpBlock> {
        items.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn merged(items: &[&str]) -> Vec<String> {
        merge_blocks(&blocks(items))
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    #[test]
    fn test_merge_overlapping() {
        assert_eq!(
            merged(&[
                "192.168.1.1-192.168.1.50",
                "192.168.1.30-192.168.1.100",
                "192.168.2.1-192.168.2.50"
            ]),
            vec!["192.168.1.1-192.168.1.100", "192.168.2.1-192.168.2.50"]
        );
    }

    #[test]
    fn test_merge_adjacent() {
        assert_eq!(
            merged(&["10.0.0.0-10.0.0.9", "10.0.0.10-10.0.0.20"]),
            vec!["10.0.0.0-10.0.0.20"]
        );
    }

    #[test]
    fn test_merge_gap_of_one_is_kept() {
        assert_eq!(
            merged(&["10.0.0.0-10.0.0.9", "10.0.0.11-10.0.0.20"]),
            vec!["10.0.0.0-10.0.0.9", "10.0.0.11-10.0.0.20"]
        );
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_blocks(&[]).is_empty());
        assert!(merge_to_networks(&[]).is_empty());
    }

    #[test]
    fn test_merge_contained_range_keeps_end() {
        assert_eq!(
            merged(&["10.0.0.0/24", "10.0.0.5-10.0.0.7", "10.0.0.9"]),
            vec!["10.0.0.0-10.0.0.255"]
        );
    }

    #[test]
    fn test_merge_mixed_shapes_unsorted() {
        assert_eq!(
            merged(&["10.0.1.0/24", "10.0.0.255", "10.0.0.0/25", "10.0.0.128-10.0.0.200"]),
            vec!["10.0.0.0-10.0.0.200", "10.0.0.255-10.0.1.255"]
        );
    }

    #[test]
    fn test_merge_duplicates() {
        assert_eq!(
            merged(&["10.0.0.1", "10.0.0.1", "10.0.0.1/32"]),
            vec!["10.0.0.1-10.0.0.1"]
        );
    }

    #[test]
    fn test_merge_families_kept_apart() {
        assert_eq!(
            merged(&["::/96", "0.0.0.0/0", "::1:0:0/96"]),
            vec!["0.0.0.0-255.255.255.255", "::-::1:ffff:ffff"]
        );
    }

    #[test]
    fn test_merge_at_top_of_space() {
        assert_eq!(
            merged(&["255.255.255.0/24", "255.255.255.255", "255.255.0.0-255.255.254.255"]),
            vec!["255.255.0.0-255.255.255.255"]
        );
    }

    #[test]
    fn test_merge_is_idempotent() {
        let first = merge_blocks(&blocks(&[
            "10.0.0.0/8",
            "11.0.0.0-11.0.0.4",
            "192.168.0.1",
            "10.255.0.0/16",
            "172.16.0.0/12",
        ]));
        let again = merge_ranges(first.clone());
        assert_eq!(first, again);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_merge_to_networks() {
        let nets: Vec<String> = merge_to_networks(&blocks(&[
            "10.0.0.0-10.0.0.9",
            "10.0.0.10-10.0.0.15",
            "10.0.0.16/28",
        ]))
        .iter()
        .map(|n| n.to_string())
        .collect();
        assert_eq!(nets, vec!["10.0.0.0/27"]);
    }
}

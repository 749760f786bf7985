//! Inclusive address intervals.

use super::{Address, Family, IpNetwork};
use crate::error::{CidrError, CidrResult};
use crate::processing::range_to_networks;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Inclusive interval `[start, end]` within one address family.
///
/// `start <= end` is expected for decomposition; an inverted range
/// decomposes to nothing.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct IpRange {
    start: Address,
    end: Address,
}

impl IpRange {
    /// Create a range. Panics if `start` and `end` are of different families.
    pub fn new(start: Address, end: Address) -> IpRange {
        assert!(
            start.family() == end.family(),
            "address family mismatch: {start} vs {end}"
        );
        IpRange { start, end }
    }

    /// Parse both ends and build a well-formed range.
    pub fn from_strs(start: &str, end: &str) -> CidrResult<IpRange> {
        let input = format!("{}-{}", start.trim(), end.trim());
        let start: Address = start
            .parse()
            .map_err(|_| CidrError::InvalidAddress(input.clone()))?;
        let end: Address = end
            .parse()
            .map_err(|_| CidrError::InvalidAddress(input.clone()))?;
        if start.family() != end.family() {
            return Err(CidrError::FamilyMismatch(input));
        }
        if start > end {
            return Err(CidrError::InvertedRange(input));
        }
        Ok(IpRange { start, end })
    }

    /// Range covering one address.
    pub fn single(addr: Address) -> IpRange {
        IpRange {
            start: addr,
            end: addr,
        }
    }

    pub fn start(&self) -> Address {
        self.start
    }

    pub fn end(&self) -> Address {
        self.end
    }

    pub fn family(&self) -> Family {
        self.start.family()
    }

    /// The address if the range holds exactly one.
    pub fn to_address(&self) -> Option<Address> {
        (self.start == self.end).then_some(self.start)
    }

    /// Minimal ordered list of CIDR blocks covering exactly this range.
    pub fn to_networks(&self) -> Vec<IpNetwork> {
        range_to_networks(self)
    }

    /// Check if an address is contained within this range.
    pub fn contains(&self, addr: Address) -> bool {
        addr.family() == self.family() && addr >= self.start && addr <= self.end
    }

    /// Same range with `end` replaced.
    pub(crate) fn with_end(self, end: Address) -> IpRange {
        IpRange::new(self.start, end)
    }
}

impl From<IpNetwork> for IpRange {
    fn from(net: IpNetwork) -> IpRange {
        net.to_range()
    }
}

impl FromStr for IpRange {
    type Err = CidrError;

    /// Parse `start-end`.
    fn from_str(s: &str) -> Result<IpRange, CidrError> {
        let s = s.trim();
        match s.split_once('-') {
            Some((start, end)) if !start.trim().is_empty() => IpRange::from_strs(start, end),
            _ => Err(CidrError::Unparseable(s.to_string())),
        }
    }
}

impl std::fmt::Display for IpRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl Serialize for IpRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpRange {
    fn deserialize<D>(deserializer: D) -> Result<IpRange, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpRange::from_str(&s).map_err(de::Error::custom)
    }
}

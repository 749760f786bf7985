//! One value type for the three textual shapes of an address block.

use super::{Address, IpNetwork, IpRange};
use crate::error::CidrError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// A single address, a CIDR network or a `start-end` range.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum IpBlock {
    Address(Address),
    Network(IpNetwork),
    Range(IpRange),
}

impl IpBlock {
    /// The address if the block holds exactly one.
    pub fn to_address(&self) -> Option<Address> {
        match self {
            IpBlock::Address(a) => Some(*a),
            IpBlock::Network(n) => n.is_host().then_some(n.base()),
            IpBlock::Range(r) => r.to_address(),
        }
    }

    /// CIDR blocks covering exactly this block.
    pub fn to_networks(&self) -> Vec<IpNetwork> {
        match self {
            IpBlock::Address(a) => vec![IpNetwork::host(*a)],
            IpBlock::Network(n) => vec![*n],
            IpBlock::Range(r) => r.to_networks(),
        }
    }

    /// The block as an inclusive interval.
    pub fn to_range(&self) -> IpRange {
        match self {
            IpBlock::Address(a) => IpRange::single(*a),
            IpBlock::Network(n) => n.to_range(),
            IpBlock::Range(r) => *r,
        }
    }

    /// Parse a single address, `address/prefix` or `start-end`.
    ///
    /// # Examples
    /// ```
    /// use cidr_merger::models::IpBlock;
    /// assert!(matches!(IpBlock::parse("10.0.0.1"), Ok(IpBlock::Address(_))));
    /// assert!(matches!(IpBlock::parse("10.0.0.0/8"), Ok(IpBlock::Network(_))));
    /// assert!(matches!(IpBlock::parse("10.0.0.1-10.0.0.9"), Ok(IpBlock::Range(_))));
    /// assert!(IpBlock::parse("10.0.0").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<IpBlock, CidrError> {
        let s = s.trim();
        if s.contains('/') {
            s.parse().map(IpBlock::Network)
        } else if s.contains('-') {
            s.parse().map(IpBlock::Range)
        } else {
            s.parse()
                .map(IpBlock::Address)
                .map_err(|_| CidrError::Unparseable(s.to_string()))
        }
    }
}

impl From<Address> for IpBlock {
    fn from(a: Address) -> IpBlock {
        IpBlock::Address(a)
    }
}

impl From<IpNetwork> for IpBlock {
    fn from(n: IpNetwork) -> IpBlock {
        IpBlock::Network(n)
    }
}

impl From<IpRange> for IpBlock {
    fn from(r: IpRange) -> IpBlock {
        IpBlock::Range(r)
    }
}

impl FromStr for IpBlock {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<IpBlock, CidrError> {
        IpBlock::parse(s)
    }
}

impl std::fmt::Display for IpBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            IpBlock::Address(a) => write!(f, "{a}"),
            IpBlock::Network(n) => write!(f, "{n}"),
            IpBlock::Range(r) => write!(f, "{r}"),
        }
    }
}

impl Serialize for IpBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpBlock {
    fn deserialize<D>(deserializer: D) -> Result<IpBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpBlock::parse(&s).map_err(de::Error::custom)
    }
}

//! CIDR network blocks.

use super::{Address, Family, IpRange};
use crate::error::{CidrError, CidrResult};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// An aligned network block: `base` with every bit below `prefix_len` zero.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct IpNetwork {
    base: Address,
    prefix_len: u8,
}

impl IpNetwork {
    /// Create the network of `prefix_len` bits containing `addr`.
    ///
    /// Host bits of `addr` are cleared, so `10.1.2.3/8` becomes `10.0.0.0/8`.
    ///
    /// # Examples
    /// ```
    /// use cidr_merger::models::IpNetwork;
    /// let net = IpNetwork::new("10.1.2.3".parse().unwrap(), 8).unwrap();
    /// assert_eq!(net.to_string(), "10.0.0.0/8");
    /// ```
    pub fn new(addr: Address, prefix_len: u8) -> CidrResult<IpNetwork> {
        if prefix_len > addr.bits() {
            return Err(CidrError::PrefixTooLong {
                input: format!("{addr}/{prefix_len}"),
                prefix_len,
                family: addr.family(),
            });
        }
        Ok(IpNetwork {
            base: addr.with_host_bits_cleared(prefix_len),
            prefix_len,
        })
    }

    /// Block for a base that is already aligned to `prefix_len`.
    pub(crate) fn from_aligned(base: Address, prefix_len: u8) -> IpNetwork {
        debug_assert!(prefix_len <= base.bits());
        debug_assert_eq!(
            base.with_host_bits_cleared(prefix_len),
            base,
            "misaligned block {base}/{prefix_len}"
        );
        IpNetwork { base, prefix_len }
    }

    /// Single-address block (`/32` or `/128`).
    pub fn host(addr: Address) -> IpNetwork {
        IpNetwork {
            base: addr,
            prefix_len: addr.bits(),
        }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn family(&self) -> Family {
        self.base.family()
    }

    /// Whether the block holds exactly one address.
    pub fn is_host(&self) -> bool {
        self.prefix_len == self.base.bits()
    }

    /// Highest address in the block.
    pub fn last(&self) -> Address {
        self.base.with_host_bits_set(self.prefix_len)
    }

    /// Check if an address is contained within this block.
    pub fn contains(&self, addr: Address) -> bool {
        addr.family() == self.family() && addr >= self.base && addr <= self.last()
    }

    /// The block as an inclusive interval.
    pub fn to_range(&self) -> IpRange {
        IpRange::new(self.base, self.last())
    }
}

impl FromStr for IpNetwork {
    type Err = CidrError;

    /// Parse `address/prefix`.
    fn from_str(s: &str) -> Result<IpNetwork, CidrError> {
        let s = s.trim();
        let (addr, len) = s
            .split_once('/')
            .ok_or_else(|| CidrError::Unparseable(s.to_string()))?;
        let addr: Address = addr
            .parse()
            .map_err(|_| CidrError::InvalidAddress(s.to_string()))?;
        let prefix_len: u8 = len
            .trim()
            .parse()
            .map_err(|_| CidrError::InvalidPrefix(s.to_string()))?;
        IpNetwork::new(addr, prefix_len).map_err(|e| match e {
            CidrError::PrefixTooLong {
                prefix_len, family, ..
            } => CidrError::PrefixTooLong {
                input: s.to_string(),
                prefix_len,
                family,
            },
            other => other,
        })
    }
}

impl std::fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

impl Serialize for IpNetwork {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpNetwork {
    fn deserialize<D>(deserializer: D) -> Result<IpNetwork, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpNetwork::from_str(&s).map_err(de::Error::custom)
    }
}

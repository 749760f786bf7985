//! Fixed-width IP address values and the byte-wise arithmetic on them.
//!
//! An [`Address`] is a big-endian byte sequence of 4 bytes ([`Family::V4`]) or
//! 16 bytes ([`Family::V6`]). All arithmetic is done on the bytes with explicit
//! carries so both families share one code path.

use crate::error::CidrError;
use std::cmp::Ordering;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Byte length of an IPv4 address.
pub const IPV4_LEN: usize = 4;
/// Byte length of an IPv6 address.
pub const IPV6_LEN: usize = 16;

/// Address family, i.e. the byte width of an address.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub enum Family {
    V4,
    V6,
}

impl Family {
    /// Number of bytes in an address of this family.
    pub fn octet_len(self) -> usize {
        match self {
            Family::V4 => IPV4_LEN,
            Family::V6 => IPV6_LEN,
        }
    }

    /// Number of bits in an address of this family (32 or 128).
    pub fn bits(self) -> u8 {
        (self.octet_len() * 8) as u8
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}

/// An immutable IP address stored as big-endian bytes.
///
/// The derived ordering sorts IPv4 before IPv6 and, within one family, is the
/// unsigned integer order of the address.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub enum Address {
    V4([u8; IPV4_LEN]),
    V6([u8; IPV6_LEN]),
}

impl Address {
    /// The all-zero address of `family`.
    pub fn zero(family: Family) -> Address {
        match family {
            Family::V4 => Address::V4([0; IPV4_LEN]),
            Family::V6 => Address::V6([0; IPV6_LEN]),
        }
    }

    /// The all-ones address of `family`.
    pub fn max(family: Family) -> Address {
        match family {
            Family::V4 => Address::V4([0xff; IPV4_LEN]),
            Family::V6 => Address::V6([0xff; IPV6_LEN]),
        }
    }

    pub fn family(&self) -> Family {
        match self {
            Address::V4(_) => Family::V4,
            Address::V6(_) => Family::V6,
        }
    }

    /// Bit width of the address family.
    pub fn bits(&self) -> u8 {
        self.family().bits()
    }

    /// Big-endian bytes of the address.
    pub fn octets(&self) -> &[u8] {
        match self {
            Address::V4(b) => b,
            Address::V6(b) => b,
        }
    }

    fn octets_mut(&mut self) -> &mut [u8] {
        match self {
            Address::V4(b) => b,
            Address::V6(b) => b,
        }
    }

    /// Copy of `self` with `f` applied to the bytes.
    fn map_octets(mut self, f: impl FnOnce(&mut [u8])) -> Address {
        f(self.octets_mut());
        self
    }

    fn assert_same_family(&self, other: &Address) {
        assert!(
            self.family() == other.family(),
            "address family mismatch: {self} vs {other}"
        );
    }

    /// Add one, wrapping the all-ones address around to all-zero.
    pub fn increment(self) -> Address {
        self.map_octets(|bytes| {
            for b in bytes.iter_mut().rev() {
                *b = b.wrapping_add(1);
                if *b != 0 {
                    break;
                }
            }
        })
    }

    /// Add one, or `None` when `self` is the top of the address space.
    pub fn checked_increment(self) -> Option<Address> {
        if self == Address::max(self.family()) {
            None
        } else {
            Some(self.increment())
        }
    }

    /// Bitwise exclusive-or. Panics if the families differ.
    pub fn xor(self, other: Address) -> Address {
        self.assert_same_family(&other);
        self.map_octets(|bytes| {
            for (b, o) in bytes.iter_mut().zip(other.octets()) {
                *b ^= o;
            }
        })
    }

    /// Zero bits before the first set bit, counting from the most significant.
    /// Returns the bit width for the zero address.
    pub fn leading_zeros(&self) -> u8 {
        let bytes = self.octets();
        match bytes.iter().position(|b| *b != 0) {
            Some(i) => (i * 8) as u8 + bytes[i].leading_zeros() as u8,
            None => self.bits(),
        }
    }

    /// Zero bits after the last set bit, counting from the least significant.
    /// Returns the bit width for the zero address.
    pub fn trailing_zeros(&self) -> u8 {
        let bytes = self.octets();
        match bytes.iter().rposition(|b| *b != 0) {
            Some(i) => ((bytes.len() - 1 - i) * 8) as u8 + bytes[i].trailing_zeros() as u8,
            None => self.bits(),
        }
    }

    /// Unsigned comparison. Panics if the families differ.
    pub fn compare(&self, other: &Address) -> Ordering {
        self.assert_same_family(other);
        self.octets().cmp(other.octets())
    }

    /// Copy of `self` with every bit below `prefix_len` set to one.
    pub fn with_host_bits_set(self, prefix_len: u8) -> Address {
        self.map_octets(|bytes| {
            for (i, b) in bytes.iter_mut().enumerate() {
                *b |= host_mask(i, prefix_len);
            }
        })
    }

    /// Copy of `self` with every bit below `prefix_len` cleared.
    pub fn with_host_bits_cleared(self, prefix_len: u8) -> Address {
        self.map_octets(|bytes| {
            for (i, b) in bytes.iter_mut().enumerate() {
                *b &= !host_mask(i, prefix_len);
            }
        })
    }

    /// The embedded IPv4 address of an IPv4-mapped IPv6 address (`::ffff:a.b.c.d`).
    pub fn to_ipv4_mapped(&self) -> Option<Ipv4Addr> {
        match self {
            Address::V4(_) => None,
            Address::V6(b) => Ipv6Addr::from(*b).to_ipv4_mapped(),
        }
    }
}

/// Host-part bits of byte `index` for a prefix of `prefix_len` bits.
fn host_mask(index: usize, prefix_len: u8) -> u8 {
    let start = index * 8;
    let prefix_len = prefix_len as usize;
    if prefix_len >= start + 8 {
        0x00
    } else if prefix_len <= start {
        0xff
    } else {
        0xff >> (prefix_len - start)
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Address {
        Address::V4(addr.octets())
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Address {
        Address::V6(addr.octets())
    }
}

impl From<IpAddr> for Address {
    fn from(addr: IpAddr) -> Address {
        match addr {
            IpAddr::V4(a) => a.into(),
            IpAddr::V6(a) => a.into(),
        }
    }
}

impl From<Address> for IpAddr {
    fn from(addr: Address) -> IpAddr {
        match addr {
            Address::V4(b) => IpAddr::V4(Ipv4Addr::from(b)),
            Address::V6(b) => IpAddr::V6(Ipv6Addr::from(b)),
        }
    }
}

impl FromStr for Address {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Address, CidrError> {
        let s = s.trim();
        IpAddr::from_str(s)
            .map(Address::from)
            .map_err(|_| CidrError::InvalidAddress(s.to_string()))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Address::V4(b) => write!(f, "{}", Ipv4Addr::from(*b)),
            Address::V6(b) => match self.to_ipv4_mapped() {
                Some(v4) => write!(f, "::ffff:{v4}"),
                None => write!(f, "{}", Ipv6Addr::from(*b)),
            },
        }
    }
}

//! Error types for parsing address text.

use crate::models::Family;
use thiserror::Error;

/// Errors raised while turning text into addresses, networks and ranges.
///
/// Every variant carries the offending input so callers can report it as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CidrError {
    /// The text is not an IPv4 or IPv6 address.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// The part after `/` is not a number.
    #[error("invalid prefix length in {0}")]
    InvalidPrefix(String),

    /// The prefix length is larger than the family's bit width.
    #[error("prefix length /{prefix_len} too long for {family} in {input}")]
    PrefixTooLong {
        input: String,
        prefix_len: u8,
        family: Family,
    },

    /// The two ends of a `start-end` range belong to different families.
    #[error("address family mismatch in range {0}")]
    FamilyMismatch(String),

    /// The start of a `start-end` range is after its end.
    #[error("range start is after range end: {0}")]
    InvertedRange(String),

    /// The text is none of: address, CIDR block, `start-end` range.
    #[error("unable to parse IP range: {0}")]
    Unparseable(String),
}

/// Result alias used across the crate.
pub type CidrResult<T> = Result<T, CidrError>;

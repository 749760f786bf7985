//! Address value types.
//!
//! - [`Address`] and [`Family`] - fixed-width addresses and their arithmetic
//! - [`IpNetwork`] - aligned CIDR block
//! - [`IpRange`] - inclusive address interval
//! - [`IpBlock`] - any one of the three shapes above

mod address;
mod block;
mod network;
mod range;

// Re-export public types
pub use address::{Address, Family, IPV4_LEN, IPV6_LEN};
pub use block::IpBlock;
pub use network::IpNetwork;
pub use range::IpRange;

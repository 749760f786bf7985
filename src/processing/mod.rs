//! Range processing algorithms.
//!
//! - [`decompose`] - splitting a range into CIDR blocks
//! - [`merge`] - coalescing many ranges into disjoint ones

mod decompose;
mod merge;

// Re-export public functions
pub use decompose::range_to_networks;
pub use merge::{merge_blocks, merge_ranges, merge_to_networks};

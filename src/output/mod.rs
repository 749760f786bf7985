//! Rendering of results.
//!
//! - [`terminal`] - coloured one-per-line text
//! - [`json`] - JSON array of strings

mod json;
mod terminal;

pub use json::to_json;
pub use terminal::{format_network, format_range};

use crate::config::OutputFormat;
use crate::models::{IpNetwork, IpRange};

/// Render CIDR blocks in the requested format.
pub fn render_networks(
    nets: &[IpNetwork],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(lines(nets.iter().map(format_network))),
        OutputFormat::Json => to_json(nets),
    }
}

/// Render ranges in the requested format.
pub fn render_ranges(
    ranges: &[IpRange],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(lines(ranges.iter().map(format_range))),
        OutputFormat::Json => to_json(ranges),
    }
}

fn lines(items: impl Iterator<Item = String>) -> String {
    items.map(|line| line + "\n").collect()
}

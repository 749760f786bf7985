//! Convert between IP address ranges, single addresses and CIDR blocks, and
//! merge many of them into the smallest sorted set of disjoint ranges.
//!
//! ```
//! use cidr_merger::{cidrs_between, merge_text};
//!
//! let cidrs = cidrs_between("2001:200:141::", "2001:200:142:ffff:ffff:ffff:ffff:ffff")?;
//! assert_eq!(cidrs, vec!["2001:200:141::/48", "2001:200:142::/48"]);
//!
//! let merged = merge_text("10.0.0.0-10.0.0.9, 10.0.0.10-10.0.0.20")?;
//! assert_eq!(merged[0].to_string(), "10.0.0.0-10.0.0.20");
//! # Ok::<(), cidr_merger::CidrError>(())
//! ```

pub mod config;
mod error;
pub mod models;
pub mod output;
pub mod parse;
pub mod processing;

pub use error::{CidrError, CidrResult};

use config::OutputFormat;
use models::{IpBlock, IpRange};
use std::error::Error;

/// Decompose the range between two address strings into CIDR strings.
pub fn cidrs_between(start: &str, end: &str) -> CidrResult<Vec<String>> {
    let range = IpRange::from_strs(start, end)?;
    Ok(range.to_networks().iter().map(|n| n.to_string()).collect())
}

/// Parse free-form text and merge every block in it.
pub fn merge_text(input: &str) -> CidrResult<Vec<IpRange>> {
    let blocks = parse::parse_blocks(input)?;
    Ok(processing::merge_blocks(&blocks))
}

/// Options shared by the command-line subcommands.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub format: OutputFormat,
    /// Log and drop unparseable input instead of failing.
    pub skip_invalid: bool,
}

fn read_blocks(input: &str, opts: &Options) -> CidrResult<Vec<IpBlock>> {
    if opts.skip_invalid {
        let (blocks, errors) = parse::parse_blocks_lenient(input);
        if !errors.is_empty() {
            log::warn!("Skipped {} invalid inputs", errors.len());
        }
        Ok(blocks)
    } else {
        parse::parse_blocks(input)
    }
}

/// Split every block of `input` into CIDR blocks, keeping input order.
pub fn cidr_command(input: &str, opts: &Options) -> Result<String, Box<dyn Error>> {
    let blocks = read_blocks(input, opts)?;
    log::info!("#Start cidr_command() blocks = {}", blocks.len());
    let nets: Vec<_> = blocks.iter().flat_map(IpBlock::to_networks).collect();
    Ok(output::render_networks(&nets, opts.format)?)
}

/// Merge every block of `input`; print ranges when `as_ranges`, CIDR blocks otherwise.
pub fn merge_command(
    input: &str,
    opts: &Options,
    as_ranges: bool,
) -> Result<String, Box<dyn Error>> {
    let blocks = read_blocks(input, opts)?;
    log::info!("#Start merge_command() blocks = {}", blocks.len());
    let ranges = processing::merge_blocks(&blocks);
    if as_ranges {
        Ok(output::render_ranges(&ranges, opts.format)?)
    } else {
        let nets: Vec<_> = ranges.iter().flat_map(IpRange::to_networks).collect();
        Ok(output::render_networks(&nets, opts.format)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_opts() -> Options {
        Options {
            format: OutputFormat::Json,
            skip_invalid: false,
        }
    }

    #[test]
    fn test_cidrs_between() {
        assert_eq!(
            cidrs_between("192.168.1.0", "192.168.1.255").unwrap(),
            vec!["192.168.1.0/24"]
        );
        assert_eq!(
            cidrs_between("10.0.0.9", "10.0.0.1").unwrap_err(),
            CidrError::InvertedRange("10.0.0.9-10.0.0.1".to_string())
        );
        assert!(cidrs_between("10.0.0.1", "::1").is_err());
        assert!(cidrs_between("10.0.0.x", "10.0.0.1").is_err());
    }

    #[test]
    fn test_cidr_command_keeps_input_order() {
        let out = cidr_command("10.0.1.0/24 10.0.0.1-10.0.0.3", &json_opts()).unwrap();
        let values: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(values, vec!["10.0.1.0/24", "10.0.0.1/32", "10.0.0.2/31"]);
    }

    #[test]
    fn test_merge_command() {
        let input = "10.0.0.0-10.0.0.9\n10.0.0.10-10.0.0.15\n10.0.0.20";
        let out = merge_command(input, &json_opts(), true).unwrap();
        let values: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(values, vec!["10.0.0.0-10.0.0.15", "10.0.0.20-10.0.0.20"]);

        let out = merge_command(input, &json_opts(), false).unwrap();
        let values: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(values, vec!["10.0.0.0/28", "10.0.0.20/32"]);
    }

    #[test]
    fn test_invalid_input() {
        assert!(merge_command("10.0.0.1 nope", &json_opts(), true).is_err());
        let opts = Options {
            skip_invalid: true,
            ..json_opts()
        };
        let out = merge_command("10.0.0.1 nope", &opts, true).unwrap();
        let values: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(values, vec!["10.0.0.1-10.0.0.1"]);
    }

    #[test]
    fn test_invalid_input_is_named() {
        let err = cidr_command("10.0.0.0/8 10.0.0.1-", &json_opts()).unwrap_err();
        assert_eq!(err.to_string(), "invalid IP address: 10.0.0.1-");
        let err = merge_command("/8 10.0.0.1", &json_opts(), false).unwrap_err();
        assert_eq!(err.to_string(), "invalid IP address: /8");
    }
}

//! Terminal output utilities.
//!
//! Colours are applied through `colored`, so they follow its global override.

use crate::models::{IpNetwork, IpRange};
use colored::Colorize;

/// Format a CIDR block as `address/prefix`.
pub fn format_network(net: &IpNetwork) -> String {
    format!(
        "{}{}",
        net.base().to_string().green(),
        format!("/{}", net.prefix_len()).cyan()
    )
}

/// Format a range as `start-end`.
pub fn format_range(range: &IpRange) -> String {
    format!(
        "{}{}{}",
        range.start().to_string().green(),
        "-".dimmed(),
        range.end().to_string().green()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        static ref RE_ANSI: Regex = Regex::new(r"\x1b\[[0-9;]*m").expect("Invalid Regex?");
    }

    fn plain(s: &str) -> String {
        RE_ANSI.replace_all(s, "").to_string()
    }

    #[test]
    fn test_format_network() {
        let net: IpNetwork = "192.168.1.0/24".parse().unwrap();
        assert_eq!(plain(&format_network(&net)), "192.168.1.0/24");
        let net: IpNetwork = "::ffff:10.0.0.0/104".parse().unwrap();
        assert_eq!(plain(&format_network(&net)), "::ffff:10.0.0.0/104");
    }

    #[test]
    fn test_format_range() {
        let range: IpRange = "10.0.0.1-10.0.0.9".parse().unwrap();
        assert_eq!(plain(&format_range(&range)), "10.0.0.1-10.0.0.9");
    }
}

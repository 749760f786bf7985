//! Reading address blocks out of free-form text.
//!
//! Blocks may be separated by whitespace, commas or newlines. `#` starts a
//! comment running to the end of the line. Spaces around the `-` of a range
//! are allowed.

use crate::error::{CidrError, CidrResult};
use crate::models::IpBlock;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_COMMENT: Regex = Regex::new(r"#[^\n]*").expect("Invalid Regex?");
    static ref RE_DASH: Regex = Regex::new(r"\s*-\s*").expect("Invalid Regex?");
    static ref RE_SEPARATOR: Regex = Regex::new(r"[\s,]+").expect("Invalid Regex?");
}

/// Split text into block tokens.
pub fn tokenize(input: &str) -> Vec<String> {
    let no_comments = RE_COMMENT.replace_all(input, "");
    let joined = RE_DASH.replace_all(&no_comments, "-");
    RE_SEPARATOR
        .split(&joined)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse every token, failing on the first one that is not a valid block.
pub fn parse_blocks(input: &str) -> CidrResult<Vec<IpBlock>> {
    tokenize(input).iter().map(|t| IpBlock::parse(t)).collect()
}

/// Parse every token, returning the valid blocks and the errors for the rest.
pub fn parse_blocks_lenient(input: &str) -> (Vec<IpBlock>, Vec<CidrError>) {
    let mut blocks = Vec::new();
    let mut errors = Vec::new();
    for token in tokenize(input) {
        match IpBlock::parse(&token) {
            Ok(block) => blocks.push(block),
            Err(e) => {
                log::warn!("Skipping invalid input {token}: {e}");
                errors.push(e);
            }
        }
    }
    (blocks, errors)
}

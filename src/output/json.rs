//! JSON output.

use serde::Serialize;

/// Serialise a list of blocks as a pretty-printed JSON array of strings.
pub fn to_json<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    let mut json = serde_json::to_string_pretty(items)?;
    json.push('\n');
    Ok(json)
}

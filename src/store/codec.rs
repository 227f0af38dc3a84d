//! Encoding of persisted guidance values.
//!
//! Everything is stored as a string. Structured values are JSON. Corrupt or
//! unexpected values decode to the empty/default value with a warning so a
//! bad entry degrades to "guidance shows again" instead of breaking hydration.

use tracing::warn;

/// Encode a list of ids/tags as a JSON array.
pub fn encode_string_list<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let items: Vec<&String> = items.into_iter().collect();
    serde_json::to_string(&items).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a JSON array of strings. Missing or corrupt values are empty.
pub fn decode_string_list(key: &str, raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(key = %key, error = %e, "Ignoring corrupt persisted list");
            Vec::new()
        }
    }
}

/// Decode a persisted integer, rejecting values above `max`.
pub fn decode_index(key: &str, raw: Option<&str>, max: usize) -> Option<usize> {
    let raw = raw?;
    match raw.trim().parse::<usize>() {
        Ok(index) if index <= max => Some(index),
        Ok(index) => {
            warn!(key = %key, index, max, "Ignoring out-of-range persisted index");
            None
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Ignoring corrupt persisted index");
            None
        }
    }
}

/// Decode a persisted boolean flag. Anything but `true` is false.
pub fn decode_flag(raw: Option<&str>) -> bool {
    matches!(raw.map(str::trim), Some("true"))
}

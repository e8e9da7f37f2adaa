//! JSON output formatting.

use serde::Serialize;

use crate::models::Token;

/// Render a value as two-space indented JSON.
///
/// # Errors
///
/// Returns error if the value cannot be serialized.
pub fn pretty<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Render a token the way the CLI prints it.
///
/// # Errors
///
/// Returns error if serialization fails.
pub fn token_json(token: &Token) -> serde_json::Result<String> {
    pretty(token)
}

//! Output formatters for the command line.

pub mod json;

pub use json::{pretty, token_json};

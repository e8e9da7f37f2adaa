//! Fuzzing library for oauth2util.
//!
//! Targets exercise the token response decoder, which parses untrusted
//! bodies from the authorization server.
//!
//! # Usage
//!
//! ```bash
//! cd crates/oauth2util-fuzz
//! cargo +nightly fuzz run fuzz_token_response -- -max_total_time=60
//! ```

pub use oauth2util::client::{decode_token_response, decode_token_response_at};

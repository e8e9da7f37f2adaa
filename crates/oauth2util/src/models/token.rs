//! Canonical token record produced by both grant flows.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Access token issued by the authorization server.
///
/// Serialized with `PascalCase` keys (`AccessToken`, `TokenType`,
/// `RefreshToken`, `Expiry`) for compatibility with existing scripts.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Token {
    /// Credential used to authenticate API requests.
    pub access_token: String,

    /// Token type, typically `Bearer`.
    pub token_type: String,

    /// Refresh token, empty when the server did not issue one.
    pub refresh_token: String,

    /// Absolute expiry, `None` when the server gave no lifetime.
    pub expiry: Option<DateTime<Utc>>,
}

impl Token {
    /// Check whether a refresh token was issued.
    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        !self.refresh_token.is_empty()
    }

    /// Check whether the token has expired at `now`.
    ///
    /// Tokens without an expiry never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| expiry <= now)
    }

    /// Value for an HTTP `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token_type", &self.token_type)
            .field("has_refresh_token", &self.has_refresh_token())
            .field("expiry", &self.expiry)
            .finish()
    }
}

//! Error types for token acquisition.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors raised while obtaining a token from the authorization server.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Network or connection failure reaching the token endpoint.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Token endpoint answered with a non-success status.
    #[error("cannot fetch token: {status}\nResponse: {body}")]
    TokenExchange {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response lacks required fields or is undecodable.
    #[error("malformed token response: {reason}")]
    MalformedTokenResponse {
        /// What was wrong with the response
        reason: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Authorization server explicitly rejected the grant (RFC 6749 §5.2).
    #[error("server returned error response: {}", format_server_error(.code, .description, .uri))]
    AuthorizationServer {
        /// Error code, e.g. `invalid_grant`
        code: String,
        /// Human-readable description
        description: Option<String>,
        /// Page describing the error
        uri: Option<String>,
    },

    /// An endpoint URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn format_server_error(code: &str, description: &Option<String>, uri: &Option<String>) -> String {
    let mut formatted = code.to_string();

    if let Some(description) = description {
        formatted.push_str(": ");
        formatted.push_str(description);
    }

    if let Some(uri) = uri {
        formatted.push_str(" (see ");
        formatted.push_str(uri);
        formatted.push(')');
    }

    formatted
}

impl Error {
    /// Create a token exchange error.
    #[must_use]
    pub fn token_exchange(status: u16, body: impl Into<String>) -> Self {
        Self::TokenExchange { status, body: body.into() }
    }

    /// Create a malformed response error.
    #[must_use]
    pub fn malformed(reason: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::MalformedTokenResponse { reason: reason.into(), status, body: body.into() }
    }

    /// Create an authorization server error.
    #[must_use]
    pub fn authorization_server(code: impl Into<String>, description: Option<String>) -> Self {
        Self::AuthorizationServer { code: code.into(), description, uri: None }
    }

    /// HTTP status attached to the error, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::TokenExchange { status, .. } | Self::MalformedTokenResponse { status, .. } => {
                Some(*status)
            }
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the server deliberately refused the grant.
    #[must_use]
    pub const fn is_server_rejection(&self) -> bool {
        matches!(self, Self::AuthorizationServer { .. })
    }

    /// OAuth error code for server rejections.
    #[must_use]
    pub fn oauth_error_code(&self) -> Option<&str> {
        match self {
            Self::AuthorizationServer { code, .. } => Some(code),
            _ => None,
        }
    }
}

/// Result type alias for token operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_display() {
        let err = Error::authorization_server("invalid_grant", None);
        assert_eq!(err.to_string(), "server returned error response: invalid_grant");

        let err = Error::AuthorizationServer {
            code: "invalid_client".to_string(),
            description: Some("Invalid client_id".to_string()),
            uri: Some("https://example.com/errors/invalid_client".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "server returned error response: invalid_client: Invalid client_id \
             (see https://example.com/errors/invalid_client)"
        );
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::token_exchange(503, "unavailable").status(), Some(503));
        assert_eq!(Error::malformed("no access_token", 200, "{}").status(), Some(200));
        assert_eq!(Error::authorization_server("invalid_grant", None).status(), None);
    }

    #[test]
    fn test_server_rejection() {
        let err = Error::authorization_server("invalid_grant", None);
        assert!(err.is_server_rejection());
        assert_eq!(err.oauth_error_code(), Some("invalid_grant"));

        let err = Error::token_exchange(500, "boom");
        assert!(!err.is_server_rejection());
        assert_eq!(err.oauth_error_code(), None);
    }

    #[test]
    fn test_token_exchange_display_includes_body() {
        let err = Error::token_exchange(401, "unauthorized");
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("unauthorized"));
    }
}

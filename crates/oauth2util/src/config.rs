//! Configuration for talking to a single authorization server.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::Result;

/// Default endpoint values.
pub mod defaults {
    use std::time::Duration;

    /// Google OAuth 2.0 authorization endpoint.
    pub const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";

    /// Google OAuth 2.0 token endpoint.
    pub const TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";

    /// Out-of-band redirect: the server displays the code instead of redirecting.
    pub const REDIRECT_URL: &str = "urn:ietf:wg:oauth:2.0:oob";

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Environment variable names shared by the CLI and [`Config::from_env`].
pub mod env {
    pub const CLIENT_ID: &str = "OAUTH2_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "OAUTH2_CLIENT_SECRET";
    pub const AUTH_URL: &str = "OAUTH2_AUTH_URL";
    pub const TOKEN_URL: &str = "OAUTH2_TOKEN_URL";
    pub const AUTH_STYLE: &str = "OAUTH2_AUTH_STYLE";
    pub const TIMEOUT: &str = "OAUTH2_TIMEOUT";
    pub const REFRESH_TOKEN: &str = "OAUTH2_REFRESH_TOKEN";
    pub const REDIRECT_URL: &str = "OAUTH2_REDIRECT_URL";
    pub const SCOPES: &str = "OAUTH2_SCOPES";
}

/// Identifies the requesting application to the authorization server.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    #[must_use]
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self { client_id: client_id.into(), client_secret: client_secret.into() }
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .finish()
    }
}

/// Authorization server endpoint pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub authorization_url: Url,
    pub token_url: Url,
}

impl Endpoint {
    /// Parse both endpoint URLs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidUrl`] if either URL does not parse.
    pub fn new(authorization_url: &str, token_url: &str) -> Result<Self> {
        Ok(Self {
            authorization_url: Url::parse(authorization_url)?,
            token_url: Url::parse(token_url)?,
        })
    }
}

/// Where client credentials are placed in token requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AuthStyle {
    /// `client_id` and `client_secret` in the form body
    #[default]
    #[value(name = "params")]
    InParams,
    /// HTTP Basic authentication header
    #[value(name = "header")]
    InHeader,
}

/// Token client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Client identity.
    pub credentials: ClientCredentials,

    /// Authorization and token endpoints.
    pub endpoint: Endpoint,

    /// Credential placement for token requests.
    pub auth_style: AuthStyle,

    /// Overall request timeout. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration with no request timeout.
    #[must_use]
    pub fn new(credentials: ClientCredentials, endpoint: Endpoint) -> Self {
        Self {
            credentials,
            endpoint,
            auth_style: AuthStyle::default(),
            request_timeout: None,
            connect_timeout: defaults::CONNECT_TIMEOUT,
        }
    }

    /// Set the credential placement.
    #[must_use]
    pub fn with_auth_style(mut self, auth_style: AuthStyle) -> Self {
        self.auth_style = auth_style;
        self
    }

    /// Bound every request by `timeout`.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Create a test configuration pointing at a mock server.
    ///
    /// # Panics
    ///
    /// Panics if `base_url` is not a valid URL.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        let endpoint = Endpoint::new(&format!("{base_url}/auth"), &format!("{base_url}/token"))
            .expect("valid mock server URL");
        Self {
            credentials: ClientCredentials::new("test-client", "test-secret"),
            endpoint,
            auth_style: AuthStyle::InParams,
            request_timeout: Some(Duration::from_secs(5)),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from `OAUTH2_*` environment variables.
    ///
    /// Missing endpoint URLs fall back to the Google defaults.
    ///
    /// # Errors
    ///
    /// Returns error if a URL, auth style or timeout is invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`].
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        use anyhow::Context;
        use clap::ValueEnum;

        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let credentials = ClientCredentials::new(
            var(env::CLIENT_ID).unwrap_or_default(),
            var(env::CLIENT_SECRET).unwrap_or_default(),
        );
        let endpoint = Endpoint::new(
            &var(env::AUTH_URL).unwrap_or_else(|| defaults::AUTH_URL.to_string()),
            &var(env::TOKEN_URL).unwrap_or_else(|| defaults::TOKEN_URL.to_string()),
        )?;
        let auth_style = match var(env::AUTH_STYLE) {
            Some(style) => AuthStyle::from_str(&style, true)
                .map_err(|e| anyhow::anyhow!("{}: {e}", env::AUTH_STYLE))?,
            None => AuthStyle::default(),
        };
        let request_timeout = var(env::TIMEOUT)
            .map(|secs| secs.parse::<u64>().map(Duration::from_secs))
            .transpose()
            .with_context(|| format!("{} must be a whole number of seconds", env::TIMEOUT))?;

        Ok(Self::new(credentials, endpoint)
            .with_auth_style(auth_style)
            .with_request_timeout(request_timeout))
    }
}

impl Default for Config {
    fn default() -> Self {
        let endpoint = Endpoint {
            authorization_url: Url::parse(defaults::AUTH_URL).expect("valid default auth URL"),
            token_url: Url::parse(defaults::TOKEN_URL).expect("valid default token URL"),
        };
        Self::new(ClientCredentials::new("", ""), endpoint)
    }
}

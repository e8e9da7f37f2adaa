//! OAuth 2.0 token client.
//!
//! Provides:
//! - Authorization URL construction for the authorization-code flow
//! - `authorization_code` and `refresh_token` grant exchanges
//! - A single response decoder shared by both grants

mod authorize;
mod request;
mod response;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::config::{AuthStyle, ClientCredentials, Config, Endpoint};
use crate::error::{Error, Result};
use crate::models::{AuthorizationRequestParams, GrantRequest, Token};

pub use authorize::build_authorization_url;
pub use response::{decode_token_response, decode_token_response_at};

use request::{CONTENT_TYPE_FORMENCODED, CONTENT_TYPE_JSON};

/// Client for a single authorization server.
///
/// Performs at most one HTTP request per exchange and never retries.
#[derive(Clone)]
pub struct TokenClient {
    /// HTTP client.
    client: Client,

    /// Client identity.
    credentials: ClientCredentials,

    /// Authorization and token endpoints.
    endpoint: Endpoint,

    /// Credential placement.
    auth_style: AuthStyle,
}

impl TokenClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = Client::builder().connect_timeout(config.connect_timeout).gzip(true);

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            credentials: config.credentials,
            endpoint: config.endpoint,
            auth_style: config.auth_style,
        })
    }

    /// Configured endpoints.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Build the authorization URL a human visits to obtain a code.
    #[must_use]
    pub fn authorization_url(&self, params: &AuthorizationRequestParams) -> Url {
        build_authorization_url(&self.endpoint, &self.credentials.client_id, params)
    }

    /// Exchange an authorization code for a token.
    ///
    /// The code is trimmed of surrounding whitespace first, so a value read
    /// straight from line input can be passed as-is.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, malformed body or
    /// an OAuth error response.
    pub async fn exchange_authorization_code(&self, redirect_url: &str, code: &str) -> Result<Token> {
        self.request_token(&GrantRequest::authorization_code(code, redirect_url)).await
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The returned token carries whatever refresh token the server issued,
    /// which is empty when the server did not rotate it.
    ///
    /// # Errors
    ///
    /// Same as [`Self::exchange_authorization_code`].
    pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<Token> {
        self.request_token(&GrantRequest::refresh_token(refresh_token)).await
    }

    /// POST a grant to the token endpoint and decode the reply.
    async fn request_token(&self, grant: &GrantRequest) -> Result<Token> {
        let prepared = request::prepare(grant, &self.credentials, self.auth_style);

        tracing::debug!(
            grant_type = grant.grant_type(),
            token_url = %self.endpoint.token_url,
            auth_style = ?self.auth_style,
            "Requesting token"
        );

        let mut request = self
            .client
            .post(self.endpoint.token_url.clone())
            .header(ACCEPT, CONTENT_TYPE_JSON)
            .header(CONTENT_TYPE, CONTENT_TYPE_FORMENCODED)
            .body(prepared.body);

        if let Some((username, password)) = prepared.basic_auth {
            request = request.basic_auth(username, Some(password));
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        tracing::debug!(status, content_type = ?content_type, "Token endpoint responded");

        match decode_token_response(status, content_type.as_deref(), &body) {
            Ok(token) => {
                tracing::debug!(
                    grant_type = grant.grant_type(),
                    has_refresh_token = token.has_refresh_token(),
                    expiry = ?token.expiry,
                    "Token issued"
                );
                Ok(token)
            }
            // Keep status and raw body for unsuccessful replies that are not OAuth errors.
            Err(Error::MalformedTokenResponse { status, body, .. })
                if !(200..300).contains(&status) =>
            {
                tracing::warn!(status, "Token endpoint returned an error status");
                Err(Error::token_exchange(status, body))
            }
            Err(err) => {
                tracing::warn!(error = %err, "Token request failed");
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for TokenClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenClient")
            .field("client_id", &self.credentials.client_id)
            .field("endpoint", &self.endpoint)
            .field("auth_style", &self.auth_style)
            .finish()
    }
}

/// Exchange an authorization code against `endpoint` with default transport settings.
///
/// # Errors
///
/// See [`TokenClient::exchange_authorization_code`].
pub async fn exchange_authorization_code(
    endpoint: &Endpoint,
    credentials: &ClientCredentials,
    redirect_url: &str,
    code: &str,
) -> Result<Token> {
    TokenClient::new(Config::new(credentials.clone(), endpoint.clone()))?
        .exchange_authorization_code(redirect_url, code)
        .await
}

/// Exchange a refresh token against `endpoint` with default transport settings.
///
/// # Errors
///
/// See [`TokenClient::exchange_refresh_token`].
pub async fn exchange_refresh_token(
    endpoint: &Endpoint,
    credentials: &ClientCredentials,
    refresh_token: &str,
) -> Result<Token> {
    TokenClient::new(Config::new(credentials.clone(), endpoint.clone()))?
        .exchange_refresh_token(refresh_token)
        .await
}

//! oauth2util
//!
//! Obtain and refresh OAuth 2.0 access tokens from the command line.
//!
//! # Features
//!
//! - **Authorization code flow**: build the consent URL, exchange the pasted code
//! - **Refresh token flow**: trade a refresh token for a fresh access token
//! - **Lenient decoding**: JSON and form-encoded token responses
//!
//! # Example
//!
//! ```no_run
//! use oauth2util::{Config, TokenClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = TokenClient::new(config)?;
//!
//!     let token = client.exchange_refresh_token("1//refresh-token").await?;
//!     println!("{}", token.authorization_header());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod prompt;

pub use client::{TokenClient, build_authorization_url, decode_token_response};
pub use config::{AuthStyle, ClientCredentials, Config, Endpoint};
pub use error::{Error, Result};
pub use models::{AccessType, AuthorizationRequestParams, GrantRequest, Token};

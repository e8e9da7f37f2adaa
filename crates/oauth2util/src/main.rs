//! oauth2util - Entry Point
//!
//! Easy command line access to generate OAuth 2.0 credentials.

use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use oauth2util::config::{defaults, env};
use oauth2util::{
    AccessType, AuthStyle, AuthorizationRequestParams, ClientCredentials, Config, Endpoint,
    TokenClient, formatters, prompt,
};

#[derive(Parser, Debug)]
#[command(name = "oauth2util")]
#[command(about = "Easy command line access to generate OAuth 2.0 credentials")]
#[command(version)]
struct Cli {
    /// Client ID
    #[arg(long, alias = "client_id", env = env::CLIENT_ID, default_value = "")]
    client_id: String,

    /// Client Secret
    #[arg(
        long,
        alias = "client_secret",
        env = env::CLIENT_SECRET,
        default_value = "",
        hide_env_values = true
    )]
    client_secret: String,

    /// OAuth 2.0 Authorization URL
    #[arg(long, alias = "auth_url", env = env::AUTH_URL, default_value = defaults::AUTH_URL)]
    auth_url: String,

    /// OAuth 2.0 Token URL
    #[arg(long, alias = "token_url", env = env::TOKEN_URL, default_value = defaults::TOKEN_URL)]
    token_url: String,

    /// How client credentials are sent to the token endpoint
    #[arg(long, value_enum, env = env::AUTH_STYLE, default_value_t = AuthStyle::InParams)]
    auth_style: AuthStyle,

    /// Token request timeout in seconds (unbounded when unset)
    #[arg(long, env = env::TIMEOUT)]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange refresh token for access token
    #[command(visible_alias = "e")]
    Exchange {
        /// Refresh token
        #[arg(
            short = 't',
            long,
            alias = "refresh_token",
            env = env::REFRESH_TOKEN,
            hide_env_values = true
        )]
        refresh_token: String,
    },

    /// Authorize using OAuth 2.0
    #[command(visible_alias = "a")]
    Auth {
        /// Redirect URL
        #[arg(
            short,
            long,
            alias = "redirect_url",
            env = env::REDIRECT_URL,
            default_value = defaults::REDIRECT_URL
        )]
        redirect_url: String,

        /// OAuth 2.0 Scopes (repeat or comma-separate)
        #[arg(short, long, env = env::SCOPES, value_delimiter = ',')]
        scopes: Vec<String>,

        /// Request online access only (no refresh token)
        #[arg(long)]
        online: bool,

        /// Opaque state value echoed back by the server
        #[arg(long)]
        state: Option<String>,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // stdout carries the token JSON only.
    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting oauth2util");

    let endpoint = Endpoint::new(&cli.auth_url, &cli.token_url).context("invalid endpoint URL")?;
    let config = Config::new(ClientCredentials::new(cli.client_id, cli.client_secret), endpoint)
        .with_auth_style(cli.auth_style)
        .with_request_timeout(cli.timeout.map(Duration::from_secs));
    let client = TokenClient::new(config)?;

    let token = match cli.command {
        Command::Exchange { refresh_token } => client.exchange_refresh_token(&refresh_token).await?,
        Command::Auth { redirect_url, scopes, online, state } => {
            let mut params = AuthorizationRequestParams::new(&redirect_url, scopes)
                .with_access_type(if online { AccessType::Online } else { AccessType::Offline });
            if let Some(state) = state {
                params = params.with_state(state);
            }

            let url = client.authorization_url(&params);
            let code = prompt::prompt_for_code(&url, &mut std::io::stdin().lock(), &mut std::io::stderr())
                .context("failed to read authorization code")?;

            client.exchange_authorization_code(&redirect_url, &code).await?
        }
    };

    println!("{}", formatters::token_json(&token)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exchange_alias_and_short_flag() {
        let cli = Cli::try_parse_from([
            "oauth2util",
            "--client_id",
            "id",
            "--client-secret",
            "secret",
            "e",
            "-t",
            "rt",
        ])
        .unwrap();

        assert_eq!(cli.client_id, "id");
        assert_eq!(cli.auth_url, defaults::AUTH_URL);
        match cli.command {
            Command::Exchange { refresh_token } => assert_eq!(refresh_token, "rt"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_auth_defaults_and_scopes() {
        let cli =
            Cli::try_parse_from(["oauth2util", "auth", "-s", "openid,email", "--scopes", "profile"])
                .unwrap();

        match cli.command {
            Command::Auth { redirect_url, scopes, online, state } => {
                assert_eq!(redirect_url, defaults::REDIRECT_URL);
                assert_eq!(scopes, vec!["openid", "email", "profile"]);
                assert!(!online);
                assert!(state.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

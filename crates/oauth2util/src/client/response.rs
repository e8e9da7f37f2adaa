//! Token endpoint response decoding.
//!
//! Servers answer with JSON (RFC 6749 §5.1) or, for some older providers,
//! form-encoded key/value pairs. Both are normalized into a [`Token`].

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, de};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::models::Token;

use super::request::CONTENT_TYPE_FORMENCODED;

/// Success fields the decoder cares about. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct RawTokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    refresh_token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lifetime")]
    expires_in: Option<i64>,
    /// Legacy spelling used by some providers' form-encoded responses.
    #[serde(default, deserialize_with = "deserialize_lifetime")]
    expires: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lifetime {
    Seconds(i64),
    Text(String),
}

/// Accept `expires_in` as a JSON number or a numeric string.
fn deserialize_lifetime<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Lifetime>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Lifetime::Seconds(secs)) => Ok(Some(secs)),
        Some(Lifetime::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Lifetime::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid lifetime {text:?}"))),
    }
}

/// Decode a token endpoint response, stamping expiry relative to now.
///
/// # Errors
///
/// - [`Error::AuthorizationServer`] when the body carries an `error` field, whatever the status
/// - [`Error::MalformedTokenResponse`] when the body is undecodable or lacks
///   `access_token`/`token_type`, whatever the status
/// - [`Error::TokenExchange`] for an otherwise well-formed body with a non-2xx status
pub fn decode_token_response(status: u16, content_type: Option<&str>, body: &str) -> Result<Token> {
    decode_token_response_at(status, content_type, body, Utc::now())
}

/// Decode a token endpoint response received at `received_at`.
///
/// Identical inputs always decode to identical tokens.
///
/// # Errors
///
/// See [`decode_token_response`].
pub fn decode_token_response_at(
    status: u16,
    content_type: Option<&str>,
    body: &str,
    received_at: DateTime<Utc>,
) -> Result<Token> {
    if body.trim().is_empty() {
        return Err(Error::malformed("server returned empty response body", status, body));
    }

    let fields = parse_body(content_type, body).map_err(|reason| Error::malformed(reason, status, body))?;

    if let Some(err) = server_error(&fields) {
        return Err(err);
    }

    let raw: RawTokenResponse = serde_json::from_value(Value::Object(fields))
        .map_err(|e| Error::malformed(format!("invalid token response: {e}"), status, body))?;

    let access_token = required(raw.access_token, "access_token", status, body)?;
    let token_type = required(raw.token_type, "token_type", status, body)?;

    if !(200..300).contains(&status) {
        return Err(Error::token_exchange(status, body));
    }

    let expiry = match raw.expires_in.or(raw.expires).filter(|secs| *secs != 0) {
        Some(secs) => Some(
            TimeDelta::try_seconds(secs)
                .and_then(|lifetime| received_at.checked_add_signed(lifetime))
                .ok_or_else(|| Error::malformed(format!("expires_in out of range: {secs}"), status, body))?,
        ),
        None => None,
    };

    Ok(Token {
        access_token,
        token_type,
        refresh_token: raw.refresh_token.unwrap_or_default(),
        expiry,
    })
}

fn required(field: Option<String>, name: &str, status: u16, body: &str) -> Result<String> {
    field
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::malformed(format!("server response missing {name}"), status, body))
}

/// RFC 6749 §5.2 error reply. Only a non-empty string `error` counts;
/// description and URI are kept only when they are strings.
fn server_error(fields: &Map<String, Value>) -> Option<Error> {
    let text = |name: &str| {
        fields.get(name).and_then(Value::as_str).filter(|s| !s.is_empty()).map(str::to_owned)
    };

    let code = text("error")?;
    Some(Error::AuthorizationServer {
        code,
        description: text("error_description"),
        uri: text("error_uri"),
    })
}

/// Pick a parser from the media type. Non-form bodies are tried as JSON
/// first and decoded as a form if they are not a JSON object.
fn parse_body(content_type: Option<&str>, body: &str) -> std::result::Result<Map<String, Value>, String> {
    if content_type.is_some_and(is_form_media_type) {
        return parse_form(body);
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        _ => {
            tracing::debug!(content_type, "Token response is not a JSON object, decoding as form");
            parse_form(body)
        }
    }
}

fn parse_form(body: &str) -> std::result::Result<Map<String, Value>, String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(body.trim())
        .map_err(|e| format!("invalid form-encoded token response: {e}"))?;

    // First occurrence of a key wins.
    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }

    Ok(fields)
}

fn is_form_media_type(content_type: &str) -> bool {
    // Media types are case-insensitive and may carry parameters (RFC 7231 §3.1.1.1).
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == CONTENT_TYPE_FORMENCODED || essence == "text/plain"
}

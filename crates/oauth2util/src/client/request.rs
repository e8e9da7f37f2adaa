//! Token endpoint request construction shared by both grants.

use url::form_urlencoded;

use crate::config::{AuthStyle, ClientCredentials};
use crate::models::GrantRequest;

pub(crate) const CONTENT_TYPE_FORMENCODED: &str = "application/x-www-form-urlencoded";
pub(crate) const CONTENT_TYPE_JSON: &str = "application/json";

/// A token request ready to be sent.
pub(crate) struct PreparedRequest {
    /// Form-encoded body.
    pub body: String,
    /// Basic auth username/password, both form-url-encoded (RFC 6749 §2.3.1).
    pub basic_auth: Option<(String, String)>,
}

/// Encode the grant and attach client credentials per `auth_style`.
pub(crate) fn prepare(
    grant: &GrantRequest,
    credentials: &ClientCredentials,
    auth_style: AuthStyle,
) -> PreparedRequest {
    let mut params = grant.params();
    let mut basic_auth = None;

    match auth_style {
        AuthStyle::InParams => {
            params.push(("client_id", credentials.client_id.as_str()));
            params.push(("client_secret", credentials.client_secret.as_str()));
        }
        AuthStyle::InHeader => {
            let username: String =
                form_urlencoded::byte_serialize(credentials.client_id.as_bytes()).collect();
            let password: String =
                form_urlencoded::byte_serialize(credentials.client_secret.as_bytes()).collect();
            basic_auth = Some((username, password));
        }
    }

    let body = form_urlencoded::Serializer::new(String::new()).extend_pairs(params).finish();

    PreparedRequest { body, basic_auth }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> ClientCredentials {
        ClientCredentials::new("client:id", "s3cret/+")
    }

    #[test]
    fn test_code_grant_in_params() {
        let grant = GrantRequest::authorization_code("CODE", "urn:ietf:wg:oauth:2.0:oob");
        let prepared = prepare(&grant, &creds(), AuthStyle::InParams);

        assert_eq!(
            prepared.body,
            "grant_type=authorization_code&code=CODE\
             &redirect_uri=urn%3Aietf%3Awg%3Aoauth%3A2.0%3Aoob\
             &client_id=client%3Aid&client_secret=s3cret%2F%2B"
        );
        assert!(prepared.basic_auth.is_none());
    }

    #[test]
    fn test_refresh_grant_in_header() {
        let grant = GrantRequest::refresh_token("rt");
        let prepared = prepare(&grant, &creds(), AuthStyle::InHeader);

        assert_eq!(prepared.body, "grant_type=refresh_token&refresh_token=rt");
        assert_eq!(
            prepared.basic_auth,
            Some(("client%3Aid".to_string(), "s3cret%2F%2B".to_string()))
        );
    }
}

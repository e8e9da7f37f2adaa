//! Authorization URL construction.

use url::Url;

use crate::config::Endpoint;
use crate::models::{AccessType, AuthorizationRequestParams};

/// Build the URL a human visits to approve access.
///
/// Appends `response_type=code`, `client_id`, `redirect_uri`, `scope`
/// (space-joined), `access_type=offline` and `state` to the authorization
/// URL. Empty redirect URLs and scope lists are left out, and `access_type`
/// is only sent when offline access is requested. Query parameters already
/// present on the authorization URL are kept.
#[must_use]
pub fn build_authorization_url(
    endpoint: &Endpoint,
    client_id: &str,
    params: &AuthorizationRequestParams,
) -> Url {
    let mut url = endpoint.authorization_url.clone();

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("response_type", "code");
        query.append_pair("client_id", client_id);

        if !params.redirect_url.is_empty() {
            query.append_pair("redirect_uri", &params.redirect_url);
        }

        if !params.scopes.is_empty() {
            query.append_pair("scope", &params.scopes.join(" "));
        }

        if params.access_type == AccessType::Offline {
            query.append_pair("access_type", params.access_type.as_str());
        }

        if let Some(state) = &params.state {
            query.append_pair("state", state);
        }
    }

    url
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn endpoint(auth_url: &str) -> Endpoint {
        Endpoint::new(auth_url, "https://example.com/token").unwrap()
    }

    fn query_map(url: &Url) -> HashMap<String, String> {
        url.query_pairs().into_owned().collect()
    }

    #[test]
    fn test_offline_url_with_scopes() {
        let params = AuthorizationRequestParams::new(
            "urn:ietf:wg:oauth:2.0:oob",
            vec!["openid".to_string(), "email".to_string()],
        );
        let url = build_authorization_url(
            &endpoint("https://accounts.google.com/o/oauth2/auth"),
            "client123",
            &params,
        );

        assert_eq!(
            url.as_str(),
            "https://accounts.google.com/o/oauth2/auth?response_type=code&client_id=client123\
             &redirect_uri=urn%3Aietf%3Awg%3Aoauth%3A2.0%3Aoob&scope=openid+email&access_type=offline"
        );
    }

    #[test]
    fn test_online_omits_access_type() {
        let params = AuthorizationRequestParams::new("http://localhost/cb", vec![])
            .with_access_type(AccessType::Online);
        let url = build_authorization_url(&endpoint("https://example.com/auth"), "c", &params);
        let query = query_map(&url);

        assert!(!query.contains_key("access_type"));
        assert!(!query.contains_key("scope"));
        assert_eq!(query["redirect_uri"], "http://localhost/cb");
    }

    #[test]
    fn test_existing_query_is_preserved() {
        let params = AuthorizationRequestParams::new("", vec![]).with_state("xyz");
        let url =
            build_authorization_url(&endpoint("https://example.com/auth?prompt=consent"), "c", &params);
        let query = query_map(&url);

        assert_eq!(query["prompt"], "consent");
        assert_eq!(query["state"], "xyz");
        assert!(!query.contains_key("redirect_uri"));
        assert!(url.as_str().starts_with("https://example.com/auth?prompt=consent&response_type=code"));
    }

    #[test]
    fn test_is_deterministic() {
        let params = AuthorizationRequestParams::new("http://localhost/cb", vec!["a".into()]);
        let ep = endpoint("https://example.com/auth");
        assert_eq!(
            build_authorization_url(&ep, "c", &params),
            build_authorization_url(&ep, "c", &params)
        );
    }
}

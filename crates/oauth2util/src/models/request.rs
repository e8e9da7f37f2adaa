//! Request-side models: authorization URL parameters and token grants.

/// Whether the application needs access while the user is not present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessType {
    Online,
    /// Ask the server to issue a refresh token.
    #[default]
    Offline,
}

impl AccessType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

/// Parameters for the authorization URL a human visits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorizationRequestParams {
    pub redirect_url: String,
    /// Requested scopes, in order.
    pub scopes: Vec<String>,
    pub access_type: AccessType,
    /// Opaque value echoed back by the server.
    pub state: Option<String>,
}

impl AuthorizationRequestParams {
    #[must_use]
    pub fn new(redirect_url: impl Into<String>, scopes: Vec<String>) -> Self {
        Self { redirect_url: redirect_url.into(), scopes, ..Self::default() }
    }

    #[must_use]
    pub fn with_access_type(mut self, access_type: AccessType) -> Self {
        self.access_type = access_type;
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }
}

/// Grant-specific part of a token endpoint request.
///
/// Client credentials are attached when the request is built, according to
/// the configured [`crate::config::AuthStyle`].
#[derive(Clone, PartialEq, Eq)]
pub enum GrantRequest {
    /// `grant_type=authorization_code`
    AuthorizationCode { code: String, redirect_url: String },
    /// `grant_type=refresh_token`
    RefreshToken { refresh_token: String },
}

impl GrantRequest {
    /// Authorization code grant. The code is trimmed of surrounding whitespace.
    #[must_use]
    pub fn authorization_code(code: &str, redirect_url: impl Into<String>) -> Self {
        Self::AuthorizationCode {
            code: trim_line_input(code).to_string(),
            redirect_url: redirect_url.into(),
        }
    }

    /// Refresh token grant. The token is trimmed of surrounding whitespace.
    #[must_use]
    pub fn refresh_token(refresh_token: &str) -> Self {
        Self::RefreshToken { refresh_token: trim_line_input(refresh_token).to_string() }
    }

    #[must_use]
    pub const fn grant_type(&self) -> &'static str {
        match self {
            Self::AuthorizationCode { .. } => "authorization_code",
            Self::RefreshToken { .. } => "refresh_token",
        }
    }

    /// Form parameters for this grant, excluding client credentials.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("grant_type", self.grant_type())];
        match self {
            Self::AuthorizationCode { code, redirect_url } => {
                params.push(("code", code.as_str()));
                if !redirect_url.is_empty() {
                    params.push(("redirect_uri", redirect_url.as_str()));
                }
            }
            Self::RefreshToken { refresh_token } => {
                params.push(("refresh_token", refresh_token.as_str()));
            }
        }
        params
    }
}

impl std::fmt::Debug for GrantRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("GrantRequest");
        s.field("grant_type", &self.grant_type());
        if let Self::AuthorizationCode { redirect_url, .. } = self {
            s.field("redirect_url", redirect_url);
        }
        s.finish()
    }
}

/// Strip what line-oriented input leaves around a credential (`\r`, `\n`, spaces).
fn trim_line_input(value: &str) -> &str {
    value.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_code_is_trimmed() {
        let grant = GrantRequest::authorization_code("CODE123\r\n", "urn:ietf:wg:oauth:2.0:oob");
        assert_eq!(
            grant.params(),
            vec![
                ("grant_type", "authorization_code"),
                ("code", "CODE123"),
                ("redirect_uri", "urn:ietf:wg:oauth:2.0:oob"),
            ]
        );
    }

    #[test]
    fn test_refresh_token_is_trimmed_and_has_no_redirect() {
        let grant = GrantRequest::refresh_token("1//refresh\n");
        assert_eq!(
            grant.params(),
            vec![("grant_type", "refresh_token"), ("refresh_token", "1//refresh")]
        );
    }

    #[test]
    fn test_empty_redirect_is_omitted() {
        let grant = GrantRequest::authorization_code("abc", "");
        assert!(grant.params().iter().all(|(k, _)| *k != "redirect_uri"));
    }

    #[test]
    fn test_debug_hides_grant_secrets() {
        let debug = format!("{:?}", GrantRequest::refresh_token("very-secret"));
        assert!(!debug.contains("very-secret"));
        assert!(debug.contains("refresh_token"));
    }

    #[test]
    fn test_default_access_type_is_offline() {
        let params = AuthorizationRequestParams::new("http://localhost/cb", vec![]);
        assert_eq!(params.access_type, AccessType::Offline);
        assert_eq!(params.access_type.as_str(), "offline");
    }
}

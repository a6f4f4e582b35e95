//! Authentication strategies
//!
//! Every request the connection sends is signed with one of these schemes.
//! HTTP Basic is the default for interactive credentials; bearer tokens cover
//! delegated access.

use reqwest::RequestBuilder;

/// Authentication scheme applied to every outgoing request
#[derive(Debug, Clone)]
pub enum AuthScheme {
    /// HTTP Basic authentication with the user's own credentials
    Basic {
        /// Email address identifying the user
        email_address: String,
        /// Account password
        password: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token, sent verbatim as `Authorization: Bearer {token}`
        token: String,
    },
}

impl AuthScheme {
    /// Create a basic-auth scheme
    pub fn basic(email_address: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            email_address: email_address.into(),
            password: password.into(),
        }
    }

    /// Create a bearer-token scheme
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Attach the authentication header to a request builder
    pub(crate) fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Basic {
                email_address,
                password,
            } => req.basic_auth(email_address, Some(password)),
            Self::Bearer { token } => req.bearer_auth(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::prelude::{Engine, BASE64_STANDARD};
    use reqwest::Client;

    fn build_authenticated_request(auth: &AuthScheme) -> reqwest::Request {
        let builder = Client::new().get("https://www.2degreesnetwork.com/api/foo");
        auth.apply(builder).build().unwrap()
    }

    #[test]
    fn test_basic_auth_header() {
        let auth = AuthScheme::basic("foo@bar.com", "s3cret");
        let request = build_authenticated_request(&auth);

        let expected = format!(
            "Basic {}",
            BASE64_STANDARD.encode("foo@bar.com:s3cret")
        );
        let header = request.headers()["authorization"].to_str().unwrap();
        assert_eq!(header, expected);
    }

    #[test]
    fn test_bearer_auth_header() {
        let auth = AuthScheme::bearer("my token");
        let request = build_authenticated_request(&auth);

        let header = request.headers()["authorization"].to_str().unwrap();
        assert_eq!(header, "Bearer my token");
    }
}

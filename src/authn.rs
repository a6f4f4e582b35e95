//! Cross-domain authentication
//!
//! Helpers for claiming session access tokens and checking session liveness
//! against the `/sessions/` endpoints.

use crate::connection::Connection;
use crate::error::{Error, Result};

/// Claim the session identified by `access_token` and return the associated
/// user's id
///
/// An unrecognized token surfaces as [`Error::AccessToken`].
pub async fn claim_access_token<C>(connection: &C, access_token: &str) -> Result<i64>
where
    C: Connection + ?Sized,
{
    let path = format!("/sessions/{access_token}/");
    let body = match connection.post(&path, None).await {
        Ok(body) => body,
        Err(Error::NotFound) => return Err(Error::AccessToken),
        Err(error) => return Err(error),
    };

    body.as_ref()
        .and_then(serde_json::Value::as_i64)
        .ok_or_else(|| Error::validation("session claim did not return an integer user id"))
}

/// Check whether the session identified by `access_token` is still active
pub async fn is_session_active<C>(connection: &C, access_token: &str) -> Result<bool>
where
    C: Connection + ?Sized,
{
    let path = format!("/sessions/{access_token}/");
    match connection.head(&path, None).await {
        Ok(()) => Ok(true),
        Err(Error::NotFound) => Ok(false),
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ApiCall, MockConnection};
    use reqwest::Method;
    use serde_json::json;

    const STUB_ACCESS_TOKEN: &str = "token-123";

    fn session_path() -> String {
        format!("/sessions/{STUB_ACCESS_TOKEN}/")
    }

    #[tokio::test]
    async fn test_claim_access_token() {
        let api_call =
            ApiCall::successful(session_path(), Method::POST).with_response(json!(42));
        let connection = MockConnection::new().simulate(move || vec![api_call]);

        let user_id = claim_access_token(&connection, STUB_ACCESS_TOKEN)
            .await
            .unwrap();

        assert_eq!(user_id, 42);
    }

    #[tokio::test]
    async fn test_claim_unknown_access_token() {
        let api_call =
            ApiCall::unsuccessful(session_path(), Method::POST, Error::NotFound);
        let connection = MockConnection::new().simulate(move || vec![api_call]);

        let error = claim_access_token(&connection, STUB_ACCESS_TOKEN)
            .await
            .unwrap_err();

        assert!(matches!(error, Error::AccessToken));
    }

    #[tokio::test]
    async fn test_claim_access_token_with_malformed_body() {
        let api_call =
            ApiCall::successful(session_path(), Method::POST).with_response(json!("42"));
        let connection = MockConnection::new().simulate(move || vec![api_call]);

        let error = claim_access_token(&connection, STUB_ACCESS_TOKEN)
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_session_is_active() {
        let api_call = ApiCall::successful(session_path(), Method::HEAD);
        let connection = MockConnection::new().simulate(move || vec![api_call]);

        let is_active = is_session_active(&connection, STUB_ACCESS_TOKEN)
            .await
            .unwrap();

        assert!(is_active);
    }

    #[tokio::test]
    async fn test_session_is_inactive() {
        let api_call = ApiCall::unsuccessful(session_path(), Method::HEAD, Error::NotFound);
        let connection = MockConnection::new().simulate(move || vec![api_call]);

        let is_active = is_session_active(&connection, STUB_ACCESS_TOKEN)
            .await
            .unwrap();

        assert!(!is_active);
    }

    #[tokio::test]
    async fn test_session_check_propagates_other_errors() {
        let api_call =
            ApiCall::unsuccessful(session_path(), Method::HEAD, Error::Authentication);
        let connection = MockConnection::new().simulate(move || vec![api_call]);

        let error = is_session_active(&connection, STUB_ACCESS_TOKEN)
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Authentication));
    }
}

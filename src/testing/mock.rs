//! Mock connection replaying pre-declared API calls

use super::calls::ApiCall;
use crate::connection::{Connection, JsonBody, QueryStringArgs};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::sync::{Mutex, PoisonError};

/// Mock representation of a [`Connection`]
///
/// Built from one or more simulators, each a closure returning the ordered
/// list of [`ApiCall`] fixtures a test expects to occur. Simulators are
/// invoked eagerly and their sequences concatenated in the order given.
///
/// Dropping the mock outside of a panic asserts that every declared call was
/// consumed.
///
/// ```
/// use reqwest::Method;
/// use serde_json::json;
/// use twod_api_client::testing::{ApiCall, MockConnection};
/// use twod_api_client::Connection;
///
/// # futures::executor::block_on(async {
/// let connection = MockConnection::new().simulate(|| {
///     vec![ApiCall::successful("/foo", Method::GET).with_response(json!({"foo": "bar"}))]
/// });
///
/// let body = connection.get("/foo", None).await.unwrap();
/// assert_eq!(body, Some(json!({"foo": "bar"})));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MockConnection {
    expected_api_calls: Vec<ApiCall>,
    request_count: Mutex<usize>,
}

impl MockConnection {
    /// Create a mock expecting no API calls
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the fixtures produced by `simulator`, invoking it immediately
    #[must_use]
    pub fn simulate<F>(mut self, simulator: F) -> Self
    where
        F: FnOnce() -> Vec<ApiCall>,
    {
        self.expected_api_calls.extend(simulator());
        self
    }

    /// The consumed prefix of the expectation sequence, for post-hoc
    /// assertions
    pub fn api_calls(&self) -> &[ApiCall] {
        let request_count = *self
            .request_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        &self.expected_api_calls[..request_count]
    }

    fn call_remote_method(
        &self,
        url: &str,
        http_method: Method,
        query_string_args: Option<QueryStringArgs>,
        request_body: Option<Value>,
    ) -> Result<JsonBody> {
        let mut request_count = self
            .request_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        assert!(
            *request_count < self.expected_api_calls.len(),
            "Not enough API calls for new requests (requested {url:?})"
        );

        let expected_api_call = &self.expected_api_calls[*request_count];
        expected_api_call.matches_or_panic(
            url,
            &http_method,
            query_string_args.as_ref(),
            request_body.as_ref(),
        );

        *request_count += 1;

        expected_api_call.consume_outcome()
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn get(
        &self,
        url: &str,
        query_string_args: Option<QueryStringArgs>,
    ) -> Result<JsonBody> {
        self.call_remote_method(url, Method::GET, query_string_args, None)
    }

    async fn head(&self, url: &str, query_string_args: Option<QueryStringArgs>) -> Result<()> {
        self.call_remote_method(url, Method::HEAD, query_string_args, None)?;
        Ok(())
    }

    async fn post(&self, url: &str, body: JsonBody) -> Result<JsonBody> {
        self.call_remote_method(url, Method::POST, None, body)
    }

    async fn put(&self, url: &str, body: JsonBody) -> Result<JsonBody> {
        self.call_remote_method(url, Method::PUT, None, body)
    }

    async fn delete(&self, url: &str) -> Result<JsonBody> {
        self.call_remote_method(url, Method::DELETE, None, None)
    }
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        // A test failing mid-sequence must not be masked by a second panic.
        if std::thread::panicking() {
            return;
        }

        // A poisoned cursor means a matching assertion already fired for this
        // mock; the consumption check would only obscure it.
        let Ok(request_count) = self.request_count.get_mut() else {
            return;
        };
        let pending_api_call_count = self.expected_api_calls.len() - *request_count;
        assert!(
            pending_api_call_count == 0,
            "{pending_api_call_count} more requests were expected"
        );
    }
}

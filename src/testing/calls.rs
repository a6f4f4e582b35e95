//! Expected API call fixtures

use crate::connection::{JsonBody, QueryStringArgs};
use crate::error::Error;
use reqwest::Method;
use serde_json::Value;
use std::sync::Mutex;

/// One expected request/response exchange
///
/// Declared up front by a simulator and consumed at most once, in the exact
/// order declared. A successful call carries the response body the mock will
/// return; an unsuccessful call carries the error it will raise.
#[derive(Debug)]
pub struct ApiCall {
    url: String,
    http_method: Method,
    query_string_args: Option<QueryStringArgs>,
    request_body: JsonBody,
    outcome: Outcome,
}

#[derive(Debug)]
enum Outcome {
    Success(JsonBody),
    // The error is moved out when the call is consumed.
    Failure(Mutex<Option<Error>>),
}

impl ApiCall {
    /// An expected call the mock answers with a response body (absent by
    /// default)
    pub fn successful(url: impl Into<String>, http_method: Method) -> Self {
        Self {
            url: url.into(),
            http_method,
            query_string_args: None,
            request_body: None,
            outcome: Outcome::Success(None),
        }
    }

    /// An expected call the mock answers by raising `error`
    pub fn unsuccessful(url: impl Into<String>, http_method: Method, error: Error) -> Self {
        Self {
            url: url.into(),
            http_method,
            query_string_args: None,
            request_body: None,
            outcome: Outcome::Failure(Mutex::new(Some(error))),
        }
    }

    /// Expect the request to carry these query string arguments
    #[must_use]
    pub fn with_query(mut self, query_string_args: QueryStringArgs) -> Self {
        self.query_string_args = Some(query_string_args);
        self
    }

    /// Expect the request to carry this JSON body
    #[must_use]
    pub fn with_request_body(mut self, body: Value) -> Self {
        self.request_body = Some(body);
        self
    }

    /// Set the response body a successful call returns
    ///
    /// # Panics
    ///
    /// Panics when called on an unsuccessful fixture.
    #[must_use]
    pub fn with_response(mut self, body: Value) -> Self {
        match self.outcome {
            Outcome::Success(ref mut response) => *response = Some(body),
            Outcome::Failure(_) => panic!("an unsuccessful API call has no response body"),
        }
        self
    }

    /// The expected URL or URL path
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The expected HTTP method
    pub fn http_method(&self) -> &Method {
        &self.http_method
    }

    /// The expected query string arguments
    pub fn query_string_args(&self) -> Option<&QueryStringArgs> {
        self.query_string_args.as_ref()
    }

    /// The expected request body
    pub fn request_body(&self) -> Option<&Value> {
        self.request_body.as_ref()
    }

    pub(super) fn matches_or_panic(
        &self,
        url: &str,
        http_method: &Method,
        query_string_args: Option<&QueryStringArgs>,
        request_body: Option<&Value>,
    ) {
        assert!(
            self.url == url,
            "Expected URL {:?}, got {:?}",
            self.url,
            url
        );
        assert!(
            self.query_string_args.as_ref() == query_string_args,
            "Expected query string arguments {:?}, got {:?}",
            self.query_string_args,
            query_string_args
        );
        assert!(
            &self.http_method == http_method,
            "Expected HTTP method {:?}, got {:?}",
            self.http_method,
            http_method
        );
        assert!(
            self.request_body.as_ref() == request_body,
            "Expected request body deserialization {:?}, got {:?}",
            self.request_body,
            request_body
        );
    }

    pub(super) fn consume_outcome(&self) -> Result<JsonBody, Error> {
        match &self.outcome {
            Outcome::Success(response) => Ok(response.clone()),
            Outcome::Failure(error) => {
                let error = error
                    .lock()
                    .expect("fixture lock poisoned")
                    .take()
                    .expect("unsuccessful API call consumed twice");
                Err(error)
            }
        }
    }
}

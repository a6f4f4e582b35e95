//! The connection contract shared by the live transport and its test double

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Query string arguments attached to a GET or HEAD request
pub type QueryStringArgs = HashMap<String, String>;

/// A deserialized JSON request or response body
///
/// `None` is the absent-value: no body was sent or returned. It is distinct
/// from an empty JSON collection.
pub type JsonBody = Option<Value>;

/// Contract for sending requests to the 2degrees API
///
/// Implemented by [`HttpConnection`](super::HttpConnection) for live traffic
/// and by [`MockConnection`](crate::testing::MockConnection) for tests.
/// Consumers such as the pagination stream and the session helpers depend only
/// on this trait.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Send a GET request and return the deserialized response body
    async fn get(&self, url: &str, query_string_args: Option<QueryStringArgs>)
        -> Result<JsonBody>;

    /// Send a HEAD request, validating the response but returning nothing
    async fn head(&self, url: &str, query_string_args: Option<QueryStringArgs>) -> Result<()>;

    /// Send a POST request with an optional JSON body
    async fn post(&self, url: &str, body: JsonBody) -> Result<JsonBody>;

    /// Send a PUT request with an optional JSON body
    async fn put(&self, url: &str, body: JsonBody) -> Result<JsonBody>;

    /// Send a DELETE request
    async fn delete(&self, url: &str) -> Result<JsonBody>;
}

//! Transport connection to the 2degrees API
//!
//! Translates logical requests (method, path, query arguments, body) into
//! wire-level HTTP, attaches authentication, and classifies every response
//! into a deserialized JSON value or a typed error.

mod transport;
mod types;

pub use transport::{HttpConnection, HttpConnectionBuilder, API_URL};
pub use types::{Connection, JsonBody, QueryStringArgs};

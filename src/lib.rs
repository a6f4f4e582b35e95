//! # 2degrees API client
//!
//! Client library for the 2degrees platform HTTP/JSON API.
//!
//! ## Features
//!
//! - **Typed error classification**: every HTTP-level failure maps to a
//!   variant of [`Error`] at the connection boundary
//! - **Basic and bearer authentication**: pluggable per connection
//! - **Lazy pagination**: multi-page listings flattened into a single stream,
//!   one page in memory at a time
//! - **Deterministic test double**: [`testing::MockConnection`] replays
//!   pre-declared request/response exchanges with exact-match assertions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use futures::stream::TryStreamExt;
//! use twod_api_client::{directory, HttpConnection};
//!
//! #[tokio::main]
//! async fn main() -> twod_api_client::Result<()> {
//!     let connection = HttpConnection::new("foo@bar.com", "password");
//!
//!     let users: Vec<directory::User> =
//!         directory::get_users(&connection).try_collect().await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Authentication strategies
pub mod auth;

/// Transport connection and its public contract
pub mod connection;

/// Cursor-based pagination consumer
pub mod pagination;

/// Deterministic test double for the connection
pub mod testing;

/// Session token claiming and liveness checks
pub mod authn;

/// User and group listings
pub mod directory;

#[cfg(test)]
mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::AuthScheme;
pub use connection::{Connection, HttpConnection, JsonBody, QueryStringArgs, API_URL};
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

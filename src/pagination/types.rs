//! Wire-level pagination envelope

use serde::Deserialize;
use serde_json::Value;

/// Number of items the remote puts in one page
///
/// The limit is the server's; the consumer only follows the `next` cursor and
/// never attempts to control the page size.
pub const BATCH_RETRIEVAL_SIZE_LIMIT: usize = 200;

/// Envelope wrapping one page of a paginated result set
///
/// `count`, `next` and `results` are required; extra envelope fields are
/// tolerated.
#[derive(Debug, Clone, Deserialize)]
pub struct PageEnvelope {
    /// Total number of items across all pages
    pub count: u64,
    /// Absolute or relative URL of the next page, null on the last page
    ///
    /// The key itself must be present on every page.
    #[serde(deserialize_with = "Option::deserialize")]
    pub next: Option<String>,
    /// The items of this page, in server order
    pub results: Vec<Value>,
}

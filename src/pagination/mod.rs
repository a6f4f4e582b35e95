//! Cursor-based pagination consumer
//!
//! Presents a multi-page listing endpoint as one flat, lazily-produced stream
//! of items, following the server-declared `next` cursor one page at a time.

mod stream;
mod types;

pub use stream::{get_paginated_data, get_paginated_records};
pub use types::{PageEnvelope, BATCH_RETRIEVAL_SIZE_LIMIT};

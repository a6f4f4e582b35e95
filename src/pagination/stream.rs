//! The page-following stream

use super::types::PageEnvelope;
use crate::connection::{Connection, JsonBody, QueryStringArgs, API_URL};
use crate::error::{Error, Result};
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

enum PageCursor {
    Start,
    Next(QueryStringArgs),
    Done,
}

/// Flatten a paginated listing endpoint into a single lazy stream of raw
/// items
///
/// Pages are requested one at a time, starting with no query arguments and
/// then with whatever query the server encoded in each page's `next` URL,
/// until `next` is absent. Items are yielded in exactly the order the server
/// returns them; only one page is buffered at any point, so the stream is
/// suitable for arbitrarily large result sets. Single-pass, not restartable.
pub fn get_paginated_data<'a, C>(
    connection: &'a C,
    path: impl Into<String>,
) -> impl Stream<Item = Result<Value>> + 'a
where
    C: Connection + ?Sized,
{
    let path = path.into();
    let pages = stream::try_unfold(PageCursor::Start, move |cursor| {
        let path = path.clone();
        async move {
            let query_string_args = match cursor {
                PageCursor::Start => None,
                PageCursor::Next(args) => Some(args),
                PageCursor::Done => return Ok::<_, Error>(None),
            };

            let body = connection.get(&path, query_string_args).await?;
            let envelope = deserialize_envelope(body)?;

            let next_cursor = match envelope.next {
                Some(ref next_page_url) => PageCursor::Next(parse_url_query(next_page_url)?),
                None => PageCursor::Done,
            };
            Ok(Some((envelope.results, next_cursor)))
        }
    });

    pages
        .map_ok(|results| stream::iter(results.into_iter().map(Ok)))
        .try_flatten()
}

/// Flatten a paginated listing endpoint into a lazy stream of typed records
///
/// Each raw item is coerced into `T` before being yielded; a record that does
/// not match the wire schema produces a fatal [`Error::Validation`].
pub fn get_paginated_records<'a, C, T>(
    connection: &'a C,
    path: impl Into<String>,
) -> impl Stream<Item = Result<T>> + 'a
where
    C: Connection + ?Sized,
    T: DeserializeOwned,
{
    get_paginated_data(connection, path).map(|item| {
        item.and_then(|value| {
            serde_json::from_value(value)
                .map_err(|e| Error::validation(format!("invalid record: {e}")))
        })
    })
}

fn deserialize_envelope(body: JsonBody) -> Result<PageEnvelope> {
    let body = body.ok_or_else(|| Error::validation("paginated response had no body"))?;
    serde_json::from_value(body)
        .map_err(|e| Error::validation(format!("invalid pagination envelope: {e}")))
}

/// Extract the query string arguments of a next-page URL
///
/// The remote may hand back either an absolute URL or a path relative to the
/// API root.
fn parse_url_query(next_page_url: &str) -> Result<QueryStringArgs> {
    let base = Url::parse(API_URL)?;
    let url = base.join(next_page_url)?;
    Ok(url.query_pairs().into_owned().collect())
}

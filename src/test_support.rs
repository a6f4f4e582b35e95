//! Shared fixture builders for unit tests

use crate::pagination::BATCH_RETRIEVAL_SIZE_LIMIT;
use crate::testing::ApiCall;
use reqwest::Method;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Build the ordered GET fixtures a paginated endpoint produces for
/// `objects`, split into server-sized pages
///
/// The first page is requested without query arguments; every later page via
/// `?page={n}`, matching the `next` URL each envelope advertises.
pub fn paginated_api_calls(path: &str, objects: Vec<Value>) -> Vec<ApiCall> {
    let count = objects.len();
    let mut pages: Vec<Vec<Value>> = objects
        .chunks(BATCH_RETRIEVAL_SIZE_LIMIT)
        .map(<[Value]>::to_vec)
        .collect();
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    let page_count = pages.len();

    pages
        .into_iter()
        .enumerate()
        .map(|(index, page_objects)| {
            let page_number = index + 1;
            let next_page_url = if page_number < page_count {
                Some(format!("{path}?page={}", page_number + 1))
            } else {
                None
            };

            let response = json!({
                "count": count,
                "next": next_page_url,
                "results": page_objects,
            });

            let api_call = ApiCall::successful(path, Method::GET).with_response(response);
            if page_number > 1 {
                let query: HashMap<_, _> =
                    [("page".to_string(), page_number.to_string())].into();
                api_call.with_query(query)
            } else {
                api_call
            }
        })
        .collect()
}

//! Request inspection handler

use std::collections::HashMap;

use axum::{extract::Query, http::HeaderMap, Json};
use tracing::info;

/// GET /inspect
///
/// Echoes the request's headers and query parameters, each rendered as
/// `name <sep> value`. The separator comes from the `sep` query
/// parameter and defaults to `===`.
pub async fn inspect(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<serde_json::Value> {
    info!("GET /inspect ({} params)", params.len());

    let sep = params.get("sep").map(String::as_str).unwrap_or("===");

    let converted_headers: Vec<String> = headers
        .iter()
        .filter_map(|(key, value)| {
            value
                .to_str()
                .ok()
                .map(|v| format!("{} {} {}", key, sep, v))
        })
        .collect();

    let converted_params: Vec<String> = params
        .iter()
        .map(|(key, value)| format!("{} {} {}", key, sep, value))
        .collect();

    Json(serde_json::json!({
        "items": ["a", "b", "c"],
        "headers": converted_headers,
        "query_params": converted_params,
    }))
}

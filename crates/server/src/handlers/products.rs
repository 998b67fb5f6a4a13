//! Product demo handlers

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use axum::extract::Path;
use headers::{Cookie, HeaderMapExt};
use serde_json::json;
use tracing::info;

const PRODUCTS: [&str; 3] = ["phone", "tv", "pc"];

/// GET /product/all
///
/// Plain-text catalog, space separated.
pub async fn all_products() -> impl IntoResponse {
    info!("GET /product/all");
    (
        [(header::CONTENT_TYPE, "text/plain")],
        PRODUCTS.join(" "),
    )
}

/// GET /product/withheader
///
/// Returns the catalog as JSON. Every `custom-headers` value on the
/// request is echoed back joined into a single `custom-header`.
pub async fn products_with_header(headers: HeaderMap) -> Response {
    info!("GET /product/withheader");

    let echoed: Vec<&str> = headers
        .get_all("custom-headers")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    let mut response = Json(json!(PRODUCTS)).into_response();
    if !echoed.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&echoed.join(", ")) {
            response.headers_mut().insert("custom-header", value);
        }
    }
    response
}

/// GET /product/set_cookie
///
/// Sets a fixed demo cookie and reports the value the client already
/// had for it, if any.
pub async fn set_cookie(headers: HeaderMap) -> impl IntoResponse {
    info!("GET /product/set_cookie");

    let previous = headers
        .typed_get::<Cookie>()
        .and_then(|cookie| cookie.get("simple_cookie_key").map(|v| v.to_string()));

    let body = Json(json!({
        "detail": "Cookie has been set successfully",
        "result": previous,
    }));
    (
        [(
            header::SET_COOKIE,
            HeaderValue::from_static("simple_cookie_key=simple_cookie_value"),
        )],
        body,
    )
}

/// GET /product/{id}
///
/// HTML card for one product, or plain-text 404 for an id past the
/// catalog.
pub async fn product_card(Path(id): Path<usize>) -> Response {
    info!("GET /product/{}", id);

    if id >= PRODUCTS.len() {
        return (StatusCode::NOT_FOUND, "Product not found").into_response();
    }

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<style>
.product {{
    width: 500px;
    border: 2px inset green;
    background-color: lightblue;
    text-align: center;
}}
</style>
</head>
<body>
<div class="product">
    <h1>This is our product view</h1>
    <p>You picked: <em>{}</em></p>
</div>
</body>
</html>"#,
        PRODUCTS[id]
    ))
    .into_response()
}

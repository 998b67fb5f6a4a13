//! HTML templating handlers

use askama::Template;
use axum::{
    extract::Path,
    response::Html,
    Json,
};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::ProductPayload;

#[derive(Template)]
#[template(path = "product.html")]
struct ProductTemplate {
    id: usize,
    title: String,
    description: String,
    price: String,
}

/// POST /templates/product/{id}
///
/// Renders the product page from the JSON body and the path id.
pub async fn render_product(
    Path(id): Path<usize>,
    Json(payload): Json<ProductPayload>,
) -> Result<Html<String>> {
    info!("POST /templates/product/{} - {}", id, payload.title);

    let template = ProductTemplate {
        id,
        title: payload.title,
        description: payload.description,
        price: payload.price,
    };
    let body = template
        .render()
        .map_err(|e| Error::Internal(format!("template render failed: {}", e)))?;
    Ok(Html(body))
}

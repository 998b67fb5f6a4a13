//! File upload and download handlers

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde_json::json;
use tracing::info;

use crate::config::AppState;
use crate::error::{Error, Result};

/// Pull the `file` part out of a multipart body.
///
/// Returns the raw bytes plus the client-supplied file name and
/// content type, when present.
async fn read_file_field(multipart: &mut Multipart) -> Result<(Bytes, Option<String>, Option<String>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let file_name = field.file_name().map(|s| s.to_string());
            let content_type = field.content_type().map(|s| s.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| Error::BadRequest(e.to_string()))?;
            return Ok((data, file_name, content_type));
        }
    }
    Err(Error::BadRequest("missing file field".to_string()))
}

/// A stored name never escapes the upload directory.
fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(Error::BadRequest("invalid file name".to_string()));
    }
    Ok(())
}

/// POST /file/upload
///
/// Reads the uploaded file as UTF-8 text and returns its lines.
pub async fn upload_lines(mut multipart: Multipart) -> Result<Json<serde_json::Value>> {
    info!("POST /file/upload");

    let (data, _, _) = read_file_field(&mut multipart).await?;
    let text = String::from_utf8(data.to_vec())
        .map_err(|_| Error::BadRequest("file is not valid UTF-8".to_string()))?;
    let lines: Vec<&str> = text.split('\n').collect();
    Ok(Json(json!({ "result": lines })))
}

/// POST /file/uploadfile
///
/// Stores the uploaded file in the upload directory under its own name.
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>> {
    info!("POST /file/uploadfile");

    let (data, file_name, content_type) = read_file_field(&mut multipart).await?;
    let name = file_name.unwrap_or_else(|| "unnamed".to_string());
    validate_file_name(&name)?;

    tokio::fs::write(state.config.upload_dir.join(&name), &data)
        .await
        .map_err(|e| Error::Internal(format!("failed to store file: {}", e)))?;
    info!("[files] Stored {} ({} bytes)", name, data.len());

    Ok(Json(json!({
        "fileName": format!("files/{}", name),
        "fileType": content_type,
    })))
}

/// GET /file/download/{file_name}
///
/// Streams a previously uploaded file back as raw bytes.
pub async fn download_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse> {
    info!("GET /file/download/{}", file_name);

    validate_file_name(&file_name)?;
    let data = match tokio::fs::read(state.config.upload_dir.join(&file_name)).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(Error::FileNotFound),
        Err(e) => return Err(Error::Internal(format!("failed to read file: {}", e))),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    Ok((headers, Bytes::from(data)))
}

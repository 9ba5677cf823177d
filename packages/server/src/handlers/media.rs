use axum::Json;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use common::storage::ObjectKey;
use tokio_util::io::ReaderStream;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::media::{
    ALLOWED_IMAGE_EXTENSIONS, UPLOAD_FOLDERS, UploadResponse, public_media_url,
};
use crate::state::AppState;

/// Body limit for image uploads (10 MB).
pub fn upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(10 * 1024 * 1024)
}

#[utoipa::path(
    post,
    path = "/{folder}",
    tag = "Media",
    operation_id = "uploadMedia",
    summary = "Upload an image",
    description = "Multipart upload of a single image file. The server generates a UUID key under the given folder; the returned key is what submissions reference. Folder must be one of `martyrs`, `detainees`, `stories`, `community`.",
    params(("folder" = String, Path, description = "Storage folder")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored", body = UploadResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart), fields(folder = %folder))]
pub async fn upload_media(
    State(state): State<AppState>,
    Path(folder): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    if !UPLOAD_FOLDERS.contains(&folder.as_str()) {
        return Err(AppError::Validation(format!(
            "folder must be one of: {}",
            UPLOAD_FOLDERS.join(", ")
        )));
    }

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
        .ok_or_else(|| AppError::Validation("multipart body must contain a file field".into()))?;

    let file_name = field
        .file_name()
        .map(str::to_owned)
        .ok_or_else(|| AppError::Validation("file field must carry a filename".into()))?;

    let ext = std::path::Path::new(&file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| AppError::Validation("filename has no extension".into()))?;
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::Validation(format!(
            "extension must be one of: {}",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    let content_type = field
        .content_type()
        .map(str::to_owned)
        .unwrap_or_else(|| {
            mime_guess::from_ext(&ext)
                .first_or_octet_stream()
                .to_string()
        });

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".into()));
    }

    let key = ObjectKey::generate(&folder, &ext)?;
    state.objects.put(&key, &data, &content_type).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: public_media_url(&state.config, key.as_str()),
            key: key.as_str().to_owned(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/{folder}/{file}",
    tag = "Media",
    operation_id = "downloadMedia",
    summary = "Stream a stored image",
    params(
        ("folder" = String, Path, description = "Storage folder"),
        ("file" = String, Path, description = "Object file name"),
    ),
    responses(
        (status = 200, description = "Object bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Object not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(folder = %folder, file = %file))]
pub async fn download_media(
    State(state): State<AppState>,
    Path((folder, file)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let key = ObjectKey::parse(&format!("{folder}/{file}"))
        .map_err(|_| AppError::NotFound("Object not found".into()))?;

    let reader = state.objects.get_stream(&key).await?;
    let content_type = mime_guess::from_path(&file)
        .first_or_octet_stream()
        .to_string();

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CACHE_CONTROL,
                "public, max-age=31536000, immutable".to_string(),
            ),
        ],
        Body::from_stream(ReaderStream::new(reader)),
    )
        .into_response())
}

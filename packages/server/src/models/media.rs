use serde::Serialize;

use crate::config::AppConfig;

/// Storage folders accepted by the upload endpoint.
pub const UPLOAD_FOLDERS: &[&str] = &["martyrs", "detainees", "stories", "community"];

/// File extensions accepted for image uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Successful upload response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Object key to reference in a later submission.
    #[schema(example = "martyrs/5e1f7c0a-ab96-4d2f-93f4-0a4f2c7a9b1e.jpg")]
    pub key: String,
    /// Public URL serving the uploaded object.
    #[schema(example = "/api/v1/media/martyrs/5e1f7c0a-ab96-4d2f-93f4-0a4f2c7a9b1e.jpg")]
    pub url: String,
}

/// Public URL for an object key: the configured CDN/base URL when set,
/// otherwise this server's own media proxy route.
pub fn public_media_url(config: &AppConfig, key: &str) -> String {
    match config.storage.public_base_url.as_deref() {
        Some(base) => format!("{}/{}", base.trim_end_matches('/'), key),
        None => format!("/api/v1/media/{key}"),
    }
}

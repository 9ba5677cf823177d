use chrono::{DateTime, Utc};
use common::text::LocalizedText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

pub use super::shared::Pagination;
use super::shared::{
    double_option, required_pair, validate_email, validate_image_key, validate_max_len,
};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreatePhotoRequest {
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    /// Key of a previously uploaded image in the `community` folder. Required.
    pub image_key: String,
    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,
}

/// Validate a submission and return the normalized bilingual title.
pub fn validate_create_photo(payload: &CreatePhotoRequest) -> Result<LocalizedText, AppError> {
    let title = required_pair(
        "title",
        payload.title_ar.as_deref(),
        payload.title_en.as_deref(),
    )?;
    validate_max_len("title_ar", &title.ar, 256)?;
    validate_max_len("title_en", &title.en, 256)?;
    validate_image_key(&payload.image_key, "community")?;
    if let Some(email) = payload.submitter_email.as_deref().map(str::trim)
        && !email.is_empty()
    {
        validate_email(email)?;
    }
    Ok(title)
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdatePhotoRequest {
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub image_key: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub submitter_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub submitter_email: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PhotoResponse {
    pub id: Uuid,
    pub title: LocalizedText,
    pub image_key: String,
    pub submitter_name: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::community_photo::Model> for PhotoResponse {
    fn from(m: crate::entity::community_photo::Model) -> Self {
        Self {
            id: m.id,
            title: LocalizedText::new(m.title_ar, m.title_en),
            image_key: m.image_key,
            submitter_name: m.submitter_name,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct PhotoListResponse {
    pub data: Vec<PhotoResponse>,
    pub pagination: Pagination,
}

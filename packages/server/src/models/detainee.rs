use chrono::{DateTime, NaiveDate, Utc};
use common::text::LocalizedText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::utils::tags::split_tags;

pub use super::shared::Pagination;
use super::shared::{double_option, required_pair, validate_image_key, validate_max_len};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateDetaineeRequest {
    /// Arabic name. At least one of `name_ar`/`name_en` is required.
    #[schema(example = "سامي نصار")]
    pub name_ar: Option<String>,
    /// English name. At least one of `name_ar`/`name_en` is required.
    #[schema(example = "Sami Nassar")]
    pub name_en: Option<String>,
    pub arrest_date: Option<NaiveDate>,
    /// Free-text detention status, Arabic side.
    #[schema(example = "ما زال معتقلاً")]
    pub detention_status_ar: Option<String>,
    /// Free-text detention status, English side.
    #[schema(example = "Still detained")]
    pub detention_status_en: Option<String>,
    /// Key of a previously uploaded image in the `detainees` folder.
    pub image_key: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub submitted_by: Option<String>,
}

/// Validate a submission and return the normalized bilingual name.
pub fn validate_create_detainee(payload: &CreateDetaineeRequest) -> Result<LocalizedText, AppError> {
    let name = required_pair("name", payload.name_ar.as_deref(), payload.name_en.as_deref())?;
    validate_max_len("name_ar", &name.ar, 256)?;
    validate_max_len("name_en", &name.en, 256)?;
    if let Some(ref key) = payload.image_key {
        validate_image_key(key, "detainees")?;
    }
    Ok(name)
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateDetaineeRequest {
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub arrest_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub detention_status_ar: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub detention_status_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_key: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub submitted_by: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DetaineeResponse {
    pub id: Uuid,
    pub name: LocalizedText,
    pub arrest_date: Option<NaiveDate>,
    pub detention_status: Option<LocalizedText>,
    pub image_key: Option<String>,
    pub tags: Vec<String>,
    pub submitted_by: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::detainee::Model> for DetaineeResponse {
    fn from(m: crate::entity::detainee::Model) -> Self {
        Self {
            id: m.id,
            name: LocalizedText::new(m.name_ar, m.name_en),
            arrest_date: m.arrest_date,
            detention_status: LocalizedText::from_parts(
                m.detention_status_ar.as_deref(),
                m.detention_status_en.as_deref(),
            ),
            image_key: m.image_key,
            tags: split_tags(m.tags.as_deref()),
            submitted_by: m.submitted_by,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DetaineeListResponse {
    pub data: Vec<DetaineeResponse>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_only_name_is_accepted() {
        let req = CreateDetaineeRequest {
            name_ar: None,
            name_en: Some("Sami Nassar".into()),
            arrest_date: None,
            detention_status_ar: None,
            detention_status_en: None,
            image_key: None,
            tags: vec![],
            submitted_by: None,
        };
        let name = validate_create_detainee(&req).unwrap();
        assert_eq!(name.ar, "Sami Nassar");
    }

    #[test]
    fn foreign_folder_image_key_is_rejected() {
        let req = CreateDetaineeRequest {
            name_ar: Some("سامي".into()),
            name_en: None,
            arrest_date: None,
            detention_status_ar: None,
            detention_status_en: None,
            image_key: Some(format!("martyrs/{}.jpg", Uuid::new_v4())),
            tags: vec![],
            submitted_by: None,
        };
        assert!(validate_create_detainee(&req).is_err());
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use common::text::LocalizedText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::martyr::MARTYRDOM_METHODS;
use crate::error::AppError;
use crate::utils::tags::split_tags;

pub use super::shared::Pagination;
use super::shared::{double_option, required_pair, validate_image_key, validate_max_len};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateMartyrRequest {
    /// Arabic name. At least one of `name_ar`/`name_en` is required.
    #[schema(example = "أحمد خليل")]
    pub name_ar: Option<String>,
    /// English name. At least one of `name_ar`/`name_en` is required.
    #[schema(example = "Ahmad Khalil")]
    pub name_en: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    /// One of: shelling, gunfire, airstrike, execution, torture, other.
    #[schema(example = "shelling")]
    pub martyrdom_method: String,
    /// Free-text detail. Required when `martyrdom_method` is "other".
    pub martyrdom_details: Option<String>,
    pub bio_ar: Option<String>,
    pub bio_en: Option<String>,
    /// Key of a previously uploaded image in the `martyrs` folder.
    pub image_key: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Name of the person submitting the record.
    pub submitted_by: Option<String>,
}

/// Validate a submission and return the normalized bilingual name.
pub fn validate_create_martyr(payload: &CreateMartyrRequest) -> Result<LocalizedText, AppError> {
    let name = required_pair("name", payload.name_ar.as_deref(), payload.name_en.as_deref())?;
    validate_max_len("name_ar", &name.ar, 256)?;
    validate_max_len("name_en", &name.en, 256)?;
    validate_martyrdom_method(
        &payload.martyrdom_method,
        payload.martyrdom_details.as_deref(),
    )?;
    if let (Some(birth), Some(death)) = (payload.birth_date, payload.death_date)
        && birth > death
    {
        return Err(AppError::Validation(
            "birth_date must not be after death_date".into(),
        ));
    }
    if let Some(ref key) = payload.image_key {
        validate_image_key(key, "martyrs")?;
    }
    Ok(name)
}

pub fn validate_martyrdom_method(method: &str, details: Option<&str>) -> Result<(), AppError> {
    if !MARTYRDOM_METHODS.contains(&method) {
        return Err(AppError::Validation(format!(
            "martyrdom_method must be one of: {}",
            MARTYRDOM_METHODS.join(", ")
        )));
    }
    if method == "other" && details.map(str::trim).filter(|d| !d.is_empty()).is_none() {
        return Err(AppError::Validation(
            "martyrdom_details is required when martyrdom_method is 'other'".into(),
        ));
    }
    Ok(())
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateMartyrRequest {
    pub name_ar: Option<String>,
    pub name_en: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub birth_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub death_date: Option<Option<NaiveDate>>,
    pub martyrdom_method: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub martyrdom_details: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio_ar: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_key: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub submitted_by: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MartyrResponse {
    pub id: Uuid,
    pub name: LocalizedText,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub martyrdom_method: String,
    pub martyrdom_details: Option<String>,
    pub bio: Option<LocalizedText>,
    pub image_key: Option<String>,
    pub tags: Vec<String>,
    pub submitted_by: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::martyr::Model> for MartyrResponse {
    fn from(m: crate::entity::martyr::Model) -> Self {
        Self {
            id: m.id,
            name: LocalizedText::new(m.name_ar, m.name_en),
            birth_date: m.birth_date,
            death_date: m.death_date,
            martyrdom_method: m.martyrdom_method,
            martyrdom_details: m.martyrdom_details,
            bio: LocalizedText::from_parts(m.bio_ar.as_deref(), m.bio_en.as_deref()),
            image_key: m.image_key,
            tags: split_tags(m.tags.as_deref()),
            submitted_by: m.submitted_by,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MartyrListResponse {
    pub data: Vec<MartyrResponse>,
    pub pagination: Pagination,
}

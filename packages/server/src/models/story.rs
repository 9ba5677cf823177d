use chrono::{DateTime, Utc};
use common::text::LocalizedText;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::story::STORY_CATEGORIES;
use crate::error::AppError;
use crate::utils::tags::split_tags;

pub use super::shared::Pagination;
use super::shared::{double_option, required_pair, validate_image_key, validate_max_len};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateStoryRequest {
    pub author_ar: Option<String>,
    pub author_en: Option<String>,
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub content_ar: Option<String>,
    pub content_en: Option<String>,
    /// One of: memory, testimony, history, daily_life, other.
    #[schema(example = "memory")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Key of a previously uploaded image in the `stories` folder.
    pub image_key: Option<String>,
}

/// Normalized bilingual fields of a validated story submission.
pub struct ValidatedStory {
    pub author: LocalizedText,
    pub title: LocalizedText,
    pub content: LocalizedText,
}

pub fn validate_create_story(payload: &CreateStoryRequest) -> Result<ValidatedStory, AppError> {
    let author = required_pair(
        "author",
        payload.author_ar.as_deref(),
        payload.author_en.as_deref(),
    )?;
    let title = required_pair(
        "title",
        payload.title_ar.as_deref(),
        payload.title_en.as_deref(),
    )?;
    let content = required_pair(
        "content",
        payload.content_ar.as_deref(),
        payload.content_en.as_deref(),
    )?;
    validate_max_len("author_ar", &author.ar, 256)?;
    validate_max_len("author_en", &author.en, 256)?;
    validate_max_len("title_ar", &title.ar, 256)?;
    validate_max_len("title_en", &title.en, 256)?;
    validate_category(&payload.category)?;
    if let Some(ref key) = payload.image_key {
        validate_image_key(key, "stories")?;
    }
    Ok(ValidatedStory {
        author,
        title,
        content,
    })
}

pub fn validate_category(category: &str) -> Result<(), AppError> {
    if !STORY_CATEGORIES.contains(&category) {
        return Err(AppError::Validation(format!(
            "category must be one of: {}",
            STORY_CATEGORIES.join(", ")
        )));
    }
    Ok(())
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateStoryRequest {
    pub author_ar: Option<String>,
    pub author_en: Option<String>,
    pub title_ar: Option<String>,
    pub title_en: Option<String>,
    pub content_ar: Option<String>,
    pub content_en: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_key: Option<Option<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StoryResponse {
    pub id: Uuid,
    pub author: LocalizedText,
    pub title: LocalizedText,
    pub content: LocalizedText,
    pub category: String,
    pub tags: Vec<String>,
    pub image_key: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::story::Model> for StoryResponse {
    fn from(m: crate::entity::story::Model) -> Self {
        Self {
            id: m.id,
            author: LocalizedText::new(m.author_ar, m.author_en),
            title: LocalizedText::new(m.title_ar, m.title_en),
            content: LocalizedText::new(m.content_ar, m.content_en),
            category: m.category,
            tags: split_tags(m.tags.as_deref()),
            image_key: m.image_key,
            status: m.status,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StoryListResponse {
    pub data: Vec<StoryResponse>,
    pub pagination: Pagination,
}

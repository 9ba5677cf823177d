use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Story categories accepted by submission validation.
pub const STORY_CATEGORIES: &[&str] = &["memory", "testimony", "history", "daily_life", "other"];

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "story")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub author_ar: String,
    pub author_en: String,

    pub title_ar: String,
    pub title_en: String,

    pub content_ar: String,
    pub content_en: String,

    pub category: String,

    /// Comma-separated tag list.
    pub tags: Option<String>,

    /// Object storage key (`{folder}/{uuid}.{ext}`).
    pub image_key: Option<String>,

    /// "pending" | "approved".
    pub status: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

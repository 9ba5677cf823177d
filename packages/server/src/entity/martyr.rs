use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Martyrdom methods accepted by submission validation. `other` requires a
/// free-text `martyrdom_details`.
pub const MARTYRDOM_METHODS: &[&str] = &[
    "shelling",
    "gunfire",
    "airstrike",
    "execution",
    "torture",
    "other",
];

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "martyr")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name_ar: String,
    pub name_en: String,

    pub birth_date: Option<Date>,
    pub death_date: Option<Date>,

    pub martyrdom_method: String,
    /// Free-text detail, required when method is "other".
    pub martyrdom_details: Option<String>,

    pub bio_ar: Option<String>,
    pub bio_en: Option<String>,

    /// Object storage key (`{folder}/{uuid}.{ext}`).
    pub image_key: Option<String>,

    /// Comma-separated tag list.
    pub tags: Option<String>,

    pub submitted_by: Option<String>,

    /// "pending" | "approved".
    pub status: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

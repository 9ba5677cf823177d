use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "detainee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name_ar: String,
    pub name_en: String,

    pub arrest_date: Option<Date>,

    /// Bilingual free-text detention status (e.g. "still detained",
    /// "released 2024").
    pub detention_status_ar: Option<String>,
    pub detention_status_en: Option<String>,

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

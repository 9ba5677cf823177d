use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "community_photo")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title_ar: String,
    pub title_en: String,

    /// Object storage key (`{folder}/{uuid}.{ext}`). Required: a community
    /// photo without an image is meaningless.
    pub image_key: String,

    pub submitter_name: Option<String>,
    pub submitter_email: Option<String>,

    /// "pending" | "approved".
    pub status: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

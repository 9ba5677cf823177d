use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    /// Natural dedup key; duplicates are merged opportunistically at startup
    /// (lowest-sorting id wins).
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 password hash.
    pub password: String,

    /// Object storage key for the profile image, if any.
    pub image_key: Option<String>,

    pub role: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

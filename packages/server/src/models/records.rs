use chrono::NaiveDate;
use common::text::LocalizedText;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::tags::split_tags;

/// Fixed page size of the unified Record of Honor feed.
pub const RECORDS_PAGE_SIZE: u64 = 24;

/// Raw row shape produced by the UNION ALL feed query. Columns are matched
/// positionally across both arms, so the order here mirrors the query.
#[derive(Debug, FromQueryResult)]
pub struct RecordRow {
    pub id: Uuid,
    pub record_type: String,
    pub name_ar: String,
    pub name_en: String,
    pub primary_date: Option<NaiveDate>,
    pub martyrdom_method: Option<String>,
    pub detention_status_ar: Option<String>,
    pub detention_status_en: Option<String>,
    pub image_key: Option<String>,
    pub tags: Option<String>,
}

/// One entry of the unified feed.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecordItem {
    pub id: Uuid,
    /// "martyr" or "detainee".
    #[schema(example = "martyr")]
    pub record_type: String,
    pub name: LocalizedText,
    /// Death date for martyrs, arrest date for detainees.
    pub primary_date: Option<NaiveDate>,
    /// Present on martyr records only.
    pub martyrdom_method: Option<String>,
    /// Present on detainee records only.
    pub detention_status: Option<LocalizedText>,
    pub image_key: Option<String>,
    pub tags: Vec<String>,
}

impl From<RecordRow> for RecordItem {
    fn from(row: RecordRow) -> Self {
        Self {
            id: row.id,
            record_type: row.record_type,
            name: LocalizedText::new(row.name_ar, row.name_en),
            primary_date: row.primary_date,
            martyrdom_method: row.martyrdom_method,
            detention_status: LocalizedText::from_parts(
                row.detention_status_ar.as_deref(),
                row.detention_status_en.as_deref(),
            ),
            image_key: row.image_key,
            tags: split_tags(row.tags.as_deref()),
        }
    }
}

/// Per-type counts of approved records.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RecordCounts {
    #[schema(example = 31)]
    pub martyrs: u64,
    #[schema(example = 16)]
    pub detainees: u64,
    #[schema(example = 47)]
    pub total: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RecordsResponse {
    pub records: Vec<RecordItem>,
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Fixed page size.
    #[schema(example = 24)]
    pub limit: u64,
    /// Whether more pages exist after this one.
    pub has_more: bool,
    pub counts: RecordCounts,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct RecordsQuery {
    /// Page number (1-based). Defaults to 1.
    pub page: Option<u64>,
}

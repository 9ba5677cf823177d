use axum::Json;
use axum::extract::{Query, State};
use sea_orm::sea_query::{Alias, Expr, NullOrdering, Order, Query as SeaQuery, UnionType};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{STATUS_APPROVED, detainee, martyr};
use crate::error::AppError;
use crate::models::records::{
    RECORDS_PAGE_SIZE, RecordCounts, RecordItem, RecordRow, RecordsQuery, RecordsResponse,
};
use crate::models::shared::page_offset;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Records",
    operation_id = "listRecords",
    summary = "Unified Record of Honor feed",
    description = "Approved martyrs and detainees merged into one feed, ordered by death/arrest date descending (dateless records last, `name_en` tiebreak). Fixed page size of 24.",
    params(RecordsQuery),
    responses(
        (status = 200, description = "One page of the unified feed", body = RecordsResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Json<RecordsResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let limit = RECORDS_PAGE_SIZE;
    let offset = page_offset(page, limit);

    // Both arms project to the same column shape; the first arm's aliases
    // name the result columns.
    let mut feed = SeaQuery::select();
    feed.column(martyr::Column::Id)
        .expr_as(Expr::val("martyr"), Alias::new("record_type"))
        .column(martyr::Column::NameAr)
        .column(martyr::Column::NameEn)
        .expr_as(Expr::col(martyr::Column::DeathDate), Alias::new("primary_date"))
        .column(martyr::Column::MartyrdomMethod)
        .expr_as(
            Expr::val(None::<String>),
            Alias::new("detention_status_ar"),
        )
        .expr_as(
            Expr::val(None::<String>),
            Alias::new("detention_status_en"),
        )
        .column(martyr::Column::ImageKey)
        .column(martyr::Column::Tags)
        .from(martyr::Entity)
        .and_where(Expr::col(martyr::Column::Status).eq(STATUS_APPROVED));

    let mut detainees = SeaQuery::select();
    detainees
        .column(detainee::Column::Id)
        .expr_as(Expr::val("detainee"), Alias::new("record_type"))
        .column(detainee::Column::NameAr)
        .column(detainee::Column::NameEn)
        .expr_as(
            Expr::col(detainee::Column::ArrestDate),
            Alias::new("primary_date"),
        )
        .expr_as(Expr::val(None::<String>), Alias::new("martyrdom_method"))
        .column(detainee::Column::DetentionStatusAr)
        .column(detainee::Column::DetentionStatusEn)
        .column(detainee::Column::ImageKey)
        .column(detainee::Column::Tags)
        .from(detainee::Entity)
        .and_where(Expr::col(detainee::Column::Status).eq(STATUS_APPROVED));

    feed.union(UnionType::All, detainees)
        .order_by_with_nulls(
            Alias::new("primary_date"),
            Order::Desc,
            NullOrdering::Last,
        )
        .order_by(Alias::new("name_en"), Order::Asc)
        .limit(limit)
        .offset(offset);

    let backend = state.db.get_database_backend();
    let rows = RecordRow::find_by_statement(backend.build(&feed))
        .all(&state.db)
        .await?;

    let martyrs = martyr::Entity::find()
        .filter(martyr::Column::Status.eq(STATUS_APPROVED))
        .count(&state.db)
        .await?;
    let detainees = detainee::Entity::find()
        .filter(detainee::Column::Status.eq(STATUS_APPROVED))
        .count(&state.db)
        .await?;
    let total = martyrs + detainees;

    let has_more = offset.saturating_add(rows.len() as u64) < total;

    Ok(Json(RecordsResponse {
        records: rows.into_iter().map(RecordItem::from).collect(),
        page,
        limit,
        has_more,
        counts: RecordCounts {
            martyrs,
            detainees,
            total,
        },
    }))
}

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::text::LocalizedText;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{STATUS_APPROVED, STATUS_PENDING, detainee};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::martyr::delete_object_best_effort;
use crate::models::detainee::*;
use crate::models::shared::{AdminListQuery, ListQuery, Pagination, page_offset, validate_image_key};
use crate::state::AppState;
use crate::utils::tags::join_tags;

#[utoipa::path(
    post,
    path = "/",
    tag = "Detainees",
    operation_id = "submitDetainee",
    summary = "Submit a detainee record for moderation",
    description = "Public submission endpoint. The record is stored with `pending` status and only becomes visible after an approval.",
    request_body = CreateDetaineeRequest,
    responses(
        (status = 201, description = "Submission accepted", body = DetaineeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn submit_detainee(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDetaineeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = validate_create_detainee(&payload)?;
    let model = insert_detainee(&state.db, payload, name, STATUS_PENDING).await?;
    Ok((StatusCode::CREATED, Json(DetaineeResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Detainees",
    operation_id = "listDetainees",
    summary = "List approved detainee records",
    params(ListQuery),
    responses(
        (status = 200, description = "Approved records, newest first", body = DetaineeListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_detainees(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<DetaineeListResponse>, AppError> {
    let (page, per_page) = query.resolve();

    let select = detainee::Entity::find().filter(detainee::Column::Status.eq(STATUS_APPROVED));
    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let data = select
        .order_by_desc(detainee::Column::CreatedAt)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(DetaineeResponse::from)
        .collect();

    Ok(Json(DetaineeListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        },
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Detainees",
    operation_id = "getDetainee",
    summary = "Get one approved detainee record",
    params(("id" = Uuid, Path, description = "Detainee ID")),
    responses(
        (status = 200, description = "Record details", body = DetaineeResponse),
        (status = 404, description = "Not found or not approved (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_detainee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DetaineeResponse>, AppError> {
    let model = detainee::Entity::find_by_id(id)
        .filter(detainee::Column::Status.eq(STATUS_APPROVED))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Detainee record not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Detainees",
    operation_id = "adminListDetainees",
    summary = "List detainee records for moderation",
    description = "Includes pending rows. Requires `detainee:approve` permission.",
    params(AdminListQuery),
    responses(
        (status = 200, description = "Records matching the filter", body = DetaineeListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn admin_list_detainees(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<DetaineeListResponse>, AppError> {
    auth_user.require_permission("detainee:approve")?;
    let (page, per_page) = query.resolve();

    let mut select = detainee::Entity::find();
    if let Some(status) = query.status_filter()? {
        select = select.filter(detainee::Column::Status.eq(status));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let data = select
        .order_by_desc(detainee::Column::CreatedAt)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(DetaineeResponse::from)
        .collect();

    Ok(Json(DetaineeListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages: total.div_ceil(per_page),
        },
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Detainees",
    operation_id = "adminCreateDetainee",
    summary = "Create an approved detainee record directly",
    description = "Bypasses moderation. Requires `detainee:create` permission.",
    request_body = CreateDetaineeRequest,
    responses(
        (status = 201, description = "Record created", body = DetaineeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn admin_create_detainee(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDetaineeRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("detainee:create")?;
    let name = validate_create_detainee(&payload)?;
    let model = insert_detainee(&state.db, payload, name, STATUS_APPROVED).await?;
    Ok((StatusCode::CREATED, Json(DetaineeResponse::from(model))))
}

#[utoipa::path(
    post,
    path = "/{id}/approve",
    tag = "Detainees",
    operation_id = "approveDetainee",
    summary = "Approve a pending detainee record",
    description = "Idempotent status flip to `approved`. Requires `detainee:approve` permission.",
    params(("id" = Uuid, Path, description = "Detainee ID")),
    responses(
        (status = 200, description = "Record is approved", body = DetaineeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn approve_detainee(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DetaineeResponse>, AppError> {
    auth_user.require_permission("detainee:approve")?;

    let model = find_detainee(&state.db, id).await?;
    if model.status == STATUS_APPROVED {
        return Ok(Json(model.into()));
    }

    let mut active: detainee::ActiveModel = model.into();
    active.status = Set(STATUS_APPROVED.to_string());
    let updated = active.update(&state.db).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Detainees",
    operation_id = "updateDetainee",
    summary = "Update a detainee record",
    description = "Only the provided fields change. Requires `detainee:edit` permission.",
    params(("id" = Uuid, Path, description = "Detainee ID")),
    request_body = UpdateDetaineeRequest,
    responses(
        (status = 200, description = "Updated record", body = DetaineeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id = %id))]
pub async fn update_detainee(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateDetaineeRequest>,
) -> Result<Json<DetaineeResponse>, AppError> {
    auth_user.require_permission("detainee:edit")?;

    let model = find_detainee(&state.db, id).await?;

    if let Some(Some(ref key)) = payload.image_key {
        validate_image_key(key, "detainees")?;
    }

    let name = LocalizedText::from_parts(
        payload.name_ar.as_deref().or(Some(&model.name_ar)),
        payload.name_en.as_deref().or(Some(&model.name_en)),
    )
    .ok_or_else(|| AppError::Validation("name_ar or name_en is required".into()))?;

    let mut active: detainee::ActiveModel = model.into();
    active.name_ar = Set(name.ar);
    active.name_en = Set(name.en);
    if let Some(arrest_date) = payload.arrest_date {
        active.arrest_date = Set(arrest_date);
    }
    if let Some(status_ar) = payload.detention_status_ar {
        active.detention_status_ar = Set(status_ar);
    }
    if let Some(status_en) = payload.detention_status_en {
        active.detention_status_en = Set(status_en);
    }
    if let Some(image_key) = payload.image_key {
        active.image_key = Set(image_key);
    }
    if let Some(tags) = payload.tags {
        active.tags = Set(join_tags(&tags));
    }
    if let Some(submitted_by) = payload.submitted_by {
        active.submitted_by = Set(submitted_by
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()));
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Detainees",
    operation_id = "deleteDetainee",
    summary = "Delete a detainee record",
    description = "Deletes the row, then best-effort deletes the stored image object. Requires `detainee:delete` permission.",
    params(("id" = Uuid, Path, description = "Detainee ID")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn delete_detainee(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("detainee:delete")?;

    let model = find_detainee(&state.db, id).await?;
    detainee::Entity::delete_by_id(model.id)
        .exec(&state.db)
        .await?;

    if let Some(ref key) = model.image_key {
        delete_object_best_effort(&state, key).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn find_detainee(db: &DatabaseConnection, id: Uuid) -> Result<detainee::Model, AppError> {
    detainee::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Detainee record not found".into()))
}

async fn insert_detainee(
    db: &DatabaseConnection,
    payload: CreateDetaineeRequest,
    name: LocalizedText,
    status: &str,
) -> Result<detainee::Model, AppError> {
    let detention_status = LocalizedText::from_parts(
        payload.detention_status_ar.as_deref(),
        payload.detention_status_en.as_deref(),
    );

    let new_detainee = detainee::ActiveModel {
        id: Set(Uuid::new_v4()),
        name_ar: Set(name.ar),
        name_en: Set(name.en),
        arrest_date: Set(payload.arrest_date),
        detention_status_ar: Set(detention_status.as_ref().map(|s| s.ar.clone())),
        detention_status_en: Set(detention_status.map(|s| s.en)),
        image_key: Set(payload.image_key),
        tags: Set(join_tags(&payload.tags)),
        submitted_by: Set(payload
            .submitted_by
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())),
        status: Set(status.to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(new_detainee.insert(db).await?)
}

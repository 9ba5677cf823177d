use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::storage::ObjectKey;
use common::text::LocalizedText;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{STATUS_APPROVED, STATUS_PENDING, martyr};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::martyr::*;
use crate::models::shared::{AdminListQuery, ListQuery, Pagination, page_offset, validate_image_key};
use crate::state::AppState;
use crate::utils::tags::join_tags;

#[utoipa::path(
    post,
    path = "/",
    tag = "Martyrs",
    operation_id = "submitMartyr",
    summary = "Submit a martyr record for moderation",
    description = "Public submission endpoint. The record is stored with `pending` status and only becomes visible after an approval.",
    request_body = CreateMartyrRequest,
    responses(
        (status = 201, description = "Submission accepted", body = MartyrResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn submit_martyr(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateMartyrRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = validate_create_martyr(&payload)?;
    let model = insert_martyr(&state.db, payload, name, STATUS_PENDING).await?;
    Ok((StatusCode::CREATED, Json(MartyrResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Martyrs",
    operation_id = "listMartyrs",
    summary = "List approved martyr records",
    params(ListQuery),
    responses(
        (status = 200, description = "Approved records, newest first", body = MartyrListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_martyrs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<MartyrListResponse>, AppError> {
    let (page, per_page) = query.resolve();

    let select = martyr::Entity::find().filter(martyr::Column::Status.eq(STATUS_APPROVED));
    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let data = select
        .order_by_desc(martyr::Column::CreatedAt)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(MartyrResponse::from)
        .collect();

    Ok(Json(MartyrListResponse {
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
    tag = "Martyrs",
    operation_id = "getMartyr",
    summary = "Get one approved martyr record",
    params(("id" = Uuid, Path, description = "Martyr ID")),
    responses(
        (status = 200, description = "Record details", body = MartyrResponse),
        (status = 404, description = "Not found or not approved (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_martyr(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MartyrResponse>, AppError> {
    let model = martyr::Entity::find_by_id(id)
        .filter(martyr::Column::Status.eq(STATUS_APPROVED))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Martyr record not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Martyrs",
    operation_id = "adminListMartyrs",
    summary = "List martyr records for moderation",
    description = "Includes pending rows. Requires `martyr:approve` permission.",
    params(AdminListQuery),
    responses(
        (status = 200, description = "Records matching the filter", body = MartyrListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn admin_list_martyrs(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<MartyrListResponse>, AppError> {
    auth_user.require_permission("martyr:approve")?;
    let (page, per_page) = query.resolve();

    let mut select = martyr::Entity::find();
    if let Some(status) = query.status_filter()? {
        select = select.filter(martyr::Column::Status.eq(status));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let data = select
        .order_by_desc(martyr::Column::CreatedAt)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(MartyrResponse::from)
        .collect();

    Ok(Json(MartyrListResponse {
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
    tag = "Martyrs",
    operation_id = "adminCreateMartyr",
    summary = "Create an approved martyr record directly",
    description = "Bypasses moderation. Requires `martyr:create` permission.",
    request_body = CreateMartyrRequest,
    responses(
        (status = 201, description = "Record created", body = MartyrResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn admin_create_martyr(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateMartyrRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("martyr:create")?;
    let name = validate_create_martyr(&payload)?;
    let model = insert_martyr(&state.db, payload, name, STATUS_APPROVED).await?;
    Ok((StatusCode::CREATED, Json(MartyrResponse::from(model))))
}

#[utoipa::path(
    post,
    path = "/{id}/approve",
    tag = "Martyrs",
    operation_id = "approveMartyr",
    summary = "Approve a pending martyr record",
    description = "Idempotent status flip to `approved`. Requires `martyr:approve` permission.",
    params(("id" = Uuid, Path, description = "Martyr ID")),
    responses(
        (status = 200, description = "Record is approved", body = MartyrResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn approve_martyr(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MartyrResponse>, AppError> {
    auth_user.require_permission("martyr:approve")?;

    let model = find_martyr(&state.db, id).await?;
    if model.status == STATUS_APPROVED {
        return Ok(Json(model.into()));
    }

    let mut active: martyr::ActiveModel = model.into();
    active.status = Set(STATUS_APPROVED.to_string());
    let updated = active.update(&state.db).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Martyrs",
    operation_id = "updateMartyr",
    summary = "Update a martyr record",
    description = "Only the provided fields change. Requires `martyr:edit` permission.",
    params(("id" = Uuid, Path, description = "Martyr ID")),
    request_body = UpdateMartyrRequest,
    responses(
        (status = 200, description = "Updated record", body = MartyrResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id = %id))]
pub async fn update_martyr(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateMartyrRequest>,
) -> Result<Json<MartyrResponse>, AppError> {
    auth_user.require_permission("martyr:edit")?;

    let model = find_martyr(&state.db, id).await?;

    // Effective method and details after the patch must still satisfy the
    // conditional rule.
    let method = payload
        .martyrdom_method
        .clone()
        .unwrap_or_else(|| model.martyrdom_method.clone());
    let details = match payload.martyrdom_details.clone() {
        Some(d) => d,
        None => model.martyrdom_details.clone(),
    };
    validate_martyrdom_method(&method, details.as_deref())?;

    if let Some(Some(ref key)) = payload.image_key {
        validate_image_key(key, "martyrs")?;
    }

    let name = LocalizedText::from_parts(
        payload.name_ar.as_deref().or(Some(&model.name_ar)),
        payload.name_en.as_deref().or(Some(&model.name_en)),
    )
    .ok_or_else(|| AppError::Validation("name_ar or name_en is required".into()))?;

    let mut active: martyr::ActiveModel = model.into();
    active.name_ar = Set(name.ar);
    active.name_en = Set(name.en);
    active.martyrdom_method = Set(method);
    active.martyrdom_details = Set(details);
    if let Some(birth_date) = payload.birth_date {
        active.birth_date = Set(birth_date);
    }
    if let Some(death_date) = payload.death_date {
        active.death_date = Set(death_date);
    }
    if let Some(bio_ar) = payload.bio_ar {
        active.bio_ar = Set(bio_ar);
    }
    if let Some(bio_en) = payload.bio_en {
        active.bio_en = Set(bio_en);
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
    tag = "Martyrs",
    operation_id = "deleteMartyr",
    summary = "Delete a martyr record",
    description = "Deletes the row, then best-effort deletes the stored image object. Requires `martyr:delete` permission.",
    params(("id" = Uuid, Path, description = "Martyr ID")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn delete_martyr(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("martyr:delete")?;

    let model = find_martyr(&state.db, id).await?;
    martyr::Entity::delete_by_id(model.id).exec(&state.db).await?;

    if let Some(ref key) = model.image_key {
        delete_object_best_effort(&state, key).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn find_martyr(db: &DatabaseConnection, id: Uuid) -> Result<martyr::Model, AppError> {
    martyr::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Martyr record not found".into()))
}

async fn insert_martyr(
    db: &DatabaseConnection,
    payload: CreateMartyrRequest,
    name: LocalizedText,
    status: &str,
) -> Result<martyr::Model, AppError> {
    let bio = LocalizedText::from_parts(payload.bio_ar.as_deref(), payload.bio_en.as_deref());

    let new_martyr = martyr::ActiveModel {
        id: Set(Uuid::new_v4()),
        name_ar: Set(name.ar),
        name_en: Set(name.en),
        birth_date: Set(payload.birth_date),
        death_date: Set(payload.death_date),
        martyrdom_method: Set(payload.martyrdom_method),
        martyrdom_details: Set(payload
            .martyrdom_details
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())),
        bio_ar: Set(bio.as_ref().map(|b| b.ar.clone())),
        bio_en: Set(bio.map(|b| b.en)),
        image_key: Set(payload.image_key),
        tags: Set(join_tags(&payload.tags)),
        submitted_by: Set(payload
            .submitted_by
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())),
        status: Set(status.to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(new_martyr.insert(db).await?)
}

/// Delete a stored object after its row is gone. Failures are logged and
/// swallowed; an orphaned object never blocks the deletion.
pub(crate) async fn delete_object_best_effort(state: &AppState, key: &str) {
    match ObjectKey::parse(key) {
        Ok(parsed) => {
            if let Err(e) = state.objects.delete(&parsed).await {
                tracing::warn!("Failed to delete object {key}: {e}");
            }
        }
        Err(e) => tracing::warn!("Stored image key {key} is malformed: {e}"),
    }
}

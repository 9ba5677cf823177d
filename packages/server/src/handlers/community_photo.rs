use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::text::LocalizedText;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{STATUS_APPROVED, STATUS_PENDING, community_photo};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::martyr::delete_object_best_effort;
use crate::models::community_photo::*;
use crate::models::shared::{
    AdminListQuery, ListQuery, Pagination, page_offset, validate_email, validate_image_key,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Community Photos",
    operation_id = "submitPhoto",
    summary = "Submit a community photo for moderation",
    description = "Public submission endpoint. The photo is stored with `pending` status and only becomes visible after an approval. The image must be uploaded to the `community` media folder first.",
    request_body = CreatePhotoRequest,
    responses(
        (status = 201, description = "Submission accepted", body = PhotoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn submit_photo(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePhotoRequest>,
) -> Result<impl IntoResponse, AppError> {
    let title = validate_create_photo(&payload)?;
    let model = insert_photo(&state.db, payload, title, STATUS_PENDING).await?;
    Ok((StatusCode::CREATED, Json(PhotoResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Community Photos",
    operation_id = "listPhotos",
    summary = "List approved community photos",
    params(ListQuery),
    responses(
        (status = 200, description = "Approved photos, newest first", body = PhotoListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_photos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<PhotoListResponse>, AppError> {
    let (page, per_page) = query.resolve();

    let select =
        community_photo::Entity::find().filter(community_photo::Column::Status.eq(STATUS_APPROVED));
    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let data = select
        .order_by_desc(community_photo::Column::CreatedAt)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(PhotoResponse::from)
        .collect();

    Ok(Json(PhotoListResponse {
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
    tag = "Community Photos",
    operation_id = "getPhoto",
    summary = "Get one approved community photo",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo details", body = PhotoResponse),
        (status = 404, description = "Not found or not approved (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_photo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PhotoResponse>, AppError> {
    let model = community_photo::Entity::find_by_id(id)
        .filter(community_photo::Column::Status.eq(STATUS_APPROVED))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Community photo not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Community Photos",
    operation_id = "adminListPhotos",
    summary = "List community photos for moderation",
    description = "Includes pending rows. Requires `photo:approve` permission.",
    params(AdminListQuery),
    responses(
        (status = 200, description = "Photos matching the filter", body = PhotoListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn admin_list_photos(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<PhotoListResponse>, AppError> {
    auth_user.require_permission("photo:approve")?;
    let (page, per_page) = query.resolve();

    let mut select = community_photo::Entity::find();
    if let Some(status) = query.status_filter()? {
        select = select.filter(community_photo::Column::Status.eq(status));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let data = select
        .order_by_desc(community_photo::Column::CreatedAt)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(PhotoResponse::from)
        .collect();

    Ok(Json(PhotoListResponse {
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
    tag = "Community Photos",
    operation_id = "adminCreatePhoto",
    summary = "Create an approved community photo directly",
    description = "Bypasses moderation. Requires `photo:create` permission.",
    request_body = CreatePhotoRequest,
    responses(
        (status = 201, description = "Photo created", body = PhotoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn admin_create_photo(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePhotoRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("photo:create")?;
    let title = validate_create_photo(&payload)?;
    let model = insert_photo(&state.db, payload, title, STATUS_APPROVED).await?;
    Ok((StatusCode::CREATED, Json(PhotoResponse::from(model))))
}

#[utoipa::path(
    post,
    path = "/{id}/approve",
    tag = "Community Photos",
    operation_id = "approvePhoto",
    summary = "Approve a pending community photo",
    description = "Idempotent status flip to `approved`. Requires `photo:approve` permission (held by both admins and contributors).",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 200, description = "Photo is approved", body = PhotoResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn approve_photo(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PhotoResponse>, AppError> {
    auth_user.require_permission("photo:approve")?;

    let model = find_photo(&state.db, id).await?;
    if model.status == STATUS_APPROVED {
        return Ok(Json(model.into()));
    }

    let mut active: community_photo::ActiveModel = model.into();
    active.status = Set(STATUS_APPROVED.to_string());
    let updated = active.update(&state.db).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Community Photos",
    operation_id = "updatePhoto",
    summary = "Update a community photo",
    description = "Only the provided fields change. Requires `photo:edit` permission.",
    params(("id" = Uuid, Path, description = "Photo ID")),
    request_body = UpdatePhotoRequest,
    responses(
        (status = 200, description = "Updated photo", body = PhotoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id = %id))]
pub async fn update_photo(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdatePhotoRequest>,
) -> Result<Json<PhotoResponse>, AppError> {
    auth_user.require_permission("photo:edit")?;

    let model = find_photo(&state.db, id).await?;

    if let Some(ref key) = payload.image_key {
        validate_image_key(key, "community")?;
    }
    if let Some(Some(ref email)) = payload.submitter_email {
        let email = email.trim();
        if !email.is_empty() {
            validate_email(email)?;
        }
    }

    let title = LocalizedText::from_parts(
        payload.title_ar.as_deref().or(Some(&model.title_ar)),
        payload.title_en.as_deref().or(Some(&model.title_en)),
    )
    .ok_or_else(|| AppError::Validation("title_ar or title_en is required".into()))?;

    let mut active: community_photo::ActiveModel = model.into();
    active.title_ar = Set(title.ar);
    active.title_en = Set(title.en);
    if let Some(image_key) = payload.image_key {
        active.image_key = Set(image_key);
    }
    // Blank values become NULL, same as on submission.
    if let Some(submitter_name) = payload.submitter_name {
        active.submitter_name = Set(submitter_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()));
    }
    if let Some(submitter_email) = payload.submitter_email {
        active.submitter_email = Set(submitter_email
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()));
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Community Photos",
    operation_id = "deletePhoto",
    summary = "Delete a community photo",
    description = "Deletes the row, then best-effort deletes the stored image object. Requires `photo:delete` permission.",
    params(("id" = Uuid, Path, description = "Photo ID")),
    responses(
        (status = 204, description = "Photo deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn delete_photo(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("photo:delete")?;

    let model = find_photo(&state.db, id).await?;
    community_photo::Entity::delete_by_id(model.id)
        .exec(&state.db)
        .await?;

    delete_object_best_effort(&state, &model.image_key).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_photo(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<community_photo::Model, AppError> {
    community_photo::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Community photo not found".into()))
}

async fn insert_photo(
    db: &DatabaseConnection,
    payload: CreatePhotoRequest,
    title: LocalizedText,
    status: &str,
) -> Result<community_photo::Model, AppError> {
    let new_photo = community_photo::ActiveModel {
        id: Set(Uuid::new_v4()),
        title_ar: Set(title.ar),
        title_en: Set(title.en),
        image_key: Set(payload.image_key),
        submitter_name: Set(payload
            .submitter_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())),
        submitter_email: Set(payload
            .submitter_email
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())),
        status: Set(status.to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(new_photo.insert(db).await?)
}

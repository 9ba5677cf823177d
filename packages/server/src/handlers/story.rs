use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::text::LocalizedText;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{STATUS_APPROVED, STATUS_PENDING, story};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::handlers::martyr::delete_object_best_effort;
use crate::models::shared::{AdminListQuery, ListQuery, Pagination, page_offset, validate_image_key};
use crate::models::story::*;
use crate::state::AppState;
use crate::utils::tags::join_tags;

#[utoipa::path(
    post,
    path = "/",
    tag = "Stories",
    operation_id = "submitStory",
    summary = "Submit a community story for moderation",
    description = "Public submission endpoint. The story is stored with `pending` status and only becomes visible after an approval.",
    request_body = CreateStoryRequest,
    responses(
        (status = 201, description = "Submission accepted", body = StoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn submit_story(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateStoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let validated = validate_create_story(&payload)?;
    let model = insert_story(&state.db, payload, validated, STATUS_PENDING).await?;
    Ok((StatusCode::CREATED, Json(StoryResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Stories",
    operation_id = "listStories",
    summary = "List approved stories",
    params(ListQuery),
    responses(
        (status = 200, description = "Approved stories, newest first", body = StoryListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_stories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<StoryListResponse>, AppError> {
    let (page, per_page) = query.resolve();

    let select = story::Entity::find().filter(story::Column::Status.eq(STATUS_APPROVED));
    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let data = select
        .order_by_desc(story::Column::CreatedAt)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(StoryResponse::from)
        .collect();

    Ok(Json(StoryListResponse {
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
    tag = "Stories",
    operation_id = "getStory",
    summary = "Get one approved story",
    params(("id" = Uuid, Path, description = "Story ID")),
    responses(
        (status = 200, description = "Story details", body = StoryResponse),
        (status = 404, description = "Not found or not approved (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_story(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoryResponse>, AppError> {
    let model = story::Entity::find_by_id(id)
        .filter(story::Column::Status.eq(STATUS_APPROVED))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Story not found".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Stories",
    operation_id = "adminListStories",
    summary = "List stories for moderation",
    description = "Includes pending rows. Requires `story:approve` permission.",
    params(AdminListQuery),
    responses(
        (status = 200, description = "Stories matching the filter", body = StoryListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn admin_list_stories(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Result<Json<StoryListResponse>, AppError> {
    auth_user.require_permission("story:approve")?;
    let (page, per_page) = query.resolve();

    let mut select = story::Entity::find();
    if let Some(status) = query.status_filter()? {
        select = select.filter(story::Column::Status.eq(status));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let data = select
        .order_by_desc(story::Column::CreatedAt)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(StoryResponse::from)
        .collect();

    Ok(Json(StoryListResponse {
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
    tag = "Stories",
    operation_id = "adminCreateStory",
    summary = "Create an approved story directly",
    description = "Bypasses moderation. Requires `story:create` permission.",
    request_body = CreateStoryRequest,
    responses(
        (status = 201, description = "Story created", body = StoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn admin_create_story(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateStoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_permission("story:create")?;
    let validated = validate_create_story(&payload)?;
    let model = insert_story(&state.db, payload, validated, STATUS_APPROVED).await?;
    Ok((StatusCode::CREATED, Json(StoryResponse::from(model))))
}

#[utoipa::path(
    post,
    path = "/{id}/approve",
    tag = "Stories",
    operation_id = "approveStory",
    summary = "Approve a pending story",
    description = "Idempotent status flip to `approved`. Requires `story:approve` permission (held by both admins and contributors).",
    params(("id" = Uuid, Path, description = "Story ID")),
    responses(
        (status = 200, description = "Story is approved", body = StoryResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn approve_story(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StoryResponse>, AppError> {
    auth_user.require_permission("story:approve")?;

    let model = find_story(&state.db, id).await?;
    if model.status == STATUS_APPROVED {
        return Ok(Json(model.into()));
    }

    let mut active: story::ActiveModel = model.into();
    active.status = Set(STATUS_APPROVED.to_string());
    let updated = active.update(&state.db).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Stories",
    operation_id = "updateStory",
    summary = "Update a story",
    description = "Only the provided fields change. Requires `story:edit` permission.",
    params(("id" = Uuid, Path, description = "Story ID")),
    request_body = UpdateStoryRequest,
    responses(
        (status = 200, description = "Updated story", body = StoryResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id = %id))]
pub async fn update_story(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateStoryRequest>,
) -> Result<Json<StoryResponse>, AppError> {
    auth_user.require_permission("story:edit")?;

    let model = find_story(&state.db, id).await?;

    if let Some(ref category) = payload.category {
        validate_category(category)?;
    }
    if let Some(Some(ref key)) = payload.image_key {
        validate_image_key(key, "stories")?;
    }

    let author = LocalizedText::from_parts(
        payload.author_ar.as_deref().or(Some(&model.author_ar)),
        payload.author_en.as_deref().or(Some(&model.author_en)),
    )
    .ok_or_else(|| AppError::Validation("author_ar or author_en is required".into()))?;
    let title = LocalizedText::from_parts(
        payload.title_ar.as_deref().or(Some(&model.title_ar)),
        payload.title_en.as_deref().or(Some(&model.title_en)),
    )
    .ok_or_else(|| AppError::Validation("title_ar or title_en is required".into()))?;
    let content = LocalizedText::from_parts(
        payload.content_ar.as_deref().or(Some(&model.content_ar)),
        payload.content_en.as_deref().or(Some(&model.content_en)),
    )
    .ok_or_else(|| AppError::Validation("content_ar or content_en is required".into()))?;

    let mut active: story::ActiveModel = model.into();
    active.author_ar = Set(author.ar);
    active.author_en = Set(author.en);
    active.title_ar = Set(title.ar);
    active.title_en = Set(title.en);
    active.content_ar = Set(content.ar);
    active.content_en = Set(content.en);
    if let Some(category) = payload.category {
        active.category = Set(category);
    }
    if let Some(tags) = payload.tags {
        active.tags = Set(join_tags(&tags));
    }
    if let Some(image_key) = payload.image_key {
        active.image_key = Set(image_key);
    }

    let updated = active.update(&state.db).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Stories",
    operation_id = "deleteStory",
    summary = "Delete a story",
    description = "Deletes the row, then best-effort deletes the stored image object. Requires `story:delete` permission.",
    params(("id" = Uuid, Path, description = "Story ID")),
    responses(
        (status = 204, description = "Story deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id = %id))]
pub async fn delete_story(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    auth_user.require_permission("story:delete")?;

    let model = find_story(&state.db, id).await?;
    story::Entity::delete_by_id(model.id).exec(&state.db).await?;

    if let Some(ref key) = model.image_key {
        delete_object_best_effort(&state, key).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

async fn find_story(db: &DatabaseConnection, id: Uuid) -> Result<story::Model, AppError> {
    story::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Story not found".into()))
}

async fn insert_story(
    db: &DatabaseConnection,
    payload: CreateStoryRequest,
    validated: ValidatedStory,
    status: &str,
) -> Result<story::Model, AppError> {
    let new_story = story::ActiveModel {
        id: Set(Uuid::new_v4()),
        author_ar: Set(validated.author.ar),
        author_en: Set(validated.author.en),
        title_ar: Set(validated.title.ar),
        title_en: Set(validated.title.en),
        content_ar: Set(validated.content.ar),
        content_en: Set(validated.content.en),
        category: Set(payload.category),
        tags: Set(join_tags(&payload.tags)),
        image_key: Set(payload.image_key),
        status: Set(status.to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    Ok(new_story.insert(db).await?)
}

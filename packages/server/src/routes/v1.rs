use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/records", records_routes())
        .nest("/martyrs", martyr_routes())
        .nest("/detainees", detainee_routes())
        .nest("/stories", story_routes())
        .nest("/community-photos", photo_routes())
        .nest("/media", media_routes())
        .nest("/admin", admin_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::register))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn records_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::records::list_records))
}

fn martyr_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::martyr::submit_martyr,
            handlers::martyr::list_martyrs
        ))
        .routes(routes!(handlers::martyr::get_martyr))
}

fn detainee_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::detainee::submit_detainee,
            handlers::detainee::list_detainees
        ))
        .routes(routes!(handlers::detainee::get_detainee))
}

fn story_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::story::submit_story,
            handlers::story::list_stories
        ))
        .routes(routes!(handlers::story::get_story))
}

fn photo_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::community_photo::submit_photo,
            handlers::community_photo::list_photos
        ))
        .routes(routes!(handlers::community_photo::get_photo))
}

fn media_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::media::upload_media))
        .routes(routes!(handlers::media::download_media))
        .layer(handlers::media::upload_body_limit())
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/martyrs", admin_martyr_routes())
        .nest("/detainees", admin_detainee_routes())
        .nest("/stories", admin_story_routes())
        .nest("/community-photos", admin_photo_routes())
        .nest("/users", admin_user_routes())
}

fn admin_martyr_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::martyr::admin_list_martyrs,
            handlers::martyr::admin_create_martyr
        ))
        .routes(routes!(
            handlers::martyr::update_martyr,
            handlers::martyr::delete_martyr
        ))
        .routes(routes!(handlers::martyr::approve_martyr))
}

fn admin_detainee_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::detainee::admin_list_detainees,
            handlers::detainee::admin_create_detainee
        ))
        .routes(routes!(
            handlers::detainee::update_detainee,
            handlers::detainee::delete_detainee
        ))
        .routes(routes!(handlers::detainee::approve_detainee))
}

fn admin_story_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::story::admin_list_stories,
            handlers::story::admin_create_story
        ))
        .routes(routes!(
            handlers::story::update_story,
            handlers::story::delete_story
        ))
        .routes(routes!(handlers::story::approve_story))
}

fn admin_photo_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::community_photo::admin_list_photos,
            handlers::community_photo::admin_create_photo
        ))
        .routes(routes!(
            handlers::community_photo::update_photo,
            handlers::community_photo::delete_photo
        ))
        .routes(routes!(handlers::community_photo::approve_photo))
}

fn admin_user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::auth::assign_role))
}

use sea_orm::sea_query::{Index, OnConflict, PostgresQueryBuilder};
use sea_orm::*;
use tracing::info;

use crate::entity::{community_photo, detainee, martyr, role, role_permission, story};

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[&str] = &["admin", "contributor", "public"];

/// Default role-permission mappings seeded on startup.
///
/// Contributors can clear the story and photo moderation queues but cannot
/// touch martyr or detainee records, edit, or delete anything.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Admin: all permissions
    ("admin", "martyr:create"),
    ("admin", "martyr:edit"),
    ("admin", "martyr:delete"),
    ("admin", "martyr:approve"),
    ("admin", "detainee:create"),
    ("admin", "detainee:edit"),
    ("admin", "detainee:delete"),
    ("admin", "detainee:approve"),
    ("admin", "story:create"),
    ("admin", "story:edit"),
    ("admin", "story:delete"),
    ("admin", "story:approve"),
    ("admin", "photo:create"),
    ("admin", "photo:edit"),
    ("admin", "photo:delete"),
    ("admin", "photo:approve"),
    ("admin", "user:manage"),
    // Contributor
    ("contributor", "story:approve"),
    ("contributor", "photo:approve"),
];

/// Seed the `role` and `role_permission` tables with defaults.
pub async fn seed_role_permissions(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Seed roles
    let mut roles_inserted = 0u32;
    for &name in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
        };

        let result = role::Entity::insert(model)
            .on_conflict(
                OnConflict::column(role::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => roles_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    // Seed role-permission mappings
    let mut perms_inserted = 0u32;
    for &(role, permission) in DEFAULT_MAPPINGS {
        let model = role_permission::ActiveModel {
            role: Set(role.to_string()),
            permission: Set(permission.to_string()),
        };

        let result = role_permission::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    role_permission::Column::Role,
                    role_permission::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(_) => perms_inserted += 1,
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if perms_inserted > 0 {
        info!("Seeded {} new role-permission mappings", perms_inserted);
    }

    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup. Failures are logged and skipped;
/// the queries still run without the index.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // The unified feed filters on status and orders by date.
    let martyr_idx = Index::create()
        .if_not_exists()
        .name("idx_martyr_status_death")
        .table(martyr::Entity)
        .col(martyr::Column::Status)
        .col(martyr::Column::DeathDate)
        .to_string(PostgresQueryBuilder);

    let detainee_idx = Index::create()
        .if_not_exists()
        .name("idx_detainee_status_arrest")
        .table(detainee::Entity)
        .col(detainee::Column::Status)
        .col(detainee::Column::ArrestDate)
        .to_string(PostgresQueryBuilder);

    // Public listings filter on status and order by creation time.
    let story_idx = Index::create()
        .if_not_exists()
        .name("idx_story_status_created")
        .table(story::Entity)
        .col(story::Column::Status)
        .col(story::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    let photo_idx = Index::create()
        .if_not_exists()
        .name("idx_photo_status_created")
        .table(community_photo::Entity)
        .col(community_photo::Column::Status)
        .col(community_photo::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    for (name, stmt) in [
        ("idx_martyr_status_death", martyr_idx),
        ("idx_detainee_status_arrest", detainee_idx),
        ("idx_story_status_created", story_idx),
        ("idx_photo_status_created", photo_idx),
    ] {
        match db.execute_unprepared(&stmt).await {
            Ok(_) => info!("Ensured index {} exists", name),
            Err(e) => tracing::warn!("Failed to create index {}: {}", name, e),
        }
    }

    Ok(())
}

/// Merge duplicate user rows sharing an email, keeping the lowest-sorting id.
///
/// Opportunistic repair for rows created before the unique constraint was in
/// place. Must run before the schema sync: the sync creates the unique email
/// index, which fails while duplicates exist. On a fresh database the table
/// does not exist yet and there is nothing to repair.
pub async fn merge_duplicate_users(db: &DatabaseConnection) -> Result<(), DbErr> {
    let table_exists = db
        .query_one_raw(Statement::from_string(
            DbBackend::Postgres,
            r#"SELECT to_regclass('"user"') IS NOT NULL AS present"#.to_string(),
        ))
        .await?
        .and_then(|row| row.try_get::<bool>("", "present").ok())
        .unwrap_or(false);
    if !table_exists {
        return Ok(());
    }

    let result = db
        .execute_unprepared(
            r#"DELETE FROM "user" a USING "user" b WHERE a.email = b.email AND b.id < a.id"#,
        )
        .await?;

    if result.rows_affected() > 0 {
        info!("Merged {} duplicate user rows", result.rows_affected());
    }

    Ok(())
}

use sea_orm::{ConnectionTrait, EntityTrait};
use uuid::Uuid;

use server::entity::user;

use crate::common::create_blank_database;

#[tokio::test]
async fn duplicate_emails_are_merged_before_the_unique_index_lands() {
    let db = create_blank_database().await;

    // Nothing to repair on a fresh database; the user table does not exist yet.
    server::seed::merge_duplicate_users(&db).await.unwrap();

    // A table provisioned before the unique email constraint, already holding
    // duplicate rows.
    db.execute_unprepared(
        r#"CREATE TABLE "user" (
            id uuid PRIMARY KEY,
            name text NOT NULL,
            email text NOT NULL,
            password text NOT NULL,
            image_key text,
            role text NOT NULL,
            created_at timestamptz NOT NULL
        )"#,
    )
    .await
    .unwrap();

    let kept = Uuid::nil();
    let merged = Uuid::max();
    for id in [kept, merged] {
        db.execute_unprepared(&format!(
            "INSERT INTO \"user\" (id, name, email, password, role, created_at) \
             VALUES ('{id}', 'Amal Haddad', 'amal@example.org', 'x', 'public', now())"
        ))
        .await
        .unwrap();
    }

    // The startup sequence: merge first, then sync the schema. The sync lands
    // the unique email index, which only works over deduplicated data.
    server::seed::merge_duplicate_users(&db).await.unwrap();
    server::database::sync_schema(&db).await.unwrap();

    let users = user::Entity::find().all(&db).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, kept);
}

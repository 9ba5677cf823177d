use sea_orm::EntityTrait;
use serde_json::json;

use server::entity::community_photo;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn approval_is_fail_closed() {
    let app = TestApp::spawn().await;
    let id = app.submit_martyr("أحمد خليل").await;

    let res = app
        .client
        .post(format!(
            "http://{}{}",
            app.addr,
            routes::admin_approve("martyrs", id)
        ))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401);

    let public = app
        .create_authenticated_user("amal@example.org", "a-strong-password")
        .await;
    let res = app
        .post_with_token(&routes::admin_approve("martyrs", id), &json!({}), &public)
        .await;
    assert_eq!(res.status, 403, "{}", res.text);
    assert_eq!(res.error_code(), "PERMISSION_DENIED");

    // Still pending, still hidden.
    let get = app
        .get_without_token(&routes::item(routes::MARTYRS, id))
        .await;
    assert_eq!(get.status, 404);
}

#[tokio::test]
async fn approving_makes_a_record_public_and_is_idempotent() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;
    let id = app.submit_martyr("أحمد خليل").await;

    let res = app
        .post_with_token(&routes::admin_approve("martyrs", id), &json!({}), &admin)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["status"], "approved");

    // A second approval is a no-op, not an error.
    let res = app
        .post_with_token(&routes::admin_approve("martyrs", id), &json!({}), &admin)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["status"], "approved");

    let list = app.get_without_token(routes::MARTYRS).await;
    assert_eq!(list.body["pagination"]["total"], 1);
    let get = app
        .get_without_token(&routes::item(routes::MARTYRS, id))
        .await;
    assert_eq!(get.status, 200, "{}", get.text);
}

#[tokio::test]
async fn contributor_can_approve_stories_but_not_martyrs() {
    let app = TestApp::spawn().await;
    let contributor = app
        .create_user_with_role("contrib@example.org", "contributor")
        .await;

    let story_id = app.submit_story("The old market").await;
    let res = app
        .post_with_token(
            &routes::admin_approve("stories", story_id),
            &json!({}),
            &contributor,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    let martyr_id = app.submit_martyr("أحمد خليل").await;
    let res = app
        .post_with_token(
            &routes::admin_approve("martyrs", martyr_id),
            &json!({}),
            &contributor,
        )
        .await;
    assert_eq!(res.status, 403, "{}", res.text);

    // Approval rights do not imply delete rights.
    let res = app
        .delete_with_token(&routes::admin_item("stories", story_id), &contributor)
        .await;
    assert_eq!(res.status, 403, "{}", res.text);
}

#[tokio::test]
async fn admin_pending_queue_filters_by_status() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    let pending_id = app.submit_martyr("أحمد خليل").await;
    let approved_id = app.create_approved_martyr(&admin, "Omar Saleh", None).await;

    let all = app
        .get_with_token(&routes::admin("martyrs"), &admin)
        .await;
    assert_eq!(all.status, 200, "{}", all.text);
    assert_eq!(all.body["pagination"]["total"], 2);

    let pending = app
        .get_with_token(
            &format!("{}?status=pending", routes::admin("martyrs")),
            &admin,
        )
        .await;
    let data = pending.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], json!(pending_id.to_string()));

    let approved = app
        .get_with_token(
            &format!("{}?status=approved", routes::admin("martyrs")),
            &admin,
        )
        .await;
    let data = approved.body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], json!(approved_id.to_string()));

    let bad = app
        .get_with_token(
            &format!("{}?status=rejected", routes::admin("martyrs")),
            &admin,
        )
        .await;
    assert_eq!(bad.status, 400, "{}", bad.text);
}

#[tokio::test]
async fn admin_created_records_are_immediately_public() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    let id = app.create_approved_martyr(&admin, "Omar Saleh", None).await;
    let get = app
        .get_without_token(&routes::item(routes::MARTYRS, id))
        .await;
    assert_eq!(get.status, 200, "{}", get.text);
    assert_eq!(get.body["status"], "approved");
}

#[tokio::test]
async fn patch_updates_only_the_provided_fields() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    let id = app
        .create_approved_martyr(&admin, "Omar Saleh", Some("2023-11-02"))
        .await;

    let res = app
        .patch_with_token(
            &routes::admin_item("martyrs", id),
            &json!({ "bio_en": "A carpenter from the old quarter." }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["bio"]["en"], "A carpenter from the old quarter.");
    // Untouched fields survive the patch.
    assert_eq!(res.body["name"]["en"], "Omar Saleh");
    assert_eq!(res.body["death_date"], "2023-11-02");

    // An explicit null clears a nullable field.
    let res = app
        .patch_with_token(
            &routes::admin_item("martyrs", id),
            &json!({ "death_date": null }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["death_date"].is_null());
    assert_eq!(res.body["bio"]["en"], "A carpenter from the old quarter.");
}

#[tokio::test]
async fn patch_keeps_the_conditional_method_rule() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;
    let id = app.create_approved_martyr(&admin, "Omar Saleh", None).await;

    // Switching to `other` without details is rejected.
    let res = app
        .patch_with_token(
            &routes::admin_item("martyrs", id),
            &json!({ "martyrdom_method": "other" }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);

    let res = app
        .patch_with_token(
            &routes::admin_item("martyrs", id),
            &json!({
                "martyrdom_method": "other",
                "martyrdom_details": "died under rubble",
            }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["martyrdom_method"], "other");
}

#[tokio::test]
async fn patch_normalizes_blank_submitter_fields() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    let upload = app
        .upload("community", "square.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
        .await;
    let key = upload.body["key"].as_str().unwrap().to_string();

    let submit = app
        .post_without_token(
            routes::PHOTOS,
            &json!({
                "title_en": "The town square",
                "image_key": &key,
                "submitter_name": "Amal Haddad",
                "submitter_email": "amal@example.org",
            }),
        )
        .await;
    assert_eq!(submit.status, 201, "{}", submit.text);
    let id = submit.id();

    // Whitespace-only values are stored as NULL, same as on submission.
    let res = app
        .patch_with_token(
            &routes::admin_item("community-photos", id),
            &json!({ "submitter_name": "   ", "submitter_email": "  " }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert!(res.body["submitter_name"].is_null());

    let row = community_photo::Entity::find_by_id(id)
        .one(&app.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.submitter_name, None);
    assert_eq!(row.submitter_email, None);

    // A malformed email is still rejected on update.
    let res = app
        .patch_with_token(
            &routes::admin_item("community-photos", id),
            &json!({ "submitter_email": "not-an-email" }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
}

#[tokio::test]
async fn deleting_a_photo_removes_its_stored_object() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    let upload = app
        .upload("community", "square.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
        .await;
    assert_eq!(upload.status, 201, "{}", upload.text);
    let key = upload.body["key"].as_str().unwrap().to_string();

    let submit = app
        .post_without_token(
            routes::PHOTOS,
            &json!({
                "title_en": "The town square",
                "image_key": &key,
            }),
        )
        .await;
    assert_eq!(submit.status, 201, "{}", submit.text);
    let id = submit.id();

    let approve = app
        .post_with_token(
            &routes::admin_approve("community-photos", id),
            &json!({}),
            &admin,
        )
        .await;
    assert_eq!(approve.status, 200, "{}", approve.text);

    let res = app
        .delete_with_token(&routes::admin_item("community-photos", id), &admin)
        .await;
    assert_eq!(res.status, 204, "{}", res.text);

    // Both the row and the stored bytes are gone.
    let get = app
        .get_without_token(&routes::item(routes::PHOTOS, id))
        .await;
    assert_eq!(get.status, 404);
    let object = app.get_without_token(&routes::media_object(&key)).await;
    assert_eq!(object.status, 404);
}

#[tokio::test]
async fn deleting_a_record_with_no_stored_object_still_succeeds() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    // image_key points at an object that was never uploaded.
    let res = app
        .post_with_token(
            &routes::admin("martyrs"),
            &json!({
                "name_en": "Omar Saleh",
                "martyrdom_method": "shelling",
                "image_key": format!("martyrs/{}.jpg", uuid::Uuid::new_v4()),
            }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.id();

    let res = app
        .delete_with_token(&routes::admin_item("martyrs", id), &admin)
        .await;
    assert_eq!(res.status, 204, "{}", res.text);

    // Deleting again is a 404, not a surprise.
    let res = app
        .delete_with_token(&routes::admin_item("martyrs", id), &admin)
        .await;
    assert_eq!(res.status, 404, "{}", res.text);
}

#[tokio::test]
async fn approving_a_missing_record_is_not_found() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    let res = app
        .post_with_token(
            &routes::admin_approve("martyrs", uuid::Uuid::new_v4()),
            &json!({}),
            &admin,
        )
        .await;
    assert_eq!(res.status, 404, "{}", res.text);
    assert_eq!(res.error_code(), "NOT_FOUND");
}

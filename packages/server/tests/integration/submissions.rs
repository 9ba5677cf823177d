use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn arabic_only_submission_mirrors_the_name() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(
            routes::MARTYRS,
            &json!({
                "name_ar": "أحمد خليل",
                "martyrdom_method": "shelling",
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["name"]["ar"], "أحمد خليل");
    assert_eq!(res.body["name"]["en"], "أحمد خليل");
    assert_eq!(res.body["status"], "pending");
}

#[tokio::test]
async fn pending_submissions_are_invisible_to_the_public() {
    let app = TestApp::spawn().await;
    let id = app.submit_martyr("أحمد خليل").await;

    let list = app.get_without_token(routes::MARTYRS).await;
    assert_eq!(list.status, 200, "{}", list.text);
    assert_eq!(list.body["data"].as_array().unwrap().len(), 0);
    assert_eq!(list.body["pagination"]["total"], 0);

    let get = app
        .get_without_token(&routes::item(routes::MARTYRS, id))
        .await;
    assert_eq!(get.status, 404, "{}", get.text);
    assert_eq!(get.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn missing_both_names_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(
            routes::DETAINEES,
            &json!({
                "name_ar": "  ",
                "name_en": "",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.error_code(), "VALIDATION_ERROR");
    // The message names the missing field pair.
    assert!(res.body["message"].as_str().unwrap().contains("name"));

    // Nothing was written.
    let list = app.get_without_token(routes::DETAINEES).await;
    assert_eq!(list.body["pagination"]["total"], 0);
}

#[tokio::test]
async fn unknown_martyrdom_method_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(
            routes::MARTYRS,
            &json!({
                "name_ar": "أحمد",
                "martyrdom_method": "disease",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn other_method_requires_details() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(
            routes::MARTYRS,
            &json!({
                "name_ar": "أحمد",
                "martyrdom_method": "other",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert!(res.body["message"].as_str().unwrap().contains("martyrdom_details"));

    let res = app
        .post_without_token(
            routes::MARTYRS,
            &json!({
                "name_ar": "أحمد",
                "martyrdom_method": "other",
                "martyrdom_details": "died under rubble",
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
}

#[tokio::test]
async fn story_requires_author_title_and_content() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(
            routes::STORIES,
            &json!({
                "author_en": "A neighbor",
                "title_en": "The old market",
                "category": "memory",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert!(res.body["message"].as_str().unwrap().contains("content"));

    let res = app
        .post_without_token(
            routes::STORIES,
            &json!({
                "author_en": "A neighbor",
                "title_en": "The old market",
                "content_en": "Every morning the stalls opened before dawn.",
                "category": "folk_tales",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert!(res.body["message"].as_str().unwrap().contains("category"));
}

#[tokio::test]
async fn photo_submission_requires_an_uploaded_image_key() {
    let app = TestApp::spawn().await;

    // A key that never went through the upload endpoint but is well formed is
    // accepted; a malformed or wrong-folder key is not.
    let res = app
        .post_without_token(
            routes::PHOTOS,
            &json!({
                "title_en": "The town square",
                "image_key": "../../etc/passwd",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);

    let upload = app
        .upload("community", "square.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
        .await;
    assert_eq!(upload.status, 201, "{}", upload.text);
    let key = upload.body["key"].as_str().unwrap();

    let res = app
        .post_without_token(
            routes::PHOTOS,
            &json!({
                "title_en": "The town square",
                "image_key": key,
                "submitter_email": "amal@example.org",
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["status"], "pending");
}

#[tokio::test]
async fn photo_submitter_email_must_be_well_formed() {
    let app = TestApp::spawn().await;

    let upload = app
        .upload("community", "square.jpg", vec![0xFF, 0xD8, 0xFF, 0xE0])
        .await;
    let key = upload.body["key"].as_str().unwrap();

    let res = app
        .post_without_token(
            routes::PHOTOS,
            &json!({
                "title_en": "The town square",
                "image_key": key,
                "submitter_email": "not-an-email",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn detainee_submission_normalizes_detention_status() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    let res = app
        .post_without_token(
            routes::DETAINEES,
            &json!({
                "name_en": "Sami Nassar",
                "arrest_date": "2024-01-10",
                "detention_status_ar": "ما زال معتقلاً",
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    let id = res.id();

    let approve = app
        .post_with_token(&routes::admin_approve("detainees", id), &json!({}), &admin)
        .await;
    assert_eq!(approve.status, 200, "{}", approve.text);

    let get = app
        .get_without_token(&routes::item(routes::DETAINEES, id))
        .await;
    assert_eq!(get.status, 200, "{}", get.text);
    assert_eq!(get.body["detention_status"]["ar"], "ما زال معتقلاً");
    // English side fell back to the Arabic text.
    assert_eq!(get.body["detention_status"]["en"], "ما زال معتقلاً");
}

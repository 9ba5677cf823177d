use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn feed_merges_martyrs_and_detainees() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    app.create_approved_martyr(&admin, "Omar Saleh", Some("2023-11-02"))
        .await;
    app.create_approved_detainee(&admin, "Sami Nassar", Some("2024-01-10"))
        .await;

    let res = app.get_without_token(routes::RECORDS).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let records = res.body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(res.body["counts"]["martyrs"], 1);
    assert_eq!(res.body["counts"]["detainees"], 1);
    assert_eq!(res.body["counts"]["total"], 2);
    assert_eq!(res.body["limit"], 24);
    assert_eq!(res.body["has_more"], false);

    // Newer primary dates come first.
    assert_eq!(records[0]["record_type"], "detainee");
    assert_eq!(records[0]["name"]["en"], "Sami Nassar");
    assert_eq!(records[0]["primary_date"], "2024-01-10");
    assert!(records[0]["martyrdom_method"].is_null());

    assert_eq!(records[1]["record_type"], "martyr");
    assert_eq!(records[1]["martyrdom_method"], "shelling");
    assert!(records[1]["detention_status"].is_null());
}

#[tokio::test]
async fn feed_excludes_pending_records() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    app.submit_martyr("أحمد خليل").await;
    app.create_approved_martyr(&admin, "Omar Saleh", None).await;

    let res = app.get_without_token(routes::RECORDS).await;
    assert_eq!(res.body["records"].as_array().unwrap().len(), 1);
    assert_eq!(res.body["counts"]["total"], 1);
}

#[tokio::test]
async fn undated_records_sort_last_with_name_tiebreak() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    app.create_approved_martyr(&admin, "Zainab Khoury", None).await;
    app.create_approved_detainee(&admin, "Adel Mansour", None).await;
    app.create_approved_martyr(&admin, "Omar Saleh", Some("2023-11-02"))
        .await;

    let res = app.get_without_token(routes::RECORDS).await;
    let records = res.body["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);

    // The dated record first, then the undated ones ordered by English name.
    assert_eq!(records[0]["name"]["en"], "Omar Saleh");
    assert_eq!(records[1]["name"]["en"], "Adel Mansour");
    assert_eq!(records[2]["name"]["en"], "Zainab Khoury");
}

#[tokio::test]
async fn feed_paginates_in_fixed_pages_of_twenty_four() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    for i in 0..20 {
        app.create_approved_martyr(&admin, &format!("Martyr {i:02}"), Some("2023-11-02"))
            .await;
    }
    for i in 0..5 {
        app.create_approved_detainee(&admin, &format!("Detainee {i:02}"), Some("2024-01-10"))
            .await;
    }

    let page1 = app.get_without_token(&routes::records_page(1)).await;
    assert_eq!(page1.status, 200, "{}", page1.text);
    assert_eq!(page1.body["records"].as_array().unwrap().len(), 24);
    assert_eq!(page1.body["page"], 1);
    assert_eq!(page1.body["has_more"], true);
    assert_eq!(page1.body["counts"]["total"], 25);

    let page2 = app.get_without_token(&routes::records_page(2)).await;
    assert_eq!(page2.body["records"].as_array().unwrap().len(), 1);
    assert_eq!(page2.body["has_more"], false);

    // Walking past the end yields an empty page, not an error.
    let page3 = app.get_without_token(&routes::records_page(3)).await;
    assert_eq!(page3.status, 200, "{}", page3.text);
    assert_eq!(page3.body["records"].as_array().unwrap().len(), 0);
    assert_eq!(page3.body["has_more"], false);

    // No record appears on both pages.
    let first_ids: Vec<&str> = page1.body["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    let second_id = page2.body["records"][0]["id"].as_str().unwrap();
    assert!(!first_ids.contains(&second_id));
}

#[tokio::test]
async fn feed_carries_tags_and_images() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    let res = app
        .post_with_token(
            &routes::admin("martyrs"),
            &json!({
                "name_en": "Omar Saleh",
                "martyrdom_method": "shelling",
                "tags": ["baker", "old quarter"],
            }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let feed = app.get_without_token(routes::RECORDS).await;
    let record = &feed.body["records"][0];
    assert_eq!(record["tags"], json!(["baker", "old quarter"]));
    assert!(record["image_key"].is_null());
}

#[tokio::test]
async fn absurd_page_numbers_walk_off_the_end() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;
    app.create_approved_martyr(&admin, "Omar Saleh", None).await;

    let res = app.get_without_token(&routes::records_page(u64::MAX)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["records"].as_array().unwrap().len(), 0);
    assert_eq!(res.body["has_more"], false);

    // Same behavior on the per-entity listings.
    let res = app
        .get_without_token(&format!("{}?page={}", routes::MARTYRS, u64::MAX))
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["data"].as_array().unwrap().len(), 0);
    assert_eq!(res.body["pagination"]["total"], 1);
}

#[tokio::test]
async fn page_zero_is_treated_as_the_first_page() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;
    app.create_approved_martyr(&admin, "Omar Saleh", None).await;

    let res = app.get_without_token(&routes::records_page(0)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["page"], 1);
    assert_eq!(res.body["records"].as_array().unwrap().len(), 1);
}

use uuid::Uuid;

use crate::common::{TestApp, routes};

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];

#[tokio::test]
async fn upload_and_download_round_trip() {
    let app = TestApp::spawn().await;

    let res = app.upload("martyrs", "portrait.jpg", JPEG_BYTES.to_vec()).await;
    assert_eq!(res.status, 201, "{}", res.text);

    let key = res.body["key"].as_str().unwrap();
    assert!(key.starts_with("martyrs/"));
    assert!(key.ends_with(".jpg"));
    let url = res.body["url"].as_str().unwrap();
    assert_eq!(url, format!("/api/v1/media/{key}"));

    let download = app
        .client
        .get(format!("http://{}{url}", app.addr))
        .send()
        .await
        .unwrap();
    assert_eq!(download.status().as_u16(), 200);
    assert_eq!(
        download.headers()["content-type"].to_str().unwrap(),
        "image/jpeg"
    );
    assert_eq!(
        download.headers()["cache-control"].to_str().unwrap(),
        "public, max-age=31536000, immutable"
    );
    assert_eq!(download.bytes().await.unwrap().as_ref(), JPEG_BYTES);
}

#[tokio::test]
async fn each_upload_gets_a_unique_key() {
    let app = TestApp::spawn().await;

    let first = app.upload("stories", "photo.png", vec![1, 2, 3]).await;
    let second = app.upload("stories", "photo.png", vec![1, 2, 3]).await;
    assert_eq!(first.status, 201);
    assert_eq!(second.status, 201);
    assert_ne!(first.body["key"], second.body["key"]);
}

#[tokio::test]
async fn disallowed_extensions_are_rejected() {
    let app = TestApp::spawn().await;

    for file_name in ["script.svg", "payload.exe", "noextension"] {
        let res = app.upload("martyrs", file_name, JPEG_BYTES.to_vec()).await;
        assert_eq!(res.status, 400, "{file_name}: {}", res.text);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn unknown_folders_are_rejected() {
    let app = TestApp::spawn().await;

    let res = app.upload("secrets", "portrait.jpg", JPEG_BYTES.to_vec()).await;
    assert_eq!(res.status, 400, "{}", res.text);
}

#[tokio::test]
async fn empty_uploads_are_rejected() {
    let app = TestApp::spawn().await;

    let res = app.upload("martyrs", "portrait.jpg", Vec::new()).await;
    assert_eq!(res.status, 400, "{}", res.text);
}

#[tokio::test]
async fn missing_objects_are_not_found() {
    let app = TestApp::spawn().await;

    let key = format!("martyrs/{}.jpg", Uuid::new_v4());
    let res = app.get_without_token(&routes::media_object(&key)).await;
    assert_eq!(res.status, 404, "{}", res.text);
    assert_eq!(res.error_code(), "NOT_FOUND");

    // Keys that do not parse are indistinguishable from missing objects.
    let res = app
        .get_without_token(&routes::media_object("martyrs/not-a-uuid.jpg"))
        .await;
    assert_eq!(res.status, 404, "{}", res.text);
}

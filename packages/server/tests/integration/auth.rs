use serde_json::json;

use crate::common::{OWNER_EMAIL, TestApp, routes};

#[tokio::test]
async fn register_login_and_me_round_trip() {
    let app = TestApp::spawn().await;

    let reg = app
        .post_without_token(
            routes::REGISTER,
            &json!({
                "name": "Amal Haddad",
                "email": "amal@example.org",
                "password": "a-strong-password",
            }),
        )
        .await;
    assert_eq!(reg.status, 201, "{}", reg.text);
    assert_eq!(reg.body["email"], "amal@example.org");

    let login = app
        .post_without_token(
            routes::LOGIN,
            &json!({
                "email": "amal@example.org",
                "password": "a-strong-password",
            }),
        )
        .await;
    assert_eq!(login.status, 200, "{}", login.text);
    assert_eq!(login.body["role"], "public");
    assert_eq!(login.body["permissions"].as_array().unwrap().len(), 0);

    let token = login.body["token"].as_str().unwrap();
    let me = app.get_with_token(routes::ME, token).await;
    assert_eq!(me.status, 200, "{}", me.text);
    assert_eq!(me.body["email"], "amal@example.org");
    assert_eq!(me.body["name"], "Amal Haddad");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::spawn().await;
    app.create_authenticated_user("amal@example.org", "a-strong-password")
        .await;

    let res = app
        .post_without_token(
            routes::REGISTER,
            &json!({
                "name": "Someone Else",
                "email": "amal@example.org",
                "password": "another-password",
            }),
        )
        .await;
    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.error_code(), "EMAIL_TAKEN");
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = TestApp::spawn().await;
    app.create_authenticated_user("amal@example.org", "a-strong-password")
        .await;

    let res = app
        .post_without_token(
            routes::LOGIN,
            &json!({
                "email": "amal@example.org",
                "password": "wrong-password",
            }),
        )
        .await;
    assert_eq!(res.status, 401, "{}", res.text);
    assert_eq!(res.error_code(), "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn me_requires_a_token() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::ME).await;
    assert_eq!(res.status, 401, "{}", res.text);
    assert_eq!(res.error_code(), "TOKEN_MISSING");

    let res = app.get_with_token(routes::ME, "not-a-real-token").await;
    assert_eq!(res.status, 401, "{}", res.text);
    assert_eq!(res.error_code(), "TOKEN_INVALID");
}

#[tokio::test]
async fn register_rejects_short_passwords_and_bad_emails() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(
            routes::REGISTER,
            &json!({
                "name": "Amal",
                "email": "amal@example.org",
                "password": "short",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.error_code(), "VALIDATION_ERROR");

    let res = app
        .post_without_token(
            routes::REGISTER,
            &json!({
                "name": "Amal",
                "email": "not-an-email",
                "password": "a-strong-password",
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn role_assignment_requires_user_manage() {
    let app = TestApp::spawn().await;

    let token = app
        .create_authenticated_user("amal@example.org", "a-strong-password")
        .await;
    let me = app.get_with_token(routes::ME, &token).await;
    let user_id = me.id();

    // A public user cannot promote anyone, including themselves.
    let res = app
        .patch_with_token(
            &routes::assign_role(user_id),
            &json!({ "role": "admin" }),
            &token,
        )
        .await;
    assert_eq!(res.status, 403, "{}", res.text);
    assert_eq!(res.error_code(), "PERMISSION_DENIED");
}

#[tokio::test]
async fn admin_assigns_contributor_role() {
    let app = TestApp::spawn().await;
    let admin = app.create_admin("admin@example.org").await;

    let token = app
        .create_authenticated_user("amal@example.org", "a-strong-password")
        .await;
    let user_id = app.get_with_token(routes::ME, &token).await.id();

    let res = app
        .patch_with_token(
            &routes::assign_role(user_id),
            &json!({ "role": "contributor" }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["role"], "contributor");

    // Unknown roles are rejected.
    let res = app
        .patch_with_token(
            &routes::assign_role(user_id),
            &json!({ "role": "superuser" }),
            &admin,
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);

    // The new role takes effect on the next login.
    let login = app
        .post_without_token(
            routes::LOGIN,
            &json!({
                "email": "amal@example.org",
                "password": "a-strong-password",
            }),
        )
        .await;
    assert_eq!(login.body["role"], "contributor");
    let perms = login.body["permissions"].as_array().unwrap();
    assert!(perms.contains(&json!("story:approve")));
    assert!(perms.contains(&json!("photo:approve")));
    assert!(!perms.contains(&json!("martyr:approve")));
}

#[tokio::test]
async fn owner_email_always_logs_in_as_admin() {
    let app = TestApp::spawn().await;

    // Registered as a normal account; the stored role stays `public`.
    app.create_authenticated_user(OWNER_EMAIL, "a-strong-password")
        .await;

    let login = app
        .post_without_token(
            routes::LOGIN,
            &json!({
                "email": OWNER_EMAIL,
                "password": "a-strong-password",
            }),
        )
        .await;
    assert_eq!(login.status, 200, "{}", login.text);
    assert_eq!(login.body["role"], "admin");
    let perms = login.body["permissions"].as_array().unwrap();
    assert!(perms.contains(&json!("martyr:approve")));
    assert!(perms.contains(&json!("user:manage")));
}

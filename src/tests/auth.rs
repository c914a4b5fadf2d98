use axum::http::{header, HeaderValue, StatusCode};
use serde_json::{json, Value};

use crate::{
    models::auth::UpdateUserPayload,
    test_utils::{
        create_user_with_token, remove_db_files, setup_file_app_state, setup_test_app, token_value,
        TEST_PASSWORD,
    },
};

#[tokio::test]
async fn test_health_and_overview_are_public() {
    let (server, _) = setup_test_app().await;

    server.get("/health").await.assert_status(StatusCode::OK);

    let response = server.get("/").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["signup"], "users/signup/");

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status(StatusCode::OK);
    let doc: Value = response.json();
    assert!(doc["paths"].get("/clothes/").is_some());
}

#[tokio::test]
async fn test_signup_returns_user_without_password() {
    let (server, _) = setup_test_app().await;

    let response = server
        .post("/users/signup/")
        .json(&json!({ "username": "alice", "password": "pw123", "tel": "13800138000" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["tel"], "13800138000");
    assert_eq!(body["is_superuser"], false);
    assert_eq!(body["is_active"], true);
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_signup_ignores_role_flags() {
    let (server, _) = setup_test_app().await;

    let response = server
        .post("/users/signup/")
        .json(&json!({
            "username": "mallory",
            "password": "pw123",
            "is_superuser": true,
            "is_staff": true
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["is_superuser"], false);
    assert_eq!(body["is_staff"], false);
}

#[tokio::test]
async fn test_signup_rejects_duplicate_username() {
    let (server, _) = setup_test_app().await;
    let payload = json!({ "username": "bob", "password": "pw123" });

    server.post("/users/signup/").json(&payload).await.assert_status(StatusCode::CREATED);

    let response = server.post("/users/signup/").json(&payload).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["details"].get("username").is_some());
}

#[tokio::test]
async fn test_signup_rejects_invalid_payloads() {
    let (server, _) = setup_test_app().await;

    let response = server
        .post("/users/signup/")
        .json(&json!({ "username": "bad name", "password": "pw" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["details"].get("username").is_some());

    // JSON malformado também vira 400 (não 422)
    let response = server
        .post("/users/signup/")
        .content_type("application/json")
        .text("{not json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_the_same_token_every_time() {
    let (server, app_state) = setup_test_app().await;
    let (_, token) = create_user_with_token(&app_state, "carol", false).await;

    let response = server
        .post("/users/login/")
        .json(&json!({ "username": "carol", "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["token"], token.as_str());
    assert_eq!(token.len(), 40);

    let response = server
        .post("/api-token-auth/")
        .json(&json!({ "username": "carol", "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["token"], token.as_str());
}

#[tokio::test]
async fn test_login_failures_are_bad_requests() {
    let (server, app_state) = setup_test_app().await;
    create_user_with_token(&app_state, "dave", false).await;

    let response = server.post("/users/login/").json(&json!({ "username": "dave" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Username and password are required.");

    let response = server
        .post("/users/login/")
        .json(&json!({ "username": "dave", "password": "wrong" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid username or password.");

    let response = server
        .post("/api-token-auth/")
        .json(&json!({ "username": "nobody", "password": "x" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_messages_follow_accept_language() {
    let (server, _) = setup_test_app().await;

    let response = server
        .post("/users/login/")
        .add_header(header::ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9"))
        .json(&json!({ "username": "ghost", "password": "x" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "无效的用户名或密码");
}

#[tokio::test]
async fn test_verify_auth_returns_user_or_bad_request() {
    let (server, app_state) = setup_test_app().await;
    let (user, token) = create_user_with_token(&app_state, "erin", false).await;

    let response = server
        .get("/users/verify_auth/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["id"], user.id);
    assert_eq!(body["username"], "erin");
    assert!(body.get("password").is_none());

    server.get("/users/verify_auth/").await.assert_status(StatusCode::BAD_REQUEST);

    server
        .get("/users/verify_auth/")
        .add_header(header::AUTHORIZATION, token_value("0000000000000000000000000000000000000000"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_a_token() {
    let (server, app_state) = setup_test_app().await;
    let (_, token) = create_user_with_token(&app_state, "frank", false).await;

    server.get("/hello/").await.assert_status(StatusCode::UNAUTHORIZED);
    server.get("/clothes/").await.assert_status(StatusCode::UNAUTHORIZED);
    server.get("/warehouses/").await.assert_status(StatusCode::UNAUTHORIZED);

    // Esquema errado ou chave desconhecida: mesmo resultado
    server
        .get("/hello/")
        .add_header(header::AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}")).unwrap())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/hello/")
        .add_header(header::AUTHORIZATION, token_value("deadbeef"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // O esquema não diferencia maiúsculas
    let response = server
        .get("/hello/")
        .add_header(header::AUTHORIZATION, HeaderValue::from_str(&format!("token {token}")).unwrap())
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Hello, World!");
}

#[tokio::test]
async fn test_superuser_routes_reject_regular_users() {
    let (server, app_state) = setup_test_app().await;
    let (_, token) = create_user_with_token(&app_state, "grace", false).await;

    for path in ["/users/get/", "/clothes/", "/templates/"] {
        server
            .get(path)
            .add_header(header::AUTHORIZATION, token_value(&token))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    server
        .delete("/users/1/delete/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_users_filters() {
    let (server, app_state) = setup_test_app().await;
    let (_, admin_token) = create_user_with_token(&app_state, "admin", true).await;
    create_user_with_token(&app_state, "heidi", false).await;

    let response = server
        .get("/users/get/")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .await;
    response.assert_status(StatusCode::OK);
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 2);

    let response = server
        .get("/users/get/")
        .add_query_param("username", "heidi/")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .await;
    response.assert_status(StatusCode::OK);
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "heidi");

    let response = server
        .get("/users/get/")
        .add_query_param("is_superuser", "True")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .await;
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "admin");

    server
        .get("/users/get/")
        .add_query_param("username", "nobody")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    server
        .get("/users/get/")
        .add_query_param("password", "x")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_self_or_superuser() {
    let (server, app_state) = setup_test_app().await;
    let (ivan, ivan_token) = create_user_with_token(&app_state, "ivan", false).await;
    let (judy, _) = create_user_with_token(&app_state, "judy", false).await;
    let (_, admin_token) = create_user_with_token(&app_state, "admin", true).await;

    // O próprio usuário troca telefone e senha
    let response = server
        .post(&format!("/users/{}/update/", ivan.id))
        .add_header(header::AUTHORIZATION, token_value(&ivan_token))
        .json(&json!({ "tel": "555123", "password": "new-pass" }))
        .await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["tel"], "555123");

    server
        .post("/users/login/")
        .json(&json!({ "username": "ivan", "password": "new-pass" }))
        .await
        .assert_status(StatusCode::OK);

    // Mas não mexe em outro usuário
    server
        .post(&format!("/users/{}/update/", judy.id))
        .add_header(header::AUTHORIZATION, token_value(&ivan_token))
        .json(&json!({ "tel": "999" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // Superusuário pode, e recebe 404 para IDs inexistentes
    server
        .post(&format!("/users/{}/update/", judy.id))
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .json(&json!({ "tel": "999" }))
        .await
        .assert_status(StatusCode::OK);
    server
        .post("/users/9999/update/")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .json(&json!({ "tel": "111" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user_deactivates_account() {
    let (server, app_state) = setup_test_app().await;
    let (kim, kim_token) = create_user_with_token(&app_state, "kim", false).await;
    let (_, admin_token) = create_user_with_token(&app_state, "admin", true).await;

    server
        .delete(&format!("/users/{}/delete/", kim.id))
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // Token de usuário inativo deixa de valer, e o login falha
    server
        .get("/hello/")
        .add_header(header::AUTHORIZATION, token_value(&kim_token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/users/login/")
        .json(&json!({ "username": "kim", "password": TEST_PASSWORD }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Continua visível para o superusuário, como inativo
    let response = server
        .get("/users/get/")
        .add_query_param("is_active", "false")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .await;
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "kim");

    server
        .delete("/users/9999/delete/")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_user_updates_on_file_database() {
    let (app_state, path) = setup_file_app_state(5).await;
    let (admin, _) = create_user_with_token(&app_state, "admin", true).await;

    let mut users = Vec::new();
    for i in 0..20 {
        let (user, _) = create_user_with_token(&app_state, &format!("worker{i}"), false).await;
        users.push(user);
    }

    let handles: Vec<_> = users
        .iter()
        .enumerate()
        .map(|(i, user)| {
            let service = app_state.auth_service.clone();
            let admin = admin.clone();
            let user_id = user.id;
            tokio::spawn(async move {
                let payload = UpdateUserPayload { password: None, tel: Some(format!("1380000{i:04}")) };
                service.update_user(&admin, user_id, &payload).await
            })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.is_ok(), "atualização falhou: {result:?}");
    }

    app_state.db_pool.close().await;
    remove_db_files(&path);
}

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use crate::test_utils::{create_user_with_token, setup_test_app, token_value};

#[tokio::test]
async fn test_catalog_reads_for_users_writes_for_superusers() {
    let (server, app_state) = setup_test_app().await;
    let (_, admin_token) = create_user_with_token(&app_state, "admin", true).await;
    let (_, user_token) = create_user_with_token(&app_state, "worker", false).await;

    server
        .post("/materials/")
        .add_header(header::AUTHORIZATION, token_value(&user_token))
        .json(&json!({ "name": "涤纶" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/materials/")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .json(&json!({ "name": "涤纶" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = server
        .get("/materials/")
        .add_header(header::AUTHORIZATION, token_value(&user_token))
        .await;
    response.assert_status(StatusCode::OK);
    let materials: Vec<Value> = response.json();
    assert_eq!(materials.len(), 1);
    assert_eq!(materials[0]["name"], "涤纶");

    // Nome duplicado
    let response = server
        .post("/materials/")
        .add_header(header::AUTHORIZATION, token_value(&admin_token))
        .json(&json!({ "name": "涤纶" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["details"].get("name").is_some());
}

#[tokio::test]
async fn test_colors_and_statuses() {
    let (server, app_state) = setup_test_app().await;
    let (_, token) = create_user_with_token(&app_state, "admin", true).await;

    let response = server
        .post("/colors/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "name": "红色", "code": "#FF0000" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let color: Value = response.json();
    assert_eq!(color["code"], "#FF0000");

    // O ID do status vem do cliente
    let response = server
        .post("/statuses/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "id": 3, "name": "在库" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let status: Value = response.json();
    assert_eq!(status["id"], 3);

    server
        .post("/statuses/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "id": 3, "name": "出库" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .delete("/statuses/3/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let response = server
        .delete("/statuses/3/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Status not found.");
}

#[tokio::test]
async fn test_deleting_a_color_clears_it_from_clothes() {
    let (server, app_state) = setup_test_app().await;
    let (_, token) = create_user_with_token(&app_state, "admin", true).await;

    let color: Value = server
        .post("/colors/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "name": "蓝" }))
        .await
        .json();
    let size: Value = server
        .post("/sizes/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "name": "M" }))
        .await
        .json();
    let clothes_type: Value = server
        .post("/types/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "name": "外套" }))
        .await
        .json();

    let clothes: Value = server
        .post("/clothes/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({
            "name": "夹克",
            "price": 300,
            "color": color["id"],
            "size": size["id"],
            "type": clothes_type["id"]
        }))
        .await
        .json();
    assert_eq!(clothes["color"], color["id"]);

    server
        .delete(&format!("/colors/{}/", color["id"]))
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let refreshed: Value = server
        .get(&format!("/clothes/{}/", clothes["id"]))
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await
        .json();
    assert!(refreshed["color"].is_null());

    // Tamanho é CASCADE: a roupa vai junto
    server
        .delete(&format!("/sizes/{}/", size["id"]))
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .get(&format!("/clothes/{}/", clothes["id"]))
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_warehouse_crud() {
    let (server, app_state) = setup_test_app().await;
    let (admin, token) = create_user_with_token(&app_state, "admin", true).await;

    let response = server
        .post("/warehouses/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "name": "北京一号仓", "address": "北京市朝阳区", "user": admin.id }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let warehouse: Value = response.json();
    assert_eq!(warehouse["coord"], json!({}));
    assert_eq!(warehouse["user"], admin.id);
    let warehouse_id = warehouse["id"].as_i64().unwrap();

    // coord precisa ser um objeto
    server
        .post("/warehouses/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "name": "X", "address": "Y", "coord": [1, 2] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .put(&format!("/warehouses/{warehouse_id}/"))
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "coord": { "lat": 39.9, "lng": 116.4 } }))
        .await;
    response.assert_status(StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["coord"]["lat"], 39.9);
    assert_eq!(updated["name"], "北京一号仓");

    let list: Vec<Value> = server
        .get("/warehouses/")
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await
        .json();
    assert_eq!(list.len(), 1);

    server
        .delete(&format!("/warehouses/{warehouse_id}/"))
        .add_header(header::AUTHORIZATION, token_value(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .put(&format!("/warehouses/{warehouse_id}/"))
        .add_header(header::AUTHORIZATION, token_value(&token))
        .json(&json!({ "name": "Z" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

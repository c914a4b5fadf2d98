// src/handlers/home.rs

use axum::Json;
use serde_json::{json, Value};

use crate::middleware::auth::AuthenticatedUser;

// Mapa das rotas, para quem explora a API pelo navegador.
#[utoipa::path(
    get,
    path = "/",
    tag = "Home",
    responses((status = 200, description = "Resumo das rotas disponíveis"))
)]
pub async fn api_overview() -> Json<Value> {
    Json(json!({
        "token": "api-token-auth/",
        "signup": "users/signup/",
        "login": "users/login/",
        "all_users": "users/get/",
        "search by name": "users/get/?username=username",
        "search by is_superuser": "users/get/?is_superuser=true",
        "update": "users/<id>/update/",
        "delete": "users/<id>/delete/",
        "verify_auth": "users/verify_auth/",
        "templates": "templates/",
        "clothes": "clothes/",
        "reprints": "clothes/<id>/reprints/",
        "returns": "returns/",
        "batches": "batches/",
        "warehouses": "warehouses/",
        "materials": "materials/",
        "colors": "colors/",
        "sizes": "sizes/",
        "statuses": "statuses/",
        "types": "types/",
        "docs": "api-docs/openapi.json"
    }))
}

#[utoipa::path(
    get,
    path = "/hello/",
    tag = "Home",
    responses(
        (status = 200, description = "Saudação"),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_token" = []))
)]
pub async fn hello(AuthenticatedUser(user): AuthenticatedUser) -> Json<Value> {
    tracing::debug!(user_id = user.id, "hello");
    Json(json!({ "message": "Hello, World!" }))
}

// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::auth::auth_guard};

pub fn create_router(app_state: AppState) -> Router {
    // Rotas públicas (verify_auth trata o próprio token)
    let public_routes = Router::new()
        .route("/", get(handlers::home::api_overview))
        .route("/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api-token-auth/", post(handlers::auth::obtain_auth_token))
        .route("/users/signup/", post(handlers::auth::signup))
        .route("/users/login/", post(handlers::auth::login))
        .route("/users/verify_auth/", get(handlers::auth::verify_auth));

    // Tudo aqui exige "Authorization: Token <key>".
    // As rotas de superusuário usam o extrator `RequireSuperuser`.
    let protected_routes = Router::new()
        .route("/hello/", get(handlers::home::hello))
        // Usuários
        .route("/users/get/", get(handlers::users::get_users))
        .route("/users/{id}/update/", post(handlers::users::update_user))
        .route("/users/{id}/delete/", delete(handlers::users::delete_user))
        // Modelos de etiqueta
        .route(
            "/templates/",
            get(handlers::templates::list_templates).post(handlers::templates::create_template),
        )
        .route(
            "/templates/{id}/",
            put(handlers::templates::update_template).delete(handlers::templates::delete_template),
        )
        // Roupas
        .route(
            "/clothes/",
            get(handlers::clothes::list_clothes).post(handlers::clothes::create_clothes),
        )
        .route(
            "/clothes/{id}/",
            get(handlers::clothes::get_clothes)
                .put(handlers::clothes::update_clothes)
                .patch(handlers::clothes::update_clothes)
                .delete(handlers::clothes::delete_clothes),
        )
        .route(
            "/clothes/{id}/reprints/",
            get(handlers::clothes::list_reprints).post(handlers::clothes::create_reprint),
        )
        .route(
            "/returns/",
            get(handlers::clothes::list_returns).post(handlers::clothes::create_return),
        )
        .route(
            "/batches/",
            get(handlers::clothes::list_batches).post(handlers::clothes::create_batch),
        )
        .route("/batches/{id}/", delete(handlers::clothes::delete_batch))
        // Atributos
        .route(
            "/materials/",
            get(handlers::catalog::list_materials).post(handlers::catalog::create_material),
        )
        .route("/materials/{id}/", delete(handlers::catalog::delete_material))
        .route(
            "/colors/",
            get(handlers::catalog::list_colors).post(handlers::catalog::create_color),
        )
        .route("/colors/{id}/", delete(handlers::catalog::delete_color))
        .route(
            "/sizes/",
            get(handlers::catalog::list_sizes).post(handlers::catalog::create_size),
        )
        .route("/sizes/{id}/", delete(handlers::catalog::delete_size))
        .route(
            "/statuses/",
            get(handlers::catalog::list_statuses).post(handlers::catalog::create_status),
        )
        .route("/statuses/{id}/", delete(handlers::catalog::delete_status))
        .route(
            "/types/",
            get(handlers::catalog::list_types).post(handlers::catalog::create_type),
        )
        .route("/types/{id}/", delete(handlers::catalog::delete_type))
        // Armazéns
        .route(
            "/warehouses/",
            get(handlers::warehouses::list_warehouses).post(handlers::warehouses::create_warehouse),
        )
        .route(
            "/warehouses/{id}/",
            put(handlers::warehouses::update_warehouse).delete(handlers::warehouses::delete_warehouse),
        )
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

// src/docs.rs

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Home ---
        handlers::home::api_overview,
        handlers::home::hello,

        // --- Auth ---
        handlers::auth::obtain_auth_token,
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::verify_auth,

        // --- Users ---
        handlers::users::get_users,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Templates ---
        handlers::templates::list_templates,
        handlers::templates::create_template,
        handlers::templates::update_template,
        handlers::templates::delete_template,

        // --- Clothes ---
        handlers::clothes::list_clothes,
        handlers::clothes::get_clothes,
        handlers::clothes::create_clothes,
        handlers::clothes::update_clothes,
        handlers::clothes::delete_clothes,
        handlers::clothes::list_reprints,
        handlers::clothes::create_reprint,
        handlers::clothes::list_returns,
        handlers::clothes::create_return,
        handlers::clothes::list_batches,
        handlers::clothes::create_batch,
        handlers::clothes::delete_batch,

        // --- Catalog ---
        handlers::catalog::list_materials,
        handlers::catalog::create_material,
        handlers::catalog::delete_material,
        handlers::catalog::list_colors,
        handlers::catalog::create_color,
        handlers::catalog::delete_color,
        handlers::catalog::list_sizes,
        handlers::catalog::create_size,
        handlers::catalog::delete_size,
        handlers::catalog::list_statuses,
        handlers::catalog::create_status,
        handlers::catalog::delete_status,
        handlers::catalog::list_types,
        handlers::catalog::create_type,
        handlers::catalog::delete_type,

        // --- Warehouses ---
        handlers::warehouses::list_warehouses,
        handlers::warehouses::create_warehouse,
        handlers::warehouses::update_warehouse,
        handlers::warehouses::delete_warehouse,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::SignupPayload,
            models::auth::LoginPayload,
            models::auth::UpdateUserPayload,
            models::auth::AuthResponse,

            // --- Templates ---
            models::template::Template,
            models::template::CreateTemplatePayload,
            models::template::UpdateTemplatePayload,

            // --- Clothes ---
            models::clothes::Clothes,
            models::clothes::CreateClothesPayload,
            models::clothes::UpdateClothesPayload,
            models::clothes::Reprint,
            models::clothes::CreateReprintPayload,
            models::clothes::ClothesReturn,
            models::clothes::CreateReturnPayload,
            models::clothes::Batch,
            models::clothes::CreateBatchPayload,

            // --- Catalog ---
            models::catalog::Material,
            models::catalog::Color,
            models::catalog::Size,
            models::catalog::Status,
            models::catalog::ClothesType,
            models::catalog::CreateMaterialPayload,
            models::catalog::CreateColorPayload,
            models::catalog::CreateSizePayload,
            models::catalog::CreateStatusPayload,
            models::catalog::CreateClothesTypePayload,

            // --- Warehouses ---
            models::warehouse::Warehouse,
            models::warehouse::CreateWarehousePayload,
            models::warehouse::UpdateWarehousePayload,
        )
    ),
    tags(
        (name = "Home", description = "Visão geral da API"),
        (name = "Auth", description = "Cadastro, Login e Tokens"),
        (name = "Users", description = "Gestão de Usuários (superusuário)"),
        (name = "Templates", description = "Modelos de Etiqueta"),
        (name = "Clothes", description = "Roupas em Estoque"),
        (name = "Reprints", description = "Reimpressão de Etiquetas RFID"),
        (name = "Returns", description = "Devoluções"),
        (name = "Batches", description = "Lotes de Roupas"),
        (name = "Catalog", description = "Materiais, Cores, Tamanhos, Status e Tipos"),
        (name = "Warehouses", description = "Armazéns")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

// "Authorization: Token <key>" não é um esquema HTTP padrão; vai como API key.
impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_token",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Token <key>",
            ))),
        );
    }
}

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod token_repo;
pub use token_repo::TokenRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod warehouse_repo;
pub use warehouse_repo::WarehouseRepository;
pub mod clothes_repo;
pub use clothes_repo::ClothesRepository;
pub mod template_repo;
pub use template_repo::TemplateRepository;

pub mod auth;
pub mod clothes_service;
pub mod template_service;

pub mod auth;
pub mod catalog;
pub mod clothes;
pub mod template;
pub mod warehouse;

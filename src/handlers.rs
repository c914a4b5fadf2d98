pub mod auth;
pub mod catalog;
pub mod clothes;
pub mod home;
pub mod templates;
pub mod users;
pub mod warehouses;

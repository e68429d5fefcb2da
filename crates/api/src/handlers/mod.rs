pub mod auth;
pub mod material;

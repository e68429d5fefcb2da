//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.
//! - [`json::ApiJson`] -- JSON body with rejections mapped to [`crate::error::AppError`].

pub mod auth;
pub mod json;
pub mod rbac;

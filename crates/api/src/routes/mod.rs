pub mod auth;
pub mod health;
pub mod material;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
///
/// /materials                                       list roots, create (admin)
/// /materials/deleted                               deleted list (admin)
/// /materials/saved                                 caller's saved list
/// /materials/save/{id}                             toggle saved (POST)
/// /materials/{id}                                  detail, update, delete (admin)
/// /materials/{id}/restore                          restore (admin, PUT)
/// /materials/{id}/sub/{sub_id}                     child with parent title
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login).
        .nest("/auth", auth::router())
        // Learning materials and sub-materials.
        .nest("/materials", material::router())
}

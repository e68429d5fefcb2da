//! Route definitions for the `/materials` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::material;
use crate::state::AppState;

/// Routes mounted at `/materials`.
///
/// ```text
/// GET    /                       -> list_materials (?search=)
/// POST   /                       -> create_material
/// GET    /deleted                -> list_deleted
/// GET    /saved                  -> list_saved
/// POST   /save/{id}              -> toggle_save
/// GET    /{id}                   -> get_material
/// PUT    /{id}                   -> update_material
/// DELETE /{id}                   -> delete_material
/// PUT    /{id}/restore           -> restore_material
/// GET    /{id}/sub/{sub_id}      -> get_sub_material
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(material::list_materials).post(material::create_material),
        )
        .route("/deleted", get(material::list_deleted))
        .route("/saved", get(material::list_saved))
        .route("/save/{id}", post(material::toggle_save))
        .route(
            "/{id}",
            get(material::get_material)
                .put(material::update_material)
                .delete(material::delete_material),
        )
        .route("/{id}/restore", put(material::restore_material))
        .route("/{id}/sub/{sub_id}", get(material::get_sub_material))
}

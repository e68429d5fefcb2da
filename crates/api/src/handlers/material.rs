//! Handlers for the `/materials` resource.
//!
//! Path ids arrive as raw strings and go through [`parse_material_id`] before
//! anything touches the store, so a malformed id is always a 400.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use studyhub_core::material::{
    parse_material_id, CreateMaterial, Material, MaterialDetail, MaterialWithParent,
    UpdateMaterial,
};

use crate::error::AppResult;
use crate::middleware::json::ApiJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// Query parameters for `GET /materials`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Plain confirmation body for mutations without an entity to return.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Response body for the save toggle.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: &'static str,
    pub saved: bool,
}

/// POST /api/v1/materials
pub async fn create_material(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiJson(input): ApiJson<CreateMaterial>,
) -> AppResult<(StatusCode, Json<Material>)> {
    let material = state.catalog.create_material(input).await?;
    tracing::debug!(admin_id = admin.user_id, material_id = material.id, "Create handled");
    Ok((StatusCode::CREATED, Json(material)))
}

/// GET /api/v1/materials?search=
///
/// Live root materials, optionally filtered by title.
pub async fn list_materials(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Material>>> {
    let materials = state.catalog.list_roots(params.search.as_deref()).await?;
    Ok(Json(materials))
}

/// GET /api/v1/materials/{id}
pub async fn get_material(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> AppResult<Json<MaterialDetail>> {
    let id = parse_material_id(&id)?;
    Ok(Json(state.catalog.get_detail(id).await?))
}

/// GET /api/v1/materials/{id}/sub/{sub_id}
pub async fn get_sub_material(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((id, sub_id)): Path<(String, String)>,
) -> AppResult<Json<MaterialWithParent>> {
    let parent_id = parse_material_id(&id)?;
    let child_id = parse_material_id(&sub_id)?;
    Ok(Json(state.catalog.get_child(parent_id, child_id).await?))
}

/// PUT /api/v1/materials/{id}
pub async fn update_material(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<UpdateMaterial>,
) -> AppResult<Json<Material>> {
    let id = parse_material_id(&id)?;
    Ok(Json(state.catalog.update_material(id, input).await?))
}

/// DELETE /api/v1/materials/{id}
///
/// Soft-deletes the material and its direct children.
pub async fn delete_material(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_material_id(&id)?;
    state.catalog.soft_delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Material and sub-materials removed",
    }))
}

/// PUT /api/v1/materials/{id}/restore
///
/// 409 while the parent is still deleted.
pub async fn restore_material(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_material_id(&id)?;
    state.catalog.restore(id).await?;
    Ok(Json(MessageResponse {
        message: "Material restored successfully",
    }))
}

/// GET /api/v1/materials/deleted
pub async fn list_deleted(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<MaterialWithParent>>> {
    Ok(Json(state.catalog.list_deleted().await?))
}

/// POST /api/v1/materials/save/{id}
pub async fn toggle_save(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> AppResult<Json<SaveResponse>> {
    let id = parse_material_id(&id)?;
    let outcome = state.catalog.toggle_save(user.user_id, id).await?;
    Ok(Json(SaveResponse {
        message: if outcome.saved {
            "Material saved"
        } else {
            "Material unsaved"
        },
        saved: outcome.saved,
    }))
}

/// GET /api/v1/materials/saved
pub async fn list_saved(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<Vec<Material>>> {
    Ok(Json(state.catalog.list_saved(user.user_id).await?))
}

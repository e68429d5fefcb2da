//! [`CatalogStore`] implementation over a PostgreSQL pool.
//!
//! Thin adapter: each trait method delegates to one repository call and maps
//! `sqlx` errors into [`CoreError`].

use async_trait::async_trait;
use studyhub_core::error::CoreError;
use studyhub_core::material::{CreateMaterial, Material, UpdateMaterial};
use studyhub_core::store::{
    CatalogStore, IdAllocator, MaterialStore, SavedMaterialStore, StoreResult, UserStore,
};
use studyhub_core::types::{DbId, MaterialKey, Timestamp};
use studyhub_core::user::{CreateUser, User};

use crate::models::material::MaterialRow;
use crate::repositories::{CounterRepo, MaterialRepo, SavedMaterialRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL-backed catalog store. Cloning shares the pool.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Map a sqlx error into the domain taxonomy.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to [`CoreError::Conflict`].
/// - Everything else is logged and surfaced as
///   [`CoreError::StoreUnavailable`] with a sanitized message.
pub fn map_store_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint == "uq_users_email" {
                return CoreError::Conflict("Email is already registered".to_string());
            }
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::StoreUnavailable("The data store could not complete the request".to_string())
}

fn rows(rows: Vec<MaterialRow>) -> Vec<Material> {
    rows.into_iter().map(Material::from).collect()
}

#[async_trait]
impl IdAllocator for PgCatalogStore {
    async fn next_id(&self, sequence: &str) -> StoreResult<DbId> {
        CounterRepo::next(&self.pool, sequence)
            .await
            .map_err(map_store_error)
    }
}

#[async_trait]
impl MaterialStore for PgCatalogStore {
    async fn insert_material(&self, id: DbId, input: &CreateMaterial) -> StoreResult<Material> {
        MaterialRepo::create(&self.pool, id, input)
            .await
            .map(Material::from)
            .map_err(map_store_error)
    }

    async fn find_material(
        &self,
        id: DbId,
        include_deleted: bool,
    ) -> StoreResult<Option<Material>> {
        let row = if include_deleted {
            MaterialRepo::find_by_id_include_deleted(&self.pool, id).await
        } else {
            MaterialRepo::find_by_id(&self.pool, id).await
        };
        row.map(|r| r.map(Material::from)).map_err(map_store_error)
    }

    async fn list_roots(&self, search: Option<&str>) -> StoreResult<Vec<Material>> {
        MaterialRepo::list_roots(&self.pool, search)
            .await
            .map(rows)
            .map_err(map_store_error)
    }

    async fn list_children(&self, parent_id: DbId) -> StoreResult<Vec<Material>> {
        MaterialRepo::list_children(&self.pool, parent_id)
            .await
            .map(rows)
            .map_err(map_store_error)
    }

    async fn list_deleted(&self) -> StoreResult<Vec<Material>> {
        MaterialRepo::list_deleted(&self.pool)
            .await
            .map(rows)
            .map_err(map_store_error)
    }

    async fn set_deleted(&self, id: DbId, deleted_at: Option<Timestamp>) -> StoreResult<bool> {
        match deleted_at {
            Some(at) => MaterialRepo::soft_delete(&self.pool, id, at).await,
            None => MaterialRepo::restore(&self.pool, id).await,
        }
        .map_err(map_store_error)
    }

    async fn set_children_deleted(
        &self,
        parent_id: DbId,
        deleted_at: Option<Timestamp>,
    ) -> StoreResult<u64> {
        match deleted_at {
            Some(at) => MaterialRepo::soft_delete_children(&self.pool, parent_id, at).await,
            None => MaterialRepo::restore_children(&self.pool, parent_id).await,
        }
        .map_err(map_store_error)
    }

    async fn update_material(
        &self,
        id: DbId,
        input: &UpdateMaterial,
    ) -> StoreResult<Option<Material>> {
        MaterialRepo::update(&self.pool, id, input)
            .await
            .map(|r| r.map(Material::from))
            .map_err(map_store_error)
    }
}

#[async_trait]
impl SavedMaterialStore for PgCatalogStore {
    async fn toggle_saved(&self, user_id: DbId, material_key: MaterialKey) -> StoreResult<bool> {
        SavedMaterialRepo::toggle(&self.pool, user_id, material_key)
            .await
            .map_err(map_store_error)
    }

    async fn list_saved(&self, user_id: DbId) -> StoreResult<Vec<Material>> {
        SavedMaterialRepo::list_for_user(&self.pool, user_id)
            .await
            .map(rows)
            .map_err(map_store_error)
    }
}

#[async_trait]
impl UserStore for PgCatalogStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        UserRepo::create(&self.pool, input)
            .await
            .map(User::from)
            .map_err(map_store_error)
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        UserRepo::find_by_id(&self.pool, id)
            .await
            .map(|r| r.map(User::from))
            .map_err(map_store_error)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        UserRepo::find_by_email(&self.pool, email)
            .await
            .map(|r| r.map(User::from))
            .map_err(map_store_error)
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool)
            .await
            .map_err(map_store_error)
    }
}

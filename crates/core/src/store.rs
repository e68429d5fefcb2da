//! Storage seams for the catalog.
//!
//! The catalog engine only talks to persistence through these traits. Every
//! method maps store I/O failures to [`CoreError::StoreUnavailable`]; none of
//! them retry.
//!
//! [`CoreError::StoreUnavailable`]: crate::error::CoreError::StoreUnavailable

use async_trait::async_trait;

use crate::error::CoreError;
use crate::material::{CreateMaterial, Material, UpdateMaterial};
use crate::types::{DbId, MaterialKey, Timestamp};
use crate::user::{CreateUser, User};

pub type StoreResult<T> = Result<T, CoreError>;

/// Durable named sequences.
#[async_trait]
pub trait IdAllocator: Send + Sync {
    /// Atomically increment `sequence` and return the new value.
    ///
    /// The counter is created on first use, so the first value is 1.
    async fn next_id(&self, sequence: &str) -> StoreResult<DbId>;
}

/// Persistence for material rows.
#[async_trait]
pub trait MaterialStore: Send + Sync {
    /// Persist a validated material under an already-allocated public id.
    async fn insert_material(&self, id: DbId, input: &CreateMaterial) -> StoreResult<Material>;

    /// Look up by public id. Deleted rows are returned only when
    /// `include_deleted` is set.
    async fn find_material(&self, id: DbId, include_deleted: bool)
        -> StoreResult<Option<Material>>;

    /// Live root materials, optionally filtered by a case-insensitive
    /// substring of the title. Ordered by id.
    async fn list_roots(&self, search: Option<&str>) -> StoreResult<Vec<Material>>;

    /// Live direct children of `parent_id`, ordered by id.
    async fn list_children(&self, parent_id: DbId) -> StoreResult<Vec<Material>>;

    /// Every deleted material, ordered by id.
    async fn list_deleted(&self) -> StoreResult<Vec<Material>>;

    /// Mark one material deleted (`Some(at)`) or live (`None`).
    ///
    /// Re-deleting keeps the earliest `deleted_at`. Returns `false` when no
    /// row has that id.
    async fn set_deleted(&self, id: DbId, deleted_at: Option<Timestamp>) -> StoreResult<bool>;

    /// Bulk variant of [`MaterialStore::set_deleted`] over every row whose
    /// `parent_id` is `parent_id`, regardless of each row's current state.
    /// Returns the number of rows touched.
    async fn set_children_deleted(
        &self,
        parent_id: DbId,
        deleted_at: Option<Timestamp>,
    ) -> StoreResult<u64>;

    /// Apply a validated partial update. Returns `None` when no row has that
    /// id; deleted rows are updatable.
    async fn update_material(
        &self,
        id: DbId,
        input: &UpdateMaterial,
    ) -> StoreResult<Option<Material>>;
}

/// The user-has-saved-material relation.
#[async_trait]
pub trait SavedMaterialStore: Send + Sync {
    /// Flip membership of `material_key` in the user's saved set and return
    /// whether it is saved afterwards. At most one membership per pair.
    async fn toggle_saved(&self, user_id: DbId, material_key: MaterialKey) -> StoreResult<bool>;

    /// The user's saved materials, resolved to full rows.
    async fn list_saved(&self, user_id: DbId) -> StoreResult<Vec<Material>>;
}

/// User accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A duplicate email yields [`CoreError::Conflict`].
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}

/// Everything the catalog needs from a backing store.
#[async_trait]
pub trait CatalogStore: IdAllocator + MaterialStore + SavedMaterialStore + UserStore {
    /// Cheap reachability check used by the health endpoint.
    async fn health_check(&self) -> StoreResult<()>;
}

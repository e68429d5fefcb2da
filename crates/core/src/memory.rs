//! In-process [`CatalogStore`] backed by ordered maps behind one async mutex.
//!
//! Every trait call takes the lock once, so each operation (including the id
//! increment and the save toggle) is atomic with respect to other callers.
//! Used by tests and local experiments; nothing is persisted.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::CoreError;
use crate::material::{CreateMaterial, Material, UpdateMaterial};
use crate::store::{
    CatalogStore, IdAllocator, MaterialStore, SavedMaterialStore, StoreResult, UserStore,
};
use crate::types::{DbId, MaterialKey, Timestamp};
use crate::user::{CreateUser, User};

#[derive(Default)]
struct Inner {
    counters: HashMap<String, DbId>,
    materials: BTreeMap<DbId, Material>,
    users: BTreeMap<DbId, User>,
    saved: HashMap<DbId, Vec<MaterialKey>>,
    unavailable: bool,
}

impl Inner {
    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable {
            Err(CoreError::StoreUnavailable(
                "in-memory store is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn mark(material: &mut Material, deleted_at: Option<Timestamp>, now: Timestamp) {
        material.deleted_at = match deleted_at {
            Some(at) => Some(material.deleted_at.unwrap_or(at)),
            None => None,
        };
        material.updated_at = now;
    }
}

/// Process-local catalog store.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    inner: Mutex<Inner>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the store going offline (or coming back).
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().await.unavailable = unavailable;
    }
}

#[async_trait]
impl IdAllocator for InMemoryCatalogStore {
    async fn next_id(&self, sequence: &str) -> StoreResult<DbId> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;
        let seq = inner.counters.entry(sequence.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

#[async_trait]
impl MaterialStore for InMemoryCatalogStore {
    async fn insert_material(&self, id: DbId, input: &CreateMaterial) -> StoreResult<Material> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;
        if inner.materials.contains_key(&id) {
            return Err(CoreError::Conflict(format!("Material id {id} already exists")));
        }
        let now = Utc::now();
        let material = Material {
            key: MaterialKey::now_v7(),
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            content: input.content.clone(),
            subject: input.subject.clone(),
            parent_id: input.parent_id,
            pdf_url: input.pdf_url.clone(),
            deleted_at: None,
            created_at: now,
            updated_at: now,
        };
        inner.materials.insert(id, material.clone());
        Ok(material)
    }

    async fn find_material(
        &self,
        id: DbId,
        include_deleted: bool,
    ) -> StoreResult<Option<Material>> {
        let inner = self.inner.lock().await;
        inner.check_available()?;
        Ok(inner
            .materials
            .get(&id)
            .filter(|m| include_deleted || !m.is_deleted())
            .cloned())
    }

    async fn list_roots(&self, search: Option<&str>) -> StoreResult<Vec<Material>> {
        let inner = self.inner.lock().await;
        inner.check_available()?;
        let needle = search.map(str::to_lowercase);
        Ok(inner
            .materials
            .values()
            .filter(|m| m.is_root() && !m.is_deleted())
            .filter(|m| match &needle {
                Some(n) => m.title.to_lowercase().contains(n.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn list_children(&self, parent_id: DbId) -> StoreResult<Vec<Material>> {
        let inner = self.inner.lock().await;
        inner.check_available()?;
        Ok(inner
            .materials
            .values()
            .filter(|m| m.parent_id == Some(parent_id) && !m.is_deleted())
            .cloned()
            .collect())
    }

    async fn list_deleted(&self) -> StoreResult<Vec<Material>> {
        let inner = self.inner.lock().await;
        inner.check_available()?;
        Ok(inner
            .materials
            .values()
            .filter(|m| m.is_deleted())
            .cloned()
            .collect())
    }

    async fn set_deleted(&self, id: DbId, deleted_at: Option<Timestamp>) -> StoreResult<bool> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;
        let now = Utc::now();
        match inner.materials.get_mut(&id) {
            Some(material) => {
                Inner::mark(material, deleted_at, now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_children_deleted(
        &self,
        parent_id: DbId,
        deleted_at: Option<Timestamp>,
    ) -> StoreResult<u64> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;
        let now = Utc::now();
        let mut touched = 0;
        for material in inner
            .materials
            .values_mut()
            .filter(|m| m.parent_id == Some(parent_id))
        {
            Inner::mark(material, deleted_at, now);
            touched += 1;
        }
        Ok(touched)
    }

    async fn update_material(
        &self,
        id: DbId,
        input: &UpdateMaterial,
    ) -> StoreResult<Option<Material>> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;
        Ok(inner.materials.get_mut(&id).map(|material| {
            input.apply_to(material, Utc::now());
            material.clone()
        }))
    }
}

#[async_trait]
impl SavedMaterialStore for InMemoryCatalogStore {
    async fn toggle_saved(&self, user_id: DbId, material_key: MaterialKey) -> StoreResult<bool> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;
        let saved = inner.saved.entry(user_id).or_default();
        match saved.iter().position(|k| *k == material_key) {
            Some(index) => {
                saved.remove(index);
                Ok(false)
            }
            None => {
                saved.push(material_key);
                Ok(true)
            }
        }
    }

    async fn list_saved(&self, user_id: DbId) -> StoreResult<Vec<Material>> {
        let inner = self.inner.lock().await;
        inner.check_available()?;
        let Some(keys) = inner.saved.get(&user_id) else {
            return Ok(Vec::new());
        };
        Ok(keys
            .iter()
            .filter_map(|key| inner.materials.values().find(|m| m.key == *key))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl UserStore for InMemoryCatalogStore {
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut inner = self.inner.lock().await;
        inner.check_available()?;
        if inner
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(CoreError::Conflict("Email is already registered".to_string()));
        }
        let id = inner.users.keys().next_back().copied().unwrap_or(0) + 1;
        let now = Utc::now();
        let user = User {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        let inner = self.inner.lock().await;
        inner.check_available()?;
        Ok(inner.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.lock().await;
        inner.check_available()?;
        Ok(inner
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.inner.lock().await.check_available()
    }
}

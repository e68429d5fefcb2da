//! Hierarchy engine and query service for materials.
//!
//! [`Catalog`] composes the id allocator, material store and save relation
//! into the operations the API exposes. Parent/child invariants are checked
//! here before any mutation reaches the store:
//!
//! - children may only be created under a live parent;
//! - deleting a root cascades to its direct children, deleting a child
//!   never touches its parent or siblings;
//! - a child cannot be restored while its parent is deleted, and restoring
//!   a root restores all of its children.
//!
//! Cascades are separate store calls from the parent's own flag flip. If
//! the second call fails the tree is left partially updated until the same
//! operation is re-run on the parent.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::error::CoreError;
use crate::material::{
    CreateMaterial, Material, MaterialDetail, MaterialWithParent, SaveOutcome, UpdateMaterial,
    MATERIAL_SEQUENCE,
};
use crate::store::CatalogStore;
use crate::types::DbId;

const MATERIAL: &str = "Material";
const USER: &str = "User";
const NESTED_SUB_MATERIAL: &str = "A sub-material cannot have sub-materials of its own";

/// Cheaply cloneable handle over a shared [`CatalogStore`].
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn CatalogStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    // ── Mutations ─────────────────────────────────────────────────────

    /// Create a root material, or a sub-material when `parent_id` is set.
    ///
    /// The parent must exist, be live and be a root material: the hierarchy
    /// is two levels deep. The public id is allocated only after validation
    /// and the parent check pass.
    pub async fn create_material(&self, input: CreateMaterial) -> Result<Material, CoreError> {
        let input = input.validated()?;

        if let Some(parent_id) = input.parent_id {
            let parent = self
                .store
                .find_material(parent_id, false)
                .await?
                .ok_or(CoreError::ParentNotFound { parent_id })?;
            if !parent.is_root() {
                return Err(CoreError::Validation(NESTED_SUB_MATERIAL.into()));
            }
        }

        let id = self.store.next_id(MATERIAL_SEQUENCE).await?;
        let material = self.store.insert_material(id, &input).await?;
        tracing::info!(
            material_id = material.id,
            parent_id = ?material.parent_id,
            kind = ?material.kind(),
            "Material created"
        );
        Ok(material)
    }

    /// Soft-delete a material and every direct child of it.
    ///
    /// Existence is checked regardless of deleted state, so deleting twice
    /// succeeds and re-applies the cascade.
    pub async fn soft_delete(&self, id: DbId) -> Result<u64, CoreError> {
        let now = Utc::now();
        if !self.store.set_deleted(id, Some(now)).await? {
            return Err(not_found(MATERIAL, id));
        }
        let cascaded = self.store.set_children_deleted(id, Some(now)).await?;
        tracing::info!(material_id = id, cascaded, "Material soft-deleted");
        Ok(cascaded)
    }

    /// Restore a soft-deleted material.
    ///
    /// A sub-material whose parent is still deleted is rejected with
    /// [`CoreError::ParentStillDeleted`]. A missing parent does not block.
    /// Restoring a root also restores all of its children.
    pub async fn restore(&self, id: DbId) -> Result<u64, CoreError> {
        let material = self
            .store
            .find_material(id, true)
            .await?
            .ok_or_else(|| not_found(MATERIAL, id))?;

        if let Some(parent_id) = material.parent_id {
            if let Some(parent) = self.store.find_material(parent_id, true).await? {
                if parent.is_deleted() {
                    return Err(CoreError::ParentStillDeleted {
                        parent_id,
                        parent_title: parent.title,
                    });
                }
            }
        }

        if !self.store.set_deleted(id, None).await? {
            return Err(not_found(MATERIAL, id));
        }

        let cascaded = if material.is_root() {
            self.store.set_children_deleted(id, None).await?
        } else {
            0
        };
        tracing::info!(material_id = id, cascaded, "Material restored");
        Ok(cascaded)
    }

    /// Apply a partial update. Deleted materials can be updated too.
    ///
    /// A new `parentId` is written through without checking that the parent
    /// exists.
    pub async fn update_material(
        &self,
        id: DbId,
        input: UpdateMaterial,
    ) -> Result<Material, CoreError> {
        input.validate_for(id)?;
        let material = self
            .store
            .update_material(id, &input)
            .await?
            .ok_or_else(|| not_found(MATERIAL, id))?;
        tracing::info!(material_id = id, kind = ?material.kind(), "Material updated");
        Ok(material)
    }

    /// Flip a material in or out of a user's saved set.
    ///
    /// Deleted materials can still be toggled.
    pub async fn toggle_save(
        &self,
        user_id: DbId,
        material_id: DbId,
    ) -> Result<SaveOutcome, CoreError> {
        self.require_user(user_id).await?;
        let material = self
            .store
            .find_material(material_id, true)
            .await?
            .ok_or_else(|| not_found(MATERIAL, material_id))?;

        let saved = self.store.toggle_saved(user_id, material.key).await?;
        tracing::debug!(user_id, material_id, saved, "Saved material toggled");
        Ok(SaveOutcome { saved })
    }

    // ── Queries ───────────────────────────────────────────────────────

    /// Live root materials, optionally filtered by title substring.
    ///
    /// A blank search term is treated as no filter.
    pub async fn list_roots(&self, search: Option<&str>) -> Result<Vec<Material>, CoreError> {
        let search = search.map(str::trim).filter(|s| !s.is_empty());
        self.store.list_roots(search).await
    }

    /// A live material together with its live direct children.
    pub async fn get_detail(&self, id: DbId) -> Result<MaterialDetail, CoreError> {
        let material = self
            .store
            .find_material(id, false)
            .await?
            .ok_or_else(|| not_found(MATERIAL, id))?;
        let sub_materials = self.store.list_children(id).await?;
        Ok(MaterialDetail {
            material,
            sub_materials,
        })
    }

    /// A live child, only if it belongs to `parent_id`.
    ///
    /// A child of some other parent is reported exactly like a missing one.
    pub async fn get_child(
        &self,
        parent_id: DbId,
        child_id: DbId,
    ) -> Result<MaterialWithParent, CoreError> {
        let material = self
            .store
            .find_material(child_id, false)
            .await?
            .filter(|m| m.parent_id == Some(parent_id))
            .ok_or_else(|| not_found(MATERIAL, child_id))?;

        let parent_title = self
            .store
            .find_material(parent_id, true)
            .await?
            .map(|p| p.title);
        Ok(MaterialWithParent {
            material,
            parent_title,
        })
    }

    /// Every deleted material, with its parent's title where resolvable.
    pub async fn list_deleted(&self) -> Result<Vec<MaterialWithParent>, CoreError> {
        let deleted = self.store.list_deleted().await?;
        let mut titles: HashMap<DbId, Option<String>> = HashMap::new();
        for material in &deleted {
            if material.is_root() {
                titles.insert(material.id, Some(material.title.clone()));
            }
        }

        let mut items = Vec::with_capacity(deleted.len());
        for material in deleted {
            let parent_title = match material.parent_id {
                None => None,
                Some(parent_id) => match titles.get(&parent_id) {
                    Some(title) => title.clone(),
                    None => {
                        let title = self
                            .store
                            .find_material(parent_id, true)
                            .await?
                            .map(|p| p.title);
                        titles.insert(parent_id, title.clone());
                        title
                    }
                },
            };
            items.push(MaterialWithParent {
                material,
                parent_title,
            });
        }
        Ok(items)
    }

    /// The user's saved materials.
    pub async fn list_saved(&self, user_id: DbId) -> Result<Vec<Material>, CoreError> {
        self.require_user(user_id).await?;
        self.store.list_saved(user_id).await
    }

    async fn require_user(&self, user_id: DbId) -> Result<(), CoreError> {
        match self.store.find_user_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(not_found(USER, user_id)),
        }
    }
}

fn not_found(entity: &'static str, id: DbId) -> CoreError {
    CoreError::NotFound { entity, id }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalogStore;
    use crate::material::MaterialKind;
    use crate::store::UserStore;
    use crate::user::CreateUser;
    use assert_matches::assert_matches;

    fn new_catalog() -> (Catalog, Arc<InMemoryCatalogStore>) {
        let store = Arc::new(InMemoryCatalogStore::new());
        (Catalog::new(store.clone()), store)
    }

    fn new_material(title: &str, parent_id: Option<DbId>) -> CreateMaterial {
        CreateMaterial {
            title: title.to_string(),
            description: format!("{title} description"),
            content: format!("{title} content"),
            subject: "Math".to_string(),
            parent_id,
            pdf_url: None,
        }
    }

    async fn new_user(store: &InMemoryCatalogStore) -> DbId {
        store
            .create_user(&CreateUser {
                name: "Student".to_string(),
                email: "student@example.com".to_string(),
                password_hash: "hash".to_string(),
                role: "user".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    /// Root with `n` children; returns (root id, child ids).
    async fn tree(catalog: &Catalog, n: usize) -> (DbId, Vec<DbId>) {
        let root = catalog
            .create_material(new_material("Root", None))
            .await
            .unwrap();
        let mut children = Vec::new();
        for i in 0..n {
            let child = catalog
                .create_material(new_material(&format!("Child {i}"), Some(root.id)))
                .await
                .unwrap();
            children.push(child.id);
        }
        (root.id, children)
    }

    async fn is_deleted(catalog: &Catalog, id: DbId) -> bool {
        catalog
            .store()
            .find_material(id, true)
            .await
            .unwrap()
            .unwrap()
            .is_deleted()
    }

    // -- create --------------------------------------------------------

    #[tokio::test]
    async fn ids_are_assigned_in_creation_order() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 2).await;
        assert_eq!(root, 1);
        assert_eq!(children, vec![2, 3]);
    }

    #[tokio::test]
    async fn create_child_sets_submaterial_kind() {
        let (catalog, _) = new_catalog();
        let (root, _) = tree(&catalog, 0).await;
        let child = catalog
            .create_material(new_material("Child", Some(root)))
            .await
            .unwrap();
        assert_eq!(child.kind(), MaterialKind::Submaterial);
        assert_eq!(child.parent_id, Some(root));
    }

    #[tokio::test]
    async fn create_under_missing_parent_fails() {
        let (catalog, _) = new_catalog();
        let result = catalog
            .create_material(new_material("Orphan", Some(99)))
            .await;
        assert_matches!(result, Err(CoreError::ParentNotFound { parent_id: 99 }));
    }

    #[tokio::test]
    async fn create_under_live_parent_succeeds_but_deleted_parent_fails() {
        let (catalog, _) = new_catalog();
        let (root, _) = tree(&catalog, 0).await;

        assert!(catalog
            .create_material(new_material("Live parent", Some(root)))
            .await
            .is_ok());

        catalog.soft_delete(root).await.unwrap();
        let result = catalog
            .create_material(new_material("Deleted parent", Some(root)))
            .await;
        assert_matches!(result, Err(CoreError::ParentNotFound { parent_id }) if parent_id == root);
    }

    #[tokio::test]
    async fn create_under_sub_material_is_rejected() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 1).await;

        let result = catalog
            .create_material(new_material("Third level", Some(children[0])))
            .await;
        assert_matches!(result, Err(CoreError::Validation(_)));

        let detail = catalog.get_detail(root).await.unwrap();
        assert_eq!(detail.sub_materials.len(), 1);
        let next = catalog.create_material(new_material("Next", None)).await.unwrap();
        assert_eq!(next.id, children[0] + 1);
    }

    #[tokio::test]
    async fn rejected_create_does_not_consume_an_id() {
        let (catalog, _) = new_catalog();
        let _ = catalog
            .create_material(new_material("Orphan", Some(42)))
            .await;
        let _ = catalog.create_material(CreateMaterial::default()).await;
        let (root, _) = tree(&catalog, 0).await;
        assert_eq!(root, 1);
    }

    #[tokio::test]
    async fn create_fails_when_store_is_down() {
        let (catalog, store) = new_catalog();
        store.set_unavailable(true).await;
        let result = catalog.create_material(new_material("Down", None)).await;
        assert_matches!(result, Err(CoreError::StoreUnavailable(_)));

        store.set_unavailable(false).await;
        let created = catalog
            .create_material(new_material("Up", None))
            .await
            .unwrap();
        assert_eq!(created.id, 1);
    }

    // -- soft delete ---------------------------------------------------

    #[tokio::test]
    async fn deleting_root_cascades_to_children() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 3).await;

        let cascaded = catalog.soft_delete(root).await.unwrap();
        assert_eq!(cascaded, 3);
        assert!(is_deleted(&catalog, root).await);
        for child in children {
            assert!(is_deleted(&catalog, child).await);
        }
    }

    #[tokio::test]
    async fn deleting_child_leaves_parent_and_siblings() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 2).await;

        catalog.soft_delete(children[0]).await.unwrap();
        assert!(is_deleted(&catalog, children[0]).await);
        assert!(!is_deleted(&catalog, children[1]).await);
        assert!(!is_deleted(&catalog, root).await);
    }

    #[tokio::test]
    async fn soft_delete_is_idempotent() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 1).await;

        catalog.soft_delete(root).await.unwrap();
        let first = catalog.store().find_material(root, true).await.unwrap().unwrap();
        catalog.soft_delete(root).await.unwrap();
        let second = catalog.store().find_material(root, true).await.unwrap().unwrap();

        assert!(second.is_deleted());
        assert_eq!(first.deleted_at, second.deleted_at);
        assert!(is_deleted(&catalog, children[0]).await);
    }

    #[tokio::test]
    async fn soft_delete_sets_deleted_at() {
        let (catalog, _) = new_catalog();
        let (root, _) = tree(&catalog, 0).await;
        catalog.soft_delete(root).await.unwrap();
        let material = catalog.store().find_material(root, true).await.unwrap().unwrap();
        assert!(material.deleted_at.is_some());
    }

    #[tokio::test]
    async fn soft_delete_missing_is_not_found() {
        let (catalog, _) = new_catalog();
        assert_matches!(
            catalog.soft_delete(5).await,
            Err(CoreError::NotFound { entity: "Material", id: 5 })
        );
    }

    // -- restore -------------------------------------------------------

    #[tokio::test]
    async fn restoring_child_under_deleted_parent_fails() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 1).await;
        catalog.soft_delete(root).await.unwrap();

        let result = catalog.restore(children[0]).await;
        assert_matches!(
            result,
            Err(CoreError::ParentStillDeleted { parent_id, ref parent_title })
                if parent_id == root && parent_title == "Root"
        );
        assert!(is_deleted(&catalog, children[0]).await);
    }

    #[tokio::test]
    async fn restoring_root_revives_every_child() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 2).await;

        // One child deleted on its own before the root.
        catalog.soft_delete(children[0]).await.unwrap();
        catalog.soft_delete(root).await.unwrap();

        let cascaded = catalog.restore(root).await.unwrap();
        assert_eq!(cascaded, 2);
        assert!(!is_deleted(&catalog, root).await);
        for child in children {
            let material = catalog.store().find_material(child, true).await.unwrap().unwrap();
            assert!(!material.is_deleted());
            assert!(material.deleted_at.is_none());
        }
    }

    #[tokio::test]
    async fn restoring_child_touches_only_that_child() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 2).await;
        catalog.soft_delete(children[0]).await.unwrap();
        catalog.soft_delete(children[1]).await.unwrap();

        catalog.restore(children[0]).await.unwrap();
        assert!(!is_deleted(&catalog, children[0]).await);
        assert!(is_deleted(&catalog, children[1]).await);
        assert!(!is_deleted(&catalog, root).await);
    }

    #[tokio::test]
    async fn restoring_child_with_missing_parent_succeeds() {
        let (catalog, _) = new_catalog();
        let (root, _) = tree(&catalog, 0).await;
        // Re-point the root at a parent that never existed, then delete it.
        catalog
            .update_material(
                root,
                UpdateMaterial {
                    parent_id: Some(Some(77)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        catalog.soft_delete(root).await.unwrap();

        catalog.restore(root).await.unwrap();
        assert!(!is_deleted(&catalog, root).await);
    }

    #[tokio::test]
    async fn restore_missing_is_not_found() {
        let (catalog, _) = new_catalog();
        assert_matches!(catalog.restore(8).await, Err(CoreError::NotFound { .. }));
    }

    // -- update --------------------------------------------------------

    #[tokio::test]
    async fn update_keeps_omitted_fields() {
        let (catalog, _) = new_catalog();
        let (root, _) = tree(&catalog, 0).await;
        let updated = catalog
            .update_material(
                root,
                UpdateMaterial {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.subject, "Math");
        assert_eq!(updated.description, "Root description");
    }

    #[tokio::test]
    async fn update_parent_recomputes_kind() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 1).await;

        let detached = catalog
            .update_material(
                children[0],
                UpdateMaterial {
                    parent_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(detached.kind(), MaterialKind::Material);

        let reattached = catalog
            .update_material(
                children[0],
                UpdateMaterial {
                    parent_id: Some(Some(root)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(reattached.kind(), MaterialKind::Submaterial);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (catalog, _) = new_catalog();
        let result = catalog
            .update_material(3, UpdateMaterial::default())
            .await;
        assert_matches!(result, Err(CoreError::NotFound { .. }));
    }

    // -- save relation -------------------------------------------------

    #[tokio::test]
    async fn toggle_twice_saves_then_unsaves() {
        let (catalog, store) = new_catalog();
        let user = new_user(&store).await;
        let (root, _) = tree(&catalog, 0).await;

        assert!(catalog.toggle_save(user, root).await.unwrap().saved);
        let saved = catalog.list_saved(user).await.unwrap();
        assert_eq!(saved.iter().map(|m| m.id).collect::<Vec<_>>(), vec![root]);

        assert!(!catalog.toggle_save(user, root).await.unwrap().saved);
        assert!(catalog.list_saved(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_materials_remain_toggleable() {
        let (catalog, store) = new_catalog();
        let user = new_user(&store).await;
        let (root, _) = tree(&catalog, 0).await;
        catalog.soft_delete(root).await.unwrap();

        assert!(catalog.toggle_save(user, root).await.unwrap().saved);
    }

    #[tokio::test]
    async fn toggle_unknown_material_or_user_is_not_found() {
        let (catalog, store) = new_catalog();
        let user = new_user(&store).await;
        let (root, _) = tree(&catalog, 0).await;

        assert_matches!(
            catalog.toggle_save(user, 404).await,
            Err(CoreError::NotFound { entity: "Material", .. })
        );
        assert_matches!(
            catalog.toggle_save(999, root).await,
            Err(CoreError::NotFound { entity: "User", .. })
        );
        assert_matches!(
            catalog.list_saved(999).await,
            Err(CoreError::NotFound { entity: "User", .. })
        );
    }

    // -- queries -------------------------------------------------------

    #[tokio::test]
    async fn list_roots_filters_by_case_insensitive_title() {
        let (catalog, _) = new_catalog();
        catalog.create_material(new_material("Linear Algebra", None)).await.unwrap();
        let geometry = catalog.create_material(new_material("Geometry", None)).await.unwrap();
        catalog
            .create_material(new_material("Algebra exercises", Some(geometry.id)))
            .await
            .unwrap();

        let all = catalog.list_roots(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let found = catalog.list_roots(Some("ALGEBRA")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Linear Algebra");

        let blank = catalog.list_roots(Some("   ")).await.unwrap();
        assert_eq!(blank.len(), 2);
    }

    #[tokio::test]
    async fn list_roots_hides_deleted() {
        let (catalog, _) = new_catalog();
        let (root, _) = tree(&catalog, 0).await;
        catalog.soft_delete(root).await.unwrap();
        assert!(catalog.list_roots(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn detail_embeds_only_live_children() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 2).await;
        catalog.soft_delete(children[1]).await.unwrap();

        let detail = catalog.get_detail(root).await.unwrap();
        assert_eq!(detail.material.id, root);
        assert_eq!(
            detail.sub_materials.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![children[0]]
        );
    }

    #[tokio::test]
    async fn detail_of_deleted_root_is_not_found_even_with_children() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 1).await;
        catalog.soft_delete(root).await.unwrap();
        // Child revived by hand through the store.
        catalog.store().set_deleted(children[0], None).await.unwrap();

        assert_matches!(catalog.get_detail(root).await, Err(CoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn get_child_requires_matching_parent() {
        let (catalog, _) = new_catalog();
        let (first, first_children) = tree(&catalog, 1).await;
        let (second, _) = tree(&catalog, 0).await;

        let found = catalog.get_child(first, first_children[0]).await.unwrap();
        assert_eq!(found.parent_title.as_deref(), Some("Root"));

        assert_matches!(
            catalog.get_child(second, first_children[0]).await,
            Err(CoreError::NotFound { .. })
        );
    }

    #[tokio::test]
    async fn get_child_ignores_parent_deleted_state() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 1).await;
        catalog.soft_delete(root).await.unwrap();
        catalog.store().set_deleted(children[0], None).await.unwrap();

        let found = catalog.get_child(root, children[0]).await.unwrap();
        assert_eq!(found.parent_title.as_deref(), Some("Root"));
    }

    #[tokio::test]
    async fn list_deleted_resolves_parent_titles() {
        let (catalog, _) = new_catalog();
        let (root, children) = tree(&catalog, 2).await;
        let (other, _) = tree(&catalog, 0).await;
        catalog.soft_delete(root).await.unwrap();

        let deleted = catalog.list_deleted().await.unwrap();
        let ids: Vec<DbId> = deleted.iter().map(|d| d.material.id).collect();
        assert_eq!(ids, vec![root, children[0], children[1]]);
        assert!(!ids.contains(&other));
        assert_eq!(deleted[0].parent_title, None);
        assert_eq!(deleted[1].parent_title.as_deref(), Some("Root"));
    }

    #[tokio::test]
    async fn concurrent_creates_receive_distinct_increasing_ids() {
        let (catalog, _) = new_catalog();
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let catalog = catalog.clone();
                tokio::spawn(async move {
                    catalog
                        .create_material(new_material(&format!("M{i}"), None))
                        .await
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids: Vec<DbId> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=32).collect::<Vec<_>>());
    }

    // -- end to end ----------------------------------------------------

    #[tokio::test]
    async fn algebra_polynomials_lifecycle() {
        let (catalog, _) = new_catalog();
        let algebra = catalog
            .create_material(CreateMaterial {
                subject: "Math".to_string(),
                ..new_material("Algebra", None)
            })
            .await
            .unwrap();
        assert_eq!(algebra.id, 1);

        let polynomials = catalog
            .create_material(new_material("Polynomials", Some(1)))
            .await
            .unwrap();
        assert_eq!(polynomials.id, 2);
        assert_eq!(polynomials.kind(), MaterialKind::Submaterial);

        let detail = catalog.get_detail(1).await.unwrap();
        assert_eq!(detail.material.title, "Algebra");
        assert_eq!(detail.sub_materials.len(), 1);
        assert_eq!(detail.sub_materials[0].id, 2);
        assert_eq!(detail.sub_materials[0].title, "Polynomials");

        catalog.soft_delete(1).await.unwrap();
        assert_matches!(catalog.get_detail(1).await, Err(CoreError::NotFound { .. }));
        let deleted: Vec<DbId> = catalog
            .list_deleted()
            .await
            .unwrap()
            .iter()
            .map(|d| d.material.id)
            .collect();
        assert!(deleted.contains(&1) && deleted.contains(&2));

        let err = catalog.restore(2).await.unwrap_err();
        assert!(err.to_string().contains("Algebra"));

        catalog.restore(1).await.unwrap();
        assert!(!is_deleted(&catalog, 1).await);
        assert!(!is_deleted(&catalog, 2).await);
    }
}

//! Repository for the `user_saved_materials` join table.

use sqlx::PgPool;
use studyhub_core::types::{DbId, MaterialKey};

use crate::models::material::MaterialRow;
use crate::repositories::material_repo::M_COLUMNS;

/// Provides the save/unsave toggle and saved listing.
pub struct SavedMaterialRepo;

impl SavedMaterialRepo {
    /// Flip membership of `material_key` for `user_id` in one statement and
    /// return whether the material is saved afterwards.
    ///
    /// The delete runs first; the insert only fires when nothing was removed.
    /// The `(user_id, material_key)` primary key plus `ON CONFLICT DO NOTHING`
    /// keeps membership at most one even when two toggles race.
    pub async fn toggle(
        pool: &PgPool,
        user_id: DbId,
        material_key: MaterialKey,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "WITH removed AS (
                 DELETE FROM user_saved_materials
                 WHERE user_id = $1 AND material_key = $2
                 RETURNING 1
             ),
             inserted AS (
                 INSERT INTO user_saved_materials (user_id, material_key)
                 SELECT $1, $2
                 WHERE NOT EXISTS (SELECT 1 FROM removed)
                 ON CONFLICT (user_id, material_key) DO NOTHING
                 RETURNING 1
             )
             SELECT EXISTS (SELECT 1 FROM inserted)",
        )
        .bind(user_id)
        .bind(material_key)
        .fetch_one(pool)
        .await
    }

    /// Whether `material_key` is currently in the user's saved set.
    pub async fn is_saved(
        pool: &PgPool,
        user_id: DbId,
        material_key: MaterialKey,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM user_saved_materials
                 WHERE user_id = $1 AND material_key = $2
             )",
        )
        .bind(user_id)
        .bind(material_key)
        .fetch_one(pool)
        .await
    }

    /// List a user's saved materials in the order they were saved.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<MaterialRow>, sqlx::Error> {
        let query = format!(
            "SELECT {M_COLUMNS}
             FROM user_saved_materials s
             JOIN materials m ON m.material_key = s.material_key
             WHERE s.user_id = $1
             ORDER BY s.created_at, m.id"
        );
        sqlx::query_as::<_, MaterialRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}

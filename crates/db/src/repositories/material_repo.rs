//! Repository for the `materials` table.
//!
//! Lookups take the public `id`; `material_key` stays internal. Live rows
//! have `deleted_at IS NULL`.

use sqlx::PgPool;
use studyhub_core::material::{CreateMaterial, UpdateMaterial};
use studyhub_core::types::{DbId, MaterialKey, Timestamp};

use crate::models::material::MaterialRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "material_key, id, title, description, content, subject, \
                       parent_id, pdf_url, deleted_at, created_at, updated_at";

/// [`COLUMNS`] qualified with the `m` alias for joins.
pub(crate) const M_COLUMNS: &str = "m.material_key, m.id, m.title, m.description, m.content, \
                                    m.subject, m.parent_id, m.pdf_url, m.deleted_at, \
                                    m.created_at, m.updated_at";

/// Provides CRUD and soft-delete operations for materials.
pub struct MaterialRepo;

impl MaterialRepo {
    /// Insert a material under an already-allocated public id.
    pub async fn create(
        pool: &PgPool,
        id: DbId,
        input: &CreateMaterial,
    ) -> Result<MaterialRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO materials
                (material_key, id, title, description, content, subject, parent_id, pdf_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaterialRow>(&query)
            .bind(MaterialKey::now_v7())
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.subject)
            .bind(input.parent_id)
            .bind(&input.pdf_url)
            .fetch_one(pool)
            .await
    }

    /// Find a live material by public id. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MaterialRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM materials WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, MaterialRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a material by public id, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaterialRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM materials WHERE id = $1");
        sqlx::query_as::<_, MaterialRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List live root materials, optionally filtered by a case-insensitive
    /// title substring. The term is matched literally.
    pub async fn list_roots(
        pool: &PgPool,
        search: Option<&str>,
    ) -> Result<Vec<MaterialRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM materials
             WHERE parent_id IS NULL AND deleted_at IS NULL
               AND ($1::text IS NULL OR title ILIKE '%' || $1 || '%' ESCAPE '\\')
             ORDER BY id"
        );
        sqlx::query_as::<_, MaterialRow>(&query)
            .bind(search.map(escape_like))
            .fetch_all(pool)
            .await
    }

    /// List live direct children of a material.
    pub async fn list_children(
        pool: &PgPool,
        parent_id: DbId,
    ) -> Result<Vec<MaterialRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM materials
             WHERE parent_id = $1 AND deleted_at IS NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, MaterialRow>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// List every soft-deleted material.
    pub async fn list_deleted(pool: &PgPool) -> Result<Vec<MaterialRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM materials WHERE deleted_at IS NOT NULL ORDER BY id");
        sqlx::query_as::<_, MaterialRow>(&query).fetch_all(pool).await
    }

    /// Apply a partial update. Returns `None` if no row has that id.
    ///
    /// Text fields use `COALESCE`; `pdf_url` and `parent_id` carry an
    /// explicit "present" flag so `NULL` can be written.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaterial,
    ) -> Result<Option<MaterialRow>, sqlx::Error> {
        let query = format!(
            "UPDATE materials SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                content = COALESCE($4, content),
                subject = COALESCE($5, subject),
                pdf_url = CASE WHEN $6 THEN $7 ELSE pdf_url END,
                parent_id = CASE WHEN $8 THEN $9 ELSE parent_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaterialRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.subject)
            .bind(input.pdf_url.is_some())
            .bind(input.pdf_url.clone().flatten())
            .bind(input.parent_id.is_some())
            .bind(input.parent_id.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a material by id regardless of its current state.
    ///
    /// An already-deleted row keeps its first `deleted_at`. Returns `true`
    /// if a row with that id exists.
    pub async fn soft_delete(pool: &PgPool, id: DbId, at: Timestamp) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE materials SET deleted_at = COALESCE(deleted_at, $2) WHERE id = $1")
                .bind(id)
                .bind(at)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a material by id regardless of its current state.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE materials SET deleted_at = NULL WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete every direct child of `parent_id` in one statement.
    pub async fn soft_delete_children(
        pool: &PgPool,
        parent_id: DbId,
        at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE materials SET deleted_at = COALESCE(deleted_at, $2) WHERE parent_id = $1",
        )
        .bind(parent_id)
        .bind(at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Restore every direct child of `parent_id` in one statement.
    pub async fn restore_children(pool: &PgPool, parent_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE materials SET deleted_at = NULL WHERE parent_id = $1")
            .bind(parent_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

//! Material row model.

use sqlx::FromRow;
use studyhub_core::material::Material;
use studyhub_core::types::{DbId, MaterialKey, Timestamp};

/// A row from the `materials` table.
#[derive(Debug, Clone, FromRow)]
pub struct MaterialRow {
    pub material_key: MaterialKey,
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub content: String,
    pub subject: String,
    pub parent_id: Option<DbId>,
    pub pdf_url: Option<String>,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<MaterialRow> for Material {
    fn from(row: MaterialRow) -> Self {
        Material {
            key: row.material_key,
            id: row.id,
            title: row.title,
            description: row.description,
            content: row.content,
            subject: row.subject,
            parent_id: row.parent_id,
            pdf_url: row.pdf_url,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

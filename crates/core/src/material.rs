//! Material entity model, client-facing views and input DTOs.
//!
//! A material is a node in a two-level tree: roots have no parent, and
//! sub-materials point at a root through `parent_id`. The `type` tag and the
//! `isDeleted` flag seen by clients are derived on serialization from
//! `parent_id` and `deleted_at`, so they can never disagree with them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::types::{DbId, MaterialKey, Timestamp};

/// Name of the counter sequence that issues public material ids.
pub const MATERIAL_SEQUENCE: &str = "materialId";

/// Root-versus-child tag exposed to clients as `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialKind {
    Material,
    Submaterial,
}

impl MaterialKind {
    /// The only place the tag is computed.
    pub fn from_parent(parent_id: Option<DbId>) -> Self {
        match parent_id {
            Some(_) => MaterialKind::Submaterial,
            None => MaterialKind::Material,
        }
    }
}

/// A stored material.
///
/// `key` is the internal storage identity and is never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub key: MaterialKey,
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

impl Material {
    pub fn kind(&self) -> MaterialKind {
        MaterialKind::from_parent(self.parent_id)
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MaterialWire<'a> {
    id: DbId,
    title: &'a str,
    description: &'a str,
    content: &'a str,
    subject: &'a str,
    parent_id: Option<DbId>,
    #[serde(rename = "type")]
    kind: MaterialKind,
    is_deleted: bool,
    deleted_at: Option<Timestamp>,
    pdf_url: Option<&'a str>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Serialize for Material {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MaterialWire {
            id: self.id,
            title: &self.title,
            description: &self.description,
            content: &self.content,
            subject: &self.subject,
            parent_id: self.parent_id,
            kind: self.kind(),
            is_deleted: self.is_deleted(),
            deleted_at: self.deleted_at,
            pdf_url: self.pdf_url.as_deref(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .serialize(serializer)
    }
}

/// A material with its live direct children embedded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDetail {
    #[serde(flatten)]
    pub material: Material,
    pub sub_materials: Vec<Material>,
}

/// A material enriched with its parent's title when the parent resolves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialWithParent {
    #[serde(flatten)]
    pub material: Material,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_title: Option<String>,
}

/// Result of toggling a material in a user's saved set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    pub saved: bool,
}

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a material or sub-material.
///
/// Text fields default to empty so a missing field surfaces as a validation
/// error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaterial {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, alias = "parent_id")]
    pub parent_id: Option<DbId>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl CreateMaterial {
    /// Check required fields and normalize optional ones.
    ///
    /// An empty `pdfUrl` is treated as absent.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        let mut missing = Vec::new();
        for (name, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("content", &self.content),
            ("subject", &self.subject),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        if let Some(parent_id) = self.parent_id {
            ensure_positive("parentId", parent_id)?;
        }
        self.pdf_url = self.pdf_url.filter(|url| !url.trim().is_empty());
        Ok(self)
    }
}

/// DTO for a partial material update.
///
/// Omitted fields are left unchanged. `pdf_url` and `parent_id` use a double
/// option so an explicit `null` (clear) is distinct from an omitted field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaterial {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "explicit_null")]
    pub pdf_url: Option<Option<String>>,
    #[serde(default, alias = "parent_id", deserialize_with = "explicit_null")]
    pub parent_id: Option<Option<DbId>>,
}

impl UpdateMaterial {
    /// Reject explicitly empty required text and invalid parent references.
    pub fn validate_for(&self, id: DbId) -> Result<(), CoreError> {
        for (name, value) in [
            ("title", &self.title),
            ("description", &self.description),
            ("content", &self.content),
            ("subject", &self.subject),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(CoreError::Validation(format!("{name} must not be empty")));
            }
        }
        if let Some(Some(parent_id)) = self.parent_id {
            ensure_positive("parentId", parent_id)?;
            if parent_id == id {
                return Err(CoreError::Validation(
                    "A material cannot be its own parent".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Apply the patch in place. Callers validate first.
    pub fn apply_to(&self, material: &mut Material, now: Timestamp) {
        if let Some(title) = &self.title {
            material.title = title.clone();
        }
        if let Some(description) = &self.description {
            material.description = description.clone();
        }
        if let Some(content) = &self.content {
            material.content = content.clone();
        }
        if let Some(subject) = &self.subject {
            material.subject = subject.clone();
        }
        if let Some(pdf_url) = &self.pdf_url {
            material.pdf_url = pdf_url.clone();
        }
        if let Some(parent_id) = self.parent_id {
            material.parent_id = parent_id;
        }
        material.updated_at = now;
    }
}

/// Deserialize a present field (including `null`) as `Some(..)`; an absent
/// field falls back to `#[serde(default)]` and stays `None`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Boundary parsing
// ---------------------------------------------------------------------------

/// Parse a public material id from its decimal text form.
///
/// Runs before any store access so malformed ids never reach a lookup.
pub fn parse_material_id(raw: &str) -> Result<DbId, CoreError> {
    let id: DbId = raw.trim().parse().map_err(|_| {
        CoreError::Validation(format!(
            "Invalid ID format '{raw}'. ID must be a number."
        ))
    })?;
    ensure_positive("id", id)?;
    Ok(id)
}

fn ensure_positive(field: &str, value: DbId) -> Result<(), CoreError> {
    if value > 0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be a positive integer"
        )))
    }
}

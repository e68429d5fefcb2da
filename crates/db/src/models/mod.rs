//! Row structs for the catalog tables.
//!
//! Each submodule contains a `FromRow` struct matching the database row and
//! a conversion into the corresponding `studyhub_core` domain type.

pub mod material;
pub mod user;

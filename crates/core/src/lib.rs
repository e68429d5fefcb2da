//! Domain logic for the StudyHub learning-materials catalog.
//!
//! This crate has no database dependency. Persistence is reached through the
//! [`store::CatalogStore`] trait; `studyhub_db` provides the PostgreSQL
//! implementation and [`memory`] provides an in-process one.

pub mod catalog;
pub mod error;
pub mod material;
pub mod memory;
pub mod roles;
pub mod store;
pub mod types;
pub mod user;

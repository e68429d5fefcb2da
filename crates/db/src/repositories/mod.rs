//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument and return raw `sqlx` errors.

pub mod counter_repo;
pub mod material_repo;
pub mod saved_material_repo;
pub mod user_repo;

pub use counter_repo::CounterRepo;
pub use material_repo::MaterialRepo;
pub use saved_material_repo::SavedMaterialRepo;
pub use user_repo::UserRepo;

/// Public material ids, counter values and user ids are PostgreSQL BIGINT.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Internal storage identity of a material. Never exposed to clients.
pub type MaterialKey = uuid::Uuid;

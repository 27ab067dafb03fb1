/// Every record is keyed by a positive 64-bit id assigned by the store.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

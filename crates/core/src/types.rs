/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Caller-supplied messaging-platform identifier used to scope stored keys.
pub type TelegramId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

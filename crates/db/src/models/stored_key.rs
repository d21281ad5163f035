//! Model for the `stored_keys` table.

use runlens_core::types::{DbId, TelegramId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `stored_keys` table: one tracking-service credential
/// owned by one Telegram user. The same `telegram_id` may own several
/// keys, but never the same key twice (`uq_stored_keys_owner_key`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredKey {
    pub id: DbId,
    pub telegram_id: TelegramId,
    pub api_key: String,
    pub username: String,
    pub created_at: Timestamp,
}

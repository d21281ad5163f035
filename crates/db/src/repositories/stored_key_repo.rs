//! Repository for the `stored_keys` table.

use runlens_core::types::TelegramId;
use sqlx::PgPool;

use crate::models::stored_key::StoredKey;

const STORED_KEY_COLUMNS: &str = "id, telegram_id, api_key, username, created_at";

/// CRUD operations for stored tracking-service credentials.
pub struct StoredKeyRepo;

impl StoredKeyRepo {
    /// List all keys stored for one Telegram identifier, oldest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        telegram_id: TelegramId,
    ) -> Result<Vec<StoredKey>, sqlx::Error> {
        let query = format!(
            "SELECT {STORED_KEY_COLUMNS} FROM stored_keys \
             WHERE telegram_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, StoredKey>(&query)
            .bind(telegram_id)
            .fetch_all(pool)
            .await
    }

    /// Check whether the exact `(telegram_id, api_key)` pair is stored.
    pub async fn exists(
        pool: &PgPool,
        telegram_id: TelegramId,
        api_key: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM stored_keys WHERE telegram_id = $1 AND api_key = $2)",
        )
        .bind(telegram_id)
        .bind(api_key)
        .fetch_one(pool)
        .await
    }

    /// Insert a credential. Returns `None` when the `(telegram_id, api_key)`
    /// pair already exists: the unique constraint absorbs the
    /// check-then-insert race between concurrent identical requests.
    pub async fn insert(
        pool: &PgPool,
        telegram_id: TelegramId,
        api_key: &str,
        username: &str,
    ) -> Result<Option<StoredKey>, sqlx::Error> {
        let query = format!(
            "INSERT INTO stored_keys (telegram_id, api_key, username) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_stored_keys_owner_key DO NOTHING \
             RETURNING {STORED_KEY_COLUMNS}"
        );
        sqlx::query_as::<_, StoredKey>(&query)
            .bind(telegram_id)
            .bind(api_key)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Delete the row matching both fields. Returns the deleted row's
    /// username, or `None` when nothing matched. Deletion is permanent.
    pub async fn delete(
        pool: &PgPool,
        telegram_id: TelegramId,
        api_key: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "DELETE FROM stored_keys WHERE telegram_id = $1 AND api_key = $2 \
             RETURNING username",
        )
        .bind(telegram_id)
        .bind(api_key)
        .fetch_optional(pool)
        .await
    }
}

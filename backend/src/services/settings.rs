//! Settings service: independent, versionless key-value JSON blobs
//!
//! Holds client preferences (currency, language, appearance, dashboard
//! visibility toggles) behind an explicit load/persist service instead of
//! ambient client-side state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use shared::validation::validate_setting_key;

use crate::error::{AppError, AppResult};

/// Settings service
#[derive(Clone)]
pub struct SettingsService {
    db: PgPool,
}

/// A stored setting blob
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Setting {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

impl SettingsService {
    /// Create a new SettingsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all settings
    pub async fn list(&self) -> AppResult<Vec<Setting>> {
        let settings = sqlx::query_as::<_, Setting>(
            "SELECT key, value, updated_at FROM settings ORDER BY key",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(settings)
    }

    /// Load one setting blob
    pub async fn get(&self, key: &str) -> AppResult<Setting> {
        let setting = sqlx::query_as::<_, Setting>(
            "SELECT key, value, updated_at FROM settings WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Setting".to_string()))?;

        Ok(setting)
    }

    /// Persist one setting blob, replacing any previous value
    pub async fn put(&self, key: &str, value: serde_json::Value) -> AppResult<Setting> {
        validate_setting_key(key).map_err(|msg| AppError::Validation {
            field: "key".to_string(),
            message: msg.to_string(),
        })?;

        let setting = sqlx::query_as::<_, Setting>(
            r#"
            INSERT INTO settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            RETURNING key, value, updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .fetch_one(&self.db)
        .await?;

        Ok(setting)
    }

    /// Remove a setting blob
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Setting".to_string()));
        }

        Ok(())
    }
}

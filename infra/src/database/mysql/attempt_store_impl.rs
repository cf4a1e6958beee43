//! MySQL implementation of the AttemptStore trait.
//!
//! Verification metadata lives in `account_meta` as one row per
//! `(account_id, meta_key)`. Count and list queries are a single statement
//! each, with the status predicate rendered into the WHERE clause.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use av_core::domain::entities::verification::parse_attempts;
use av_core::domain::{AccountId, StatusPredicate};
use av_core::errors::{DomainError, DomainResult};
use av_core::repositories::AttemptStore;

use crate::database::predicate_sql::{base_query, push_predicate};
use crate::InfrastructureError;

/// MySQL implementation of AttemptStore
pub struct MySqlAttemptStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAttemptStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn store_error(operation: &str, err: sqlx::Error) -> DomainError {
        tracing::error!(operation = operation, error = %err, "Attempt store query failed");
        InfrastructureError::Database(err).into()
    }
}

#[async_trait]
impl AttemptStore for MySqlAttemptStore {
    async fn account_exists(&self, id: AccountId) -> DomainResult<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS found FROM accounts WHERE id = ?")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::store_error("account_exists", e))?;

        let found: i64 = row
            .try_get("found")
            .map_err(|e| Self::store_error("account_exists", e))?;
        Ok(found > 0)
    }

    async fn get_field(&self, id: AccountId, key: &str) -> DomainResult<Option<String>> {
        let row = sqlx::query(
            "SELECT meta_value FROM account_meta WHERE account_id = ? AND meta_key = ?",
        )
        .bind(id.value())
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::store_error("get_field", e))?;

        row.map(|r| r.try_get::<String, _>("meta_value"))
            .transpose()
            .map_err(|e| Self::store_error("get_field", e))
    }

    async fn set_field(&self, id: AccountId, key: &str, value: &str) -> DomainResult<()> {
        let query = r#"
            INSERT INTO account_meta (account_id, meta_key, meta_value)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE meta_value = VALUES(meta_value)
        "#;

        sqlx::query(query)
            .bind(id.value())
            .bind(key)
            .bind(value)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::store_error("set_field", e))?;

        tracing::debug!(account_id = %id, key = key, "Metadata entry written");
        Ok(())
    }

    async fn increment_field(&self, id: AccountId, key: &str) -> DomainResult<u32> {
        // The upsert holds the row lock until commit, so the read sees our own increment
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| Self::store_error("increment_field", e))?;

        let upsert = r#"
            INSERT INTO account_meta (account_id, meta_key, meta_value)
            VALUES (?, ?, '1')
            ON DUPLICATE KEY UPDATE meta_value = CAST(
                LEAST(
                    IF(TRIM(meta_value) <> '' AND TRIM(meta_value) NOT REGEXP '[^0-9]',
                       CAST(TRIM(meta_value) AS UNSIGNED), 0),
                    4294967294
                ) + 1
                AS CHAR)
        "#;

        sqlx::query(upsert)
            .bind(id.value())
            .bind(key)
            .execute(&mut *tx)
            .await
            .map_err(|e| Self::store_error("increment_field", e))?;

        let row = sqlx::query(
            "SELECT meta_value FROM account_meta WHERE account_id = ? AND meta_key = ?",
        )
        .bind(id.value())
        .bind(key)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| Self::store_error("increment_field", e))?;

        tx.commit()
            .await
            .map_err(|e| Self::store_error("increment_field", e))?;

        let value: String = row
            .try_get("meta_value")
            .map_err(|e| Self::store_error("increment_field", e))?;
        Ok(parse_attempts(&value))
    }

    async fn count_accounts(&self, predicate: &StatusPredicate) -> DomainResult<u64> {
        let mut builder = base_query("SELECT COUNT(DISTINCT a.id) AS total");
        push_predicate(&mut builder, predicate);

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::store_error("count_accounts", e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| Self::store_error("count_accounts", e))?;
        Ok(total.max(0) as u64)
    }

    async fn list_accounts(
        &self,
        predicate: &StatusPredicate,
        limit: u32,
        offset: u64,
    ) -> DomainResult<Vec<AccountId>> {
        let mut builder = base_query("SELECT a.id AS id");
        push_predicate(&mut builder, predicate);
        builder
            .push(" ORDER BY a.id LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::store_error("list_accounts", e))?;

        rows.iter()
            .map(|row| {
                row.try_get::<u64, _>("id")
                    .map(AccountId::new)
                    .map_err(|e| Self::store_error("list_accounts", e))
            })
            .collect()
    }
}

//! # Discount Code Repository
//!
//! Database operations for discount codes.
//!
//! Codes are unique case-insensitively (`COLLATE NOCASE`), so `Welcome10`
//! and `WELCOME10` cannot both exist. The usage counter only moves through
//! [`DiscountCodeRepository::increment_usage`]; edits never touch it.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use brew_core::DiscountCode;

/// Repository for discount code database operations.
#[derive(Debug, Clone)]
pub struct DiscountCodeRepository {
    pool: SqlitePool,
}

impl DiscountCodeRepository {
    /// Creates a new DiscountCodeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountCodeRepository { pool }
    }

    /// Loads every code, active or not, ordered by id.
    pub async fn list(&self) -> DbResult<Vec<DiscountCode>> {
        let codes = sqlx::query_as::<_, DiscountCode>(
            r#"
            SELECT id, code, discount_bps, usage_count, active
            FROM discount_codes
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = codes.len(), "Loaded discount codes");
        Ok(codes)
    }

    /// Inserts a new code and returns it with its store-assigned id.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    pub async fn insert(&self, code: &DiscountCode) -> DbResult<DiscountCode> {
        debug!(code = %code.code, bps = code.discount_bps, "Inserting discount code");

        let result = sqlx::query(
            r#"
            INSERT INTO discount_codes (code, discount_bps, usage_count, active)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&code.code)
        .bind(code.discount_bps)
        .bind(code.usage_count)
        .bind(code.active)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, code.code.clone()),
            other => other,
        })?;

        let mut saved = code.clone();
        saved.id = result.last_insert_rowid();
        Ok(saved)
    }

    /// Updates code text, rate and active flag. The usage counter is kept.
    pub async fn update(&self, code: &DiscountCode) -> DbResult<()> {
        debug!(id = code.id, "Updating discount code");

        let result = sqlx::query(
            r#"
            UPDATE discount_codes SET
                code = ?2,
                discount_bps = ?3,
                active = ?4
            WHERE id = ?1
            "#,
        )
        .bind(code.id)
        .bind(&code.code)
        .bind(code.discount_bps)
        .bind(code.active)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("DiscountCode", code.id));
        }

        Ok(())
    }

    /// Adds one to the usage counter.
    pub async fn increment_usage(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Incrementing discount usage");

        let result =
            sqlx::query("UPDATE discount_codes SET usage_count = usage_count + 1 WHERE id = ?1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("DiscountCode", id));
        }

        Ok(())
    }

    /// Deletes a code.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting discount code");

        let result = sqlx::query("DELETE FROM discount_codes WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("DiscountCode", id));
        }

        Ok(())
    }

    /// Counts codes (for the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM discount_codes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, DbError};
    use brew_core::{DiscountCode, DiscountRate};

    #[tokio::test]
    async fn test_insert_list_and_increment() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.discount_codes();

        let code = repo
            .insert(&DiscountCode::new("WELCOME10", DiscountRate::from_bps(1000)))
            .await
            .unwrap();
        repo.increment_usage(code.id).await.unwrap();
        repo.increment_usage(code.id).await.unwrap();

        let codes = repo.list().await.unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].code, "WELCOME10");
        assert_eq!(codes[0].discount_bps, 1000);
        assert_eq!(codes[0].usage_count, 2);
        assert!(codes[0].active);
    }

    #[tokio::test]
    async fn test_codes_are_unique_case_insensitively() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.discount_codes();

        repo.insert(&DiscountCode::new("Spring", DiscountRate::from_bps(500)))
            .await
            .unwrap();
        let err = repo
            .insert(&DiscountCode::new("SPRING", DiscountRate::from_bps(700)))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "SPRING"));
    }

    #[tokio::test]
    async fn test_update_keeps_usage_count() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.discount_codes();

        let mut code = repo
            .insert(&DiscountCode::new("LOYAL", DiscountRate::from_bps(1500)))
            .await
            .unwrap();
        repo.increment_usage(code.id).await.unwrap();

        code.active = false;
        code.discount_bps = 2000;
        code.usage_count = 0;
        repo.update(&code).await.unwrap();

        let stored = &repo.list().await.unwrap()[0];
        assert!(!stored.active);
        assert_eq!(stored.discount_bps, 2000);
        assert_eq!(stored.usage_count, 1);

        repo.delete(code.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}

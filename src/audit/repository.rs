//! Audit log repository for database operations.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::instrument;

use super::models::AuditLogEntry;

/// Repository for audit log database operations.
///
/// Append-only: no update or delete operation exists.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: SqlitePool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new entry, timestamped at insert time.
    #[instrument(skip(self, details))]
    pub async fn insert(
        &self,
        user_id: &str,
        action: &str,
        details: Option<&str>,
    ) -> Result<AuditLogEntry> {
        let entry = sqlx::query_as::<_, AuditLogEntry>(
            r#"
            INSERT INTO audit_logs (user_id, action, timestamp, details)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_id, action, timestamp, details
            "#,
        )
        .bind(user_id)
        .bind(action)
        .bind(Utc::now())
        .bind(details)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert audit entry")?;

        Ok(entry)
    }

    /// List all entries, newest first. Ties break by id ascending as a
    /// stable secondary key.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<AuditLogEntry>> {
        let entries = sqlx::query_as::<_, AuditLogEntry>(
            r#"
            SELECT id, user_id, action, timestamp, details
            FROM audit_logs
            ORDER BY timestamp DESC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch audit entries")?;

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use std::time::Duration;

    async fn repo() -> AuditLogRepository {
        let db = Database::in_memory().await.unwrap();
        AuditLogRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let repo = repo().await;

        let entry = repo
            .insert("uid-1", "VIEW", Some("Viewed test data"))
            .await
            .unwrap();

        assert!(entry.id > 0);
        assert_eq!(entry.user_id, "uid-1");
        assert_eq!(entry.action, "VIEW");
        assert_eq!(entry.details.as_deref(), Some("Viewed test data"));
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let repo = repo().await;

        for action in ["FIRST", "SECOND", "THIRD"] {
            repo.insert("uid-1", action, None).await.unwrap();
            // Distinct timestamps so ordering is by time, not id.
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let entries = repo.list().await.unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].action, "THIRD");
        assert_eq!(entries[1].action, "SECOND");
        assert_eq!(entries[2].action, "FIRST");
        assert!(entries[0].timestamp >= entries[1].timestamp);
        assert!(entries[1].timestamp >= entries[2].timestamp);
    }
}

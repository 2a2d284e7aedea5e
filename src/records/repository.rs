//! Test record repository for database operations.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use super::models::{CreateTestRecord, TestRecord};

/// Repository for test record database operations.
#[derive(Debug, Clone)]
pub struct TestRecordRepository {
    pool: SqlitePool,
}

impl TestRecordRepository {
    /// Create a new test record repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new record and return it with its assigned id.
    #[instrument(skip(self, request), fields(test_name = %request.test_name))]
    pub async fn insert(&self, request: CreateTestRecord) -> Result<TestRecord> {
        let timestamp = request.timestamp.unwrap_or_else(Utc::now);

        let record = sqlx::query_as::<_, TestRecord>(
            r#"
            INSERT INTO test_data (test_name, timestamp, temperature, speed, altitude, passed)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, test_name, timestamp, temperature, speed, altitude, passed
            "#,
        )
        .bind(&request.test_name)
        .bind(timestamp)
        .bind(request.temperature)
        .bind(request.speed)
        .bind(request.altitude)
        .bind(request.passed)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert test record")?;

        debug!(id = record.id, "test record inserted");
        Ok(record)
    }

    /// List all records, unspecified order.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<TestRecord>> {
        let records = sqlx::query_as::<_, TestRecord>(
            r#"
            SELECT id, test_name, timestamp, temperature, speed, altitude, passed
            FROM test_data
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch test records")?;

        Ok(records)
    }

    /// Get a record by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<TestRecord>> {
        let record = sqlx::query_as::<_, TestRecord>(
            r#"
            SELECT id, test_name, timestamp, temperature, speed, altitude, passed
            FROM test_data
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch test record")?;

        Ok(record)
    }

    /// Delete a record by id. Returns false when no row matched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM test_data WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete test record")?;

        Ok(result.rows_affected() > 0)
    }

    /// The `limit` most recently timestamped records, newest first.
    #[instrument(skip(self))]
    pub async fn latest(&self, limit: i64) -> Result<Vec<TestRecord>> {
        let records = sqlx::query_as::<_, TestRecord>(
            r#"
            SELECT id, test_name, timestamp, temperature, speed, altitude, passed
            FROM test_data
            ORDER BY timestamp DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch latest test records")?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn request(name: &str) -> CreateTestRecord {
        CreateTestRecord {
            test_name: name.to_string(),
            timestamp: None,
            temperature: 20.5,
            speed: 100.0,
            altitude: 500.0,
            passed: true,
        }
    }

    async fn repo() -> TestRecordRepository {
        let db = Database::in_memory().await.unwrap();
        TestRecordRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn test_insert_assigns_unique_ids() {
        let repo = repo().await;

        let a = repo.insert(request("T1")).await.unwrap();
        let b = repo.insert(request("T2")).await.unwrap();
        let c = repo.insert(request("T3")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_insert_honors_provided_timestamp() {
        let repo = repo().await;

        let ts = "2026-01-15T08:30:00Z".parse().unwrap();
        let record = repo
            .insert(CreateTestRecord {
                timestamp: Some(ts),
                ..request("T1")
            })
            .await
            .unwrap();

        assert_eq!(record.timestamp, ts);
        let fetched = repo.get(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.timestamp, ts);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_distinct() {
        let repo = repo().await;
        let record = repo.insert(request("T1")).await.unwrap();

        assert!(!repo.delete(record.id + 100).await.unwrap());
        assert_eq!(repo.list_all().await.unwrap().len(), 1);

        assert!(repo.delete(record.id).await.unwrap());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_latest_orders_newest_first() {
        let repo = repo().await;

        for (name, ts) in [
            ("old", "2026-01-01T00:00:00Z"),
            ("newest", "2026-03-01T00:00:00Z"),
            ("middle", "2026-02-01T00:00:00Z"),
        ] {
            repo.insert(CreateTestRecord {
                timestamp: Some(ts.parse().unwrap()),
                ..request(name)
            })
            .await
            .unwrap();
        }

        let latest = repo.latest(2).await.unwrap();
        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].test_name, "newest");
        assert_eq!(latest[1].test_name, "middle");
    }
}

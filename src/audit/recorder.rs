//! Audit recorder for privileged and notable actions.

use tracing::warn;

use super::repository::AuditLogRepository;

/// Writes one audit entry per recorded action.
///
/// The write happens synchronously before the handler returns, but a
/// failed audit write is logged and never masks the parent result. The
/// business write and the audit write are independent commits
/// (best-effort auditing).
#[derive(Debug, Clone)]
pub struct AuditRecorder {
    repo: AuditLogRepository,
}

impl AuditRecorder {
    /// Create a new recorder over the audit log repository.
    pub fn new(repo: AuditLogRepository) -> Self {
        Self { repo }
    }

    /// Record an action performed by `user_id`.
    pub async fn record(&self, user_id: &str, action: &str, details: Option<&str>) {
        if let Err(err) = self.repo.insert(user_id, action, details).await {
            warn!(
                error = %err,
                user_id,
                action,
                "failed to write audit entry"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn test_record_writes_entry() {
        let db = Database::in_memory().await.unwrap();
        let repo = AuditLogRepository::new(db.pool().clone());
        let recorder = AuditRecorder::new(repo.clone());

        recorder
            .record("uid-1", "DELETE", Some("Deleted test data ID 7"))
            .await;

        let entries = repo.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "DELETE");
    }
}

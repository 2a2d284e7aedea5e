//! Audit log data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An append-only record of who performed what action and when.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    pub id: i64,
    /// The acting principal's stable id from the identity provider.
    pub user_id: String,
    /// Short verb tag such as "VIEW" or "DELETE".
    pub action: String,
    /// Server-assigned at insert.
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}

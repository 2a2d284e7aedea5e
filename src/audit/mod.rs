//! Append-only audit logging.

mod models;
mod recorder;
mod repository;

pub use models::AuditLogEntry;
pub use recorder::AuditRecorder;
pub use repository::AuditLogRepository;

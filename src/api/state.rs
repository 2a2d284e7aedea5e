//! Shared application state.

use std::sync::Arc;

use crate::audit::{AuditLogRepository, AuditRecorder};
use crate::auth::AuthState;
use crate::db::Database;
use crate::records::TestRecordRepository;
use crate::render::ReportRenderer;
use crate::storage::ReportStore;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<TestRecordRepository>,
    pub audit_logs: Arc<AuditLogRepository>,
    pub audit: Arc<AuditRecorder>,
    pub auth: AuthState,
    pub renderer: Arc<dyn ReportRenderer>,
    pub reports: Arc<dyn ReportStore>,
}

impl AppState {
    pub fn new(
        db: &Database,
        auth: AuthState,
        renderer: Arc<dyn ReportRenderer>,
        reports: Arc<dyn ReportStore>,
    ) -> Self {
        let audit_logs = AuditLogRepository::new(db.pool().clone());

        Self {
            records: Arc::new(TestRecordRepository::new(db.pool().clone())),
            audit_logs: Arc::new(audit_logs.clone()),
            audit: Arc::new(AuditRecorder::new(audit_logs)),
            auth,
            renderer,
            reports,
        }
    }
}

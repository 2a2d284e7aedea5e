//! Shared helpers for integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::Router;

use aerotest_backend::api::{AppState, create_router};
use aerotest_backend::auth::{AuthState, ServiceAccount};
use aerotest_backend::db::Database;
use aerotest_backend::records::TestRecordRepository;
use aerotest_backend::render::PdfRenderer;
use aerotest_backend::storage::ReportStore;

/// In-memory stand-in for the S3 report store.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryReportStore {
    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<()> {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String> {
        Ok(format!(
            "https://reports.test.invalid/{key}?expires={}",
            expires_in.as_secs()
        ))
    }
}

pub fn test_auth_state() -> AuthState {
    AuthState::new(ServiceAccount {
        project_id: "aerotest-test".to_string(),
        secret: "test-secret-for-integration-tests-minimum-32-chars".to_string(),
    })
}

/// A fully wired application over an in-memory database.
pub struct TestApp {
    pub router: Router,
    pub auth: AuthState,
    pub records: Arc<TestRecordRepository>,
    pub store: Arc<MemoryReportStore>,
}

pub async fn spawn_app() -> TestApp {
    let db = Database::in_memory().await.expect("in-memory database");
    let auth = test_auth_state();
    let store = Arc::new(MemoryReportStore::default());

    let state = AppState::new(&db, auth.clone(), Arc::new(PdfRenderer), store.clone());
    let records = state.records.clone();
    let router = create_router(state);

    TestApp {
        router,
        auth,
        records,
        store,
    }
}

impl TestApp {
    pub fn admin_token(&self) -> String {
        self.auth
            .mint_token("admin-1", Some("admin"), 3600)
            .expect("mint admin token")
    }

    pub fn user_token(&self) -> String {
        self.auth
            .mint_token("user-1", Some("engineer"), 3600)
            .expect("mint user token")
    }
}

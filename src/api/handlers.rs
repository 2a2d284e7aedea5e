//! HTTP request handlers.

use std::time::Duration;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{info, instrument};

use super::error::{ApiError, ApiResult};
use super::state::AppState;
use crate::auth::{CurrentUser, RequireAdmin};
use crate::records::{CreateTestRecord, ReportRequest, TestRecord};

/// How long report download links stay valid.
const REPORT_URL_TTL: Duration = Duration::from_secs(3600);

/// `GET /` liveness probe.
pub async fn home() -> Json<serde_json::Value> {
    Json(json!({ "message": "Aerospace Testing API is running!" }))
}

/// `POST /test-data/` persists one test record.
#[instrument(skip(state, payload), fields(user_id = %user.id()))]
pub async fn create_test_record(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CreateTestRecord>,
) -> ApiResult<Json<TestRecord>> {
    let record = state.records.insert(payload).await?;
    info!(id = record.id, "test record created");
    Ok(Json(record))
}

/// `GET /test-data/` lists all records.
///
/// Every authenticated read is audited before the data is fetched.
#[instrument(skip(state), fields(user_id = %user.id()))]
pub async fn list_test_records(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<TestRecord>>> {
    state
        .audit
        .record(user.id(), "VIEW", Some("Viewed test data"))
        .await;

    let records = state.records.list_all().await?;
    Ok(Json(records))
}

/// `DELETE /test-data/{id}` removes one record. Admin only.
#[instrument(skip(state), fields(user_id = %admin.0.id()))]
pub async fn delete_test_record(
    State(state): State<AppState>,
    admin: RequireAdmin,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    if state.records.get(id).await?.is_none() {
        return Err(ApiError::not_found("Test data not found"));
    }

    state
        .audit
        .record(
            admin.0.id(),
            "DELETE",
            Some(&format!("Deleted test data ID {id}")),
        )
        .await;

    state.records.delete(id).await?;
    info!(id, "test record deleted");

    Ok(Json(json!({ "message": "Test data deleted successfully" })))
}

/// `GET /test-data/report` renders every record into a PDF download.
#[instrument(skip(state))]
pub async fn test_report(State(state): State<AppState>) -> ApiResult<Response> {
    let records = state.records.list_all().await?;
    if records.is_empty() {
        return Err(ApiError::not_found("No test data available"));
    }

    let pdf = state.renderer.render_summary(&records)?;

    Ok((
        [
            (CONTENT_TYPE, "application/pdf"),
            (CONTENT_DISPOSITION, "attachment; filename=test_report.pdf"),
        ],
        pdf,
    )
        .into_response())
}

/// `GET /logs/` returns the audit trail, newest first. Admin only.
#[instrument(skip(state), fields(user_id = %admin.0.id()))]
pub async fn list_audit_logs(
    State(state): State<AppState>,
    admin: RequireAdmin,
) -> ApiResult<Json<Vec<crate::audit::AuditLogEntry>>> {
    let entries = state.audit_logs.list().await?;
    Ok(Json(entries))
}

/// `POST /reports/` renders a one-off report, uploads it, and returns a
/// time-limited download URL.
#[instrument(skip(state, payload), fields(test_name = %payload.test_name))]
pub async fn generate_report(
    State(state): State<AppState>,
    Json(payload): Json<ReportRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let pdf = state.renderer.render_single(&payload)?;
    let key = format!("reports/{}.pdf", payload.test_name);

    state
        .reports
        .put(&key, pdf)
        .await
        .map_err(|e| ApiError::upstream(format!("S3 upload failed: {e}")))?;

    let url = state
        .reports
        .presign_get(&key, REPORT_URL_TTL)
        .await
        .map_err(|e| ApiError::upstream(format!("S3 upload failed: {e}")))?;

    info!(%key, "report uploaded");

    Ok(Json(json!({
        "message": "Report generated successfully",
        "url": url,
    })))
}

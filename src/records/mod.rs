//! Test record persistence.

mod models;
mod repository;

pub use models::{CreateTestRecord, ReportRequest, TestRecord};
pub use repository::TestRecordRepository;

//! Aerospace Test Backend Library
//!
//! This library provides the core components for the aerospace test
//! results backend: typed persistence for test records and audit logs,
//! bearer-token authentication, report rendering/storage collaborators,
//! and the HTTP/WebSocket API surface.

pub mod api;
pub mod audit;
pub mod auth;
pub mod db;
pub mod records;
pub mod render;
pub mod storage;
pub mod ws;

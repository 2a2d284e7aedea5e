//! Verified token claims.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Role required for privileged operations.
pub const ADMIN_ROLE: &str = "admin";

/// Decoded, verified payload of an identity credential.
///
/// Fixed-shape rather than an untyped map so the role gate's contract is
/// statically checkable; claims beyond the known fields are preserved in
/// `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the stable user identifier from the identity provider.
    pub sub: String,

    /// Expiration time (as Unix timestamp).
    pub exp: i64,

    /// Issued at (as Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Role claim; absent when no role was ever assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// User's email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// User's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Remaining raw claims.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Claims {
    /// The acting principal's stable identifier.
    pub fn user_id(&self) -> &str {
        &self.sub
    }

    /// Exact, case-sensitive role comparison. A missing or empty role
    /// never matches.
    pub fn has_role(&self, required: &str) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| !role.is_empty() && role == required)
    }
}

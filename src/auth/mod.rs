//! Authentication module.
//!
//! Provides bearer-token verification against the identity provider's
//! signing credential and a role gate for privileged endpoints.

mod claims;
mod config;
mod error;
mod middleware;

pub use claims::{ADMIN_ROLE, Claims};
pub use config::ServiceAccount;
pub use error::AuthError;
pub use middleware::{AuthState, CurrentUser, RequireAdmin, auth_middleware, require_role};

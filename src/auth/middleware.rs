//! Token verification and authentication middleware.

use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

use super::claims::ADMIN_ROLE;
use super::{AuthError, Claims, ServiceAccount};

/// Extract a Bearer token from an Authorization header value.
fn bearer_token_from_header(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split_whitespace();
    let scheme = parts.next().ok_or(AuthError::InvalidAuthHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidAuthHeader);
    }

    let token = parts.next().ok_or(AuthError::InvalidAuthHeader)?;
    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    if parts.next().is_some() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}

struct AuthInner {
    project_id: String,
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

/// Identity verifier shared across handlers.
///
/// Holds the decoding key derived from the service-account credential
/// loaded at startup. There is exactly one construction path.
#[derive(Clone)]
pub struct AuthState {
    inner: Arc<AuthInner>,
}

impl AuthState {
    /// Create new auth state from a loaded service account.
    pub fn new(account: ServiceAccount) -> Self {
        Self {
            inner: Arc::new(AuthInner {
                project_id: account.project_id,
                decoding_key: DecodingKey::from_secret(account.secret.as_bytes()),
                encoding_key: EncodingKey::from_secret(account.secret.as_bytes()),
            }),
        }
    }

    /// Identity project this verifier is bound to.
    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    /// Validate a bearer token and extract its claims.
    ///
    /// Any validation failure (malformed, bad signature, expired) maps
    /// to an error; partial claims are never returned.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear(); // Allow missing iss/aud

        let token_data =
            decode::<Claims>(token, &self.inner.decoding_key, &validation).map_err(|e| {
                warn!("token validation failed: {:?}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }

    /// Mint a token for a principal.
    ///
    /// Used by tests and role-assignment tooling; production tokens come
    /// from the identity provider and are only ever verified here.
    pub fn mint_token(
        &self,
        user_id: &str,
        role: Option<&str>,
        ttl_secs: i64,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + ttl_secs,
            iat: Some(now),
            role: role.map(String::from),
            email: None,
            name: None,
            extra: BTreeMap::new(),
        };

        encode(&Header::default(), &claims, &self.inner.encoding_key)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}

/// Role gate: allow only claims whose role exactly matches `required`.
///
/// Fails closed on a missing, empty, or mismatched role. Callers must
/// verify the credential first so that an absent credential surfaces as
/// unauthorized, never forbidden.
pub fn require_role(required: &str, claims: &Claims) -> Result<(), AuthError> {
    if claims.has_role(required) {
        Ok(())
    } else {
        Err(AuthError::InsufficientPermissions(format!(
            "{required} role required"
        )))
    }
}

/// Authenticated principal extracted from the request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Verified claims.
    pub claims: Claims,
}

impl CurrentUser {
    /// Get the user ID.
    pub fn id(&self) -> &str {
        self.claims.user_id()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingAuthHeader)
    }
}

/// Require admin role.
///
/// Use as an extractor in handlers that require admin access.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AuthError::MissingAuthHeader)?;

        require_role(ADMIN_ROLE, &user.claims)?;

        Ok(RequireAdmin(user))
    }
}

/// Authentication middleware.
///
/// Validates the `Authorization: Bearer <token>` header and injects
/// `CurrentUser` into request extensions.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = bearer_token_from_header(header)?;
    let claims = auth.verify(token)?;

    req.extensions_mut().insert(CurrentUser { claims });

    Ok(next.run(req).await)
}

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use super::helpers::{extract_token_from_header, resolve_now};
use crate::error::Error;
use crate::server::AppState;
use crate::server::response::ApiError;
use crate::types::Permission;

/// Extractor that requires any valid, unrevoked token
pub struct RequireAuth(pub Permission);

/// Extractor that requires a power_user token
pub struct RequirePowerUser(pub Permission);

#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingAuth,
    InvalidScheme,
    InvalidToken,
    NotPowerUser,
    InternalError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingAuth => (StatusCode::UNAUTHORIZED, "Authentication required"),
            AuthError::InvalidScheme => (StatusCode::UNAUTHORIZED, "Invalid authorization scheme"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::NotPowerUser => (StatusCode::FORBIDDEN, "Power user token required"),
            AuthError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        ApiError {
            status,
            message: message.to_string(),
        }
        .into_response()
    }
}

impl FromRequestParts<Arc<AppState>> for RequireAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let permission = extract_and_resolve(parts, state)?;
        Ok(RequireAuth(permission))
    }
}

impl FromRequestParts<Arc<AppState>> for RequirePowerUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let permission = extract_and_resolve(parts, state)?;

        if !permission.is_power_user() {
            return Err(AuthError::NotPowerUser);
        }

        Ok(RequirePowerUser(permission))
    }
}

fn extract_and_resolve(parts: &Parts, state: &Arc<AppState>) -> Result<Permission, AuthError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let raw_token = extract_token_from_header(auth_header)?.ok_or(AuthError::MissingAuth)?;

    resolve_now(state.store.as_ref(), raw_token).map_err(|e| match e {
        Error::Unauthenticated(reason) => {
            tracing::warn!("Rejected token for {} {}: {reason}", parts.method, parts.uri.path());
            AuthError::InvalidToken
        }
        other => {
            tracing::error!("Token lookup failed: {other}");
            AuthError::InternalError
        }
    })
}

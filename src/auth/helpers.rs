use chrono::{NaiveDate, Utc};

use super::{AuthError, check_token_syntax};
use crate::error::{AuthFailure, Result};
use crate::store::Store;
use crate::types::{Permission, Role};

/// Resolves a raw bearer token to the permission it grants on `today`.
///
/// Syntax is checked first, then the token is read in a single query together
/// with its pipeline scope. A token revoked on or before `today` is refused.
/// The token record is never modified.
pub fn token_to_permission(store: &dyn Store, raw_token: &str, today: NaiveDate) -> Result<Permission> {
    check_token_syntax(raw_token)?;

    let token = store.get_token(raw_token)?.ok_or(AuthFailure::Unknown)?;

    if let Some(revoked) = token.revoked_as_of(today) {
        return Err(AuthFailure::Revoked(revoked).into());
    }

    let permission = match token.role {
        Role::PowerUser => Permission::power_user(token.id),
        Role::RegularUser => Permission::regular_user(token.id, token.pipeline),
    };

    Ok(permission)
}

/// [`token_to_permission`] against the current UTC date.
pub fn resolve_now(store: &dyn Store, raw_token: &str) -> Result<Permission> {
    token_to_permission(store, raw_token, Utc::now().date_naive())
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
/// The scheme is matched case-insensitively.
/// Returns None if no header is present, Err for any other scheme.
pub fn extract_token_from_header(
    auth_header: Option<&str>,
) -> std::result::Result<Option<&str>, AuthError> {
    let Some(header) = auth_header else {
        return Ok(None);
    };

    match header.trim_start().split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => Ok(Some(token.trim())),
        _ => Err(AuthError::InvalidScheme),
    }
}

use crate::error::AuthFailure;

/// Issued tokens are the simple hex form of a UUID.
pub const TOKEN_LENGTH: usize = 32;

/// Generates a new token: 32 lower-case hex characters from a random v4 UUID.
#[must_use]
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Checks the lexical shape of a token without touching the store.
/// Both upper and lower case hex digits are accepted.
pub fn check_token_syntax(token: &str) -> Result<(), AuthFailure> {
    if token.is_empty() {
        return Err(AuthFailure::Empty);
    }

    // Byte length: any multi-byte char fails the hex check below anyway.
    if token.len() != TOKEN_LENGTH {
        return Err(AuthFailure::WrongLength(token.len()));
    }

    if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AuthFailure::NotHex);
    }

    Ok(())
}

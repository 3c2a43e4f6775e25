mod helpers;
mod middleware;
mod token;

pub use helpers::{extract_token_from_header, resolve_now, token_to_permission};
pub use middleware::{AuthError, RequireAuth, RequirePowerUser};
pub use token::{TOKEN_LENGTH, check_token_syntax, generate_token};

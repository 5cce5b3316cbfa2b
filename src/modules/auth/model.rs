//! Authentication payloads and token claims.

pub use enrollment_auth::Claims;
pub use enrollment_models::auth::*;

//! Middleware modules for request processing.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` extractor validates the JWT and extracts claims
//! 3. Handlers turn the claims into a `Caller` and the services check the
//!    caller's role against the operation
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn list_courses(auth_user: AuthUser) -> Result<impl IntoResponse, AppError> {
//!     let caller = auth_user.caller()?;
//!     // ...
//! }
//! ```

pub mod auth;

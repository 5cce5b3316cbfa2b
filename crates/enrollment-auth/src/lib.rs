//! # Enrollment Auth
//!
//! Access token claims and the JWT helpers that issue and verify them.
//!
//! - [`claims`]: The claim set carried by access tokens
//! - [`jwt`]: Token creation and verification
//!
//! ```ignore
//! use enrollment_auth::{create_access_token, verify_token};
//!
//! let token = create_access_token(user_id, Role::Admin, &jwt_config)?;
//! let claims = verify_token(&token, &jwt_config)?;
//! assert_eq!(claims.role, Role::Admin);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};

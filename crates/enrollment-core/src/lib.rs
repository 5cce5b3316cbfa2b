//! # Enrollment Core
//!
//! Foundational types shared by every crate in the Enrollment API workspace:
//!
//! - [`errors`]: Application error kinds with HTTP response conversion
//! - [`roles`]: The closed set of user roles
//! - [`permissions`]: The access-control decision table
//! - [`password`]: The credential hashing capability and its bcrypt implementation
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use enrollment_core::{AccessControl, AppError, Operation, Role};
//!
//! AccessControl::authorize(Role::Student, Operation::CreateStudent)?; // Err(Forbidden)
//! ```

pub mod errors;
pub mod password;
pub mod permissions;
pub mod roles;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind};
pub use password::{BcryptHasher, CredentialHasher};
pub use permissions::{AccessControl, Decision, Operation};
pub use roles::{Role, UnknownRole};

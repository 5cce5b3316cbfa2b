//! User data models.
//!
//! Re-exports user models from the `enrollment-models` crate.

pub use enrollment_models::users::*;

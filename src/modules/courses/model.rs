//! Course data models.
//!
//! Re-exports course models from the `enrollment-models` crate.

pub use enrollment_models::courses::*;

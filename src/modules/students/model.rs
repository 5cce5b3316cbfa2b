//! Student data models and DTOs.
//!
//! This module re-exports student models from the `enrollment-models` crate.

pub use enrollment_models::students::*;

//! Utility functions for code generation, URL validation, and store errors.
//!
//! - [`code_generator`] - Short code strategies and slug validation
//! - [`url_validator`] - Absolute URL syntax checks
//! - [`db_error`] - sqlx error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;

//! Sensor Reading Validation
//!
//! Range checking for raw machine sensor readings before they reach the model.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};

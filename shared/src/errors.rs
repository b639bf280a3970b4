//! Shared error types for the demo site

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid locator: {input:?}")]
    InvalidLocator { input: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },
}

impl SharedError {
    pub fn invalid_config(field: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            value: value.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;

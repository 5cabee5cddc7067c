//! Error type shared by the series generator, the search engine and the helpers around them.

use thiserror::Error;

use crate::series::Series;

/// Result type alias using [`DividerError`].
pub type Result<T> = std::result::Result<T, DividerError>;

/// All the ways a calculation can be rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DividerError {
    /// An input violates a precondition. Raised before any enumeration starts.
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter {
        param: &'static str,
        message: String,
    },

    /// No value of the series falls inside the requested range.
    #[error("No {series} values between {min} and {max} ohms")]
    EmptyRange { series: Series, min: f64, max: f64 },

    /// A textual bound could not be parsed or refers to an unknown variable.
    #[error("Invalid bound '{bound}': {message}")]
    InvalidBound { bound: String, message: String },

    /// A resistance or other quantity could not be read from text.
    #[error("Cannot read a value from '{input}'")]
    InvalidValue { input: String },
}

impl DividerError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param,
            message: message.into(),
        }
    }

    /// Create an invalid bound error
    pub fn invalid_bound(bound: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidBound {
            bound: bound.into(),
            message: message.into(),
        }
    }
}

//! Error types for tool lookup and execution.

use thiserror::Error;

use crate::params::ParameterValidationError;

/// Result type for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;

/// Error type for tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool with this name is registered.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A tool with this name is already registered.
    #[error("Duplicate tool name: {0}")]
    DuplicateName(String),

    /// Arguments could not be extracted.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterValidationError),

    /// The underlying API call failed.
    #[error(transparent)]
    Client(#[from] conveyor_client::Error),
}

impl ToolError {
    /// Whether the caller can fix the failure by changing the arguments.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ToolError::InvalidParameters(_) => true,
            ToolError::Client(err) => matches!(err.status(), Some(400..=499)),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conveyor_client::ApiError;

    #[test]
    fn test_recoverable() {
        let err = ToolError::from(ParameterValidationError::missing("teamId", "provide a team"));
        assert!(err.is_recoverable());

        let err = ToolError::from(conveyor_client::Error::from(ApiError::new(422, "bad")));
        assert!(err.is_recoverable());

        let err = ToolError::from(conveyor_client::Error::from(ApiError::new(503, "down")));
        assert!(!err.is_recoverable());

        assert!(!ToolError::NotFound("x".into()).is_recoverable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ToolError::NotFound("nope".into()).to_string(),
            "Tool not found: nope"
        );
        let err = conveyor_client::Error::from(ApiError::new(404, "Not found"));
        assert_eq!(
            ToolError::from(err).to_string(),
            "API error (404): Not found"
        );
    }
}

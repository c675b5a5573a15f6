//! Error handling module for dockerconf
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Resolution is all-or-nothing: any of these errors aborts the whole pass.
//! File loading happens at the binary boundary and reports through anyhow.

use thiserror::Error;

/// Main error type for dockerconf
#[derive(Error, Debug)]
pub enum DockerConfError {
    /// An enumerated parameter holds a value outside its allowed set
    #[error("Validation error: {0}")]
    Validation(String),

    /// No platform policy row matches the supplied facts
    #[error("Unsupported platform: osfamily '{family}', operatingsystem '{operatingsystem}'")]
    UnsupportedPlatform {
        family: String,
        operatingsystem: String,
    },

    /// The dependency edges cannot be ordered (cycle or dangling target)
    #[error("Ordering error: {0}")]
    Ordering(String),
}

/// Result type alias for dockerconf operations
pub type Result<T> = std::result::Result<T, DockerConfError>;

impl DockerConfError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an ordering error
    pub fn ordering(msg: impl Into<String>) -> Self {
        Self::Ordering(msg.into())
    }

    /// Create an unsupported-platform error from the identifying facts
    pub fn unsupported_platform(family: impl Into<String>, operatingsystem: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            family: family.into(),
            operatingsystem: operatingsystem.into(),
        }
    }

    /// Returns true for errors caused by parameter validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DockerConfError::validation("log_level must be one of debug, info, warn, error or fatal");
        assert_eq!(
            err.to_string(),
            "Validation error: log_level must be one of debug, info, warn, error or fatal"
        );

        let err = DockerConfError::unsupported_platform("Solaris", "Solaris");
        assert_eq!(
            err.to_string(),
            "Unsupported platform: osfamily 'Solaris', operatingsystem 'Solaris'"
        );
    }

    #[test]
    fn test_error_constructors() {
        assert!(DockerConfError::validation("bad").is_validation());
        assert!(!DockerConfError::ordering("cycle").is_validation());
        assert!(matches!(
            DockerConfError::ordering("cycle"),
            DockerConfError::Ordering(_)
        ));
    }
}

//! Error types for the desktop compositor

use dsh_resources::ResourceError;
use crate::app::AppId;
use crate::window::WindowId;

/// Errors that can occur in compositor operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DesktopError {
    /// Window with the given ID was not found
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),

    /// Window exists but is not part of the z-order list
    #[error("window {0} is not tracked by the compositor")]
    WindowNotTracked(WindowId),

    /// Application with the given ID was not found
    #[error("application not found: {0}")]
    ApplicationNotFound(AppId),

    /// An operation was attempted outside the valid lifecycle stage
    #[error("illegal state in '{op}': {reason}")]
    IllegalState {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },

    /// A required construction argument was missing or inconsistent
    #[error("internal fault: {0}")]
    Internal(String),

    /// JSON serialization or deserialization failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Shared resource bookkeeping failed
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl DesktopError {
    /// Shorthand for an illegal-state error
    #[inline]
    pub(crate) fn illegal(op: &'static str, reason: &'static str) -> Self {
        Self::IllegalState { op, reason }
    }

    /// Whether this error is a lifecycle/ownership violation
    pub fn is_illegal_state(&self) -> bool {
        match self {
            Self::IllegalState { .. } => true,
            Self::Resource(err) => err.is_illegal_state(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for DesktopError {
    fn from(e: serde_json::Error) -> Self {
        DesktopError::Serialization(e.to_string())
    }
}

/// Result type alias for desktop operations
pub type DesktopResult<T> = Result<T, DesktopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DesktopError::WindowNotFound(42);
        assert_eq!(err.to_string(), "window not found: 42");

        let err = DesktopError::illegal("init", "window already initialized");
        assert_eq!(err.to_string(), "illegal state in 'init': window already initialized");

        let err = DesktopError::Internal("window created without an application".to_string());
        assert_eq!(
            err.to_string(),
            "internal fault: window created without an application"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(DesktopError::WindowNotFound(1), DesktopError::WindowNotFound(1));
        assert_ne!(DesktopError::WindowNotFound(1), DesktopError::WindowNotTracked(1));
    }

    #[test]
    fn test_illegal_state_classification() {
        assert!(DesktopError::illegal("dispose", "not ready").is_illegal_state());
        assert!(!DesktopError::ApplicationNotFound(3).is_illegal_state());
    }
}

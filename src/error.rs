use std::fmt;

#[derive(Debug)]
pub enum GenError {
    ValidationError(String),
    AuthError(String),
    ConfigError(String),
    TransportError(String),
    ProviderRejection(String),
    StorageError(String),
    DatabaseError(String),
}

impl GenError {
    /// Stable caller-facing code, matching the callable-function error codes
    /// clients already switch on.
    pub fn code(&self) -> &'static str {
        match self {
            GenError::ValidationError(_) => "invalid-argument",
            GenError::AuthError(_) => "unauthenticated",
            GenError::ConfigError(_) => "failed-precondition",
            GenError::TransportError(_) => "unavailable",
            GenError::ProviderRejection(_) => "internal",
            GenError::StorageError(_) => "internal",
            GenError::DatabaseError(_) => "internal",
        }
    }

    /// Validation and auth failures abort before any side effect and are
    /// surfaced to the caller as structured errors; everything else is
    /// converted into a soft-failure response at the handler boundary.
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, GenError::ValidationError(_) | GenError::AuthError(_))
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            GenError::AuthError(msg) => write!(f, "Authentication error: {}", msg),
            GenError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            GenError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            GenError::ProviderRejection(msg) => write!(f, "Provider rejection: {}", msg),
            GenError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            GenError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for GenError {}

pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_facing_codes() {
        assert_eq!(
            GenError::ValidationError("x".into()).code(),
            "invalid-argument"
        );
        assert_eq!(GenError::AuthError("x".into()).code(), "unauthenticated");
        assert_eq!(
            GenError::ConfigError("x".into()).code(),
            "failed-precondition"
        );
        assert_eq!(GenError::TransportError("x".into()).code(), "unavailable");
        assert_eq!(GenError::ProviderRejection("x".into()).code(), "internal");
        assert_eq!(GenError::StorageError("x".into()).code(), "internal");
        assert_eq!(GenError::DatabaseError("x".into()).code(), "internal");
    }

    #[test]
    fn test_propagation_split() {
        assert!(GenError::ValidationError("no prompt".into()).is_caller_fault());
        assert!(GenError::AuthError("no uid".into()).is_caller_fault());
        assert!(!GenError::TransportError("timeout".into()).is_caller_fault());
        assert!(!GenError::StorageError("upload".into()).is_caller_fault());
    }
}

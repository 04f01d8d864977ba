//! Error types for the PostPilot application.

use thiserror::Error;

/// A shared error type for the entire PostPilot application.
///
/// Variants follow the failure taxonomy of the dashboard: authentication
/// rejections, network failures, parse failures of persisted or remote JSON,
/// and validation gaps, plus the usual infrastructure failures.
#[derive(Error, Debug, Clone)]
pub enum PostPilotError {
    /// The remote login endpoint rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Request rejected or endpoint unreachable
    #[error("Network error: {0}")]
    Network(String),

    /// Malformed persisted or remote payload
    #[error("Parse error: {format} - {message}")]
    Parse {
        format: String, // "JSON", "TOML", "webhook"
        message: String,
    },

    /// Input that does not satisfy a form or reference requirement
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PostPilotError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Parse error for the given format
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Check if this is a Network error
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a Parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Short, user-facing description used by the shell for alerts.
    ///
    /// Authentication and validation messages are shown as-is; everything
    /// else collapses to a generic failure so transport details stay in the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication(_) => "Invalid email or password.".to_string(),
            Self::Validation(message) => message.clone(),
            Self::NotFound { entity_type, id } => format!("No {} with id '{}'.", entity_type, id),
            Self::Config(message) => format!("Not configured: {}", message),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for PostPilotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for PostPilotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PostPilotError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for PostPilotError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Parse {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, PostPilotError>`.
pub type Result<T> = std::result::Result<T, PostPilotError>;

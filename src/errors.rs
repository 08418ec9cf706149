use thiserror::Error;

/// Failures reported by an external gateway (inference, retrieval, evaluation)
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("{service} rejected credentials: {message}")]
    Auth { service: String, message: String },

    #[error("{service} transient failure: {message}")]
    Transient { service: String, message: String },

    #[error("{service} call failed: {message}")]
    Failed { service: String, message: String },
}

impl GatewayError {
    pub fn auth(service: &str, message: impl Into<String>) -> Self {
        GatewayError::Auth { service: service.to_string(), message: message.into() }
    }

    pub fn transient(service: &str, message: impl Into<String>) -> Self {
        GatewayError::Transient { service: service.to_string(), message: message.into() }
    }

    pub fn failed(service: &str, message: impl Into<String>) -> Self {
        GatewayError::Failed { service: service.to_string(), message: message.into() }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, GatewayError::Auth { .. })
    }
}

/// Custom error types for the QAForge engine
#[derive(Debug, Error)]
pub enum QaError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Unrecognized category label: {label:?}")]
    Classification { label: String },

    #[error("No grounding document found for category '{category}'")]
    NoGrounding { category: String },

    #[error("Generation failed during {stage}: {message}")]
    Generation { stage: String, message: String },

    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    #[error("Run cancelled before {stage}")]
    Cancelled { stage: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl QaError {
    /// Map a gateway failure raised while generating text at `stage`.
    /// Credential rejections keep their identity; everything else is a generation failure.
    pub fn from_generation(stage: &str, err: GatewayError) -> Self {
        match err {
            GatewayError::Auth { .. } => QaError::Auth(err.to_string()),
            other =>
                QaError::Generation {
                    stage: stage.to_string(),
                    message: other.to_string(),
                },
        }
    }

    pub fn from_retrieval(err: GatewayError) -> Self {
        match err {
            GatewayError::Auth { .. } => QaError::Auth(err.to_string()),
            other => QaError::Retrieval(other.to_string()),
        }
    }

    pub fn from_evaluation(err: GatewayError) -> Self {
        match err {
            GatewayError::Auth { .. } => QaError::Auth(err.to_string()),
            other => QaError::Evaluation(other.to_string()),
        }
    }

    pub fn context(&self) -> ErrorContext {
        let (suggestion, severity) = match self {
            QaError::Auth(_) =>
                (Some("Check OPENAI_API_KEY / ANTHROPIC_API_KEY or the configured api_key".to_string()), ErrorSeverity::Fatal),
            QaError::Classification { .. } =>
                (Some("The router prompt drifted; inspect the raw label and the category set".to_string()), ErrorSeverity::Error),
            QaError::NoGrounding { category } =>
                (Some(format!("Add reference rules tagged '{}' to the corpus", category)), ErrorSeverity::Warning),
            QaError::Cancelled { .. } => (None, ErrorSeverity::Info),
            QaError::Config(_) | QaError::InvalidInput(_) => (None, ErrorSeverity::Fatal),
            _ => (None, ErrorSeverity::Error),
        };

        ErrorContext {
            stage: self.stage().map(str::to_string),
            suggestion,
            severity,
        }
    }

    fn stage(&self) -> Option<&str> {
        match self {
            QaError::Classification { .. } => Some("classification"),
            QaError::NoGrounding { .. } | QaError::Retrieval(_) => Some("retrieval"),
            QaError::Generation { stage, .. } | QaError::Cancelled { stage } => Some(stage),
            QaError::Evaluation(_) => Some("evaluation"),
            _ => None,
        }
    }
}

/// Result type specific to QAForge operations
pub type QaResult<T> = Result<T, QaError>;

/// Context for error reporting
#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub stage: Option<String>,
    pub suggestion: Option<String>,
    pub severity: ErrorSeverity,
}

/// Error severity levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorSeverity {
    Fatal,
    Error,
    Warning,
    Info,
}

/// Recoverable vs. non-recoverable errors
pub trait RecoverableError {
    fn is_recoverable(&self) -> bool;
}

impl RecoverableError for GatewayError {
    fn is_recoverable(&self) -> bool {
        matches!(self, GatewayError::Transient { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_severity_and_stage() {
        let missing = QaError::NoGrounding { category: "security".to_string() };
        let ctx = missing.context();
        assert_eq!(ctx.severity, ErrorSeverity::Warning);
        assert_eq!(ctx.stage.as_deref(), Some("retrieval"));
        assert!(ctx.suggestion.unwrap_or_default().contains("security"));

        let cancelled = QaError::Cancelled { stage: "drafting".to_string() };
        assert_eq!(cancelled.context().severity, ErrorSeverity::Info);
        assert_eq!(cancelled.context().stage.as_deref(), Some("drafting"));

        let auth = QaError::from_generation("auditor", GatewayError::auth("LLM API", "HTTP 401"));
        assert_eq!(auth.context().severity, ErrorSeverity::Fatal);
    }

    #[test]
    fn test_only_transient_gateway_errors_are_recoverable() {
        assert!(GatewayError::transient("LLM API", "HTTP 503").is_recoverable());
        assert!(!GatewayError::auth("LLM API", "HTTP 401").is_recoverable());
        assert!(!GatewayError::failed("LLM API", "HTTP 400").is_recoverable());
    }
}

use thiserror::Error;

/// Errors raised while reading or reshaping a SARIF report
#[derive(Error, Debug)]
pub enum SarifError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SARIF log contains no runs")]
    NoRuns,

    #[error("Result for rule '{rule_id}' has no location")]
    MissingLocation { rule_id: String },

    #[error("Message of rule '{rule_id}' has no '{field}' field")]
    MissingMessageField { field: String, rule_id: String },

    #[error("Result for rule '{rule_id}' has no '{field}' fingerprint")]
    MissingFingerprint { field: String, rule_id: String },

    #[error("Unknown check type '{0}', expected 'trivy' or 'gitleaks'")]
    UnknownCheckType(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<SarifError>),
}

impl SarifError {
    /// Add context to an error
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    /// Get a user-friendly message for command line display
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File operation failed: {e}"),
            Self::Json(e) => format!("Invalid JSON in SARIF report: {e}"),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SarifError>;

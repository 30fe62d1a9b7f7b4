//! Error types for rapid_phrasegraph
//!
//! This module defines the error types used throughout the library.
//! Configuration and annotation problems are reported eagerly; an input that
//! simply yields no phrases is not an error.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PhraseGraphError>;

/// Main error type for rapid_phrasegraph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhraseGraphError {
    /// Configuration validation failed
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// No stopword list is available for the requested language
    #[error("Unsupported stopword language: {language}")]
    UnsupportedLanguage { language: String },

    /// The annotation handed to the extractor is inconsistent
    #[error("Invalid annotation at token {position}: {message}")]
    InvalidAnnotation { position: usize, message: String },

    /// The annotation collaborator itself failed
    #[error("Annotator failed: {message}")]
    Annotator { message: String },

    /// PageRank did not converge within the maximum iterations
    /// Only raised by rankers running in strict mode
    #[error("Convergence failure after {iterations} iterations (delta={delta:.6})")]
    ConvergenceFailure { iterations: usize, delta: f64 },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl PhraseGraphError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unsupported language error
    pub fn unsupported_language(language: impl Into<String>) -> Self {
        Self::UnsupportedLanguage {
            language: language.into(),
        }
    }

    /// Create an invalid annotation error pointing at a token position
    pub fn invalid_annotation(position: usize, message: impl Into<String>) -> Self {
        Self::InvalidAnnotation {
            position,
            message: message.into(),
        }
    }

    /// Create a convergence failure error
    pub fn convergence_failure(iterations: usize, delta: f64) -> Self {
        Self::ConvergenceFailure { iterations, delta }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Check if this error indicates non-convergence
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::ConvergenceFailure { .. })
    }

    /// Check if this error was caused by caller configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. } | Self::UnsupportedLanguage { .. }
        )
    }
}

impl From<serde_json::Error> for PhraseGraphError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PhraseGraphError::invalid_config("window_size must be >= 1");
        assert!(err.to_string().contains("Invalid configuration"));
        assert!(err.to_string().contains("window_size"));

        let err = PhraseGraphError::convergence_failure(100, 0.001);
        assert!(err.to_string().contains("100 iterations"));
        assert!(err.to_string().contains("0.001"));

        let err = PhraseGraphError::invalid_annotation(7, "span does not contain token");
        assert!(err.to_string().contains("token 7"));
    }

    #[test]
    fn test_error_classification() {
        assert!(PhraseGraphError::convergence_failure(10, 0.5).is_convergence_failure());
        let annotator = PhraseGraphError::Annotator {
            message: "boom".to_string(),
        };
        assert!(!annotator.is_convergence_failure());
        assert!(!annotator.is_config_error());

        assert!(PhraseGraphError::unsupported_language("xx").is_config_error());
        assert!(PhraseGraphError::invalid_config("bad").is_config_error());
        assert!(!PhraseGraphError::invalid_annotation(0, "bad").is_config_error());
    }

    #[test]
    fn test_from_serde_json() {
        let err: PhraseGraphError = serde_json::from_str::<Vec<u32>>("not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, PhraseGraphError::Serialization { .. }));
    }
}

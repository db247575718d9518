use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Membership directory error: {message}")]
    DirectoryError { message: String },

    #[error("Preference store error: {message}")]
    PreferenceStoreError { message: String },

    #[error("Notification to {recipient} failed: {message}")]
    NotificationError { recipient: String, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Run aborted while {stage}: {source}")]
    RunAborted {
        stage: &'static str,
        #[source]
        source: Box<MatchError>,
    },
}

/// Where a failure stops the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Nothing can proceed: teams or preferences could not be loaded.
    RunFatal,
    /// Scoped to one team; the run continues with the next one.
    TeamRecoverable,
    /// A single notification send; siblings are unaffected.
    DispatchLocal,
    Configuration,
}

impl MatchError {
    pub fn directory(message: impl Into<String>) -> Self {
        Self::DirectoryError {
            message: message.into(),
        }
    }

    pub fn preference_store(message: impl Into<String>) -> Self {
        Self::PreferenceStoreError {
            message: message.into(),
        }
    }

    pub fn notification(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotificationError {
            recipient: recipient.into(),
            message: message.into(),
        }
    }

    pub fn run_aborted(stage: &'static str, source: MatchError) -> Self {
        Self::RunAborted {
            stage,
            source: Box::new(source),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MatchError::RunAborted { .. } => ErrorCategory::RunFatal,
            MatchError::NotificationError { .. } | MatchError::HttpError(_) => {
                ErrorCategory::DispatchLocal
            }
            MatchError::ConfigValidationError { .. }
            | MatchError::InvalidConfigValueError { .. }
            | MatchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MatchError::DirectoryError { .. }
            | MatchError::PreferenceStoreError { .. }
            | MatchError::CsvError(_)
            | MatchError::IoError(_)
            | MatchError::SerializationError(_) => ErrorCategory::TeamRecoverable,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::RunFatal => {
                "Check that the team directory and preference store are reachable"
            }
            ErrorCategory::TeamRecoverable => {
                "Check the roster source; other teams were still processed"
            }
            ErrorCategory::DispatchLocal => {
                "Check the notification endpoint; failed recipients are retried next run"
            }
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MatchError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            MatchError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            MatchError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            MatchError::run_aborted(
                "loading preferences",
                MatchError::preference_store("down")
            )
            .category(),
            ErrorCategory::RunFatal
        );
        assert_eq!(
            MatchError::directory("roster").category(),
            ErrorCategory::TeamRecoverable
        );
        assert_eq!(
            MatchError::notification("u1", "503").category(),
            ErrorCategory::DispatchLocal
        );
        assert_eq!(
            MatchError::MissingConfigError {
                field: "matching.group_size".to_string()
            }
            .category(),
            ErrorCategory::Configuration
        );
    }

    #[test]
    fn test_user_friendly_message() {
        let err = MatchError::InvalidConfigValueError {
            field: "matching.group_size".to_string(),
            value: "1".to_string(),
            reason: "Value must be at least 2".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Setting 'matching.group_size' is invalid: Value must be at least 2"
        );
    }
}

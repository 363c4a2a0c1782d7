use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("Menu item not found: {id}")]
    NotFound { id: String },

    #[error("Duplicate menu item id: {id}")]
    DuplicateId { id: String },

    #[error("Menu item is not being edited: {id}")]
    NotEditing { id: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidFieldValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported document format: {path}")]
    UnsupportedFormat { path: String },

    #[error("Output would overwrite the input document: {path}")]
    WouldOverwriteInput { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Format,
    Tree,
    Validation,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NavError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn invalid_field(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFieldValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            NavError::IoError(_) => ErrorCategory::Io,
            NavError::SerializationError(_)
            | NavError::TomlError(_)
            | NavError::TomlSerializeError(_)
            | NavError::UnsupportedFormat { .. } => ErrorCategory::Format,
            NavError::NotFound { .. } | NavError::NotEditing { .. } => ErrorCategory::Tree,
            NavError::DuplicateId { .. } | NavError::InvalidFieldValue { .. } => {
                ErrorCategory::Validation
            }
            NavError::ConfigError { .. } | NavError::WouldOverwriteInput { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Tree | ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Format => match self {
                NavError::TomlSerializeError(_) => ErrorSeverity::Critical,
                _ => ErrorSeverity::High,
            },
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Configuration | ErrorCategory::Format => {
                match self.severity() {
                    ErrorSeverity::Critical => 3,
                    _ => 1,
                }
            }
            ErrorCategory::Tree | ErrorCategory::Io => 2,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NavError::IoError(e) => format!("Could not read or write a file: {}", e),
            NavError::SerializationError(e) => format!("The JSON document is malformed: {}", e),
            NavError::TomlError(e) => format!("The TOML document is malformed: {}", e),
            NavError::TomlSerializeError(e) => format!("Could not write TOML output: {}", e),
            NavError::NotFound { id } => format!("No menu item with id '{}'", id),
            NavError::DuplicateId { id } => format!("The id '{}' is used more than once", id),
            NavError::NotEditing { id } => format!("Menu item '{}' is not in edit mode", id),
            NavError::InvalidFieldValue { field, reason, .. } => {
                format!("Field '{}' is invalid: {}", field, reason)
            }
            NavError::UnsupportedFormat { path } => {
                format!("Don't know how to read '{}'", path)
            }
            NavError::WouldOverwriteInput { path } => {
                format!("Writing '{}' would replace the input document", path)
            }
            NavError::ConfigError { message } => format!("Configuration problem: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the path exists and is readable/writable",
            ErrorCategory::Format => "Use a .json or .toml document that matches the menu schema",
            ErrorCategory::Tree => "List the menu with --format outline to see the available ids",
            ErrorCategory::Validation => "Give every menu item a unique, non-empty id and a valid url",
            ErrorCategory::Configuration => {
                "Run with --help to review the available options, or pick a different --output"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, NavError>;

use std::fmt::Display;
use std::path::PathBuf;
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::{describe_error_code, ErrorCode};
pub use helpers::ErrorExt;

/// The unified error type for macro resolution, querying and rendering
#[derive(Error, Debug)]
pub enum MacroError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Resolution error: {message}")]
    Resolution {
        code: u16,
        message: String,
        metric: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Query error: {message}")]
    Query {
        code: u16,
        message: String,
        metric: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Calculation error: {message}")]
    Calculation {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Parse error: {message}")]
    Parse {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Render error: {message}")]
    Render {
        code: u16,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Validation error: {message}")]
    Validation {
        code: u16,
        message: String,
        field: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MacroError {
    /// Create a configuration error with default code
    pub fn config(message: impl Into<String>) -> Self {
        Self::config_with_code(ErrorCode::CONFIG_GENERIC, message, None)
    }

    /// Create a configuration error with specific code and path
    pub fn config_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Create a resolution error with default code
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::resolution_with_code(ErrorCode::RESOLUTION_GENERIC, message, None)
    }

    /// Create a resolution error for a specific metric
    pub fn resolution_with_code(
        code: u16,
        message: impl Into<String>,
        metric: Option<String>,
    ) -> Self {
        Self::Resolution {
            code,
            message: message.into(),
            metric,
            source: None,
        }
    }

    /// Create a query error with default code
    pub fn query(message: impl Into<String>) -> Self {
        Self::query_with_code(ErrorCode::QUERY_GENERIC, message, None)
    }

    /// Create a query error naming the offending metric
    pub fn query_with_code(code: u16, message: impl Into<String>, metric: Option<String>) -> Self {
        Self::Query {
            code,
            message: message.into(),
            metric,
            source: None,
        }
    }

    pub fn calculation(message: impl Into<String>) -> Self {
        Self::Calculation {
            code: ErrorCode::CALC_NON_FINITE,
            message: message.into(),
            source: None,
        }
    }

    pub fn parse(code: u16, message: impl Into<String>) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            code: ErrorCode::RENDER_TEMPLATE_FAILED,
            message: message.into(),
            source: None,
        }
    }

    /// Create a validation error with default code
    pub fn validation(message: impl Into<String>) -> Self {
        Self::validation_with_code(ErrorCode::VALIDATION_GENERIC, message, None)
    }

    /// Create a validation error with specific code and field
    pub fn validation_with_code(
        code: u16,
        message: impl Into<String>,
        field: Option<String>,
    ) -> Self {
        Self::Validation {
            code,
            message: message.into(),
            field,
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. }
            | Self::Resolution { source: src, .. }
            | Self::Query { source: src, .. }
            | Self::Calculation { source: src, .. }
            | Self::Parse { source: src, .. }
            | Self::Render { source: src, .. }
            | Self::Validation { source: src, .. } => {
                *src = Some(source.into());
            }
        }
        self
    }

    /// Add context to the error message
    pub fn with_context(mut self, context: impl Display) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Resolution { message, .. }
            | Self::Query { message, .. }
            | Self::Calculation { message, .. }
            | Self::Parse { message, .. }
            | Self::Render { message, .. }
            | Self::Validation { message, .. } => {
                *message = format!("{}: {}", message, context);
            }
        }
        self
    }

    /// Replace the message, keeping variant, code and source
    pub fn map_message(mut self, f: impl FnOnce(&str) -> String) -> Self {
        match &mut self {
            Self::Config { message, .. }
            | Self::Resolution { message, .. }
            | Self::Query { message, .. }
            | Self::Calculation { message, .. }
            | Self::Parse { message, .. }
            | Self::Render { message, .. }
            | Self::Validation { message, .. } => {
                *message = f(message);
            }
        }
        self
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Config { message, .. }
            | Self::Resolution { message, .. }
            | Self::Query { message, .. }
            | Self::Calculation { message, .. }
            | Self::Parse { message, .. }
            | Self::Render { message, .. }
            | Self::Validation { message, .. } => message,
        }
    }

    /// Get the error code
    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::Resolution { code, .. }
            | Self::Query { code, .. }
            | Self::Calculation { code, .. }
            | Self::Parse { code, .. }
            | Self::Render { code, .. }
            | Self::Validation { code, .. } => *code,
        }
    }

    /// Get the process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,
            Self::Resolution { .. } => 3,
            Self::Query { .. } => 4,
            Self::Calculation { .. } => 5,
            Self::Parse { .. } => 6,
            Self::Render { .. } => 7,
            Self::Validation { .. } => 8,
        }
    }

    /// Message shown inside a rendered error block or on the terminal
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, path, .. } => match path {
                Some(p) => format!("Configuration problem in {}: {}", p.display(), message),
                None => format!("Configuration problem: {}", message),
            },
            Self::Resolution { message, .. }
            | Self::Query { message, .. }
            | Self::Calculation { message, .. }
            | Self::Parse { message, .. } => message.clone(),
            Self::Render { message, .. } => format!("Rendering failed: {}", message),
            Self::Validation { message, field, .. } => match field {
                Some(f) => format!("Validation error for '{}': {}", f, message),
                None => format!("Validation error: {}", message),
            },
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut out = self.to_string();
        let mut current = std::error::Error::source(self);
        while let Some(cause) = current {
            out.push_str(&format!("\n  caused by: {}", cause));
            current = cause.source();
        }
        out
    }

    /// Metric the error is attributed to, if any
    pub fn metric(&self) -> Option<&str> {
        match self {
            Self::Resolution { metric, .. } | Self::Query { metric, .. } => metric.as_deref(),
            Self::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

/// Type alias for Results using MacroError
pub type Result<T> = std::result::Result<T, MacroError>;

impl From<std::io::Error> for MacroError {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::CONFIG_NOT_FOUND,
            _ => ErrorCode::CONFIG_GENERIC,
        };
        MacroError::config_with_code(code, err.to_string(), None).with_source(err)
    }
}

impl From<serde_yaml::Error> for MacroError {
    fn from(err: serde_yaml::Error) -> Self {
        MacroError::config_with_code(ErrorCode::CONFIG_INVALID_YAML, "Invalid YAML syntax", None)
            .with_source(err)
    }
}

impl From<toml::de::Error> for MacroError {
    fn from(err: toml::de::Error) -> Self {
        MacroError::config_with_code(ErrorCode::CONFIG_INVALID_TOML, "Invalid TOML syntax", None)
            .with_source(err)
    }
}

impl From<tera::Error> for MacroError {
    fn from(err: tera::Error) -> Self {
        MacroError::render(err.to_string()).with_source(err)
    }
}

impl From<chrono::ParseError> for MacroError {
    fn from(err: chrono::ParseError) -> Self {
        MacroError::parse(ErrorCode::PARSE_INVALID_DATE, err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation_and_chaining() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "fixture.yaml");
        let err = MacroError::config("Cannot read fixture")
            .with_source(io_err)
            .with_context("while loading project");

        assert_eq!(err.code(), ErrorCode::CONFIG_GENERIC);
        assert!(err.to_string().contains("[E1000]"));
        assert!(err.user_message().contains("Cannot read fixture"));
        assert!(err.developer_message().contains("caused by: fixture.yaml"));
    }

    #[test]
    fn test_query_error_names_metric() {
        let err = MacroError::query_with_code(
            ErrorCode::QUERY_NO_ROWS,
            "#3 Gamma is not a valid release",
            Some("release".to_string()),
        );
        assert_eq!(err.metric(), Some("release"));
        assert_eq!(err.user_message(), "#3 Gamma is not a valid release");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_io_not_found_maps_to_config_code() {
        let err: MacroError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_validation_user_message_includes_field() {
        let err = MacroError::validation_with_code(
            ErrorCode::VALIDATION_UNKNOWN_METRIC,
            "unknown metric",
            Some("colour".to_string()),
        );
        assert_eq!(err.user_message(), "Validation error for 'colour': unknown metric");
    }

    #[test]
    fn test_map_message_keeps_code() {
        let err = MacroError::query_with_code(ErrorCode::QUERY_FAILED, "timeout", None)
            .map_message(|inner| format!("[error retrieving stories: {}]", inner));
        assert_eq!(err.code(), ErrorCode::QUERY_FAILED);
        assert_eq!(err.message(), "[error retrieving stories: timeout]");
    }
}

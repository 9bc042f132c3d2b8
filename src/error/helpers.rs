use super::{ErrorCode, MacroError};

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to a query error with context
    fn to_query_error(self, message: impl Into<String>) -> Result<T, MacroError>;

    /// Convert to a resolution error attributed to `metric`
    fn to_resolution_error(self, metric: &str) -> Result<T, MacroError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_query_error(self, message: impl Into<String>) -> Result<T, MacroError> {
        self.map_err(|e| {
            MacroError::query_with_code(ErrorCode::QUERY_FAILED, message, None).with_source(e)
        })
    }

    fn to_resolution_error(self, metric: &str) -> Result<T, MacroError> {
        self.map_err(|e| {
            let source: Box<dyn std::error::Error + Send + Sync> = e.into();
            MacroError::resolution_with_code(
                ErrorCode::RESOLUTION_SUPPLIER_FAILED,
                source.to_string(),
                Some(metric.to_string()),
            )
            .with_source(source)
        })
    }
}

/// Helper functions for common error scenarios
pub mod common {
    use super::*;

    /// A query that had to return at least one row came back empty
    pub fn no_rows(message: impl Into<String>, metric: &str) -> MacroError {
        MacroError::query_with_code(ErrorCode::QUERY_NO_ROWS, message, Some(metric.to_string()))
    }

    /// A record lacks a column the macro needs
    pub fn missing_column(column: &str) -> MacroError {
        MacroError::query_with_code(
            ErrorCode::QUERY_MISSING_COLUMN,
            format!("record has no value for '{}'", column),
            Some(column.to_string()),
        )
    }

    /// A project variable the host does not define
    pub fn undefined_variable(name: &str) -> MacroError {
        MacroError::resolution_with_code(
            ErrorCode::RESOLUTION_VARIABLE_UNDEFINED,
            format!("project variable '{}' is not defined", name),
            None,
        )
    }

    pub fn invalid_date(text: &str) -> MacroError {
        MacroError::parse(ErrorCode::PARSE_INVALID_DATE, format!("invalid date: {}", text))
    }

    pub fn unknown_metric(metric: &str) -> MacroError {
        MacroError::validation_with_code(
            ErrorCode::VALIDATION_UNKNOWN_METRIC,
            format!("'{}' is not a known metric", metric),
            Some(metric.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_extension_trait() {
        let io_result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "host unreachable",
        ));

        let err = io_result.to_resolution_error("iteration").unwrap_err();
        assert_eq!(err.code(), ErrorCode::RESOLUTION_SUPPLIER_FAILED);
        assert_eq!(err.metric(), Some("iteration"));
        assert_eq!(err.user_message(), "host unreachable");
    }

    #[test]
    fn test_common_error_helpers() {
        let err = common::no_rows("#9 Nope is not a valid release", "release");
        assert_eq!(err.code(), ErrorCode::QUERY_NO_ROWS);
        assert_eq!(err.metric(), Some("release"));

        let err = common::invalid_date("someday");
        assert_eq!(err.code(), ErrorCode::PARSE_INVALID_DATE);
        assert!(err.user_message().contains("someday"));
    }
}

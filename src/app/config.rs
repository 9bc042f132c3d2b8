//! Application configuration
//!
//! Settings that shape how the binary runs, as opposed to what a macro
//! computes.

/// Application configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
    /// Filter directive that replaces the verbosity-derived level
    pub log_level: Option<String>,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self {
            verbose,
            log_level: None,
        }
    }

    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        self.log_level = level;
        self
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &str {
        if let Some(level) = &self.log_level {
            return level;
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_verbosity() {
        assert_eq!(AppConfig::new(0).log_level(), "info");
        assert_eq!(AppConfig::new(1).log_level(), "debug");
        assert_eq!(AppConfig::new(4).log_level(), "trace");
    }

    #[test]
    fn test_explicit_level_wins() {
        let config = AppConfig::new(2).with_log_level(Some("warn".to_string()));
        assert_eq!(config.log_level(), "warn");
    }
}

//! Configuration error types.

/// Configuration failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A configuration source could not be read or merged
    #[display("Failed to load configuration: {}", _0)]
    Load(String),
    /// The merged configuration does not match the expected shape
    #[display("Failed to parse configuration: {}", _0)]
    Parse(String),
    /// A value parsed but is out of range
    #[display("Invalid value for '{}': {}", field, reason)]
    Invalid {
        /// Dotted path of the offending setting
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use postboard_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::Invalid {
///     field: "ranking.top_n".to_string(),
///     reason: "must be at least 1".to_string(),
/// });
/// assert!(format!("{}", err).contains("ranking.top_n"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an out-of-range setting.
    #[track_caller]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ConfigErrorKind::Invalid {
            field: field.into(),
            reason: reason.into(),
        })
    }
}

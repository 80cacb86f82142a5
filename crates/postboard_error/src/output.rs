//! Output error types.

/// Failure writing a board to an output stream.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Output Error: {} at line {} in {}", message, line, file)]
pub struct OutputError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl OutputError {
    /// Create a new OutputError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use postboard_error::OutputError;
    ///
    /// let err = OutputError::new("broken pipe");
    /// assert!(format!("{}", err).contains("broken pipe"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<std::io::Error> for OutputError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        OutputError::new(err.to_string())
    }
}

//! Model provider errors and retry classification.

/// Model provider error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelsErrorKind {
    /// Interface format label not recognised
    #[display("Unknown interface format: {}", _0)]
    UnknownInterfaceFormat(String),
    /// Endpoint URL does not have the shape the provider requires
    #[display("Invalid endpoint: {}", _0)]
    InvalidEndpoint(String),
    /// HTTP client could not be constructed
    #[display("Failed to build HTTP client: {}", _0)]
    ClientBuild(String),
    /// Request never produced a response (connect, DNS, reset)
    #[display("Request failed: {}", _0)]
    Request(String),
    /// Request exceeded the configured timeout
    #[display("Request timed out: {}", _0)]
    Timeout(String),
    /// Provider answered with a non-success status
    #[display("API error {}: {}", status, message)]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
    /// Response body could not be decoded
    #[display("Failed to parse response: {}", _0)]
    ResponseParse(String),
    /// Builder error (derive_builder failures)
    #[display("Builder error: {}", _0)]
    Builder(String),
}

impl ModelsErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            ModelsErrorKind::ApiError { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            ModelsErrorKind::Request(_) => true,
            ModelsErrorKind::Timeout(_) => true,
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, u64) {
        match self {
            ModelsErrorKind::ApiError { status, .. } => match *status {
                429 => (5000, 40),
                503 => (2000, 60),
                500 | 502 | 504 => (1000, 8),
                _ => (2000, 30),
            },
            ModelsErrorKind::Timeout(_) => (2000, 30),
            _ => (1000, 10),
        }
    }
}

/// Model provider error with location tracking.
///
/// # Examples
///
/// ```
/// use folio_error::{ModelsError, ModelsErrorKind, RetryableError};
///
/// let err = ModelsError::new(ModelsErrorKind::ApiError {
///     status: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at {}:{}", kind, file, line)]
pub struct ModelsError {
    /// The specific error kind
    pub kind: ModelsErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// Source file where error occurred
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new models error.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Result type for model provider operations.
pub type ModelsResult<T> = Result<T, ModelsError>;

/// Trait for errors that support retry logic.
///
/// Transient errors like 503, 429 or dropped connections return true.
/// Permanent errors like 401 or 400 return false.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Returns `(initial_backoff_ms, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, u64) {
        (1000, 10)
    }
}

impl RetryableError for ModelsError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, u64) {
        self.kind.retry_strategy_params()
    }
}

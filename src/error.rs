//! Error handling for the phone-forward library
//!
//! Every fallible registry operation reports one of these variants. Expected
//! conditions such as malformed numbers never panic; they come back as
//! [`ForwardError::InvalidArgument`].

use thiserror::Error;

/// Main error type for the phone-forward library
#[derive(Error, Debug)]
pub enum ForwardError {
    /// I/O related errors (configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A number failed validation, or source and target of a forwarding are equal
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message describing the issue
        message: String,
    },

    /// Node or string allocation failed, or the node limit was reached
    #[error("Resource exhausted: requested {requested} more slots")]
    ResourceExhausted {
        /// Number of slots (nodes, bucket entries or bytes) requested
        requested: usize,
    },

    /// Index out of bounds access on a result sequence
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl ForwardError {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument { message: message.into() }
    }

    /// Create a resource exhausted error
    pub fn resource_exhausted(requested: usize) -> Self {
        Self::ResourceExhausted { requested }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Check if this is a recoverable error
    ///
    /// Resource exhaustion leaves the registry in its previous consistent
    /// state, so the caller may retry once memory is available again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::ResourceExhausted { .. } => true,
            Self::InvalidArgument { .. } => false,
            Self::OutOfBounds { .. } => false,
            Self::Configuration { .. } => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidArgument { .. } => "argument",
            Self::ResourceExhausted { .. } => "resource",
            Self::OutOfBounds { .. } => "bounds",
            Self::Configuration { .. } => "config",
        }
    }
}

impl From<std::collections::TryReserveError> for ForwardError {
    fn from(_: std::collections::TryReserveError) -> Self {
        Self::ResourceExhausted { requested: 1 }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ForwardError>;

/// Assert that an index is within bounds
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(ForwardError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}

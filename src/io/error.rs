//! Error types for the render pipeline and its collaborators

use std::fmt;
use std::path::PathBuf;

/// Main error type for all word-cloud operations
#[derive(Debug)]
pub enum CloudError {
    /// Normalization left no eligible tokens
    EmptyInput {
        /// Number of characters in the raw input text
        input_chars: usize,
    },

    /// Mask dimensions are unusable
    MaskGeneration {
        /// Requested canvas width
        width: u32,
        /// Requested canvas height
        height: u32,
    },

    /// The word placer failed to produce an image
    ///
    /// Covers unreadable fonts, an empty vocabulary after the placer's own
    /// filtering, unparseable colors and canvases where nothing fits.
    Render {
        /// Description of the failure
        reason: String,
    },

    /// The repository could not store or read a frequency table
    Persistence {
        /// Repository operation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// The linguistic-analysis service failed or answered garbage
    Analysis {
        /// Description of the failure
        reason: String,
    },

    /// Request parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to encode the rendered canvas
    ImageEncode {
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl CloudError {
    /// Whether the error aborts the render pipeline
    ///
    /// Persistence and analysis failures are degraded by the orchestrator
    /// instead of failing the request.
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Persistence { .. } | Self::Analysis { .. })
    }
}

impl fmt::Display for CloudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput { input_chars } => {
                write!(
                    f,
                    "Text is empty or has no eligible words after normalization ({input_chars} characters received)"
                )
            }
            Self::MaskGeneration { width, height } => {
                write!(
                    f,
                    "Cannot generate a mask for a {width}x{height} canvas: width and height must be positive"
                )
            }
            Self::Render { reason } => write!(f, "Word cloud rendering failed: {reason}"),
            Self::Persistence { operation, reason } => {
                write!(f, "Persistence error during {operation}: {reason}")
            }
            Self::Analysis { reason } => write!(f, "Linguistic analysis failed: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageEncode { source } => write!(f, "Failed to encode image: {source}"),
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CloudError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageEncode { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for word-cloud results
pub type Result<T> = std::result::Result<T, CloudError>;

impl From<image::ImageError> for CloudError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageEncode { source: err }
    }
}

impl From<std::io::Error> for CloudError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a render error
pub fn render_error(reason: &impl ToString) -> CloudError {
    CloudError::Render {
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CloudError {
    CloudError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a persistence error
pub fn persistence_error(operation: &'static str, reason: &impl ToString) -> CloudError {
    CloudError::Persistence {
        operation,
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to an I/O error
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> CloudError {
    let path = path.into();
    move |source| CloudError::FileSystem {
        path,
        operation,
        source,
    }
}

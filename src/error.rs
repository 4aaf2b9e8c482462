//! Error types for alg-to-img.
//!
//! Every failure carries an [`ErrorCode`] so the JSON-RPC layer and the CLI
//! can report it consistently, together with a recovery hint.

use std::fmt;

/// Error codes returned in error responses.
///
/// These codes are used in JSON-RPC error data and allow clients to
/// programmatically handle specific error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Request is missing a required field or carries invalid options.
    /// Trigger: absent/non-array `algorithms`, puzzle order or size out of range.
    MalformedRequest,

    /// A single image could not be retrieved.
    /// Trigger: non-2xx response or a broken response body.
    FetchFailed,

    /// The renderer could not be reached at all.
    /// Trigger: DNS failure, refused connection, timeout.
    UpstreamUnavailable,

    /// Retrieved bytes are neither a supported raster format nor SVG.
    /// Trigger: HTML error page, truncated image, unsupported encoding.
    DecodeFailed,

    /// Writing the zip archive failed.
    ArchiveFailed,

    /// Writing the downloaded artifact to disk failed.
    /// Trigger: missing permissions, disk full.
    OutputWriteFailed,

    /// Reading or writing persisted session state failed.
    SessionStoreFailed,

    /// The daemon could not set up its own machinery.
    /// Trigger: async runtime or HTTP client construction failure.
    Internal,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MalformedRequest => "MALFORMED_REQUEST",
            ErrorCode::FetchFailed => "FETCH_FAILED",
            ErrorCode::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            ErrorCode::DecodeFailed => "DECODE_FAILED",
            ErrorCode::ArchiveFailed => "ARCHIVE_FAILED",
            ErrorCode::OutputWriteFailed => "OUTPUT_WRITE_FAILED",
            ErrorCode::SessionStoreFailed => "SESSION_STORE_FAILED",
            ErrorCode::Internal => "INTERNAL_ERROR",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::MalformedRequest => "Request is missing fields or has invalid options",
            ErrorCode::FetchFailed => "Failed to fetch image from the renderer",
            ErrorCode::UpstreamUnavailable => "Image renderer is unreachable",
            ErrorCode::DecodeFailed => "Fetched image could not be decoded",
            ErrorCode::ArchiveFailed => "Failed to build image archive",
            ErrorCode::OutputWriteFailed => "Failed to write output file",
            ErrorCode::SessionStoreFailed => "Failed to access session store",
            ErrorCode::Internal => "Internal daemon error",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::MalformedRequest => {
                "Send `algorithms` as an array of strings, a puzzle order between 2 and 7 \
                 and a size of 128, 256, 512 or 1024"
            }
            ErrorCode::FetchFailed => {
                "Check that the algorithm renders in a browser and retry; \
                 the renderer may reject unusual parameter combinations"
            }
            ErrorCode::UpstreamUnavailable => {
                "Check internet connection or point ALG_TO_IMG_RENDERER_URL at a reachable \
                 VisualCube instance, then try again later"
            }
            ErrorCode::DecodeFailed => {
                "The renderer returned something other than an image; \
                 verify the renderer URL serves SVG or PNG output"
            }
            ErrorCode::ArchiveFailed => "Retry the download; if it keeps failing report a bug",
            ErrorCode::OutputWriteFailed => {
                "Check that the output directory exists and is writable, \
                 or choose another one with --output or ALG_TO_IMG_OUTPUT_PATH"
            }
            ErrorCode::SessionStoreFailed => {
                "Check permissions on the session directory or set ALG_TO_IMG_SESSION_PATH"
            }
            ErrorCode::Internal => "Restart the daemon; if it keeps failing report a bug",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type.
#[derive(Debug)]
pub struct AppError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Creates a new AppError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new AppError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a MALFORMED_REQUEST error.
    pub fn malformed_request(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedRequest, reason)
    }

    /// Creates a FETCH_FAILED error.
    pub fn fetch_failed(url: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::FetchFailed,
            format!("Failed to fetch {}: {}", url, reason.into()),
        )
    }

    /// Creates an UPSTREAM_UNAVAILABLE error.
    pub fn upstream_unavailable(url: &str, source: reqwest::Error) -> Self {
        Self::with_source(
            ErrorCode::UpstreamUnavailable,
            format!("Renderer unreachable for {}", url),
            source,
        )
    }

    /// Creates a DECODE_FAILED error.
    pub fn decode_failed(reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::DecodeFailed,
            format!("Failed to decode image: {}", reason.into()),
        )
    }

    /// Creates an ARCHIVE_FAILED error.
    pub fn archive_failed(source: zip::result::ZipError) -> Self {
        Self::with_source(ErrorCode::ArchiveFailed, "Failed to write zip archive", source)
    }

    /// Creates an OUTPUT_WRITE_FAILED error.
    pub fn output_write_failed(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::OutputWriteFailed,
            format!("Failed to write {}", path.display()),
            source,
        )
    }

    /// Creates an INTERNAL_ERROR error.
    pub fn internal(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorCode::Internal, message, source)
    }

    /// Creates a SESSION_STORE_FAILED error.
    pub fn session_store_failed(reason: impl Into<String>) -> Self {
        Self::new(ErrorCode::SessionStoreFailed, reason)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

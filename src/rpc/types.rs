//! JSON-RPC types for the daemon protocol.
//!
//! Envelopes, error objects, and the params/result shapes of every method.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorCode};
use crate::types::{ImageDescriptor, RenderOptions, SkippedImage};

/// JSON-RPC version constant.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    Integer(i64),
    String(String),
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Integer(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

/// A JSON-RPC request wrapper.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub id: RequestId,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A JSON-RPC response wrapper.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub result: T,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(id: RequestId, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// A JSON-RPC error response.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: &'static str,
    pub id: Option<RequestId>,
    pub error: JsonRpcError,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error,
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonRpcErrorData>,
}

/// Extended error data for application-specific errors.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorData {
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl JsonRpcError {
    /// Creates a parse error (-32700).
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an invalid request error (-32600).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a method not found error (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
            data: None,
        }
    }

    /// Creates an internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a malformed request error (-32602 with MALFORMED_REQUEST data).
    pub fn malformed_request(details: impl Into<String>) -> Self {
        Self::application(-32602, ErrorCode::MalformedRequest, details)
    }

    /// Creates a fetch failed error (-32010).
    pub fn fetch_failed(details: impl Into<String>) -> Self {
        Self::application(-32010, ErrorCode::FetchFailed, details)
    }

    /// Creates an upstream unavailable error (-32011).
    pub fn upstream_unavailable(details: impl Into<String>) -> Self {
        Self::application(-32011, ErrorCode::UpstreamUnavailable, details)
    }

    /// Creates a decode failed error (-32012).
    pub fn decode_failed(details: impl Into<String>) -> Self {
        Self::application(-32012, ErrorCode::DecodeFailed, details)
    }

    /// Creates an output write failed error (-32013).
    pub fn output_write_failed(details: impl Into<String>) -> Self {
        Self::application(-32013, ErrorCode::OutputWriteFailed, details)
    }

    fn application(code: i32, error_code: ErrorCode, details: impl Into<String>) -> Self {
        Self {
            code,
            message: error_code.description().to_string(),
            data: Some(JsonRpcErrorData {
                error_code: error_code.as_str().to_string(),
                details: Some(details.into()),
            }),
        }
    }
}

impl From<AppError> for JsonRpcError {
    fn from(err: AppError) -> Self {
        let details = err.message;
        match err.code {
            ErrorCode::MalformedRequest => JsonRpcError::malformed_request(details),
            ErrorCode::FetchFailed => JsonRpcError::fetch_failed(details),
            ErrorCode::UpstreamUnavailable => JsonRpcError::upstream_unavailable(details),
            ErrorCode::DecodeFailed => JsonRpcError::decode_failed(details),
            ErrorCode::OutputWriteFailed => JsonRpcError::output_write_failed(details),
            ErrorCode::ArchiveFailed => JsonRpcError::application(-32014, err.code, details),
            ErrorCode::SessionStoreFailed => JsonRpcError::application(-32015, err.code, details),
            ErrorCode::Internal => JsonRpcError::internal_error(details),
        }
    }
}

// ============================================================================
// sanitize
// ============================================================================

/// Parameters for a sanitize request.
#[derive(Debug, Deserialize)]
pub struct SanitizeParams {
    /// Raw multi-line input.
    pub text: String,
}

/// Response for a sanitize request.
#[derive(Debug, Serialize)]
pub struct SanitizeResult {
    /// One sanitized algorithm per non-empty input line.
    pub algorithms: Vec<String>,
    /// The algorithms joined with newlines.
    pub text: String,
}

// ============================================================================
// generate
// ============================================================================

/// Parameters for a generate request.
#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    /// Algorithms to render, one image each.
    #[serde(alias = "algs")]
    pub algorithms: Vec<String>,

    /// Rendering options; absent fields take their defaults.
    #[serde(flatten)]
    pub options: RenderOptions,
}

/// Response for a generate request.
#[derive(Debug, Serialize)]
pub struct GenerateResult {
    pub images: Vec<ImageDescriptor>,
}

// ============================================================================
// fetch_image
// ============================================================================

/// Parameters for a fetch_image request.
#[derive(Debug, Deserialize)]
pub struct FetchImageParams {
    pub url: String,
}

/// Response for a fetch_image request.
#[derive(Debug, Serialize)]
pub struct FetchImageResult {
    /// Always `image/png`.
    pub mime: &'static str,
    /// Base64 encoded PNG.
    pub data: String,
    /// Decoded size in bytes.
    pub bytes: usize,
}

// ============================================================================
// download
// ============================================================================

/// Parameters for a download request.
#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub images: Vec<ImageDescriptor>,

    /// Target directory; the configured output path when absent.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Outcome of a download request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    /// Nothing to download.
    Empty,
    /// Artifact written.
    Complete,
}

/// Response for a download request.
#[derive(Debug, Serialize)]
pub struct DownloadResult {
    pub status: DownloadStatus,

    /// Absolute or configured path of the written file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// "single" or "archive".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,

    /// Number of images in the artifact.
    pub entries: usize,

    /// Items left out of an archive.
    pub skipped: Vec<SkippedImage>,
}

impl DownloadResult {
    pub fn empty() -> Self {
        Self {
            status: DownloadStatus::Empty,
            path: None,
            kind: None,
            entries: 0,
            skipped: Vec::new(),
        }
    }
}

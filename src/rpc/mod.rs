//! JSON-RPC module for daemon communication.
//!
//! Provides the JSON-RPC 2.0 server implementation for:
//! - `sanitize`: Clean raw algorithm text
//! - `generate`: Build image descriptors for algorithms
//! - `fetch_image`: Fetch one image as base64 PNG
//! - `download`: Package descriptors into a PNG or zip on disk
//! - `get_session` / `clear_images`: Persisted session access
//! - `ping`: Health check
//! - `shutdown`: Graceful shutdown

pub mod methods;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use server::{process_request, run_server, ServerState};
pub use types::{
    DownloadParams, DownloadResult, DownloadStatus, FetchImageParams, FetchImageResult,
    GenerateParams, GenerateResult, JsonRpcError, JsonRpcErrorResponse, JsonRpcRequest,
    JsonRpcResponse, RequestId, SanitizeParams, SanitizeResult,
};

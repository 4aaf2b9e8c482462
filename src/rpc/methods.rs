//! JSON-RPC method handlers.
//!
//! Implements the handlers for all supported JSON-RPC methods.

use std::sync::Arc;

use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::notation::sanitize;
use crate::package::package;
use crate::proxy::{ImageSource, OUTPUT_MIME};
use crate::session::SessionKey;
use crate::visualcube::generate_images;

use super::server::ServerState;
use super::types::{
    DownloadParams, DownloadResult, DownloadStatus, FetchImageParams, FetchImageResult,
    GenerateParams, GenerateResult, JsonRpcError, SanitizeParams, SanitizeResult,
};

/// Handles a JSON-RPC method call.
pub fn handle_request(
    method: &str,
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    match method {
        "ping" => handle_ping(),
        "shutdown" => handle_shutdown(state),
        "sanitize" => handle_sanitize(params, state),
        "generate" => handle_generate(params, state),
        "fetch_image" => handle_fetch_image(params, state),
        "download" => handle_download(params, state),
        "get_session" => handle_get_session(state),
        "clear_images" => handle_clear_images(state),
        _ => Err(JsonRpcError::method_not_found(method)),
    }
}

/// Parses method params, rejecting anything malformed.
fn parse_params<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::malformed_request(format!("Invalid params: {}", e)))
}

fn to_result<T: Serialize>(value: T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

/// Saves a session value; failures are logged, never returned.
fn persist<T: Serialize>(state: &ServerState, key: SessionKey, value: &T) {
    if let Err(e) = state.session.save(key, value) {
        warn!(key = key.as_str(), error = %e, "failed to persist session value");
    }
}

/// Handles the ping method for health checks.
fn handle_ping() -> Result<serde_json::Value, JsonRpcError> {
    Ok(serde_json::json!({ "status": "ok" }))
}

/// Handles the shutdown method.
fn handle_shutdown(state: &mut ServerState) -> Result<serde_json::Value, JsonRpcError> {
    state.shutdown();
    Ok(serde_json::json!({ "status": "shutting_down" }))
}

/// Handles the sanitize method.
fn handle_sanitize(
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: SanitizeParams = parse_params(params)?;

    let sanitized = sanitize(&params.text);
    let text = sanitized.text();
    persist(state, SessionKey::AlgInput, &text);

    to_result(SanitizeResult {
        algorithms: sanitized.algorithms,
        text,
    })
}

/// Handles the generate method.
///
/// Nothing is generated or persisted unless the whole request is valid.
fn handle_generate(
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: GenerateParams = parse_params(params)?;

    if let Some(reason) = params.options.validate() {
        return Err(AppError::malformed_request(reason).into());
    }

    let images = generate_images(&state.config.renderer_url, &params.algorithms, &params.options);
    info!(count = images.len(), "generated image descriptors");

    persist(state, SessionKey::RenderOptions, &params.options);
    persist(state, SessionKey::Images, &images);

    to_result(GenerateResult { images })
}

/// Handles the fetch_image method.
fn handle_fetch_image(
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: FetchImageParams = parse_params(params)?;
    if params.url.trim().is_empty() {
        return Err(AppError::malformed_request("url must not be empty").into());
    }

    let png = match state.cache.get(&params.url) {
        Some(png) => {
            debug!(url = %params.url, "image served from cache");
            png
        }
        None => {
            let fetcher = Arc::clone(&state.fetcher);
            let png = Arc::new(state.block_on(fetcher.fetch_png(&params.url))?);
            state.cache.put(params.url, Arc::clone(&png));
            png
        }
    };

    to_result(FetchImageResult {
        mime: OUTPUT_MIME,
        data: base64::engine::general_purpose::STANDARD.encode(png.as_slice()),
        bytes: png.len(),
    })
}

/// Handles the download method.
fn handle_download(
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: DownloadParams = parse_params(params)?;
    let output_dir = params
        .output_dir
        .unwrap_or_else(|| state.config.effective_output_path());

    let artifact = state.block_on(package(
        Arc::clone(&state.fetcher),
        &params.images,
        state.config.max_concurrent,
    ))?;

    let Some(artifact) = artifact else {
        return to_result(DownloadResult::empty());
    };

    let path = artifact.write_to(&output_dir)?;

    to_result(DownloadResult {
        status: DownloadStatus::Complete,
        path: Some(path.to_string_lossy().to_string()),
        kind: Some(artifact.kind()),
        entries: artifact.entries(),
        skipped: artifact.skipped().to_vec(),
    })
}

/// Handles the get_session method.
fn handle_get_session(state: &ServerState) -> Result<serde_json::Value, JsonRpcError> {
    to_result(state.session.snapshot())
}

/// Handles the clear_images method.
///
/// Drops the persisted descriptor list and every cached PNG.
fn handle_clear_images(state: &mut ServerState) -> Result<serde_json::Value, JsonRpcError> {
    if let Err(e) = state.session.remove(SessionKey::Images) {
        warn!(error = %e, "failed to clear persisted images");
    }
    info!(cached = state.cache.len(), "clearing cached images");
    state.cache.clear();
    Ok(serde_json::json!({ "status": "cleared" }))
}

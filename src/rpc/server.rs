//! JSON-RPC server over stdin/stdout.
//!
//! Implements the JSON-RPC 2.0 protocol for daemon communication.

use std::future::Future;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::cache::ImageCache;
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::proxy::ImageFetcher;
use crate::session::SessionStore;

use super::methods::handle_request;
use super::types::{JsonRpcError, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse};

/// State shared across all request handlers.
pub struct ServerState {
    /// Daemon configuration.
    pub config: AppConfig,
    /// HTTP fetcher shared with packager tasks.
    pub fetcher: Arc<ImageFetcher>,
    /// Converted images by URL.
    pub cache: ImageCache,
    /// Persisted user session.
    pub session: SessionStore,
    /// Runtime the synchronous request loop blocks on.
    runtime: tokio::runtime::Runtime,
    /// Flag to signal server shutdown.
    shutdown: Arc<AtomicBool>,
}

impl ServerState {
    /// Creates new server state.
    pub fn new(config: AppConfig) -> Result<Self> {
        let fetcher = ImageFetcher::new(config.timeout())?;
        Self::with_fetcher(config, fetcher)
    }

    /// Creates server state around an existing fetcher.
    pub fn with_fetcher(config: AppConfig, fetcher: ImageFetcher) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("alg-to-img-worker")
            .build()
            .map_err(|e| AppError::internal("Failed to start async runtime", e))?;

        Ok(Self {
            cache: ImageCache::with_capacity(config.cache_entries),
            session: SessionStore::new(config.effective_session_path()),
            fetcher: Arc::new(fetcher),
            runtime,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Runs a future to completion on the daemon runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Signals the server to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Returns true if shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Runs the JSON-RPC server, reading from stdin and writing to stdout.
pub fn run_server(mut state: ServerState) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let reader = stdin.lock();

    info!("JSON-RPC server started, waiting for requests");

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "error reading stdin");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = process_request(&line, &mut state) {
            writeln!(stdout, "{}", response).ok();
            stdout.flush().ok();
        }

        if state.is_shutdown() {
            info!("server shutdown requested");
            break;
        }
    }

    info!("JSON-RPC server stopped");
    Ok(())
}

/// Processes a single JSON-RPC request line.
pub fn process_request(line: &str, state: &mut ServerState) -> Option<String> {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            let error = JsonRpcErrorResponse::new(
                None,
                JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
            );
            return Some(serde_json::to_string(&error).unwrap_or_default());
        }
    };

    if request.jsonrpc != "2.0" {
        let error = JsonRpcErrorResponse::new(
            Some(request.id),
            JsonRpcError::invalid_request("Invalid JSON-RPC version (expected 2.0)"),
        );
        return Some(serde_json::to_string(&error).unwrap_or_default());
    }

    debug!(method = %request.method, "handling request");
    let result = handle_request(&request.method, request.params, state);

    match result {
        Ok(response) => Some(
            serde_json::to_string(&JsonRpcResponse::new(request.id, response)).unwrap_or_default(),
        ),
        Err(error) => Some(
            serde_json::to_string(&JsonRpcErrorResponse::new(Some(request.id), error))
                .unwrap_or_default(),
        ),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::proxy::fetch::test_server;

    /// State with session and output under `dir` and a proxy-free client.
    pub fn state_in(dir: &std::path::Path) -> ServerState {
        let config = AppConfig {
            session_path: Some(dir.join("session")),
            output_path: Some(dir.join("out")),
            ..Default::default()
        };
        ServerState::with_fetcher(config, ImageFetcher::with_client(test_server::client())).unwrap()
    }
}

//! Runtime configuration.
//!
//! Covers the renderer endpoint, network limits, output and session
//! locations, and log level.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::images::DEFAULT_MAX_ENTRIES;
use crate::visualcube::DEFAULT_RENDERER_URL;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of simultaneous image fetches in a batch.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Runtime configuration for the daemon and the CLI.
///
/// Loaded from environment variables at startup; CLI flags override it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Renderer endpoint the request builder targets.
    pub renderer_url: String,

    /// Directory downloads are written to.
    /// If None, uses the platform download directory.
    pub output_path: Option<PathBuf>,

    /// Directory holding persisted session state.
    /// If None, uses the platform config directory.
    pub session_path: Option<PathBuf>,

    /// Timeout for a single image fetch, in seconds.
    pub timeout_secs: u64,

    /// Maximum simultaneous fetches during a batch download.
    pub max_concurrent: usize,

    /// Number of converted images kept in memory by the daemon.
    pub cache_entries: usize,

    /// Log level for the tracing subscriber (error, warn, info, debug, trace).
    pub log_level: String,
}

impl AppConfig {
    /// Creates a new AppConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an AppConfig from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `ALG_TO_IMG_RENDERER_URL` - Renderer endpoint
    /// - `ALG_TO_IMG_OUTPUT_PATH` - Download directory
    /// - `ALG_TO_IMG_SESSION_PATH` - Session directory
    /// - `ALG_TO_IMG_TIMEOUT_SECS` - Fetch timeout (1-300)
    /// - `ALG_TO_IMG_MAX_CONCURRENT` - Parallel fetches (1-64)
    /// - `ALG_TO_IMG_CACHE_ENTRIES` - In-memory image cache size
    /// - `ALG_TO_IMG_LOG` - Log level
    ///
    /// Falls back to defaults for unset or invalid variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("ALG_TO_IMG_RENDERER_URL") {
            if url::Url::parse(&url).is_ok() {
                config.renderer_url = url;
            }
        }

        if let Ok(path) = std::env::var("ALG_TO_IMG_OUTPUT_PATH") {
            config.output_path = Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("ALG_TO_IMG_SESSION_PATH") {
            config.session_path = Some(PathBuf::from(path));
        }

        if let Ok(timeout_str) = std::env::var("ALG_TO_IMG_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout_str.parse::<u64>() {
                if (1..=300).contains(&timeout) {
                    config.timeout_secs = timeout;
                }
            }
        }

        if let Ok(max_str) = std::env::var("ALG_TO_IMG_MAX_CONCURRENT") {
            if let Ok(max) = max_str.parse::<usize>() {
                if (1..=64).contains(&max) {
                    config.max_concurrent = max;
                }
            }
        }

        if let Ok(entries_str) = std::env::var("ALG_TO_IMG_CACHE_ENTRIES") {
            if let Ok(entries) = entries_str.parse::<usize>() {
                config.cache_entries = entries;
            }
        }

        if let Ok(level) = std::env::var("ALG_TO_IMG_LOG") {
            if level.parse::<tracing::Level>().is_ok() {
                config.log_level = level;
            }
        }

        config
    }

    /// Fetch timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the effective output path, using platform defaults if not specified.
    pub fn effective_output_path(&self) -> PathBuf {
        if let Some(ref path) = self.output_path {
            path.clone()
        } else {
            default_output_path()
        }
    }

    /// Returns the effective session path, using platform defaults if not specified.
    pub fn effective_session_path(&self) -> PathBuf {
        if let Some(ref path) = self.session_path {
            path.clone()
        } else {
            default_session_path()
        }
    }

    /// Parsed log level, `info` when unparseable.
    pub fn log_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if url::Url::parse(&self.renderer_url).is_err() {
            return Some(format!("renderer_url is not a valid URL: {}", self.renderer_url));
        }

        if self.timeout_secs == 0 {
            return Some("timeout_secs must be > 0".to_string());
        }

        if self.max_concurrent == 0 {
            return Some("max_concurrent must be > 0".to_string());
        }
        if self.max_concurrent > 64 {
            return Some(format!("max_concurrent too high: {} (max 64)", self.max_concurrent));
        }

        None
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            renderer_url: DEFAULT_RENDERER_URL.to_string(),
            output_path: None,
            session_path: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            cache_entries: DEFAULT_MAX_ENTRIES,
            log_level: "info".to_string(),
        }
    }
}

/// Returns the platform-specific default download directory.
///
/// Uses the `directories` crate to find appropriate locations:
/// - macOS: ~/Downloads
/// - Linux: $XDG_DOWNLOAD_DIR or ~/Downloads
/// - Windows: C:\Users\<user>\Downloads
fn default_output_path() -> PathBuf {
    if let Some(user_dirs) = directories::UserDirs::new() {
        if let Some(downloads) = user_dirs.download_dir() {
            return downloads.to_path_buf();
        }
    }
    // Fallback to current directory
    PathBuf::from(".")
}

/// Returns the platform-specific default session directory.
///
/// - macOS: ~/Library/Application Support/alg-to-img/session
/// - Linux: ~/.config/alg-to-img/session
/// - Windows: C:\Users\<user>\AppData\Roaming\alg-to-img\config\session
fn default_session_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "alg-to-img") {
        proj_dirs.config_dir().join("session")
    } else {
        PathBuf::from("./session")
    }
}

//! alg-to-img: turn twisty-puzzle algorithms into VisualCube images.
//!
//! The pipeline is a chain of small steps:
//! raw text → [`notation::sanitize`] → [`visualcube::generate_images`]
//! → [`proxy`] fetch and PNG conversion → [`package`] single file or zip.
//!
//! # Modules
//!
//! - [`notation`]: Move grammar, sanitizer and mirror transform
//! - [`types`]: Core data types (RenderOptions, ImageDescriptor)
//! - [`visualcube`]: Renderer URL construction
//! - [`proxy`]: Image fetching and normalization to PNG
//! - [`package`]: Concurrent batch download into one file or a zip
//! - [`cache`]: In-memory LRU of converted images
//! - [`session`]: Persisted last options, input and results
//! - [`rpc`]: JSON-RPC daemon surface
//! - [`config`]: Runtime configuration (AppConfig)
//! - [`error`]: Error types and codes (AppError, ErrorCode)
//!
//! # Example
//!
//! ```rust
//! use alg_to_img::{generate_images, sanitize, RenderOptions, TopColor};
//!
//! let input = sanitize("R U R' U'\nF2 B2 nonsense");
//! let options = RenderOptions {
//!     top_color: TopColor::White,
//!     mirror: true,
//!     ..Default::default()
//! };
//!
//! let images = generate_images(
//!     alg_to_img::visualcube::DEFAULT_RENDERER_URL,
//!     &input.algorithms,
//!     &options,
//! );
//! assert_eq!(images.len(), 2);
//! assert_eq!(images[0].alg, "R U R' U'");
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod notation;
pub mod package;
pub mod proxy;
pub mod rpc;
pub mod session;
pub mod types;
pub mod visualcube;

// Re-export commonly used types at crate root for convenience
pub use config::AppConfig;
pub use error::{AppError, ErrorCode, Result};
pub use notation::{mirror_algorithm, sanitize, Sanitized};
pub use package::{package, Artifact};
pub use types::{ImageDescriptor, RenderOptions, Stage, TopColor};
pub use visualcube::generate_images;

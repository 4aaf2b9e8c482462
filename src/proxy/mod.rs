//! Image fetch/convert proxy.
//!
//! Retrieves renderer images and normalizes them to PNG.

pub mod convert;
pub mod fetch;

pub use convert::{looks_like_svg, to_png};
pub use fetch::{ImageFetcher, ImageSource, USER_AGENT};

/// MIME type of everything the proxy returns.
pub const OUTPUT_MIME: &str = "image/png";

//! Core types for alg-to-img.
//!
//! - [`RenderOptions`]: global rendering choices for one request
//! - [`ImageDescriptor`]: an algorithm paired with its renderer URL
//! - [`FetchOutcome`]: per-item result of a batch download

mod image;
mod options;

pub use image::{FetchOutcome, ImageDescriptor, SkippedImage};
pub use options::{RenderOptions, Stage, TopColor, IMAGE_SIZES, PUZZLE_ORDERS};

//! Cache module for converted images.
//!
//! Provides LRU-based caching of proxy output.

pub mod images;

pub use images::ImageCache;

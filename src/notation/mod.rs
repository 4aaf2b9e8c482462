//! Cube notation handling.
//!
//! - [`moves`]: move tokens and algorithms
//! - [`sanitize`]: filtering raw user text into legal algorithms
//! - [`mirror`]: left/right mirror transform

pub mod mirror;
pub mod moves;
pub mod sanitize;

pub use mirror::{mirror_algorithm, mirror_token};
pub use moves::{Algorithm, MoveToken, Suffix};
pub use sanitize::{sanitize, Sanitized};

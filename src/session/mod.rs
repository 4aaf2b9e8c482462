//! Persisted user session: last options, input text and results.
//!
//! Owned by the daemon layer; the core pipeline never touches it.

pub mod store;

pub use store::{Session, SessionKey, SessionStore};

//! VisualCube request construction.
//!
//! Pure functions only; nothing here touches the network.

pub mod batch;
pub mod request;
pub mod scheme;

pub use batch::generate_images;
pub use request::{build_url, encode_component, payload_key, DEFAULT_RENDERER_URL, RENDER_FORMAT};
pub use scheme::color_scheme;

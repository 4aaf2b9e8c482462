//! Renderer URL construction.
//!
//! Parameter order and names follow the VisualCube contract:
//! `fmt`, `size`, `pzl`, then `alg` or `case`, then the optional
//! `view`, `stage` and `sch`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::types::RenderOptions;

/// Public VisualCube endpoint.
pub const DEFAULT_RENDERER_URL: &str = "https://visualcube.api.cubing.net/visualcube.php";

/// Output format requested from the renderer.
pub const RENDER_FORMAT: &str = "svg";

/// Characters left unescaped by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Query key carrying the algorithm.
///
/// `case` renders the state the algorithm solves; `alg` renders the state
/// after applying it, which is what "inverse" shows.
pub fn payload_key(inverse: bool) -> &'static str {
    if inverse {
        "alg"
    } else {
        "case"
    }
}

/// Percent-encodes a query component.
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Separator between the endpoint and the render parameters.
///
/// Endpoints configured with their own query (an API key, say) are extended
/// with `&` rather than given a second `?`.
fn query_separator(base: &str) -> &'static str {
    if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    }
}

/// Builds the renderer URL for one algorithm.
///
/// `scheme` is the resolved color scheme, shared by every item of a batch.
pub fn build_url(base: &str, alg: &str, options: &RenderOptions, scheme: Option<&str>) -> String {
    let mut url = format!(
        "{}{}fmt={}&size={}&pzl={}&{}={}",
        base,
        query_separator(base),
        RENDER_FORMAT,
        options.size,
        options.pzl,
        payload_key(options.inverse),
        encode_component(alg)
    );

    if options.view {
        url.push_str("&view=plan");
    }
    if let Some(stage) = options.stage.query_value() {
        url.push_str("&stage=");
        url.push_str(stage);
    }
    if let Some(scheme) = scheme {
        url.push_str("&sch=");
        url.push_str(scheme);
    }

    url
}

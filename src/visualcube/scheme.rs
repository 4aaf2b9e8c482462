//! Top color to renderer color-scheme code.
//!
//! VisualCube's `sch` parameter lists sticker colors in U R F D L B order.
//! Yellow on top is the renderer's own default, so it needs no override.

use crate::types::TopColor;

/// Returns the `sch` code for a top color, None when the default applies.
pub fn color_scheme(top: TopColor) -> Option<&'static str> {
    match top {
        TopColor::Yellow => None,
        TopColor::White => Some("wrgyob"),
        TopColor::Green => Some("grybow"),
        TopColor::Blue => Some("brwgoy"),
        TopColor::Red => Some("rwboyg"),
        TopColor::Orange => Some("oybrwg"),
    }
}

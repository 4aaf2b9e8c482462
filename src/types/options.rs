//! RenderOptions and the enums it is built from.
//!
//! These are the global rendering choices shared by every algorithm in one
//! generation request. Field names on the wire are the web client's
//! (`pzl`, `view`, `stage`, `size`, `inverse`, `mirror`, `topColor`).

use serde::{Deserialize, Serialize};

/// Puzzle orders the renderer supports (2x2 through 7x7).
pub const PUZZLE_ORDERS: std::ops::RangeInclusive<u8> = 2..=7;

/// Allowed image sizes in pixels.
pub const IMAGE_SIZES: [u32; 4] = [128, 256, 512, 1024];

/// Solve stage used to request highlighted rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stage {
    /// No stage mask; the `stage` parameter is omitted.
    #[serde(rename = "", alias = "none")]
    None,
    /// Last layer.
    #[default]
    #[serde(rename = "ll")]
    Ll,
    /// Orientation of the last layer.
    #[serde(rename = "oll")]
    Oll,
    /// Corners of the last layer.
    #[serde(rename = "coll")]
    Coll,
}

impl Stage {
    /// Returns the renderer's value for this stage, None for [`Stage::None`].
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            Stage::None => None,
            Stage::Ll => Some("ll"),
            Stage::Oll => Some("oll"),
            Stage::Coll => Some("coll"),
        }
    }
}

/// Color of the top face, which selects the renderer color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TopColor {
    /// Renderer default orientation.
    #[default]
    Yellow,
    White,
    Green,
    Blue,
    Red,
    Orange,
}

impl TopColor {
    /// Returns the string representation of the color.
    pub fn as_str(&self) -> &'static str {
        match self {
            TopColor::Yellow => "yellow",
            TopColor::White => "white",
            TopColor::Green => "green",
            TopColor::Blue => "blue",
            TopColor::Red => "red",
            TopColor::Orange => "orange",
        }
    }
}

impl std::fmt::Display for TopColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rendering options shared by every algorithm of one request.
///
/// Immutable once a request is built. Missing fields take the defaults of
/// the web client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    /// Puzzle order, 2..=7.
    pub pzl: u8,

    /// Plan (top-down) view.
    pub view: bool,

    /// Stage mask.
    pub stage: Stage,

    /// Image size in pixels, one of [`IMAGE_SIZES`].
    pub size: u32,

    /// Render the inverse of the algorithm (the case it solves).
    pub inverse: bool,

    /// Mirror the algorithm left/right before rendering.
    pub mirror: bool,

    /// Top face color.
    pub top_color: TopColor,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pzl: 3,
            view: true,
            stage: Stage::Ll,
            size: 128,
            inverse: false,
            mirror: false,
            top_color: TopColor::Yellow,
        }
    }
}

impl RenderOptions {
    /// Validates the options.
    ///
    /// Returns an error message if validation fails, None otherwise.
    pub fn validate(&self) -> Option<String> {
        if !PUZZLE_ORDERS.contains(&self.pzl) {
            return Some(format!(
                "Invalid puzzle order: {} (must be between {} and {})",
                self.pzl,
                PUZZLE_ORDERS.start(),
                PUZZLE_ORDERS.end()
            ));
        }

        if !IMAGE_SIZES.contains(&self.size) {
            return Some(format!(
                "Invalid size: {} (must be one of {:?})",
                self.size, IMAGE_SIZES
            ));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_client_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.pzl, 3);
        assert!(options.view);
        assert_eq!(options.stage, Stage::Ll);
        assert_eq!(options.size, 128);
        assert!(!options.inverse);
        assert!(!options.mirror);
        assert_eq!(options.top_color, TopColor::Yellow);
        assert!(options.validate().is_none());
    }

    #[test]
    fn deserialize_client_payload() {
        let options: RenderOptions = serde_json::from_value(serde_json::json!({
            "pzl": 4,
            "view": false,
            "stage": "coll",
            "size": 512,
            "inverse": true,
            "mirror": true,
            "topColor": "orange"
        }))
        .unwrap();

        assert_eq!(options.pzl, 4);
        assert!(!options.view);
        assert_eq!(options.stage, Stage::Coll);
        assert_eq!(options.size, 512);
        assert!(options.inverse);
        assert!(options.mirror);
        assert_eq!(options.top_color, TopColor::Orange);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let options: RenderOptions = serde_json::from_str(r#"{"size": 256}"#).unwrap();
        assert_eq!(options.size, 256);
        assert_eq!(options.pzl, 3);
        assert_eq!(options.stage, Stage::Ll);
    }

    #[test]
    fn stage_none_accepts_empty_and_none() {
        let empty: Stage = serde_json::from_str(r#""""#).unwrap();
        let none: Stage = serde_json::from_str(r#""none""#).unwrap();
        assert_eq!(empty, Stage::None);
        assert_eq!(none, Stage::None);
        assert_eq!(serde_json::to_string(&Stage::None).unwrap(), r#""""#);
        assert_eq!(Stage::None.query_value(), None);
        assert_eq!(Stage::Oll.query_value(), Some("oll"));
    }

    #[test]
    fn top_color_wire_names() {
        let white: TopColor = serde_json::from_str(r#""white""#).unwrap();
        assert_eq!(white, TopColor::White);
        assert_eq!(serde_json::to_string(&TopColor::Orange).unwrap(), r#""orange""#);
        assert!(serde_json::from_str::<TopColor>(r#""purple""#).is_err());
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let mut options = RenderOptions::default();
        options.pzl = 8;
        assert!(options.validate().is_some());

        options.pzl = 2;
        options.size = 300;
        assert!(options.validate().is_some());

        options.size = 1024;
        assert!(options.validate().is_none());
    }
}

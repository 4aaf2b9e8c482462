//! Normalization of raw, multi-line algorithm input.

use super::moves::Algorithm;

/// Result of sanitizing user input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sanitized {
    /// One normalized algorithm per surviving line, in input order.
    pub algorithms: Vec<String>,
}

impl Sanitized {
    /// Returns the normalized text that replaces the raw input.
    pub fn text(&self) -> String {
        self.algorithms.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

/// Filters raw text into normalized algorithm strings.
///
/// Each line is trimmed and split on single spaces; tokens outside the move
/// grammar are dropped without any report, survivors are rejoined with single
/// spaces, and lines left empty disappear.
pub fn sanitize(text: &str) -> Sanitized {
    let algorithms = text
        .lines()
        .map(Algorithm::from_line)
        .filter(|alg| !alg.is_empty())
        .map(|alg| alg.to_string())
        .collect();

    Sanitized { algorithms }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_illegal_token_and_trailing_space() {
        let out = sanitize("R U2 Q F'  ");
        assert_eq!(out.algorithms, vec!["R U2 F'"]);
    }

    #[test]
    fn keeps_line_order_and_removes_empty_lines() {
        let out = sanitize("R U R' U'\n\n   \nF2 B2\nhello world\nM2 E S'");
        assert_eq!(out.algorithms, vec!["R U R' U'", "F2 B2", "M2 E S'"]);
    }

    #[test]
    fn line_of_only_invalid_tokens_vanishes() {
        assert!(sanitize("Q W K3").is_empty());
    }

    #[test]
    fn preserves_relative_order_of_survivors() {
        let out = sanitize("x Q y' 7 z2 R");
        assert_eq!(out.algorithms, vec!["x y' z2 R"]);
    }

    #[test]
    fn handles_crlf_input() {
        let out = sanitize("R U\r\nF'\r\n");
        assert_eq!(out.algorithms, vec!["R U", "F'"]);
    }

    #[test]
    fn text_joins_with_newlines() {
        let out = sanitize("R\nU");
        assert_eq!(out.text(), "R\nU");
        assert_eq!(sanitize("").text(), "");
    }
}

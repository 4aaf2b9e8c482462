//! ImageDescriptor and per-item fetch outcomes.

use serde::{Deserialize, Serialize};

/// One generated image reference, labelled with the algorithm as the user
/// wrote it (never the mirrored form).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Original algorithm text.
    pub alg: String,

    /// Renderer URL for the image.
    pub url: String,
}

impl ImageDescriptor {
    pub fn new(alg: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            url: url.into(),
        }
    }
}

/// An item the packager had to leave out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedImage {
    /// 1-based position in the requested batch.
    pub position: usize,

    /// Algorithm label of the skipped descriptor.
    pub alg: String,

    /// Error code of the failure.
    pub code: String,

    /// Human-readable failure message.
    pub reason: String,
}

/// Result of retrieving one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// PNG bytes for the item at `position` (1-based).
    Fetched { position: usize, png: Vec<u8> },
    /// The item at `position` was skipped.
    Skipped(SkippedImage),
}

impl FetchOutcome {
    /// Returns the 1-based batch position of this outcome.
    pub fn position(&self) -> usize {
        match self {
            FetchOutcome::Fetched { position, .. } => *position,
            FetchOutcome::Skipped(skipped) => skipped.position,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchOutcome::Fetched { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_serializes_as_alg_and_url() {
        let d = ImageDescriptor::new("R U", "https://example.com/?case=R%20U");
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["alg"], "R U");
        assert_eq!(json["url"], "https://example.com/?case=R%20U");
    }

    #[test]
    fn outcome_position() {
        let ok = FetchOutcome::Fetched {
            position: 2,
            png: vec![1],
        };
        let skipped = FetchOutcome::Skipped(SkippedImage {
            position: 3,
            alg: "R".to_string(),
            code: "FETCH_FAILED".to_string(),
            reason: "HTTP 500".to_string(),
        });
        assert_eq!(ok.position(), 2);
        assert!(ok.is_fetched());
        assert_eq!(skipped.position(), 3);
        assert!(!skipped.is_fetched());
    }
}

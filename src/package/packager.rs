//! Concurrent batch download with partial-failure tolerance.
//!
//! Every descriptor is fetched as an independent task. Failures are logged
//! and recorded, never propagated, except for a batch of exactly one image
//! where the caller gets the error back. Archive entries are named and
//! ordered by input position regardless of completion order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::error::{AppError, ErrorCode, Result};
use crate::proxy::ImageSource;
use crate::types::{FetchOutcome, ImageDescriptor, SkippedImage};

use super::archive::build_archive;

/// File name of a single-image download.
pub const SINGLE_FILE_NAME: &str = "alg.png";

/// File name of a multi-image download.
pub const ARCHIVE_FILE_NAME: &str = "alg-imgs.zip";

/// Archive entry name for a 1-based batch position.
pub fn entry_name(position: usize) -> String {
    format!("alg{}.png", position)
}

/// The final deliverable of a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    /// One converted image.
    Single { file_name: &'static str, bytes: Vec<u8> },
    /// A zip of every image that could be fetched.
    Archive {
        file_name: &'static str,
        bytes: Vec<u8>,
        entries: usize,
        skipped: Vec<SkippedImage>,
    },
}

impl Artifact {
    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::Single { file_name, .. } | Artifact::Archive { file_name, .. } => *file_name,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Artifact::Single { bytes, .. } | Artifact::Archive { bytes, .. } => bytes,
        }
    }

    /// Returns "single" or "archive".
    pub fn kind(&self) -> &'static str {
        match self {
            Artifact::Single { .. } => "single",
            Artifact::Archive { .. } => "archive",
        }
    }

    /// Number of images contained in the artifact.
    pub fn entries(&self) -> usize {
        match self {
            Artifact::Single { .. } => 1,
            Artifact::Archive { entries, .. } => *entries,
        }
    }

    pub fn skipped(&self) -> &[SkippedImage] {
        match self {
            Artifact::Single { .. } => &[],
            Artifact::Archive { skipped, .. } => skipped,
        }
    }

    /// Writes the artifact into `dir`, creating it if needed, and returns
    /// the written path. An existing file of the same name is replaced.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| AppError::output_write_failed(dir, e))?;
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.bytes()).map_err(|e| AppError::output_write_failed(&path, e))?;
        info!(path = %path.display(), bytes = self.bytes().len(), "artifact written");
        Ok(path)
    }
}

/// Downloads `images` and packages them.
///
/// - no images: `Ok(None)`
/// - one image: the converted PNG, or the fetch error
/// - several: a zip of the successes, possibly empty
pub async fn package<S: ImageSource>(
    source: Arc<S>,
    images: &[ImageDescriptor],
    max_concurrent: usize,
) -> Result<Option<Artifact>> {
    match images {
        [] => Ok(None),
        [only] => {
            let bytes = source.fetch_png(&only.url).await?;
            Ok(Some(Artifact::Single {
                file_name: SINGLE_FILE_NAME,
                bytes,
            }))
        }
        _ => {
            let outcomes = fetch_all(source, images, max_concurrent).await;
            archive_outcomes(outcomes).map(Some)
        }
    }
}

/// Fetches every descriptor, at most `max_concurrent` at a time.
///
/// The returned outcomes are in input order.
pub async fn fetch_all<S: ImageSource>(
    source: Arc<S>,
    images: &[ImageDescriptor],
    max_concurrent: usize,
) -> Vec<FetchOutcome> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut tasks = JoinSet::new();

    for (index, image) in images.iter().enumerate() {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let url = image.url.clone();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok();
            (index, source.fetch_png(&url).await)
        });
    }

    let mut results: Vec<Option<Result<Vec<u8>>>> = (0..images.len()).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, result)) => results[index] = Some(result),
            Err(e) => warn!(error = %e, "image fetch task did not complete"),
        }
    }

    results
        .into_iter()
        .zip(images)
        .enumerate()
        .map(|(index, (result, image))| {
            let position = index + 1;
            match result {
                Some(Ok(png)) => FetchOutcome::Fetched { position, png },
                Some(Err(err)) => {
                    warn!(position, url = %image.url, error = %err.message, "skipping image");
                    FetchOutcome::Skipped(SkippedImage {
                        position,
                        alg: image.alg.clone(),
                        code: err.code.as_str().to_string(),
                        reason: err.message,
                    })
                }
                None => {
                    warn!(position, url = %image.url, "skipping image, fetch task aborted");
                    FetchOutcome::Skipped(SkippedImage {
                        position,
                        alg: image.alg.clone(),
                        code: ErrorCode::FetchFailed.as_str().to_string(),
                        reason: "fetch task aborted".to_string(),
                    })
                }
            }
        })
        .collect()
}

/// Writes fetched outcomes into an archive, ordered by position.
pub fn archive_outcomes(mut outcomes: Vec<FetchOutcome>) -> Result<Artifact> {
    outcomes.sort_by_key(FetchOutcome::position);

    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            FetchOutcome::Fetched { position, png } => entries.push((entry_name(position), png)),
            FetchOutcome::Skipped(s) => skipped.push(s),
        }
    }

    let count = entries.len();
    let bytes = build_archive(entries)?;
    info!(entries = count, skipped = skipped.len(), "archive finalized");

    Ok(Artifact::Archive {
        file_name: ARCHIVE_FILE_NAME,
        bytes,
        entries: count,
        skipped,
    })
}

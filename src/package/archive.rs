//! In-memory zip archive of converted images.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppError, ErrorCode, Result};

/// Builds a zip archive from `(name, bytes)` entries, in the given order.
///
/// An empty iterator yields a valid, empty archive.
pub fn build_archive<I>(entries: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (String, Vec<u8>)>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    // PNG data is already compressed.
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, bytes) in entries {
        writer.start_file(name, options).map_err(AppError::archive_failed)?;
        writer.write_all(&bytes).map_err(|e| {
            AppError::with_source(ErrorCode::ArchiveFailed, "Failed to write archive entry", e)
        })?;
    }

    let cursor = writer.finish().map_err(AppError::archive_failed)?;
    Ok(cursor.into_inner())
}

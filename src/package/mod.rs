//! Batch packager: downloads descriptors and delivers one PNG or a zip.

pub mod archive;
pub mod packager;

pub use archive::build_archive;
pub use packager::{
    archive_outcomes, entry_name, fetch_all, package, Artifact, ARCHIVE_FILE_NAME,
    SINGLE_FILE_NAME,
};

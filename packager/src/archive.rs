//! Zip archive creation from a staging directory.
//!
//! Every regular file beneath the staging directory becomes one deflated
//! entry named by its path relative to the staging root, always with `/`
//! separators. Directories are implied by entry names and never stored. A
//! failure part-way through leaves the partial archive on disk.

use crate::error::{PackagingError, Result};
use crate::output::format_mib;
use crate::stamp::RunStamp;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use packwright_common::TreeWalk;
use std::fs::{self, File};
use std::io;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Summary of a written archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// Path of the archive file.
    pub path: Utf8PathBuf,
    /// Number of file entries written.
    pub entries: usize,
    /// Size of the archive file in bytes.
    pub size_bytes: u64,
}

impl ArchiveSummary {
    /// Archive size in mebibytes, formatted to two decimal places.
    #[must_use]
    pub fn size_display(&self) -> String {
        format_mib(self.size_bytes)
    }
}

/// File name of the archive for a run.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use packwright::archive::archive_file_name;
/// use packwright::stamp::RunStamp;
///
/// let at = NaiveDate::from_ymd_opt(2026, 1, 2)
///     .and_then(|d| d.and_hms_opt(3, 4, 5))
///     .expect("valid date");
/// assert_eq!(
///     archive_file_name("Demo", &RunStamp::from_datetime(at)),
///     "Demo_20260102_030405.zip"
/// );
/// ```
#[must_use]
pub fn archive_file_name(project_name: &str, stamp: &RunStamp) -> String {
    format!("{project_name}_{}.zip", stamp.id())
}

/// Archive entry name for `file`, relative to `root` with `/` separators.
///
/// Returns `None` when `file` does not lie beneath `root`.
#[must_use]
pub fn entry_name(root: &Utf8Path, file: &Utf8Path) -> Option<String> {
    let relative = file.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative.components().map(|c| c.as_str()).collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}

/// Write every file beneath `source_dir` into a new zip at `archive_path`.
///
/// # Errors
///
/// Returns [`PackagingError::Walk`] if the tree cannot be enumerated,
/// [`PackagingError::ArchiveSource`] if a staged file cannot be read, or
/// [`PackagingError::Archive`] if the archive cannot be written.
pub fn create_archive(source_dir: &Utf8Path, archive_path: &Utf8Path) -> Result<ArchiveSummary> {
    let output = File::create(archive_path)
        .map_err(|source| PackagingError::archive_io(archive_path, source))?;
    let mut writer = ZipWriter::new(output);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0;
    for item in TreeWalk::new(source_dir).files() {
        let entry = item.map_err(|source| PackagingError::Walk {
            path: source_dir.to_owned(),
            source,
        })?;
        let Some(name) = entry_name(source_dir, &entry.path) else {
            continue;
        };

        debug!("archiving {name}");
        writer
            .start_file(name, options)
            .map_err(|source| PackagingError::archive(archive_path, source))?;
        let source_err = |source| PackagingError::ArchiveSource {
            file: entry.path.clone(),
            archive: archive_path.to_owned(),
            source,
        };
        let mut input = File::open(&entry.path).map_err(source_err)?;
        io::copy(&mut input, &mut writer).map_err(source_err)?;
        entries += 1;
    }

    writer
        .finish()
        .map_err(|source| PackagingError::archive(archive_path, source))?;

    let size_bytes = fs::metadata(archive_path)
        .map_err(|source| PackagingError::archive_io(archive_path, source))?
        .len();
    Ok(ArchiveSummary {
        path: archive_path.to_owned(),
        entries,
        size_bytes,
    })
}

/// List the entry names stored in an archive, in archive order.
///
/// # Errors
///
/// Returns [`PackagingError::Archive`] if the archive cannot be opened or
/// read.
pub fn list_archive_entries(archive_path: &Utf8Path) -> Result<Vec<String>> {
    let file =
        File::open(archive_path).map_err(|source| PackagingError::archive_io(archive_path, source))?;
    let mut archive =
        ZipArchive::new(file).map_err(|source| PackagingError::archive(archive_path, source))?;
    (0..archive.len())
        .map(|index| {
            archive
                .by_index(index)
                .map(|entry| entry.name().to_owned())
                .map_err(|source| PackagingError::archive(archive_path, source))
        })
        .collect()
}

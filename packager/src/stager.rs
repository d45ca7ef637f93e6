//! Copying resolved manifest items into a fresh staging directory.
//!
//! Each packaging run owns a staging directory named after the project and
//! the run stamp. Preparing the directory removes any same-named leftover
//! first, so a second run within the same second replaces the first run's
//! output. Any copy failure aborts staging.

use crate::error::{PackagingError, Result};
use crate::output::write_line;
use crate::resolution::{Resolution, ResolvedKind};
use crate::stamp::RunStamp;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, warn};
use packwright_common::{ItemPath, TreeWalk};
use std::collections::HashSet;
use std::fs::{self, FileTimes};
use std::io::{self, Write};
use std::path::PathBuf;

/// Whether [`Stager::prepare`] found a leftover directory to replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepareOutcome {
    /// The staging directory did not exist and was created.
    Created,
    /// A same-named directory existed and was replaced.
    Replaced,
}

/// The result of staging one resolved manifest item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedItem {
    /// A single file was copied.
    File {
        /// Manifest path of the file.
        path: ItemPath,
    },
    /// A directory subtree was copied.
    Directory {
        /// Manifest path of the directory.
        path: ItemPath,
        /// Number of files copied from the subtree.
        files: usize,
    },
    /// The item does not exist and was skipped.
    Skipped {
        /// Manifest path of the missing item.
        path: ItemPath,
    },
}

/// Outcome of staging every item of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    /// One entry per manifest item, in manifest order.
    pub items: Vec<StagedItem>,
}

impl StagingReport {
    /// Number of files copied, counting files inside staged directories.
    #[must_use]
    pub fn copied_files(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                StagedItem::File { .. } => 1,
                StagedItem::Directory { files, .. } => *files,
                StagedItem::Skipped { .. } => 0,
            })
            .sum()
    }

    /// Manifest paths that were missing and therefore skipped.
    pub fn skipped(&self) -> impl Iterator<Item = &ItemPath> {
        self.items.iter().filter_map(|item| match item {
            StagedItem::Skipped { path } => Some(path),
            StagedItem::File { .. } | StagedItem::Directory { .. } => None,
        })
    }
}

/// Handles staging of resolved items into a run's staging directory.
#[derive(Debug, Clone)]
pub struct Stager {
    staging_dir: Utf8PathBuf,
}

impl Stager {
    /// Create a stager for `project_name` under `output_dir`.
    #[must_use]
    pub fn new(output_dir: &Utf8Path, project_name: &str, stamp: &RunStamp) -> Self {
        Self {
            staging_dir: output_dir.join(staging_dir_name(project_name, stamp)),
        }
    }

    /// Return the full path to the staging directory.
    #[must_use]
    pub fn staging_path(&self) -> &Utf8Path {
        &self.staging_dir
    }

    /// Create an empty staging directory, replacing any leftover.
    ///
    /// # Errors
    ///
    /// Returns [`PackagingError::PrepareStaging`] if the leftover cannot be
    /// removed or the directory cannot be created.
    pub fn prepare(&self) -> Result<PrepareOutcome> {
        let prepare_err = |source| PackagingError::PrepareStaging {
            path: self.staging_dir.clone(),
            source,
        };

        let outcome = if self.staging_dir.exists() {
            warn!(
                "staging directory {} already exists; replacing it",
                self.staging_dir
            );
            fs::remove_dir_all(&self.staging_dir).map_err(prepare_err)?;
            PrepareOutcome::Replaced
        } else {
            PrepareOutcome::Created
        };

        fs::create_dir_all(&self.staging_dir).map_err(prepare_err)?;
        Ok(outcome)
    }

    /// Stage one resolved item.
    ///
    /// Directories are copied recursively and files individually; both keep
    /// their permissions and modification times. Missing items are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if any copy operation fails.
    pub fn stage(&self, resolution: &Resolution) -> Result<StagedItem> {
        let path = resolution.entry.path.clone();
        let dest = path.resolve_under(&self.staging_dir);
        match resolution.kind {
            ResolvedKind::Directory => {
                let files = copy_tree(&resolution.source, &dest)?;
                Ok(StagedItem::Directory { path, files })
            }
            ResolvedKind::File => {
                copy_file(&resolution.source, &dest)?;
                Ok(StagedItem::File { path })
            }
            ResolvedKind::Missing => Ok(StagedItem::Skipped { path }),
        }
    }

    /// Stage every resolved item, reporting progress to `progress`.
    ///
    /// Warnings about missing items are written even when `quiet` is set.
    ///
    /// # Errors
    ///
    /// Returns the first copy error; items after it are not staged.
    pub fn stage_all(
        &self,
        resolutions: &[Resolution],
        progress: &mut dyn Write,
        quiet: bool,
    ) -> Result<StagingReport> {
        let mut report = StagingReport::default();
        for resolution in resolutions {
            let path = &resolution.entry.path;
            match resolution.kind {
                ResolvedKind::Directory if !quiet => {
                    write_line(progress, format!("Copying directory: {path}"));
                }
                ResolvedKind::File if !quiet => {
                    write_line(progress, format!("Copying file: {path}"));
                }
                ResolvedKind::Missing => {
                    warn!("manifest item {path} does not exist; skipping");
                    write_line(
                        progress,
                        format!(
                            "Warning: missing item skipped: {path} ({})",
                            resolution.entry.label()
                        ),
                    );
                }
                ResolvedKind::Directory | ResolvedKind::File => {}
            }
            report.items.push(self.stage(resolution)?);
        }
        Ok(report)
    }
}

/// Name of the staging directory for a run.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use packwright::stager::staging_dir_name;
/// use packwright::stamp::RunStamp;
///
/// let at = NaiveDate::from_ymd_opt(2026, 1, 2)
///     .and_then(|d| d.and_hms_opt(3, 4, 5))
///     .expect("valid date");
/// let name = staging_dir_name("Demo", &RunStamp::from_datetime(at));
/// assert_eq!(name, "Demo_Package_20260102_030405");
/// ```
#[must_use]
pub fn staging_dir_name(project_name: &str, stamp: &RunStamp) -> String {
    format!("{project_name}_Package_{}", stamp.id())
}

/// Copy a directory subtree, returning the number of files copied.
///
/// Symlinked subdirectories are followed and their contents copied; a link
/// back into a directory already being copied is skipped.
fn copy_tree(from: &Utf8Path, to: &Utf8Path) -> Result<usize> {
    copy_tree_following(from, to, &mut HashSet::new())
}

fn copy_tree_following(
    from: &Utf8Path,
    to: &Utf8Path,
    visited: &mut HashSet<PathBuf>,
) -> Result<usize> {
    let canonical = fs::canonicalize(from).map_err(|source| PackagingError::Walk {
        path: from.to_owned(),
        source,
    })?;
    if !visited.insert(canonical) {
        warn!("symlink cycle at {from}; not copying it again");
        return Ok(0);
    }

    fs::create_dir_all(to).map_err(|source| PackagingError::Copy {
        from: from.to_owned(),
        to: to.to_owned(),
        source,
    })?;

    let mut files = 0;
    for item in TreeWalk::new(from) {
        let entry = item.map_err(|source| PackagingError::Walk {
            path: from.to_owned(),
            source,
        })?;
        let Some(relative) = entry.relative_to(from) else {
            continue;
        };
        let dest = to.join(relative);
        if entry.is_dir && entry.path.is_symlink() {
            files += copy_tree_following(&entry.path, &dest, visited)?;
        } else if entry.is_dir {
            fs::create_dir_all(&dest).map_err(|source| PackagingError::Copy {
                from: entry.path.clone(),
                to: dest.clone(),
                source,
            })?;
        } else {
            copy_file(&entry.path, &dest)?;
            files += 1;
        }
    }
    Ok(files)
}

/// Copy one file, creating missing parent directories and keeping its
/// permissions and timestamps.
fn copy_file(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    let copy_err = |source| PackagingError::Copy {
        from: from.to_owned(),
        to: to.to_owned(),
        source,
    };

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(copy_err)?;
    }
    fs::copy(from, to).map_err(copy_err)?;
    preserve_times(from, to).map_err(copy_err)?;
    debug!("copied {from} -> {to}");
    Ok(())
}

fn preserve_times(from: &Utf8Path, to: &Utf8Path) -> io::Result<()> {
    let meta = fs::metadata(from)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    // Read-only copies cannot be opened for writing; the owner can still
    // set explicit times through a read-only handle on Unix.
    let file = fs::File::options()
        .write(true)
        .open(to)
        .or_else(|_| fs::File::open(to))?;
    file.set_times(times)
}

#[cfg(test)]
#[path = "stager_tests.rs"]
mod tests;

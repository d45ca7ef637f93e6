//! The packaging pipeline: resolve, stage, describe, archive, summarise.
//!
//! [`plan_package`] performs every check that needs no writes and is what
//! `--dry-run` prints. [`run_package`] executes the plan; any error aborts
//! the run and leaves whatever was already written in place.

use crate::archive::{ArchiveSummary, archive_file_name, create_archive, list_archive_entries};
use crate::error::{PackagingError, Result};
use crate::metadata::write_project_info;
use crate::output::write_line;
use crate::resolution::{Resolution, ResolvedKind, resolve_manifest};
use crate::stager::{PrepareOutcome, Stager, StagingReport, staging_dir_name};
use crate::statistics::{Statistics, collect_statistics};
use crate::stamp::RunStamp;
use camino::{Utf8Path, Utf8PathBuf};
use log::info;
use packwright_common::PackwrightConfig;
use std::fs;
use std::io::Write;

/// Switches for a packaging run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackageOptions {
    /// Suppress per-item progress lines.
    pub quiet: bool,
    /// Re-open the archive after writing and count its entries.
    pub verify_archive: bool,
}

/// Everything a run will do, computed without touching the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePlan {
    /// Canonical project root.
    pub project_root: Utf8PathBuf,
    /// Directory receiving the staging directory and archive.
    pub output_dir: Utf8PathBuf,
    /// Staging directory for this run.
    pub staging_dir: Utf8PathBuf,
    /// Archive path for this run.
    pub archive_path: Utf8PathBuf,
    /// Resolved manifest items, in manifest order.
    pub resolutions: Vec<Resolution>,
}

impl PackagePlan {
    /// Console lines describing the plan.
    #[must_use]
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Project root: {}", self.project_root),
            format!("Staging directory: {}", self.staging_dir),
            format!("Archive: {}", self.archive_path),
        ];
        lines.extend(self.resolutions.iter().map(|resolution| {
            let path = &resolution.entry.path;
            match resolution.kind {
                ResolvedKind::Directory => format!("  would copy directory: {path}"),
                ResolvedKind::File => format!("  would copy file: {path}"),
                ResolvedKind::Missing => {
                    format!("  missing, would skip: {path} ({})", resolution.entry.label())
                }
            }
        }));
        lines
    }
}

/// Outputs of a completed packaging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    /// The populated staging directory.
    pub staging_dir: Utf8PathBuf,
    /// Whether a same-second leftover was replaced.
    pub prepare: PrepareOutcome,
    /// Per-item staging results.
    pub staging: StagingReport,
    /// Path of the generated project information document.
    pub info_file: Utf8PathBuf,
    /// The written archive.
    pub archive: ArchiveSummary,
    /// Entry count read back from the archive, when verification ran.
    pub verified_entries: Option<usize>,
    /// Statistics over the staged tree.
    pub statistics: Statistics,
}

/// Check the configuration and resolve the manifest without writing.
///
/// # Errors
///
/// Returns [`PackagingError::Config`] for unusable configuration,
/// [`PackagingError::ProjectRootMissing`] when the root is not a directory,
/// and [`PackagingError::OutputInsideProject`] when the output directory
/// lies beneath the root.
pub fn plan_package(config: &PackwrightConfig, stamp: &RunStamp) -> Result<PackagePlan> {
    config.validate_for_packaging()?;

    let project_root = canonical_root(&config.project.root)?;
    let output_dir = match &config.package.output_dir {
        Some(dir) => absolute(dir)?,
        None => project_root
            .parent()
            .map_or_else(|| project_root.clone(), Utf8Path::to_owned),
    };
    if output_dir.starts_with(&project_root) {
        return Err(PackagingError::OutputInsideProject {
            output: output_dir,
            root: project_root,
        });
    }

    let name = &config.project.name;
    Ok(PackagePlan {
        staging_dir: output_dir.join(staging_dir_name(name, stamp)),
        archive_path: output_dir.join(archive_file_name(name, stamp)),
        resolutions: resolve_manifest(&project_root, &config.package.items),
        project_root,
        output_dir,
    })
}

/// Run the whole packaging pipeline once.
///
/// Progress lines and missing-item warnings are written to `progress`.
///
/// # Errors
///
/// Returns the first error raised by planning, staging, metadata
/// generation or archiving.
pub fn run_package(
    config: &PackwrightConfig,
    stamp: &RunStamp,
    options: PackageOptions,
    progress: &mut dyn Write,
) -> Result<PackageOutcome> {
    let plan = plan_package(config, stamp)?;
    fs::create_dir_all(&plan.output_dir).map_err(|source| PackagingError::CreateOutputDir {
        path: plan.output_dir.clone(),
        source,
    })?;

    let stager = Stager::new(&plan.output_dir, &config.project.name, stamp);
    let prepare = stager.prepare()?;
    if !options.quiet {
        write_line(progress, format!("Staging into {}", stager.staging_path()));
    }
    let staging = stager.stage_all(&plan.resolutions, progress, options.quiet)?;

    let info_file = write_project_info(
        stager.staging_path(),
        &config.package.info_file,
        &config.project,
        stamp,
    )?;
    if !options.quiet {
        write_line(progress, format!("Generated {info_file}"));
        write_line(progress, format!("Creating archive {}", plan.archive_path));
    }

    let archive = create_archive(stager.staging_path(), &plan.archive_path)?;
    let verified_entries = if options.verify_archive {
        Some(list_archive_entries(&archive.path)?.len())
    } else {
        None
    };
    info!(
        "archived {} files into {} ({})",
        archive.entries,
        archive.path,
        archive.size_display()
    );

    let statistics = collect_statistics(stager.staging_path(), &config.statistics);
    Ok(PackageOutcome {
        staging_dir: stager.staging_path().to_owned(),
        prepare,
        staging,
        info_file,
        archive,
        verified_entries,
        statistics,
    })
}

fn canonical_root(root: &Utf8Path) -> Result<Utf8PathBuf> {
    let missing = || PackagingError::ProjectRootMissing {
        path: root.to_owned(),
    };
    if !root.is_dir() {
        return Err(missing());
    }
    let canonical = fs::canonicalize(root).map_err(|_| missing())?;
    utf8(canonical)
}

fn absolute(dir: &Utf8Path) -> Result<Utf8PathBuf> {
    let resolved = std::path::absolute(dir).map_err(|source| PackagingError::CreateOutputDir {
        path: dir.to_owned(),
        source,
    })?;
    utf8(resolved)
}

fn utf8(path: std::path::PathBuf) -> Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path).map_err(|err| PackagingError::NonUtf8Path {
        path: err.into_path_buf().display().to_string(),
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

//! Error types for the packaging pipeline and the structural validator.
//!
//! Packaging is all-or-nothing: every variant of [`PackagingError`] aborts the
//! run. Validation failures are recorded outcomes rather than errors, so
//! [`ValidationError`] only covers conditions that prevent checking at all.

use camino::Utf8PathBuf;
use packwright_common::ConfigError;
use thiserror::Error;

/// Errors that abort a packaging run.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// The configuration could not be loaded or is unusable for packaging.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The configured project root does not exist.
    #[error("project root does not exist: {path}")]
    ProjectRootMissing {
        /// The configured root.
        path: Utf8PathBuf,
    },

    /// The output directory lies inside the project being packaged.
    #[error("output directory {output} is inside the project root {root}")]
    OutputInsideProject {
        /// The resolved output directory.
        output: Utf8PathBuf,
        /// The resolved project root.
        root: Utf8PathBuf,
    },

    /// The output directory could not be resolved or created.
    #[error("failed to create output directory {path}")]
    CreateOutputDir {
        /// The output directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A path on the packaging route is not valid UTF-8.
    #[error("path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the offending path.
        path: String,
    },

    /// The staging directory could not be removed or created.
    #[error("failed to prepare staging directory {path}")]
    PrepareStaging {
        /// The staging directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Copying an item into the staging directory failed.
    #[error("failed to copy {from} to {to}")]
    Copy {
        /// Source path inside the project.
        from: Utf8PathBuf,
        /// Destination path inside the staging directory.
        to: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A directory could not be enumerated.
    #[error("failed to walk {path}")]
    Walk {
        /// Directory being walked.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The metadata document could not be written.
    #[error("failed to write project info to {path}")]
    MetadataWrite {
        /// Destination of the metadata document.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A staged file could not be read into the archive.
    #[error("failed to add {file} to archive {archive}")]
    ArchiveSource {
        /// The staged file being archived.
        file: Utf8PathBuf,
        /// The archive being written.
        archive: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing or reading the archive failed.
    #[error("archive error at {path}")]
    Archive {
        /// The archive file.
        path: Utf8PathBuf,
        /// The underlying zip error.
        #[source]
        source: zip::result::ZipError,
    },
}

/// Errors that prevent the structural validator from running any check.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The configuration could not be loaded or has nothing to check.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The project root does not exist, so the path is not a project.
    #[error("project root does not exist: {path}")]
    ProjectRootMissing {
        /// The configured root.
        path: Utf8PathBuf,
    },
}

/// Result type alias using [`PackagingError`].
pub type Result<T> = std::result::Result<T, PackagingError>;

impl PackagingError {
    /// Wrap an archive error raised while working on `path`.
    pub(crate) fn archive(path: &camino::Utf8Path, source: zip::result::ZipError) -> Self {
        Self::Archive {
            path: path.to_owned(),
            source,
        }
    }

    /// Wrap an I/O error raised while writing the archive at `path`.
    pub(crate) fn archive_io(path: &camino::Utf8Path, source: std::io::Error) -> Self {
        Self::archive(path, zip::result::ZipError::Io(source))
    }
}

//! Error types for configuration loading and manifest validation.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a packwright configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}")]
    Read {
        /// Path of the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or does not match the schema.
    #[error("invalid configuration in {origin}")]
    Parse {
        /// Where the configuration came from (a path or `<embedded>`).
        origin: String,
        /// The underlying deserialisation error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A manifest path is empty, absolute, or escapes the project root.
    #[error("invalid manifest path {path:?}: {reason}")]
    InvalidItemPath {
        /// The offending path as written in the manifest.
        path: String,
        /// Why the path was rejected.
        reason: &'static str,
    },

    /// The project name cannot be used to name output files.
    #[error("invalid project name {name:?}: {reason}")]
    InvalidProjectName {
        /// The configured project name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// A manifest table that the current tool needs has no entries.
    #[error("manifest [{table}] has no entries")]
    EmptyManifest {
        /// Name of the empty table.
        table: &'static str,
    },

    /// The generated metadata document would overwrite a packaged item.
    #[error("info file {name} collides with packaged item {item}")]
    InfoFileCollision {
        /// Configured metadata file name.
        name: String,
        /// The packaged item it collides with.
        item: String,
    },
}

//! Declarative configuration shared by the packaging and validation tools.
//!
//! A configuration is a TOML document with four tables: `[project]`
//! identifies the project and its root, `[package]` lists the items to
//! release, `[statistics]` tunes the post-archive report, and
//! `[validation]` lists the paths a healthy checkout must contain. A default
//! document is compiled into the binaries so both tools work without a
//! configuration file.

use crate::error::ConfigError;
use crate::manifest::{ExpectedEntry, ItemPath, ManifestEntry};
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use serde::Deserialize;

/// The configuration compiled into the binaries.
pub const EMBEDDED_CONFIG: &str = include_str!("../defaults/packwright.toml");

/// Origin label used in errors for the embedded configuration.
const EMBEDDED_ORIGIN: &str = "<embedded>";

/// Default name of the generated metadata document.
pub const DEFAULT_INFO_FILE: &str = "PROJECT_INFO.md";

/// Complete packwright configuration.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PackwrightConfig {
    /// Project identity and location.
    pub project: ProjectConfig,
    /// Packaging manifest and output settings.
    #[serde(default)]
    pub package: PackageConfig,
    /// Statistics report settings.
    #[serde(default)]
    pub statistics: StatisticsConfig,
    /// Structural validation manifest.
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Identity of the packaged project.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Short name used to build output directory and archive names.
    pub name: String,
    /// Display title written into the metadata document.
    pub title: String,
    /// Version label written into the metadata document.
    pub version: String,
    /// Optional target platform description.
    #[serde(default)]
    pub platform: Option<String>,
    /// Project root; manifest paths are relative to it.
    #[serde(default = "ProjectConfig::default_root")]
    pub root: Utf8PathBuf,
}

impl ProjectConfig {
    fn default_root() -> Utf8PathBuf {
        Utf8PathBuf::from(".")
    }
}

/// Settings for the packaging pipeline.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    /// Directory receiving the staging directory and archive. Defaults to
    /// the parent of the project root.
    pub output_dir: Option<Utf8PathBuf>,
    /// File name of the generated metadata document.
    pub info_file: String,
    /// Ordered items to copy into the release.
    pub items: Vec<ManifestEntry>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            info_file: DEFAULT_INFO_FILE.to_owned(),
            items: Vec::new(),
        }
    }
}

/// Settings for the statistics report.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct StatisticsConfig {
    /// File name suffixes counted separately (for example `.java`).
    pub extensions: Vec<String>,
    /// Staged subtree whose source lines are counted.
    pub source_dir: Option<ItemPath>,
    /// Suffix of files whose lines are counted within `source_dir`.
    pub source_extension: String,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".java".to_owned(), ".xml".to_owned()],
            source_dir: None,
            source_extension: ".java".to_owned(),
        }
    }
}

/// Settings for the structural validator.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Ordered paths that must exist beneath the project root.
    pub entries: Vec<ExpectedEntry>,
}

impl PackwrightConfig {
    /// Parse a configuration document.
    ///
    /// `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is not valid TOML,
    /// contains unknown keys, or holds an invalid manifest path.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            origin: origin.to_owned(),
            source: Box::new(source),
        })
    }

    /// Parse the configuration compiled into the binaries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the embedded document is invalid.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_toml_str(EMBEDDED_CONFIG, EMBEDDED_ORIGIN)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        debug!("loading configuration from {path}");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&contents, path.as_str())
    }

    /// Load `path` when given, otherwise fall back to the embedded default.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Self::load`] or [`Self::embedded`].
    pub fn load_or_embedded(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    /// Replace the project root when an override is supplied.
    #[must_use]
    pub fn with_project_root(mut self, root: Option<Utf8PathBuf>) -> Self {
        if let Some(root) = root {
            self.project.root = root;
        }
        self
    }

    /// Replace the output directory when an override is supplied.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: Option<Utf8PathBuf>) -> Self {
        if output_dir.is_some() {
            self.package.output_dir = output_dir;
        }
        self
    }

    /// Check the settings the packaging pipeline depends on.
    ///
    /// # Errors
    ///
    /// Returns an error when the project name cannot name output files, the
    /// packaging manifest is empty, or the metadata document would collide
    /// with a packaged item.
    pub fn validate_for_packaging(&self) -> Result<(), ConfigError> {
        validate_project_name(&self.project.name)?;
        if self.package.items.is_empty() {
            return Err(ConfigError::EmptyManifest {
                table: "package.items",
            });
        }
        validate_info_file(&self.package.info_file, &self.package.items)
    }

    /// Check the settings the structural validator depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyManifest`] when there is nothing to check.
    pub fn validate_for_checking(&self) -> Result<(), ConfigError> {
        if self.validation.entries.is_empty() {
            return Err(ConfigError::EmptyManifest {
                table: "validation.entries",
            });
        }
        Ok(())
    }
}

fn validate_project_name(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidProjectName {
        name: name.to_owned(),
        reason,
    };
    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(invalid("name must not contain path separators"));
    }
    Ok(())
}

fn validate_info_file(name: &str, items: &[ManifestEntry]) -> Result<(), ConfigError> {
    let info_path = ItemPath::try_from(name)?;
    if info_path.as_path().components().count() != 1 {
        return Err(ConfigError::InvalidItemPath {
            path: name.to_owned(),
            reason: "info file must be a plain file name",
        });
    }
    match items.iter().find(|item| item.path == info_path) {
        Some(item) => Err(ConfigError::InfoFileCollision {
            name: name.to_owned(),
            item: item.path.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

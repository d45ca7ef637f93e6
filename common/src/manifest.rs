//! Manifest entries describing the items a project is expected to contain.
//!
//! Two manifests exist: the packaging manifest lists what gets copied into a
//! release, and the validation manifest lists what a healthy checkout must
//! contain. Both are ordered lists of project-relative paths with a human
//! label; the order only matters for reporting.

use crate::error::ConfigError;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fmt;

/// A normalised, project-relative item path.
///
/// Construction rejects empty, absolute, and parent-escaping paths so that
/// joining an `ItemPath` onto a project root can never leave that root.
/// Trailing separators (`app/`) and `.` components are dropped.
///
/// # Examples
///
/// ```
/// use packwright_common::manifest::ItemPath;
///
/// let path = ItemPath::try_from("app/").expect("valid path");
/// assert_eq!(path.as_str(), "app");
/// assert!(ItemPath::try_from("../outside").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ItemPath(Utf8PathBuf);

impl ItemPath {
    /// Borrow the path.
    #[must_use]
    pub fn as_path(&self) -> &Utf8Path {
        &self.0
    }

    /// Borrow the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Join the path onto `root`.
    #[must_use]
    pub fn resolve_under(&self, root: &Utf8Path) -> Utf8PathBuf {
        root.join(&self.0)
    }
}

impl TryFrom<&str> for ItemPath {
    type Error = ConfigError;

    fn try_from(raw: &str) -> Result<Self, Self::Error> {
        let invalid = |reason| ConfigError::InvalidItemPath {
            path: raw.to_owned(),
            reason,
        };

        let mut normalised = Utf8PathBuf::new();
        for component in Utf8Path::new(raw.trim()).components() {
            match component {
                Utf8Component::Normal(part) => normalised.push(part),
                Utf8Component::CurDir => {}
                Utf8Component::ParentDir => {
                    return Err(invalid("path escapes the project root"));
                }
                Utf8Component::RootDir | Utf8Component::Prefix(_) => {
                    return Err(invalid("path must be relative to the project root"));
                }
            }
        }

        if normalised.as_str().is_empty() {
            return Err(invalid("path is empty"));
        }
        Ok(Self(normalised))
    }
}

impl TryFrom<String> for ItemPath {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::try_from(raw.as_str())
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Whether a validation entry must be a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// The path must name an existing regular file.
    File,
    /// The path must name an existing directory.
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

/// One item of the packaging manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    /// Project-relative path of a file or directory to package.
    pub path: ItemPath,
    /// Optional human-readable description.
    #[serde(default)]
    pub label: Option<String>,
}

impl ManifestEntry {
    /// Create an entry without a label.
    #[must_use]
    pub fn new(path: ItemPath) -> Self {
        Self { path, label: None }
    }

    /// Return the label, falling back to the path itself.
    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.path.as_str())
    }
}

/// One item of the validation manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedEntry {
    /// Project-relative path that must exist.
    pub path: ItemPath,
    /// Required type of the path.
    pub kind: EntryKind,
    /// Human-readable description used in reports.
    pub label: String,
}

impl ExpectedEntry {
    /// Create an entry expecting a regular file.
    #[must_use]
    pub fn file(path: ItemPath, label: impl Into<String>) -> Self {
        Self {
            path,
            kind: EntryKind::File,
            label: label.into(),
        }
    }

    /// Create an entry expecting a directory.
    #[must_use]
    pub fn directory(path: ItemPath, label: impl Into<String>) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
            label: label.into(),
        }
    }
}

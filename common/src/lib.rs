//! Shared building blocks for the packwright packaging and validation tools.
//!
//! # Modules
//!
//! - [`config`] - Declarative TOML configuration and its embedded default
//! - [`error`] - Configuration error types
//! - [`manifest`] - Manifest entries and validated project-relative paths
//! - [`walk`] - Lazy recursive directory walking

pub mod config;
pub mod error;
pub mod manifest;
pub mod walk;

pub use config::{
    DEFAULT_INFO_FILE, EMBEDDED_CONFIG, PackageConfig, PackwrightConfig, ProjectConfig,
    StatisticsConfig, ValidationConfig,
};
pub use error::ConfigError;
pub use manifest::{EntryKind, ExpectedEntry, ItemPath, ManifestEntry};
pub use walk::{TreeWalk, WalkEntry};

//! Manifest-driven project packaging and structural validation.
//!
//! The packaging pipeline resolves a manifest of project-relative paths,
//! stages the items into a timestamped directory, writes a project
//! information document, archives the staged tree as a zip file and reports
//! summary statistics. The structural validator independently checks a
//! project tree against a list of expected files and directories.
//!
//! # Modules
//!
//! - [`archive`] - Zip archive creation and inspection
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Error types
//! - [`logging`] - Logger initialisation
//! - [`metadata`] - Project information document
//! - [`output`] - Console output helpers
//! - [`pipeline`] - Packaging run orchestration
//! - [`resolution`] - Manifest resolution against a project root
//! - [`stager`] - Copying items into the staging directory
//! - [`stamp`] - Run timestamps
//! - [`statistics`] - Staged tree statistics
//! - [`validator`] - Structural validation

pub mod archive;
pub mod cli;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod resolution;
pub mod stager;
pub mod stamp;
pub mod statistics;
pub mod validator;

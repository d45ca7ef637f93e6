//! CLI argument definitions for the packaging and validation binaries.
//!
//! Both tools share the configuration flags; the binaries themselves only
//! orchestrate.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser};
use log::LevelFilter;

/// Flags selecting and overriding the configuration.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigArgs {
    /// Configuration file [default: built-in project configuration].
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Project root, overriding `project.root` from the configuration.
    #[arg(short, long, value_name = "DIR")]
    pub project_root: Option<Utf8PathBuf>,
}

impl ConfigArgs {
    /// The configuration file to load, if one was given.
    #[must_use]
    pub fn config_path(&self) -> Option<&Utf8Path> {
        self.config.as_deref()
    }
}

/// Flags controlling console output.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputArgs {
    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors and the summary are still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl OutputArgs {
    /// Default log level for the requested verbosity.
    ///
    /// # Examples
    ///
    /// ```
    /// use log::LevelFilter;
    /// use packwright::cli::OutputArgs;
    ///
    /// let args = OutputArgs { verbosity: 2, quiet: false };
    /// assert_eq!(args.log_level(), LevelFilter::Debug);
    /// ```
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Package a project into a timestamped staging directory and zip archive.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "packwright-package")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package the project in the current directory:\n",
    "    $ packwright-package\n\n",
    "  Package another checkout into a release directory:\n",
    "    $ packwright-package -p ../BatteryMonitorApp -o /tmp/releases\n\n",
    "  Show what would be packaged:\n",
    "    $ packwright-package --dry-run",
))]
pub struct PackageArgs {
    /// Configuration flags.
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory receiving the staging directory and archive
    /// [default: parent of the project root].
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<Utf8PathBuf>,

    /// Resolve the manifest and print the plan without writing anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Read the archive back after writing and report its entry count.
    #[arg(long)]
    pub verify_archive: bool,

    /// Output flags.
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Check that a project tree contains every expected file and directory.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "packwright-check")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXIT STATUS:\n",
    "  0  every check passed\n",
    "  1  at least one expected entry is missing\n",
    "  2  the project root or configuration is unusable",
))]
pub struct CheckArgs {
    /// Configuration flags.
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output flags.
    #[command(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

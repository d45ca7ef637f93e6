//! Console output helpers shared by both binaries.
//!
//! Progress and diagnostics go through a `&mut dyn Write` sink so the same
//! code writes to stderr in production and to a buffer in tests.

use camino::Utf8Path;
use std::io::Write;

/// Number of bytes in one mebibyte.
pub const BYTES_PER_MIB: u64 = 1_048_576;

/// Hints printed after a successful packaging run.
pub const NEXT_STEPS: &str = concat!(
    "Next steps:\n",
    "  1. Open the staged project directory in your IDE\n",
    "  2. Build the project to produce the installable artefact\n",
    "  3. Follow INSTALL.md to install it"
);

/// Write a single line, ignoring failures to write.
pub fn write_line(out: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(out, "{message}").is_err() {
        // Console output is best-effort.
    }
}

/// Write several lines to `out`, ignoring failures to write.
pub fn write_lines<I>(out: &mut dyn Write, lines: I)
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    for line in lines {
        write_line(out, line);
    }
}

/// Format a byte count as mebibytes with two decimal places.
///
/// # Examples
///
/// ```
/// use packwright::output::format_mib;
///
/// assert_eq!(format_mib(1_572_864), "1.50 MB");
/// ```
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "sizes are reported to two decimal places"
)]
pub fn format_mib(bytes: u64) -> String {
    let mib = bytes as f64 / BYTES_PER_MIB as f64;
    format!("{mib:.2} MB")
}

/// Render an error and its chain of sources, one cause per line.
#[must_use]
pub fn render_error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = format!("error: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    rendered
}

/// Final summary lines for a completed packaging run.
#[must_use]
pub fn package_summary(staging_dir: &Utf8Path, archive_path: &Utf8Path, size: &str) -> String {
    format!(
        concat!(
            "Packaging complete.\n",
            "  Staged directory: {}\n",
            "  Archive: {}\n",
            "  Archive size: {}"
        ),
        staging_dir, archive_path, size
    )
}

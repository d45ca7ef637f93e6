//! Summary statistics over a staged project tree.
//!
//! Collection never fails: entries that cannot be walked, queried or read
//! are skipped and the remaining counts are reported as-is.

use crate::output::format_mib;
use camino::Utf8Path;
use log::trace;
use packwright_common::{StatisticsConfig, TreeWalk};
use std::fs;

/// Number of files whose name ends with one configured extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionCount {
    /// The extension, including its leading dot.
    pub extension: String,
    /// Matching files.
    pub files: usize,
}

/// Snapshot of a staged tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    /// Every regular file beneath the staging directory.
    pub total_files: usize,
    /// Per-extension counts, in configured order.
    pub extension_counts: Vec<ExtensionCount>,
    /// Aggregate size of the counted files in bytes.
    pub total_bytes: u64,
    /// Source files whose lines were counted.
    pub source_files: usize,
    /// Lines across the counted source files.
    pub source_lines: usize,
}

impl Statistics {
    /// Console report lines.
    #[must_use]
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.extension_counts.len() + 3);
        lines.push(format!("Total files: {}", self.total_files));
        lines.extend(
            self.extension_counts
                .iter()
                .map(|count| format!("{} files: {}", count.extension, count.files)),
        );
        lines.push(format!("Source lines: about {}", self.source_lines));
        lines.push(format!("Project size: {}", format_mib(self.total_bytes)));
        lines
    }
}

/// Gather statistics for the tree rooted at `staging_dir`.
#[must_use]
pub fn collect_statistics(staging_dir: &Utf8Path, options: &StatisticsConfig) -> Statistics {
    let mut stats = Statistics {
        extension_counts: options
            .extensions
            .iter()
            .map(|extension| ExtensionCount {
                extension: extension.clone(),
                files: 0,
            })
            .collect(),
        ..Statistics::default()
    };

    for entry in TreeWalk::new(staging_dir).files().filter_map(Result::ok) {
        stats.total_files += 1;
        for count in &mut stats.extension_counts {
            if entry.path.as_str().ends_with(&count.extension) {
                count.files += 1;
            }
        }
        match fs::metadata(&entry.path) {
            Ok(meta) => stats.total_bytes += meta.len(),
            Err(err) => trace!("no size for {}: {err}", entry.path),
        }
    }

    if let Some(source_dir) = &options.source_dir {
        let root = source_dir.resolve_under(staging_dir);
        let (files, lines) = count_source_lines(&root, &options.source_extension);
        stats.source_files = files;
        stats.source_lines = lines;
    }

    stats
}

/// Count lines the way a line reader does: `\n`, `\r\n` and a lone `\r`
/// each end a line, and a trailing unterminated fragment counts as one more.
///
/// # Examples
///
/// ```
/// use packwright::statistics::count_lines;
///
/// assert_eq!(count_lines("a\nb\n"), 2);
/// assert_eq!(count_lines("a\nb"), 2);
/// assert_eq!(count_lines("a\rb\r"), 2);
/// assert_eq!(count_lines(""), 0);
/// ```
#[must_use]
pub fn count_lines(text: &str) -> usize {
    let mut lines = 0;
    let mut bytes = text.bytes().peekable();
    while let Some(byte) = bytes.next() {
        match byte {
            b'\n' => lines += 1,
            b'\r' => {
                bytes.next_if_eq(&b'\n');
                lines += 1;
            }
            _ => {}
        }
    }
    if !text.is_empty() && !text.ends_with(['\n', '\r']) {
        lines += 1;
    }
    lines
}

fn count_source_lines(root: &Utf8Path, extension: &str) -> (usize, usize) {
    let sources = TreeWalk::new(root)
        .files()
        .filter_map(Result::ok)
        .map(|entry| entry.path)
        .filter(|path| path.as_str().ends_with(extension));

    let mut files = 0;
    let mut lines = 0;
    for path in sources {
        if let Some(text) = read_utf8(&path) {
            files += 1;
            lines += count_lines(&text);
        }
    }
    (files, lines)
}

fn read_utf8(path: &Utf8Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            trace!("skipping {path}: {err}");
            None
        }
    }
}

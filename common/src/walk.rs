//! Recursive directory walking shared by staging, archiving, and statistics.
//!
//! [`TreeWalk`] lazily yields every entry beneath a root as a
//! [`WalkEntry`]. Each directory is listed in full and its handle closed
//! before any entry from it is yielded, so no directory handle outlives a
//! single `next` call. Symbolic links to directories are reported but never
//! descended into, which keeps the walk finite.

use camino::{Utf8Path, Utf8PathBuf};
use log::trace;
use std::io;

/// A single entry produced by [`TreeWalk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Full path of the entry (the walk root joined with its relative path).
    pub path: Utf8PathBuf,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl WalkEntry {
    /// Return the entry path relative to `root`, if it lies beneath it.
    #[must_use]
    pub fn relative_to(&self, root: &Utf8Path) -> Option<&Utf8Path> {
        self.path.strip_prefix(root).ok()
    }
}

/// Lazy, non-restartable depth-first walk of a directory tree.
///
/// The root itself is not yielded. Entries within one directory are ordered
/// by file name. I/O failures are yielded as `Err` items and the walk carries
/// on with the remaining entries; callers decide whether a failure is fatal.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use packwright_common::walk::TreeWalk;
///
/// let files = TreeWalk::new(Utf8Path::new("staging"))
///     .filter_map(Result::ok)
///     .filter(|entry| !entry.is_dir)
///     .count();
/// println!("{files} files");
/// ```
#[derive(Debug)]
pub struct TreeWalk {
    pending_dirs: Vec<Utf8PathBuf>,
    buffered: std::vec::IntoIter<io::Result<WalkEntry>>,
}

impl TreeWalk {
    /// Start a walk beneath `root`.
    ///
    /// Nothing touches the filesystem until the first call to `next`.
    #[must_use]
    pub fn new(root: &Utf8Path) -> Self {
        Self {
            pending_dirs: vec![root.to_owned()],
            buffered: Vec::new().into_iter(),
        }
    }

    /// Restrict the walk to regular (non-directory) entries.
    pub fn files(self) -> impl Iterator<Item = io::Result<WalkEntry>> {
        self.filter(|item| item.as_ref().map_or(true, |entry| !entry.is_dir))
    }
}

impl Iterator for TreeWalk {
    type Item = io::Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.next() {
                return Some(item);
            }
            let dir = self.pending_dirs.pop()?;
            let (entries, subdirs) = list_directory(&dir);
            // Reverse so the stack pops subdirectories in name order.
            self.pending_dirs.extend(subdirs.into_iter().rev());
            self.buffered = entries.into_iter();
        }
    }
}

/// List one directory, returning its entries and the subdirectories to
/// descend into.
fn list_directory(dir: &Utf8Path) -> (Vec<io::Result<WalkEntry>>, Vec<Utf8PathBuf>) {
    trace!("listing {dir}");
    let read_dir = match dir.read_dir_utf8() {
        Ok(read_dir) => read_dir,
        Err(err) => return (vec![Err(err)], Vec::new()),
    };

    let mut entries = Vec::new();
    let mut failures = Vec::new();
    for item in read_dir {
        match item.and_then(|entry| classify(entry.path())) {
            Ok(entry) => entries.push(entry),
            Err(err) => failures.push(err),
        }
    }
    entries.sort_by(|a, b| a.0.path.cmp(&b.0.path));

    let subdirs = entries
        .iter()
        .filter(|(_, descend)| *descend)
        .map(|(entry, _)| entry.path.clone())
        .collect();
    let results = entries
        .into_iter()
        .map(|(entry, _)| Ok(entry))
        .chain(failures.into_iter().map(Err))
        .collect();
    (results, subdirs)
}

/// Classify a path, returning the entry and whether to descend into it.
fn classify(path: &Utf8Path) -> io::Result<(WalkEntry, bool)> {
    let link_meta = path.symlink_metadata()?;
    let is_real_dir = link_meta.is_dir();
    let is_dir = if link_meta.file_type().is_symlink() {
        path.is_dir()
    } else {
        is_real_dir
    };
    let entry = WalkEntry {
        path: path.to_owned(),
        is_dir,
    };
    Ok((entry, is_real_dir))
}

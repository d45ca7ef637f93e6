//! Manifest resolution against a project root.
//!
//! Each packaging manifest entry is joined with the project root and
//! classified as a file, a directory, or missing. Resolution never fails: a
//! missing item is a reported gap that the stager skips.

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use packwright_common::ManifestEntry;

/// What a manifest entry turned out to be on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedKind {
    /// A regular file (or a link to one).
    File,
    /// A directory (or a link to one).
    Directory,
    /// Nothing exists at the resolved path.
    Missing,
}

/// The outcome of resolving one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The manifest entry that was resolved.
    pub entry: ManifestEntry,
    /// Absolute (or root-relative) source path of the item.
    pub source: Utf8PathBuf,
    /// Classification of the source path.
    pub kind: ResolvedKind,
}

impl Resolution {
    /// Returns true when the item exists on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.kind != ResolvedKind::Missing
    }
}

/// Resolve a single manifest entry beneath `root`.
#[must_use]
pub fn resolve_entry(root: &Utf8Path, entry: &ManifestEntry) -> Resolution {
    let source = entry.path.resolve_under(root);
    let kind = match source.metadata() {
        Ok(meta) if meta.is_dir() => ResolvedKind::Directory,
        Ok(_) => ResolvedKind::File,
        Err(err) => {
            debug!("{source} is unavailable: {err}");
            ResolvedKind::Missing
        }
    };
    Resolution {
        entry: entry.clone(),
        source,
        kind,
    }
}

/// Resolve every manifest entry beneath `root`, preserving manifest order.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use packwright::resolution::{ResolvedKind, resolve_manifest};
/// use packwright_common::{ItemPath, ManifestEntry};
///
/// let entry = ManifestEntry::new(ItemPath::try_from("no-such-file").expect("valid"));
/// let resolutions = resolve_manifest(Utf8Path::new("/nonexistent"), &[entry]);
/// assert_eq!(resolutions.len(), 1);
/// assert!(resolutions.iter().all(|r| r.kind == ResolvedKind::Missing));
/// ```
#[must_use]
pub fn resolve_manifest(root: &Utf8Path, entries: &[ManifestEntry]) -> Vec<Resolution> {
    entries
        .iter()
        .map(|entry| resolve_entry(root, entry))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use packwright_common::ItemPath;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn project() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf8 temp dir");
        fs::create_dir_all(root.join("app/src")).expect("mkdir");
        fs::write(root.join("build.gradle"), "plugins {}\n").expect("write");
        (dir, root)
    }

    fn entry(path: &str) -> ManifestEntry {
        ManifestEntry::new(ItemPath::try_from(path).expect("valid item path"))
    }

    #[rstest]
    #[case::directory("app/", ResolvedKind::Directory)]
    #[case::file("build.gradle", ResolvedKind::File)]
    #[case::missing("README.md", ResolvedKind::Missing)]
    fn resolve_entry_classifies_items(
        project: (TempDir, Utf8PathBuf),
        #[case] path: &str,
        #[case] expected: ResolvedKind,
    ) {
        let (_guard, root) = project;
        let resolution = resolve_entry(&root, &entry(path));
        assert_eq!(resolution.kind, expected);
        assert_eq!(resolution.exists(), expected != ResolvedKind::Missing);
        assert!(resolution.source.starts_with(&root));
    }

    #[rstest]
    fn resolve_manifest_preserves_order(project: (TempDir, Utf8PathBuf)) {
        let (_guard, root) = project;
        let entries = vec![entry("README.md"), entry("app"), entry("build.gradle")];
        let kinds: Vec<ResolvedKind> = resolve_manifest(&root, &entries)
            .into_iter()
            .map(|resolution| resolution.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ResolvedKind::Missing,
                ResolvedKind::Directory,
                ResolvedKind::File
            ]
        );
    }
}

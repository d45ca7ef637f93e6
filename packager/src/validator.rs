//! Read-only structural validation of a project tree.
//!
//! Every expected entry is checked, in order, relative to the project root.
//! A missing entry is a failed check, not an error; only a missing root
//! stops validation before the first check.

use crate::error::ValidationError;
use camino::Utf8Path;
use log::debug;
use packwright_common::{EntryKind, ExpectedEntry};

/// Result of checking one expected entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// The entry that was checked.
    pub entry: ExpectedEntry,
    /// Whether the entry exists with the expected kind.
    pub passed: bool,
}

impl CheckOutcome {
    /// Console line for this outcome.
    #[must_use]
    pub fn display_line(&self) -> String {
        if self.passed {
            format!("✓ {}: {}", self.entry.label, self.entry.path)
        } else {
            format!("✗ {}: {} (missing)", self.entry.label, self.entry.path)
        }
    }
}

/// Ordered outcomes of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    outcomes: Vec<CheckOutcome>,
}

impl ValidationReport {
    /// Outcomes in manifest order.
    #[must_use]
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    /// Number of checks that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed).count()
    }

    /// Number of checks performed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Entries that failed their check.
    pub fn missing(&self) -> impl Iterator<Item = &ExpectedEntry> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.passed)
            .map(|outcome| &outcome.entry)
    }

    /// Whether every check passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Aggregate line, `Checks passed: <passed>/<total>`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("Checks passed: {}/{}", self.passed(), self.total())
    }

    /// One line per outcome followed by the aggregate line.
    #[must_use]
    pub fn display_lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .map(CheckOutcome::display_line)
            .chain(std::iter::once(self.summary_line()))
            .collect()
    }
}

/// Check a single entry beneath `root`.
///
/// Symbolic links are followed, so a link to a file satisfies a file entry.
#[must_use]
pub fn check_entry(root: &Utf8Path, entry: &ExpectedEntry) -> CheckOutcome {
    let target = entry.path.resolve_under(root);
    let passed = match entry.kind {
        EntryKind::File => target.is_file(),
        EntryKind::Directory => target.is_dir(),
    };
    debug!("{} {target}: {}", entry.kind, if passed { "ok" } else { "missing" });
    CheckOutcome {
        entry: entry.clone(),
        passed,
    }
}

/// Check every entry beneath `root`, never stopping at a failure.
///
/// # Errors
///
/// Returns [`ValidationError::ProjectRootMissing`] when `root` is not a
/// directory; no entries are checked in that case.
pub fn validate_structure(
    root: &Utf8Path,
    entries: &[ExpectedEntry],
) -> Result<ValidationReport, ValidationError> {
    if !root.is_dir() {
        return Err(ValidationError::ProjectRootMissing {
            path: root.to_owned(),
        });
    }
    let outcomes = entries
        .iter()
        .map(|entry| check_entry(root, entry))
        .collect();
    Ok(ValidationReport { outcomes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use packwright_common::ItemPath;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    struct Project {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn project() -> Project {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf8 temp dir");
        fs::create_dir_all(root.join("app/src/main")).expect("mkdir");
        fs::write(root.join("build.gradle"), "plugins {}\n").expect("write");
        fs::write(root.join("app/src/main/AndroidManifest.xml"), "<m/>\n").expect("write");
        Project { _dir: dir, root }
    }

    fn path(raw: &str) -> ItemPath {
        ItemPath::try_from(raw).expect("valid item path")
    }

    #[fixture]
    fn entries() -> Vec<ExpectedEntry> {
        vec![
            ExpectedEntry::directory(path("app"), "Application module"),
            ExpectedEntry::file(path("build.gradle"), "Root build script"),
            ExpectedEntry::file(path("app/src/main/AndroidManifest.xml"), "Manifest"),
        ]
    }

    #[rstest]
    fn complete_tree_passes_every_check(project: Project, entries: Vec<ExpectedEntry>) {
        let report = validate_structure(&project.root, &entries).expect("root exists");
        assert!(report.all_passed());
        assert_eq!(report.passed(), 3);
        assert_eq!(report.summary_line(), "Checks passed: 3/3");
    }

    #[rstest]
    fn one_missing_file_fails_one_check(project: Project, entries: Vec<ExpectedEntry>) {
        fs::remove_file(project.root.join("build.gradle")).expect("remove");

        let report = validate_structure(&project.root, &entries).expect("root exists");

        assert!(!report.all_passed());
        assert_eq!(report.passed(), report.total() - 1);
        let missing: Vec<&str> = report.missing().map(|entry| entry.path.as_str()).collect();
        assert_eq!(missing, vec!["build.gradle"]);
    }

    #[rstest]
    fn kind_mismatch_fails(project: Project) {
        let entries = vec![
            ExpectedEntry::file(path("app"), "app as file"),
            ExpectedEntry::directory(path("build.gradle"), "script as dir"),
        ];
        let report = validate_structure(&project.root, &entries).expect("root exists");
        assert_eq!(report.passed(), 0);
        assert_eq!(report.total(), 2);
    }

    #[rstest]
    fn failures_do_not_short_circuit(project: Project) {
        let entries = vec![
            ExpectedEntry::file(path("absent.txt"), "absent"),
            ExpectedEntry::file(path("build.gradle"), "present"),
        ];
        let report = validate_structure(&project.root, &entries).expect("root exists");
        assert_eq!(report.total(), 2);
        assert!(report.outcomes().get(1).is_some_and(|outcome| outcome.passed));
    }

    #[rstest]
    fn missing_root_is_fatal(entries: Vec<ExpectedEntry>) {
        let result = validate_structure(Utf8Path::new("/definitely/not/a/project"), &entries);
        assert!(matches!(
            result,
            Err(ValidationError::ProjectRootMissing { .. })
        ));
    }

    #[rstest]
    fn display_lines_mark_outcomes(project: Project, entries: Vec<ExpectedEntry>) {
        fs::remove_file(project.root.join("build.gradle")).expect("remove");
        let report = validate_structure(&project.root, &entries).expect("root exists");
        assert_eq!(
            report.display_lines(),
            vec![
                "✓ Application module: app",
                "✗ Root build script: build.gradle (missing)",
                "✓ Manifest: app/src/main/AndroidManifest.xml",
                "Checks passed: 2/3",
            ]
        );
    }

    #[test]
    fn validation_never_writes() {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf8 temp dir");
        let entries = vec![ExpectedEntry::directory(path("app"), "app")];
        let report = validate_structure(&root, &entries).expect("root exists");
        assert!(!report.all_passed());
        assert_eq!(fs::read_dir(&root).expect("read").count(), 0);
    }
}

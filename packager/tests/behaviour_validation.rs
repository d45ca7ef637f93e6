//! Behaviour-driven tests for structural validation.

use camino::Utf8PathBuf;
use packwright::error::ValidationError;
use packwright::validator::{ValidationReport, validate_structure};
use packwright_common::{ExpectedEntry, ItemPath};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use tempfile::TempDir;

struct ValidationWorld {
    _temp_dir: TempDir,
    root: Utf8PathBuf,
    entries: Vec<ExpectedEntry>,
    report: Option<ValidationReport>,
    error: Option<ValidationError>,
}

#[fixture]
fn world() -> ValidationWorld {
    let temp_dir = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::try_from(temp_dir.path().join("project")).expect("utf8 temp dir");
    ValidationWorld {
        _temp_dir: temp_dir,
        root,
        entries: Vec::new(),
        report: None,
        error: None,
    }
}

fn item(path: &str) -> ItemPath {
    ItemPath::try_from(path).expect("valid item path")
}

#[given("a project with directory \"{dir}\" and file \"{file}\"")]
fn given_project(world: &mut ValidationWorld, dir: String, file: String) {
    fs::create_dir_all(world.root.join(&dir)).expect("mkdir");
    fs::write(world.root.join(&file), "contents\n").expect("write");
}

#[given("no project root")]
#[expect(unused_variables, reason = "rstest-bdd requires the world parameter")]
fn given_no_root(world: &mut ValidationWorld) {
    // The fixture never creates the root directory.
}

#[given("the expected entries are directory \"{dir}\" and file \"{file}\"")]
fn given_entries(world: &mut ValidationWorld, dir: String, file: String) {
    world.entries = vec![
        ExpectedEntry::directory(item(&dir), format!("{dir} directory")),
        ExpectedEntry::file(item(&file), format!("{file} file")),
    ];
}

#[when("the structure is validated")]
fn when_validated(world: &mut ValidationWorld) {
    match validate_structure(&world.root, &world.entries) {
        Ok(report) => world.report = Some(report),
        Err(err) => world.error = Some(err),
    }
}

#[then("{passed} of {total} checks pass")]
fn then_checks_pass(world: &mut ValidationWorld, passed: usize, total: usize) {
    let report = world.report.as_ref().expect("validation ran");
    assert_eq!(report.passed(), passed);
    assert_eq!(report.total(), total);
    assert_eq!(report.all_passed(), passed == total);
}

#[then("\"{path}\" is reported missing")]
fn then_reported_missing(world: &mut ValidationWorld, path: String) {
    let report = world.report.as_ref().expect("validation ran");
    let missing: Vec<&str> = report.missing().map(|entry| entry.path.as_str()).collect();
    assert_eq!(missing, vec![path.as_str()]);
}

#[then("validation fails because the project root is missing")]
fn then_root_missing(world: &mut ValidationWorld) {
    assert!(
        matches!(world.error, Some(ValidationError::ProjectRootMissing { .. })),
        "expected ProjectRootMissing, got {:?}",
        world.error
    );
    assert!(world.report.is_none());
}

#[scenario(
    path = "tests/features/validation.feature",
    name = "A complete project passes every check"
)]
fn scenario_complete_project(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/validation.feature",
    name = "A missing file fails exactly one check"
)]
fn scenario_missing_file(world: ValidationWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/validation.feature",
    name = "A missing project root stops validation"
)]
fn scenario_missing_root(world: ValidationWorld) {
    let _ = world;
}

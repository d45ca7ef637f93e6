//! Unit tests for the stager.

use super::*;
use crate::resolution::resolve_manifest;
use chrono::NaiveDate;
use packwright_common::ManifestEntry;
use rstest::{fixture, rstest};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    project: Utf8PathBuf,
    output: Utf8PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("temp dir");
    let base = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("utf8 temp dir");
    let project = base.join("project");
    let output = base.join("dist");
    fs::create_dir_all(project.join("app/src/main/res")).expect("mkdir");
    fs::create_dir_all(&output).expect("mkdir");
    fs::write(project.join("build.gradle"), "plugins {}\n").expect("write");
    fs::write(project.join("app/build.gradle"), "android {}\n").expect("write");
    fs::write(project.join("app/src/main/Main.java"), "class Main {}\n").expect("write");
    fs::write(project.join("app/src/main/res/strings.xml"), "<resources/>\n").expect("write");
    Workspace {
        _dir: dir,
        project,
        output,
    }
}

#[fixture]
fn stamp() -> RunStamp {
    let at = NaiveDate::from_ymd_opt(2026, 3, 1)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid date");
    RunStamp::from_datetime(at)
}

fn entries(paths: &[&str]) -> Vec<ManifestEntry> {
    paths
        .iter()
        .map(|path| ManifestEntry::new(ItemPath::try_from(*path).expect("valid item path")))
        .collect()
}

#[rstest]
fn staging_path_combines_project_and_stamp(workspace: Workspace, stamp: RunStamp) {
    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    assert_eq!(
        stager.staging_path(),
        workspace.output.join("Demo_Package_20260301_120000")
    );
}

#[rstest]
fn prepare_creates_missing_directory(workspace: Workspace, stamp: RunStamp) {
    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    let outcome = stager.prepare().expect("prepare succeeds");
    assert_eq!(outcome, PrepareOutcome::Created);
    assert!(stager.staging_path().is_dir());
}

#[rstest]
fn prepare_replaces_same_second_leftover(workspace: Workspace, stamp: RunStamp) {
    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    fs::create_dir_all(stager.staging_path().join("stale")).expect("mkdir");
    fs::write(stager.staging_path().join("stale/old.txt"), "old").expect("write");

    let outcome = stager.prepare().expect("prepare succeeds");

    assert_eq!(outcome, PrepareOutcome::Replaced);
    let leftovers = fs::read_dir(stager.staging_path()).expect("read").count();
    assert_eq!(leftovers, 0, "leftover contents must be removed");
}

#[rstest]
fn stage_all_copies_directories_and_files(workspace: Workspace, stamp: RunStamp) {
    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    stager.prepare().expect("prepare succeeds");
    let resolutions = resolve_manifest(&workspace.project, &entries(&["app/", "build.gradle"]));

    let mut progress = Vec::new();
    let report = stager
        .stage_all(&resolutions, &mut progress, false)
        .expect("staging succeeds");

    assert_eq!(report.copied_files(), 4);
    let staged = stager.staging_path();
    for relative in [
        "build.gradle",
        "app/build.gradle",
        "app/src/main/Main.java",
        "app/src/main/res/strings.xml",
    ] {
        let original = fs::read(workspace.project.join(relative)).expect("read original");
        let copy = fs::read(staged.join(relative)).expect("read copy");
        assert_eq!(original, copy, "content of {relative} must match");
    }

    let text = String::from_utf8(progress).expect("utf8 progress");
    assert!(text.contains("Copying directory: app"));
    assert!(text.contains("Copying file: build.gradle"));
}

#[rstest]
fn stage_all_skips_missing_items_with_warning(workspace: Workspace, stamp: RunStamp) {
    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    stager.prepare().expect("prepare succeeds");
    let resolutions = resolve_manifest(
        &workspace.project,
        &entries(&["README.md", "build.gradle"]),
    );

    let mut progress = Vec::new();
    let report = stager
        .stage_all(&resolutions, &mut progress, true)
        .expect("staging succeeds");

    let skipped: Vec<&str> = report.skipped().map(ItemPath::as_str).collect();
    assert_eq!(skipped, vec!["README.md"]);
    assert!(!stager.staging_path().join("README.md").exists());
    assert!(stager.staging_path().join("build.gradle").is_file());

    let text = String::from_utf8(progress).expect("utf8 progress");
    assert!(text.contains("Warning: missing item skipped: README.md"));
    assert!(!text.contains("Copying"), "quiet mode hides progress lines");
}

#[rstest]
fn nested_file_items_create_parent_directories(workspace: Workspace, stamp: RunStamp) {
    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    stager.prepare().expect("prepare succeeds");
    let resolutions = resolve_manifest(&workspace.project, &entries(&["app/src/main/Main.java"]));

    stager
        .stage_all(&resolutions, &mut Vec::new(), true)
        .expect("staging succeeds");

    assert!(
        stager
            .staging_path()
            .join("app/src/main/Main.java")
            .is_file()
    );
}

#[rstest]
fn staged_files_keep_modification_time(workspace: Workspace, stamp: RunStamp) {
    let source = workspace.project.join("build.gradle");
    let past = SystemTime::now() - Duration::from_secs(86_400);
    fs::File::options()
        .write(true)
        .open(&source)
        .and_then(|file| file.set_modified(past))
        .expect("set mtime");

    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    stager.prepare().expect("prepare succeeds");
    let resolutions = resolve_manifest(&workspace.project, &entries(&["build.gradle"]));
    stager
        .stage_all(&resolutions, &mut Vec::new(), true)
        .expect("staging succeeds");

    let original = fs::metadata(&source).and_then(|m| m.modified()).expect("mtime");
    let copied = fs::metadata(stager.staging_path().join("build.gradle"))
        .and_then(|m| m.modified())
        .expect("mtime");
    assert_eq!(original, copied);
}

#[cfg(unix)]
#[rstest]
fn staged_files_keep_permissions(workspace: Workspace, stamp: RunStamp) {
    use std::os::unix::fs::PermissionsExt;

    let script = workspace.project.join("gradlew");
    fs::write(&script, "#!/bin/sh\n").expect("write");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");

    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    stager.prepare().expect("prepare succeeds");
    let resolutions = resolve_manifest(&workspace.project, &entries(&["gradlew"]));
    stager
        .stage_all(&resolutions, &mut Vec::new(), true)
        .expect("staging succeeds");

    let mode = fs::metadata(stager.staging_path().join("gradlew"))
        .expect("metadata")
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[cfg(unix)]
#[rstest]
fn symlinked_subdirectories_are_copied_with_their_contents(
    workspace: Workspace,
    stamp: RunStamp,
) {
    fs::create_dir_all(workspace.project.join("shared")).expect("mkdir");
    fs::write(workspace.project.join("shared/Lib.java"), "class Lib {}\n").expect("write");
    std::os::unix::fs::symlink("../shared", workspace.project.join("app/lib")).expect("symlink");

    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    stager.prepare().expect("prepare succeeds");
    let resolutions = resolve_manifest(&workspace.project, &entries(&["app"]));
    let report = stager
        .stage_all(&resolutions, &mut Vec::new(), true)
        .expect("staging succeeds");

    assert_eq!(report.copied_files(), 4);
    let copied = stager.staging_path().join("app/lib/Lib.java");
    assert_eq!(
        fs::read(&copied).expect("read copy"),
        b"class Lib {}\n".to_vec()
    );
    let link_meta = fs::symlink_metadata(stager.staging_path().join("app/lib")).expect("stat");
    assert!(link_meta.is_dir(), "staged copy is a real directory");
}

#[cfg(unix)]
#[rstest]
fn symlink_cycles_are_copied_once(workspace: Workspace, stamp: RunStamp) {
    std::os::unix::fs::symlink(".", workspace.project.join("app/loop")).expect("symlink");

    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    stager.prepare().expect("prepare succeeds");
    let resolutions = resolve_manifest(&workspace.project, &entries(&["app"]));
    let report = stager
        .stage_all(&resolutions, &mut Vec::new(), true)
        .expect("staging terminates");

    assert_eq!(report.copied_files(), 3);
    assert!(!stager.staging_path().join("app/loop").exists());
}

#[cfg(unix)]
#[rstest]
fn copy_failure_aborts_remaining_items(workspace: Workspace, stamp: RunStamp) {
    std::os::unix::fs::symlink(
        workspace.project.join("gone.txt"),
        workspace.project.join("app/zz_dangling"),
    )
    .expect("symlink");

    let stager = Stager::new(&workspace.output, "Demo", &stamp);
    stager.prepare().expect("prepare succeeds");
    let resolutions = resolve_manifest(&workspace.project, &entries(&["app", "build.gradle"]));
    let result = stager.stage_all(&resolutions, &mut Vec::new(), true);

    assert!(
        matches!(result, Err(PackagingError::Copy { ref from, .. }) if from.ends_with("zz_dangling")),
        "expected a copy error naming the dangling link, got {result:?}"
    );
    assert!(!stager.staging_path().join("build.gradle").exists());
}

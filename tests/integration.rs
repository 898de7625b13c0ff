use predicates::prelude::*;
use std::fs;

const BLUEPRINT: &str = r##"
[defaults]
project = "demo"

[[content]]
type = "folder"
path = "/src"

[[content]]
type = "file"
path = "/README.md"
template = "# {{project}} ({{license}})"
data = { license = "MIT" }
"##;

fn trellis() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("trellis").unwrap()
}

#[test]
fn ensure_from_blueprint_file() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("site");
    fs::create_dir(&base).unwrap();
    let blueprint = dir.path().join("layout.toml");
    fs::write(&blueprint, BLUEPRINT).unwrap();

    trellis()
        .arg("ensure")
        .arg(&base)
        .arg(&blueprint)
        .args(["--set", "project=trellis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("README.md"))
        .stdout(predicate::str::contains("src"));

    assert_eq!(
        fs::read_to_string(base.join("README.md")).unwrap(),
        "# trellis (MIT)"
    );
    assert!(base.join("src").is_dir());
}

#[test]
fn ensure_twice_reports_only_files() {
    let dir = tempfile::tempdir().unwrap();
    let blueprint = dir.path().join("layout.toml");
    fs::write(&blueprint, BLUEPRINT).unwrap();

    trellis()
        .arg("ensure")
        .arg(dir.path())
        .arg(&blueprint)
        .assert()
        .success();

    trellis()
        .arg("ensure")
        .arg(dir.path())
        .arg(&blueprint)
        .assert()
        .success()
        .stdout(predicate::str::contains("README.md"))
        .stdout(predicate::str::contains(dir.path().join("src").display().to_string()).not());
}

#[test]
fn ensure_prints_paths_created_before_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blueprint = dir.path().join("layout.toml");
    fs::write(
        &blueprint,
        r#"
[[content]]
type = "folder"
path = "a"

[[content]]
type = "file"
path = "a.txt"

[[content]]
type = "file"
path = "a.txt/nested"
"#,
    )
    .unwrap();
    let base = dir.path().join("site");
    fs::create_dir(&base).unwrap();

    trellis()
        .arg("ensure")
        .arg(&base)
        .arg(&blueprint)
        .assert()
        .failure()
        .stdout(predicate::str::contains(base.join("a").display().to_string()))
        .stdout(predicate::str::contains(base.join("a.txt").display().to_string()))
        .stderr(predicate::str::contains("failed to ensure setup").not());
}

#[test]
fn ensure_rejects_malformed_set() {
    let dir = tempfile::tempdir().unwrap();
    let blueprint = dir.path().join("layout.toml");
    fs::write(&blueprint, BLUEPRINT).unwrap();

    trellis()
        .arg("ensure")
        .arg(dir.path())
        .arg(&blueprint)
        .args(["--set", "no-equals-sign"])
        .assert()
        .failure();
}

#[test]
fn ensure_fails_on_missing_blueprint() {
    let dir = tempfile::tempdir().unwrap();

    trellis()
        .arg("ensure")
        .arg(dir.path())
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure();
}

#[test]
fn clear_with_patterns() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("keep.txt"), "").unwrap();
    fs::write(dir.path().join("drop.log"), "").unwrap();
    fs::create_dir(dir.path().join("dropdir")).unwrap();

    trellis()
        .arg("clear")
        .arg(dir.path())
        .arg("*.log")
        .assert()
        .success()
        .stdout(predicate::str::contains("drop.log"))
        .stdout(predicate::str::contains("keep.txt").not());

    assert!(dir.path().join("keep.txt").exists());
    assert!(dir.path().join("dropdir").exists());
    assert!(!dir.path().join("drop.log").exists());
}

#[test]
fn clear_accepts_directory_with_trailing_slash() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("build")).unwrap();
    fs::write(dir.path().join("build/out.o"), "").unwrap();
    fs::write(dir.path().join("keep.txt"), "").unwrap();

    trellis()
        .arg("clear")
        .arg(dir.path())
        .arg("build/")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"));

    assert!(!dir.path().join("build").exists());
    assert!(dir.path().join("keep.txt").exists());
}

#[test]
fn clear_everything() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("keep.txt"), "").unwrap();
    fs::create_dir(dir.path().join("dropdir")).unwrap();

    trellis().arg("clear").arg(dir.path()).assert().success();

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn clear_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    trellis()
        .arg("clear")
        .arg(dir.path().join("absent"))
        .assert()
        .failure();
}

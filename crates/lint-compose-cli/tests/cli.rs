use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const BASE: &str = r#"[
  {
    "name": "preset/style",
    "rules": {
      "style/no-tabs": "error",
      "style/indent": ["error", 2]
    }
  }
]"#;

fn cmd() -> Command {
    Command::cargo_bin("lint-compose-cli").unwrap()
}

#[test]
fn documentation_files_turn_no_tabs_off() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("lint.base.json").write_str(BASE).unwrap();

    cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["--rule", "style/no-tabs", "README.md", "SPEC.md", "src/main.ts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("README.md: \"off\""))
        .stdout(predicate::str::contains("SPEC.md: \"off\""))
        .stdout(predicate::str::contains("src/main.ts: \"error\""));
}

#[test]
fn prints_full_resolved_config() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("lint.base.json").write_str(BASE).unwrap();

    let output = cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("README.md")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("one JSON object");
    assert_eq!(value["path"], "README.md");
    assert_eq!(value["ignored"], false);
    assert_eq!(value["rules"]["style/no-tabs"], "off");
    assert_eq!(value["rules"]["style/indent"], serde_json::json!(["error", 2]));
}

#[test]
fn project_overrides_can_be_skipped() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("lint.base.json").write_str(BASE).unwrap();

    cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["--no-project-overrides", "--rule", "style/no-tabs", "README.md"])
        .assert()
        .success()
        .stdout(predicate::eq("README.md: \"error\"\n"));
}

#[test]
fn extra_overrides_apply_last() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("lint.base.json").write_str(BASE).unwrap();
    dir.child("extra.json")
        .write_str(r#"{ "files": ["README.md"], "rules": { "style/no-tabs": "warn" } }"#)
        .unwrap();

    cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("--overrides")
        .arg(dir.child("extra.json").path())
        .args(["--rule", "style/no-tabs", "README.md"])
        .assert()
        .success()
        .stdout(predicate::eq("README.md: \"warn\"\n"));
}

#[test]
fn missing_default_base_is_empty() {
    let dir = assert_fs::TempDir::new().unwrap();

    cmd()
        .arg("--root")
        .arg(dir.path())
        .args(["--rule", "style/no-tabs", "README.md", "main.rs"])
        .assert()
        .success()
        .stdout(predicate::eq("README.md: \"off\"\nmain.rs: unset\n"));
}

#[test]
fn malformed_base_exits_with_config_error() {
    let dir = assert_fs::TempDir::new().unwrap();
    let base = dir.child("broken.json");
    base.write_str(r#"{ "rules": { "style/no-tabs": "loud" } }"#).unwrap();

    cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("--base")
        .arg(base.path())
        .arg("README.md")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("style/no-tabs"));
}

#[test]
fn missing_explicit_base_is_an_error() {
    let dir = assert_fs::TempDir::new().unwrap();

    cmd()
        .arg("--root")
        .arg(dir.path())
        .arg("--base")
        .arg(dir.path().join("nope.json"))
        .arg("README.md")
        .assert()
        .code(1);
}

#[test]
fn relative_root_still_matches_documentation_files() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("sub/lint.base.json").write_str(BASE).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["--root", "sub", "--rule", "style/no-tabs", "README.md", "src/main.ts"])
        .assert()
        .success()
        .stdout(predicate::eq("README.md: \"off\"\nsrc/main.ts: \"error\"\n"));
}

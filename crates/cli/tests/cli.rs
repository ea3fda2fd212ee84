use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn write_manifest(dir: &std::path::Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("s3put.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn check_reports_valid_manifest() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        tmp.path(),
        r#"
[job]
bucket = "assets"
dest = "v1"
"#,
    );

    Command::cargo_bin("s3put")
        .unwrap()
        .arg("check")
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Manifest valid"))
        .stdout(predicate::str::contains("Bucket: assets"));
}

#[test]
fn check_fails_without_bucket() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        tmp.path(),
        r#"
[job]
dest = "v1"
"#,
    );

    Command::cargo_bin("s3put")
        .unwrap()
        .arg("check")
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .failure();
}

#[test]
fn check_fails_on_malformed_cache_control() {
    let tmp = tempfile::tempdir().unwrap();
    let manifest = write_manifest(
        tmp.path(),
        r#"
[job]
bucket = "assets"
cache_control = "abc"
"#,
    );

    Command::cargo_bin("s3put")
        .unwrap()
        .arg("check")
        .arg("--manifest")
        .arg(&manifest)
        .assert()
        .failure();
}

#[test]
fn plan_resolves_destination_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let build = tmp.path().join("build");
    fs::create_dir_all(build.join("css")).unwrap();
    fs::write(build.join("css/app.css"), "body {}").unwrap();

    let manifest = write_manifest(
        tmp.path(),
        &format!(
            r#"
[job]
bucket = "assets"
dest = "v1"

[[selection]]
dir = "{}"
include = ["**/*"]

[[content_type]]
ext = ".css"
value = "text/css"
"#,
            build.display()
        ),
    );

    Command::cargo_bin("s3put")
        .unwrap()
        .arg("plan")
        .arg("--manifest")
        .arg(&manifest)
        .arg("--output")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("v1/css/app.css"))
        .stdout(predicate::str::contains("text/css"));
}

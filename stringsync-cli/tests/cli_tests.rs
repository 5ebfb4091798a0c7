use assert_cmd::Command;

fn stringsync() -> Command {
    Command::cargo_bin("stringsync").expect("binary built")
}

#[test]
fn self_test_passes() {
    stringsync()
        .arg("--self-test")
        .assert()
        .success()
        .stdout(predicates::str::contains("checks passed"));
}

#[test]
fn rejects_input_that_is_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("not_a_dir.m");
    std::fs::write(&file, "").unwrap();

    stringsync()
        .arg("--input")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicates::str::contains("is not a directory"));
}

#[test]
fn rejects_missing_input_directory() {
    let dir = tempfile::tempdir().unwrap();
    stringsync()
        .arg("--input")
        .arg(dir.path().join("absent"))
        .assert()
        .failure();
}

#[test]
fn empty_project_succeeds_without_running_genstrings() {
    // No matching sources, so the extraction tool is never invoked and the
    // run succeeds even on machines without genstrings installed.
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("README.md"), "# readme").unwrap();

    stringsync()
        .arg("--input")
        .arg(dir.path())
        .arg("--output")
        .arg(dir.path())
        .assert()
        .success();
}

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_includes_required_options() {
    let mut cmd = Command::cargo_bin("tccinspect").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("TARGET"))
        .stdout(predicate::str::contains("--service"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--human"))
        .stdout(predicate::str::contains("--quiet"))
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--version"))
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_help_describes_target() {
    let mut cmd = Command::cargo_bin("tccinspect").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bundle identifier"))
        .stdout(predicate::str::contains(".app"));
}

#[test]
fn test_help_describes_service_filter() {
    let mut cmd = Command::cargo_bin("tccinspect").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Filter"))
        .stdout(predicate::str::contains("glob"));
}

#[test]
fn test_missing_target_is_usage_error() {
    let mut cmd = Command::cargo_bin("tccinspect").unwrap();

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("TARGET"));
}

#[test]
fn test_quiet_and_verbose_conflict() {
    let mut cmd = Command::cargo_bin("tccinspect").unwrap();
    cmd.args(["--quiet", "--verbose", "com.example.App"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used"));
}

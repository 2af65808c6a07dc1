use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("tabform");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("tabform"))
        .stdout(contains("--schema"));
}

#[test]
fn rejects_missing_artifact() {
    let mut cmd = cargo::cargo_bin_cmd!("tabform");
    cmd.args(["--artifact", "/definitely/not/here.csv"])
        .assert()
        .failure()
        .stderr(contains("artifact"));
}

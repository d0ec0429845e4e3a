use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("nestform");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("nestform"))
        .stdout(contains("--script"));
}

#[test]
fn submits_script_from_stdin() {
    let script = "\
set tableConfig orders
choose schemaList[0].jobTypes dataGrid
set schemaList[0].config nightly
set schemaList[0].secondLevel[0].name id
choose schemaList[0].secondLevel[0].type string
set schemaList[0].secondLevel[0].thirdLevel[0].name seq
choose schemaList[0].secondLevel[0].thirdLevel[0].random number
submit
";
    let mut cmd = cargo::cargo_bin_cmd!("nestform");
    let output = cmd
        .args(["--script", "-", "--no-pretty"])
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let values: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(values["tableConfig"], "orders");
    assert_eq!(values["schemaList"][0]["secondLevel"][0]["type"], "string");
    assert_eq!(
        values["schemaList"][0]["secondLevel"][0]["thirdLevel"][0]["random"],
        "number"
    );
}

#[test]
fn blocked_submission_lists_issues() {
    let mut cmd = cargo::cargo_bin_cmd!("nestform");
    cmd.args(["--script", "-"])
        .write_stdin("set tableConfig orders\n")
        .assert()
        .failure()
        .stderr(contains("submission blocked"))
        .stderr(contains("schemaList[0].config: Required"));
}

#[test]
fn reports_script_line_on_parse_error() {
    let mut cmd = cargo::cargo_bin_cmd!("nestform");
    cmd.args(["--script", "-"])
        .write_stdin("set tableConfig orders\nfrobnicate x\n")
        .assert()
        .failure()
        .stderr(contains("line 2"));
}

#[test]
fn outline_goes_to_stderr() {
    let mut cmd = cargo::cargo_bin_cmd!("nestform");
    cmd.args(["--script", "-", "--outline", "--no-submit"])
        .write_stdin("set tableConfig orders\n")
        .assert()
        .success()
        .stdout("")
        .stderr(contains("+ Add"));
}

#[test]
fn prints_version() {
    let mut cmd = cargo::cargo_bin_cmd!("nestform");
    cmd.arg("-V")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn command_failure_keeps_its_reason() {
    let mut cmd = cargo::cargo_bin_cmd!("nestform");
    cmd.args(["--script", "-"])
        .write_stdin("set tableConfig ok\nchoose tableConfig x\n")
        .assert()
        .failure()
        .stderr(contains("line 2"))
        .stderr(contains("'tableConfig' is not a choice field"));
}

#[test]
fn seed_values_take_short_flag() {
    let mut cmd = cargo::cargo_bin_cmd!("nestform");
    cmd.args(["-c", r#"{"tableConfig": "seeded"}"#, "--script", "-", "--no-pretty"])
        .write_stdin("submit\n")
        .assert()
        .success()
        .stdout(contains(r#""tableConfig":"seeded""#));
}

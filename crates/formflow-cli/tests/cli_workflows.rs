// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use serde_json::Value;

fn formflow() -> Command {
    Command::new(env!("CARGO_BIN_EXE_formflow"))
}

fn stdout_json(output: &std::process::Output) -> Value {
    let text = String::from_utf8(output.stdout.clone()).expect("utf8 stdout");
    serde_json::from_str(&text).expect("json stdout")
}

#[test]
fn help_lists_every_operation() {
    let output = formflow().arg("--help").output().expect("run help");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8 help");
    for cmd in ["seed-master", "publish-all", "debug-targeting", "openapi"] {
        assert!(text.contains(cmd), "missing {cmd} in help:\n{text}");
    }
}

#[test]
fn seed_master_is_idempotent_and_force_replaces() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db = tmp.path().join("formflow.sqlite");
    let db = db.to_str().expect("utf8 path");

    let first = formflow()
        .args(["--json", "seed-master", "--db", db])
        .output()
        .expect("seed");
    assert!(first.status.success());
    let first = stdout_json(&first);
    assert!(first["departments"].as_u64().unwrap_or(0) > 0);
    assert_eq!(first["replaced"], false);

    let again = formflow()
        .args(["--json", "seed-master", "--db", db, "--force"])
        .output()
        .expect("seed again");
    assert!(again.status.success());
    let again = stdout_json(&again);
    assert_eq!(again["departments"], first["departments"]);
    assert_eq!(again["replaced"], true);
}

#[test]
fn publish_all_and_debug_targeting_run_on_a_fresh_db() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db = tmp.path().join("formflow.sqlite");
    let db = db.to_str().expect("utf8 path");

    let output = formflow()
        .args(["publish-all", "--db", db])
        .output()
        .expect("publish-all");
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).expect("utf8");
    assert!(text.contains("matched 0 forms"));

    let output = formflow()
        .args(["--json", "debug-targeting", "--db", db])
        .output()
        .expect("debug-targeting");
    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["publishedForms"], 0);
    assert_eq!(report["employees"].as_array().map(Vec::len), Some(0));

    let output = formflow()
        .args(["debug-targeting", "--db", db, "--email", "nobody@org.in"])
        .output()
        .expect("debug-targeting by email");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn openapi_prints_or_writes_the_document() {
    let output = formflow().arg("openapi").output().expect("openapi");
    assert!(output.status.success());
    let doc = stdout_json(&output);
    assert!(doc["openapi"].as_str().unwrap_or("").starts_with("3."));
    assert!(doc["paths"].get("/api/forms").is_some());

    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("openapi.json");
    let output = formflow()
        .args(["openapi", "--out", out.to_str().expect("utf8 path")])
        .output()
        .expect("openapi --out");
    assert!(output.status.success());
    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&out).expect("read openapi")).expect("json");
    assert_eq!(written, doc);
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let output = formflow().output().expect("run bare");
    assert_eq!(output.status.code(), Some(2));
}

use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write(dir: &Path, rel: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

const CONFIG: &str = r#"
version = 1

[[profiles.default.rules]]
field = "dob"
type = "date"
check = "before"
args = ["now"]
format = "mm/dd/yyyy"

[[profiles.default.rules]]
field = "email"
type = "string"
check = "isEmail"

[[profiles.default.rules]]
field = "phone"
type = "string"
check = "isPhone"

[[profiles.default.rules]]
field = "weight"
type = "number"
check = "between"
args = [1, 500]
format = "1"
"#;

fn fieldcheck(cfg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fieldcheck"));
    cmd.arg("--config").arg(cfg);
    cmd
}

#[test]
fn check_valid_json_record_succeeds() {
    let tmp = tempdir().unwrap();
    let cfg = write(tmp.path(), "config.toml", CONFIG);
    let rec = write(
        tmp.path(),
        "patient.json",
        r#"{"dob": "1990-07-04", "email": "Ana@Example.com", "phone": "415.555.2671", "weight": "150"}"#,
    );

    fieldcheck(&cfg)
        .arg("check")
        .arg(&rec)
        .assert()
        .success()
        .stdout(predicate::str::contains("07/04/1990"))
        .stdout(predicate::str::contains("(415) 555-2671"))
        .stdout(predicate::str::contains("1 of 1 records valid"));

    // Without --write the file is untouched
    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&rec).unwrap()).unwrap();
    assert_eq!(on_disk["dob"], "1990-07-04");
}

#[test]
fn check_reports_failures_and_exits_nonzero() {
    let tmp = tempdir().unwrap();
    let cfg = write(tmp.path(), "config.toml", CONFIG);
    let rec = write(
        tmp.path(),
        "people.json",
        r#"[
            {"dob": "1990-07-04", "email": "a@b.co", "phone": "4155552671", "weight": 80},
            {"dob": "2999-01-01", "email": "nope", "phone": "4155552671", "weight": 80}
        ]"#,
    );

    fieldcheck(&cfg)
        .arg("check")
        .arg(&rec)
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL"))
        .stdout(predicate::str::contains("Invalid email address"))
        .stdout(predicate::str::contains("Date must be before"))
        .stdout(predicate::str::contains("1 of 2 records valid"));
}

#[test]
fn check_json_output() {
    let tmp = tempdir().unwrap();
    let cfg = write(tmp.path(), "config.toml", CONFIG);
    let rec = write(
        tmp.path(),
        "patient.json",
        r#"{"dob": "banana", "email": "a@b.co", "phone": "4155552671", "weight": "72.46"}"#,
    );

    let assert = fieldcheck(&cfg)
        .args(["check", "--output", "json"])
        .arg(&rec)
        .assert()
        .failure();

    let out: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let first = &out[0];
    assert_eq!(first["record"], 1);
    assert_eq!(first["valid"], false);
    assert_eq!(first["report"]["outcomes"][0]["check"], "date.before");
    assert_eq!(first["report"]["outcomes"][0]["passed"], false);
    assert_eq!(first["fields"]["dob"]["value"], "banana");
    assert_eq!(first["fields"]["weight"]["value"], "72.5");
}

#[test]
fn check_write_persists_normalized_json() {
    let tmp = tempdir().unwrap();
    let cfg = write(tmp.path(), "config.toml", CONFIG);
    let rec = write(
        tmp.path(),
        "patient.json",
        r#"{"dob": "March 5, 1980", "email": " X@Y.ORG ", "phone": "+1 212 555 0199", "weight": "1,00"}"#,
    );

    fieldcheck(&cfg).arg("check").arg("--write").arg(&rec).assert().success();

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&rec).unwrap()).unwrap();
    assert_eq!(on_disk["dob"], "03/05/1980");
    assert_eq!(on_disk["email"], "x@y.org");
    assert_eq!(on_disk["phone"], "(212) 555-0199");
    assert_eq!(on_disk["weight"], "100.0");
}

#[test]
fn check_write_keeps_markdown_body() {
    let tmp = tempdir().unwrap();
    let cfg = write(tmp.path(), "config.toml", CONFIG);
    let note = write(
        tmp.path(),
        "intake.md",
        "---\nname: Ana\ndob: 1990-07-04\nemail: ana@example.com\nphone: 415-555-2671\nweight: 60\n---\n\n# Notes\n\nFirst visit.\n",
    );

    fieldcheck(&cfg).arg("check").arg("--write").arg(&note).assert().success();

    let content = fs::read_to_string(&note).unwrap();
    assert!(content.starts_with("---\nname: Ana\n"), "{content}");
    assert!(content.contains("07/04/1990"), "{content}");
    assert!(content.contains("(415) 555-2671"), "{content}");
    assert!(content.ends_with("# Notes\n\nFirst visit.\n"), "{content}");
}

#[test]
fn check_rejects_unsupported_file() {
    let tmp = tempdir().unwrap();
    let cfg = write(tmp.path(), "config.toml", CONFIG);
    let rec = write(tmp.path(), "data.csv", "dob\n2024-01-01\n");

    fieldcheck(&cfg)
        .arg("check")
        .arg(&rec)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error loading records"));
}

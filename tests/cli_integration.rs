use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const GO_TEMPLATE: &str = include_str!("../templates/gitattributes.go");

fn gitattrs(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitattrs").unwrap();
    cmd.current_dir(home)
        .env("GITATTRS_CONFIG_DIR", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("GITATTRS_LOG");
    cmd
}

#[test]
fn test_show_prints_template_verbatim() {
    let temp_dir = tempfile::tempdir().unwrap();

    let output = gitattrs(temp_dir.path())
        .arg("show")
        .arg("go")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, GO_TEMPLATE.as_bytes());
}

#[test]
fn test_show_json_lists_rules_in_order() {
    let temp_dir = tempfile::tempdir().unwrap();

    let output = gitattrs(temp_dir.path())
        .args(["show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rules = rules.as_array().unwrap();
    assert_eq!(rules.len(), 37);
    assert_eq!(
        rules[0],
        serde_json::json!({"pattern": "*", "attributes": ["text=auto", "eol=lf"]})
    );
    assert!(rules.contains(&serde_json::json!({"pattern": "*.png", "attributes": ["binary"]})));
}

#[test]
fn test_init_round_trip_is_byte_identical() {
    let temp_dir = tempfile::tempdir().unwrap();
    let project = temp_dir.path().join("project");
    fs::create_dir(&project).unwrap();

    gitattrs(temp_dir.path())
        .arg("init")
        .arg("project")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"))
        .stdout(predicate::str::contains("git add --renormalize ."));

    let written = fs::read(project.join(".gitattributes")).unwrap();
    assert_eq!(written, GO_TEMPLATE.as_bytes());

    // Running again is a no-op
    gitattrs(temp_dir.path())
        .arg("init")
        .arg("project")
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

#[test]
fn test_init_refuses_to_clobber_then_forces_with_backup() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join(".gitattributes"), "*.go text\n").unwrap();

    gitattrs(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join(".gitattributes")).unwrap(),
        "*.go text\n"
    );

    gitattrs(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp_dir.path().join(".gitattributes")).unwrap(),
        GO_TEMPLATE
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(".gitattributes.orig")).unwrap(),
        "*.go text\n"
    );
}

#[test]
fn test_init_into_missing_directory_fails() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitattrs(temp_dir.path())
        .args(["init", "no/such/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_init_unknown_template() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitattrs(temp_dir.path())
        .args(["init", "-t", "cobol"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown template: cobol"));

    assert!(!temp_dir.path().join(".gitattributes").exists());
}

#[test]
fn test_check_reports_grammar_errors() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file = temp_dir.path().join("attrs");
    fs::write(&file, "* text=auto eol=lf\n*.go\n").unwrap();

    gitattrs(temp_dir.path())
        .arg("check")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(":2: error: pattern '*.go' has no attributes"));
}

#[test]
fn test_check_clean_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join(".gitattributes"), GO_TEMPLATE).unwrap();

    gitattrs(temp_dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("no problems found"));
}

#[test]
fn test_check_stdin_warnings_do_not_fail() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitattrs(temp_dir.path())
        .args(["check", "-"])
        .write_stdin("*.go text eol=lf\n* text=auto eol=lf\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("<stdin>:2: warning"));
}

#[test]
fn test_status_missing_then_up_to_date() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitattrs(temp_dir.path())
        .arg("status")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("does not exist"));

    gitattrs(temp_dir.path()).arg("init").assert().success();

    gitattrs(temp_dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn test_status_lists_differences() {
    let temp_dir = tempfile::tempdir().unwrap();
    let modified = GO_TEMPLATE.replace("*.svg binary\n", "") + "*.rs text eol=lf\n";
    fs::write(temp_dir.path().join(".gitattributes"), modified).unwrap();

    gitattrs(temp_dir.path())
        .arg("status")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 missing, 1 extra, 0 changed"))
        .stdout(predicate::str::contains("*.svg binary"))
        .stdout(predicate::str::contains("*.rs text eol=lf"));
}

#[test]
fn test_explain_json_uses_last_matching_rule() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join(".gitattributes"),
        "* text=auto eol=lf\n*.png binary\n",
    )
    .unwrap();

    let output = gitattrs(temp_dir.path())
        .args(["explain", "--json", "assets/logo.png", "main.go"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let png = &value[0];
    assert_eq!(png["path"], "assets/logo.png");
    assert_eq!(png["attributes"]["text"]["state"], "unset");
    assert_eq!(png["attributes"]["text"]["line"], 2);
    assert_eq!(png["attributes"]["eol"]["value"], "lf");

    let go = &value[1];
    assert_eq!(go["attributes"]["text"]["value"], "auto");
    assert!(go["attributes"].get("binary").is_none());
}

#[test]
fn test_explain_without_file_uses_template() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitattrs(temp_dir.path())
        .args(["explain", "go.sum"])
        .assert()
        .success()
        .stdout(predicate::str::contains("showing the 'go' template"))
        .stdout(predicate::str::contains("go.sum"));
}

#[test]
fn test_config_set_and_get() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitattrs(temp_dir.path())
        .args(["config", "backup", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backup set to false"));

    gitattrs(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("template = go"))
        .stdout(predicate::str::contains("backup = false"));

    gitattrs(temp_dir.path())
        .args(["config", "template", "cobol"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unknown template"));
}

#[test]
fn test_force_respects_disabled_backup() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join(".gitattributes"), "old text\n").unwrap();

    gitattrs(temp_dir.path())
        .args(["config", "backup", "off"])
        .assert()
        .success();

    gitattrs(temp_dir.path())
        .args(["init", "-f"])
        .assert()
        .success();

    assert!(!temp_dir.path().join(".gitattributes.orig").exists());
}

#[test]
fn test_list_templates() {
    let temp_dir = tempfile::tempdir().unwrap();

    gitattrs(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("go"))
        .stdout(predicate::str::contains("golang"))
        .stdout(predicate::str::contains("[37 rules]"));
}

#[test]
fn test_non_utf8_file_is_handled_by_every_command() {
    let temp_dir = tempfile::tempdir().unwrap();
    let latin1: &[u8] = b"*.txt text\n# caf\xe9\n";
    fs::write(temp_dir.path().join(".gitattributes"), latin1).unwrap();

    gitattrs(temp_dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains(":2: warning: line is not valid UTF-8"));

    gitattrs(temp_dir.path())
        .args(["explain", "notes.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"));

    gitattrs(temp_dir.path())
        .arg("status")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("differs"));

    gitattrs(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();

    assert_eq!(
        fs::read(temp_dir.path().join(".gitattributes")).unwrap(),
        GO_TEMPLATE.as_bytes()
    );
    assert_eq!(
        fs::read(temp_dir.path().join(".gitattributes.orig")).unwrap(),
        latin1
    );
}

#[test]
fn test_explain_unset_macro_clears_its_expansion() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join(".gitattributes"),
        "*.png binary\n*.png -binary\n",
    )
    .unwrap();

    let output = gitattrs(temp_dir.path())
        .args(["explain", "--json", "x.png"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value[0]["attributes"],
        serde_json::json!({"binary": {"state": "unset", "line": 2}})
    );
}

#[test]
fn test_corrupt_config_can_be_repaired_with_config_set() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_dir = temp_dir.path().join(".config");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.json"), "{ not json").unwrap();

    gitattrs(temp_dir.path())
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));

    gitattrs(temp_dir.path())
        .args(["config", "backup", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backup set to false"));

    gitattrs(temp_dir.path()).arg("list").assert().success();
}

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Points the config lookup at an empty directory so a developer's own
/// config file never leaks into the tests.
fn isolated(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("brphone");
    cmd.env("XDG_CONFIG_HOME", home).env_remove("RUST_LOG");
    cmd
}

fn run_cmd(home: &Path, args: &[&str]) -> String {
    let output = isolated(home).args(args).output().expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(home: &Path, args: &[&str]) -> Value {
    let output = isolated(home)
        .arg("--json")
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_converts_between_forms() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();

    let key = run_cmd(home, &["key", "5531991156109@s.whatsapp.net", "(31) 99115-6109"]);
    assert_eq!(key, "5531991156109\n5531991156109\n");

    assert_eq!(run_cmd(home, &["display", "553191156109"]), "(31) 99115-6109\n");
    assert_eq!(run_cmd(home, &["storage", "+5531991156109"]), "553191156109\n");
    assert_eq!(
        run_cmd(home, &["spreadsheet", "553191156109"]),
        "+5531991156109\n"
    );
    assert_eq!(run_cmd(home, &["persist", "553191156109"]), "'+5531991156109\n");
}

#[test]
fn cli_json_output_pairs_input_and_output() {
    let temp = TempDir::new().expect("temp dir");
    let value = run_cmd_json(temp.path(), &["key", "123", "553191156109"]);
    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["input"], "123");
    assert_eq!(items[0]["output"], "");
    assert_eq!(items[1]["output"], "5531991156109");
}

#[test]
fn cli_variants_and_inspect() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();

    let variants = run_cmd_json(home, &["variants", "553191156109"]);
    assert_eq!(
        variants,
        serde_json::json!(["31991156109", "553191156109", "5531991156109"])
    );
    assert_eq!(run_cmd(home, &["variants", "12"]), "no variants\n");

    let report = run_cmd_json(home, &["inspect", "553191156109"]);
    assert_eq!(report["kind"], "canonical");
    assert_eq!(report["display_form"], "(31) 99115-6109");
    assert_eq!(report["is_valid"], true);
}

#[test]
fn cli_validate_sets_exit_code() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();

    assert_eq!(
        run_cmd(home, &["validate", "553191156109"]),
        "553191156109: valid\n"
    );

    let output = isolated(home)
        .args(["validate", "553191156109", "123456"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("123456: invalid"));
}

#[test]
fn cli_convert_reads_lines_with_config_default() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();
    let input = home.join("phones.txt");
    fs::write(&input, "553191156109\n\n+5511987654321\n553191156109\n").expect("write input");

    let config_dir = home.join("brphone");
    fs::create_dir_all(&config_dir).expect("config dir");
    fs::write(
        config_dir.join("config.toml"),
        "default_form = \"display\"\ncache_capacity = 8\n",
    )
    .expect("write config");

    let out = run_cmd(home, &["convert", "--input", input.to_str().expect("path")]);
    assert_eq!(
        out,
        "(31) 99115-6109\n\n(11) 98765-4321\n(31) 99115-6109\n"
    );

    let out = run_cmd(
        home,
        &[
            "convert",
            "--form",
            "storage",
            "--input",
            input.to_str().expect("path"),
        ],
    );
    assert_eq!(out, "553191156109\n\n551187654321\n553191156109\n");
}

#[test]
fn cli_convert_reads_stdin() {
    let temp = TempDir::new().expect("temp dir");
    let output = isolated(temp.path())
        .args(["convert", "--form", "persistence"])
        .write_stdin("(31) 99115-6109\n")
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    assert_eq!(String::from_utf8(output.stdout).expect("utf8"), "'+5531991156109\n");
}

#[test]
fn cli_match_joins_sheet_and_conversations() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();
    let sheet = home.join("sheet.csv");
    let conversations = home.join("conversations.csv");
    fs::write(
        &sheet,
        "nome,Celular,bairro\nAna,'+5531991156109,Savassi\nBia,+5511987654321,Centro\n",
    )
    .expect("write sheet");
    fs::write(
        &conversations,
        "phone_number,archived\n553191156109@s.whatsapp.net,0\n1230587654321,0\n5521988887777,1\n",
    )
    .expect("write conversations");

    let args = [
        "match",
        "--sheet",
        sheet.to_str().expect("path"),
        "--conversations",
        conversations.to_str().expect("path"),
    ];
    let value = run_cmd_json(home, &args);
    let rows = value["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["match_type"], "exact");
    assert_eq!(rows[0]["sheet_row"], 0);
    assert_eq!(rows[1]["match_type"], "last8");
    assert_eq!(rows[1]["sheet_phone"], "+5511987654321");
    assert_eq!(rows[2]["match_type"], "unmatched");
    assert!(rows[2]["sheet_row"].is_null());
    assert_eq!(value["stats"]["exact"], 1);
    assert_eq!(value["stats"]["last8"], 1);
    assert_eq!(value["stats"]["unmatched"], 1);

    let mut strict = args.to_vec();
    strict.push("--no-last8");
    let text = run_cmd(home, &strict);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "553191156109@s.whatsapp.net\texact\t'+5531991156109");
    assert_eq!(lines[1], "1230587654321\tunmatched\t");
}

#[test]
fn cli_match_reports_missing_inputs() {
    let temp = TempDir::new().expect("temp dir");
    let home = temp.path();
    let sheet = home.join("sheet.csv");
    fs::write(&sheet, "nome,telefone\nAna,553191156109\n").expect("write sheet");

    let output = isolated(home)
        .args([
            "match",
            "--sheet",
            sheet.to_str().expect("path"),
            "--conversations",
            home.join("missing.csv").to_str().expect("path"),
        ])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3), "no celular column: {:?}", output);

    let output = isolated(home)
        .args([
            "match",
            "--sheet",
            sheet.to_str().expect("path"),
            "--sheet-column",
            "telefone",
            "--conversations",
            home.join("missing.csv").to_str().expect("path"),
        ])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(2), "missing file: {:?}", output);
}

#[test]
fn cli_rejects_missing_explicit_config() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("nope.toml");
    let output = isolated(temp.path())
        .args(["--config", missing.to_str().expect("path"), "key", "553191156109"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("load config"));
}

#[test]
fn cli_convert_json_keeps_raw_lines() {
    let temp = TempDir::new().expect("temp dir");
    let output = isolated(temp.path())
        .args(["--json", "convert", "--form", "key"])
        .write_stdin("  553191156109 \n   \n")
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    let value: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    let items = value.as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["input"], "  553191156109 ");
    assert_eq!(items[0]["output"], "5531991156109");
    assert_eq!(items[1]["input"], "   ");
    assert_eq!(items[1]["output"], "");
}

#[test]
fn cli_emits_shell_completions() {
    let temp = TempDir::new().expect("temp dir");
    let out = run_cmd(temp.path(), &["completions", "bash"]);
    assert!(!out.is_empty());
    assert!(out.contains("brphone"));
}

#[test]
fn cli_help_describes_every_subcommand() {
    let temp = TempDir::new().expect("temp dir");
    let help = run_cmd(temp.path(), &["--help"]);
    assert!(help.contains("Every stored representation"));
    assert!(help.contains("valid Brazilian mobile numbers"));
    assert!(help.contains("Show every form"));
}

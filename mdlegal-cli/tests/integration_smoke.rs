//! Smoke tests to verify command wiring end to end

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `mdlegal` isolated from the user's config, answering without latency
fn mdlegal(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("mdlegal").unwrap();
    cmd.env("MDLEGAL_CONFIG", home.path().join("config.toml"))
        .env("MDLEGAL_NO_DELAY", "true")
        .env_remove("RUST_LOG");
    cmd
}

// === Help ===

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    mdlegal(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("session"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("settings"));
}

#[test]
fn test_list_help() {
    let home = TempDir::new().unwrap();
    mdlegal(&home)
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FIELD=VALUE"));
}

// === List Command Tests ===

#[test]
fn test_list_without_entity_names_pages() {
    let home = TempDir::new().unwrap();
    mdlegal(&home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("cases"))
        .stdout(predicate::str::contains("Suporte"));
}

#[test]
fn test_list_cases_json() {
    let home = TempDir::new().unwrap();
    let output = mdlegal(&home)
        .args(["list", "cases", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total"], 12);
    assert_eq!(value["page"], 1);
    assert_eq!(value["items"].as_array().unwrap().len(), 10);
}

#[test]
fn test_list_filter_and_search() {
    let home = TempDir::new().unwrap();
    mdlegal(&home)
        .args(["list", "cases", "-f", "status=ativo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mostrando 1–7 de 7"));

    mdlegal(&home)
        .args(["list", "cases", "--search", "zzzz"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nenhum registro encontrado."));
}

#[test]
fn test_list_page_out_of_range_fails() {
    let home = TempDir::new().unwrap();
    mdlegal(&home)
        .args(["list", "cases", "--page", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_list_unknown_sort_field_fails() {
    let home = TempDir::new().unwrap();
    mdlegal(&home)
        .args(["list", "cases", "--sort", "court"])
        .assert()
        .failure();
}

#[test]
fn test_list_finance_prints_totals() {
    let home = TempDir::new().unwrap();
    mdlegal(&home)
        .args(["list", "finance"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saldo"))
        .stdout(predicate::str::contains("R$"));
}

// === Session Command Tests ===

#[test]
fn test_session_reads_commands_from_stdin() {
    let home = TempDir::new().unwrap();
    mdlegal(&home)
        .args(["session", "cases"])
        .write_stdin(
            "filter status ativo\nnew title='Usucapião' client='Ana Costa'\nbogus\nquit\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("status=Ativo"))
        .stdout(predicate::str::contains("criado #13"))
        .stdout(predicate::str::contains("erro: unknown command 'bogus'"));
}

// === Settings / Config Tests ===

#[test]
fn test_settings_persist_between_runs() {
    let home = TempDir::new().unwrap();
    let settings_dir = home.path().join("settings");
    std::fs::write(
        home.path().join("config.toml"),
        format!("settings_dir = {:?}\n", settings_dir.display().to_string()),
    )
    .unwrap();

    mdlegal(&home)
        .args(["settings", "set", "office", "officeName", "MD Legal Advocacia"])
        .assert()
        .success();

    mdlegal(&home)
        .args(["settings", "get", "office", "officeName"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MD Legal Advocacia"));

    assert!(settings_dir.join("md-legal-office.json").exists());
}

#[test]
fn test_config_path_honors_env() {
    let home = TempDir::new().unwrap();
    mdlegal(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

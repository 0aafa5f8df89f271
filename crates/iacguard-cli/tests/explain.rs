use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn iacguard_cmd() -> Command {
    Command::cargo_bin("iacguard").unwrap()
}

#[test]
fn explain_known_policy() {
    iacguard_cmd()
        .args(["explain", "CKV_AZURE_CUSTOM_5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"))
        .stdout(predicate::str::contains("```hcl"));
}

#[test]
fn explain_unknown_policy_exits_1() {
    iacguard_cmd()
        .args(["explain", "CKV_AZURE_CUSTOM_99"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown policy id: CKV_AZURE_CUSTOM_99"))
        .stderr(predicate::str::contains("CKV_AZURE_CUSTOM_1"));
}

#[test]
fn policies_lists_catalog() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    iacguard_cmd()
        .arg("--config")
        .arg(tmp.path().join("missing.toml"))
        .arg("policies")
        .assert()
        .success()
        .stdout(predicate::str::contains("CKV_AZURE_CUSTOM_1"))
        .stdout(predicate::str::contains("CKV_AZURE_CUSTOM_6"))
        .stdout(predicate::str::contains("azurerm_key_vault_access_policy"));
}

#[test]
fn policies_honours_disabled_entries() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let config = tmp.path().join("iacguard.toml");
    std::fs::write(&config, "[policies.CKV_AZURE_CUSTOM_3]\nenabled = false\n").expect("write config");

    iacguard_cmd()
        .arg("--config")
        .arg(&config)
        .arg("policies")
        .assert()
        .success()
        .stdout(predicate::str::contains("CKV_AZURE_CUSTOM_2"))
        .stdout(predicate::str::contains("CKV_AZURE_CUSTOM_3").not());
}

use crate::cli::support::{
    memory_bank_vault, read_doc, vaultnorm, write_config, write_doc, REPORT,
};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Normalize command tests
// ============================================================================

#[test]
fn test_normalize_memory_bank_scenario() {
    let dir = memory_bank_vault();

    vaultnorm()
        .current_dir(dir.path())
        .args([
            "normalize",
            "--report",
            "content/Reports/links.md",
            "--today",
            "2026-10-18",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Candidates: 1 (1 resolved"))
        .stdout(predicate::str::contains("Substitutions: 2"))
        .stdout(predicate::str::contains("Aliases added: 1"));

    let daily = read_doc(&dir, "Notes/Daily.md");
    assert!(daily.ends_with("See [[4.2. Memory.md]] and [[4.2. Memory.md#Setup]].\n"));
    assert!(daily.contains("status: draft"));

    let target = read_doc(&dir, "Systems/4.2. Memory.md");
    assert!(target.starts_with("---\n"));
    assert!(target.contains("aliases:"));
    assert!(target.contains("- Memory Bank"));
    assert!(target.contains("status: active"));
    assert!(target.contains("2026-10-18"));
    assert!(target.ends_with("# Хранилище знаний (Memory Bank)\n\nContent.\n"));

    // the report is repaired but its table is left alone
    assert!(read_doc(&dir, "Reports/links.md").ends_with(REPORT));
}

#[test]
fn test_normalize_twice_changes_nothing() {
    let dir = memory_bank_vault();
    let args = ["normalize", "--report", "content/Reports/links.md"];

    vaultnorm().current_dir(dir.path()).args(args).assert().success();
    let daily = read_doc(&dir, "Notes/Daily.md");
    let target = read_doc(&dir, "Systems/4.2. Memory.md");

    vaultnorm()
        .current_dir(dir.path())
        .arg("--format")
        .arg("json")
        .args(args)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"substitutions\": 0"))
        .stdout(predicate::str::contains("\"aliases_added\": 0"))
        .stdout(predicate::str::contains("\"files_touched\": 0"));

    assert_eq!(read_doc(&dir, "Notes/Daily.md"), daily);
    assert_eq!(read_doc(&dir, "Systems/4.2. Memory.md"), target);
}

#[test]
fn test_normalize_dry_run_leaves_files() {
    let dir = memory_bank_vault();

    vaultnorm()
        .current_dir(dir.path())
        .args(["normalize", "--report", "content/Reports/links.md", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Substitutions: 2"))
        .stdout(predicate::str::contains("Dry run"));

    assert_eq!(
        read_doc(&dir, "Notes/Daily.md"),
        "See [[Memory Bank]] and [[Memory Bank#Setup]].\n"
    );
}

#[test]
fn test_normalize_uses_configured_report() {
    let dir = memory_bank_vault();
    write_config(&dir, "report = \"Reports/links.md\"\n");

    vaultnorm()
        .current_dir(dir.path())
        .args(["--format", "json", "normalize"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"candidates\": 1"))
        .stdout(predicate::str::contains("\"substitutions\": 2"));
}

#[test]
fn test_normalize_missing_report_still_repairs() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "a.md", "body\n");

    vaultnorm()
        .current_dir(dir.path())
        .args(["normalize", "--report", "content/absent.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Candidates: 0"))
        .stdout(predicate::str::contains("Fields repaired: 5"));

    assert!(read_doc(&dir, "a.md").contains("scope: local-edge"));
}

#[test]
fn test_normalize_shortest_path_wins() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "A.md", "");
    write_doc(&dir, "Folder/A-extended.md", "");
    write_doc(&dir, "Index.md", "Link to [[A]].\n");

    vaultnorm()
        .current_dir(dir.path())
        .args(["--format", "records", "normalize", "--name", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode=normalize"))
        .stdout(predicate::str::contains("ambiguous=1"))
        .stdout(predicate::str::contains("substitutions=1"));

    assert!(read_doc(&dir, "Index.md").ends_with("Link to [[A.md]].\n"));
}

#[test]
fn test_normalize_from_links_with_root_flag() {
    let dir = TempDir::new().unwrap();
    let vault = dir.path().join("vault");
    std::fs::create_dir_all(&vault).unwrap();
    std::fs::write(vault.join("Target.md"), "# Project Memory Bank\n").unwrap();
    std::fs::write(vault.join("Index.md"), "[[Memory Bank|memory]] [[Index]]\n").unwrap();

    vaultnorm()
        .current_dir(dir.path())
        .args(["--root", "vault", "normalize", "--from-links"])
        .assert()
        .success();

    let index = std::fs::read_to_string(vault.join("Index.md")).unwrap();
    assert!(index.ends_with("[[Target.md|memory]] [[Index]]\n"));
}

#[test]
fn test_normalize_missing_root_is_data_error() {
    let dir = TempDir::new().unwrap();

    vaultnorm()
        .current_dir(dir.path())
        .args(["--root", "nowhere", "normalize"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("error:"));

    vaultnorm()
        .current_dir(dir.path())
        .args(["--format", "json", "--root", "nowhere", "normalize"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("\"corpus_not_found\""));
}

#[test]
fn test_normalize_invalid_config_is_usage_error() {
    let dir = memory_bank_vault();
    write_config(&dir, "extension = \"\"\n");

    vaultnorm()
        .current_dir(dir.path())
        .arg("normalize")
        .assert()
        .code(2);
}

use crate::cli::support::{memory_bank_vault, vaultnorm, write_doc, COMPLETE};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Check command tests
// ============================================================================

#[test]
fn test_check_clean_corpus() {
    let dir = TempDir::new().unwrap();
    write_doc(&dir, "A.md", &format!("{COMPLETE}# Alpha\n[[Beta]] [[Alpha]]\n"));
    write_doc(&dir, "sub/Beta.md", &format!("{COMPLETE}[[A#Intro]]\n"));

    vaultnorm()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("Corpus is clean (2 documents scanned)"));
}

#[test]
fn test_check_reports_problems_with_data_exit_code() {
    let dir = memory_bank_vault();

    vaultnorm()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .code(3)
        .stdout(predicate::str::contains(
            "[broken-reference] Notes/Daily.md: [[Memory Bank]]",
        ))
        .stdout(predicate::str::contains("[missing-fields] Notes/Daily.md"))
        .stderr(predicate::str::contains("issue(s) found"));
}

#[test]
fn test_check_json_format() {
    let dir = memory_bank_vault();

    vaultnorm()
        .current_dir(dir.path())
        .args(["--format", "json", "check"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("\"documents_scanned\": 3"))
        .stdout(predicate::str::contains("\"broken_references\""))
        .stdout(predicate::str::contains("\"missing_fields\""))
        .stderr(predicate::str::contains("\"checks_failed\""));
}

#[test]
fn test_check_passes_after_normalize_from_links() {
    let dir = memory_bank_vault();

    vaultnorm()
        .current_dir(dir.path())
        .args(["normalize", "--from-links"])
        .assert()
        .success();

    vaultnorm()
        .current_dir(dir.path())
        .args(["--format", "records", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode=check documents=3 issues=0"));
}

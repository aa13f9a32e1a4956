use crate::cli::support::{memory_bank_vault, read_doc, vaultnorm};
use predicates::prelude::*;

// ============================================================================
// Resolve command tests
// ============================================================================

#[test]
fn test_resolve_human_output() {
    let dir = memory_bank_vault();

    vaultnorm()
        .current_dir(dir.path())
        .args(["resolve", "--name", "Memory Bank", "--name", "Nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Memory Bank -> Systems/4.2. Memory.md",
        ))
        .stdout(predicate::str::contains("Nowhere -> (unresolved)"))
        .stdout(predicate::str::contains("Resolved 1 of 2 candidate(s)"));

    // resolve never writes
    assert_eq!(
        read_doc(&dir, "Notes/Daily.md"),
        "See [[Memory Bank]] and [[Memory Bank#Setup]].\n"
    );
}

#[test]
fn test_resolve_json_from_report() {
    let dir = memory_bank_vault();

    vaultnorm()
        .current_dir(dir.path())
        .args([
            "--format",
            "json",
            "resolve",
            "--report",
            "content/Reports/links.md",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"candidates\": 1"))
        .stdout(predicate::str::contains("\"target\": \"Systems/4.2. Memory.md\""))
        .stdout(predicate::str::contains("\"basename\": \"4.2. Memory.md\""))
        .stdout(predicate::str::contains("\"unresolved\": []"));
}

#[test]
fn test_resolve_records_from_links() {
    let dir = memory_bank_vault();

    vaultnorm()
        .current_dir(dir.path())
        .args(["--format", "records", "resolve", "--from-links"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode=resolve candidates=1 resolved=1"))
        .stdout(predicate::str::contains(
            "R \"Memory Bank\" Systems/4.2. Memory.md matches=1",
        ));
}

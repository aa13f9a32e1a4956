use super::*;
use crate::corpus::MemoryCorpus;
use crate::document::Document;

const COMPLETE: &str =
    "---\ntype:  doc\nstatus: active\ncreated: 2024-01-01\nlayer: x\nscope: y\n---\n";

const REPORT: &str = "\
# Broken links

| № | Документ | Проблема |
|---|----------|----------|
| 3 | Memory Bank | broken link |
";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn run_with(corpus: &MemoryCorpus, config: &NormConfig, options: &RunOptions) -> RunSummary {
    Pipeline::new(corpus, config)
        .with_today(today())
        .run(options)
        .unwrap()
}

fn run(corpus: &MemoryCorpus, options: &RunOptions) -> RunSummary {
    run_with(corpus, &NormConfig::default(), options)
}

fn report_at(path: &str) -> RunOptions {
    RunOptions {
        report: Some(ReportSource::InCorpus(path.to_string())),
        ..Default::default()
    }
}

fn names(list: &[&str]) -> RunOptions {
    RunOptions {
        names: list.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

fn reparse(corpus: &MemoryCorpus, path: &str) -> Document {
    Document::parse(path, &corpus.text(path).unwrap())
}

fn memory_bank_corpus() -> MemoryCorpus {
    MemoryCorpus::new()
        .with_document(
            "Systems/4.2. Memory.md",
            "# Хранилище знаний (Memory Bank)\n\nContent.\n",
        )
        .with_document(
            "Notes/Daily.md",
            "See [[Memory Bank]] and [[Memory Bank#Setup]].\n",
        )
        .with_document("Reports/broken-links.md", REPORT)
}

#[test]
fn test_memory_bank_scenario() {
    let corpus = memory_bank_corpus();
    let summary = run(&corpus, &report_at("Reports/broken-links.md"));

    assert_eq!(summary.files_indexed, 3);
    assert_eq!(summary.candidates, 1);
    assert_eq!(summary.resolved, 1);
    assert_eq!(summary.unresolved, 0);
    assert_eq!(summary.substitutions, 2);
    assert_eq!(summary.aliases_added, 1);
    assert_eq!(summary.files_touched, 3);
    assert_eq!(summary.fields_repaired, 15);
    assert!(!summary.is_partial_failure());

    let daily = corpus.text("Notes/Daily.md").unwrap();
    assert!(daily.ends_with("See [[4.2. Memory.md]] and [[4.2. Memory.md#Setup]].\n"));

    let target = reparse(&corpus, "Systems/4.2. Memory.md");
    assert_eq!(target.metadata().aliases(), vec!["Memory Bank"]);
    assert_eq!(target.metadata().get_str("status"), Some("active"));
    assert_eq!(target.metadata().get_str("layer"), Some("methodology"));
    assert!(target.body().starts_with("# Хранилище знаний (Memory Bank)\n"));

    let daily = reparse(&corpus, "Notes/Daily.md");
    assert_eq!(daily.metadata().get_str("status"), Some("draft"));
    assert_eq!(daily.metadata().get_str("layer"), Some("operations"));
}

#[test]
fn test_second_run_is_idempotent() {
    let corpus = memory_bank_corpus();
    let options = report_at("Reports/broken-links.md");
    run(&corpus, &options);
    let after_first: Vec<Option<String>> = ["Systems/4.2. Memory.md", "Notes/Daily.md"]
        .iter()
        .map(|p| corpus.text(p))
        .collect();
    let writes = corpus.write_count();

    let second = run(&corpus, &options);
    assert_eq!(second.resolved, 1);
    assert_eq!(second.substitutions, 0);
    assert_eq!(second.aliases_added, 0);
    assert_eq!(second.fields_repaired, 0);
    assert_eq!(second.files_touched, 0);
    assert_eq!(corpus.write_count(), writes);

    let after_second: Vec<Option<String>> = ["Systems/4.2. Memory.md", "Notes/Daily.md"]
        .iter()
        .map(|p| corpus.text(p))
        .collect();
    assert_eq!(after_first, after_second);
}

#[test]
fn test_shorter_path_wins_across_repeated_runs() {
    for _ in 0..3 {
        let corpus = MemoryCorpus::new()
            .with_document("Folder/A-extended.md", "")
            .with_document("A.md", "")
            .with_document("Index.md", "Link to [[A]].\n");

        let summary = run(&corpus, &names(&["A"]));
        assert_eq!(summary.ambiguous, 1);
        assert_eq!(summary.substitutions, 1);
        // the name equals the winner's stem
        assert_eq!(summary.aliases_added, 0);
        assert!(corpus.text("Index.md").unwrap().ends_with("Link to [[A.md]].\n"));
        assert!(reparse(&corpus, "A.md").metadata().aliases().is_empty());
    }
}

#[test]
fn test_reference_already_at_basename_is_not_counted() {
    let corpus = MemoryCorpus::new()
        .with_document("A.md", "")
        .with_document("Index.md", "Link to [[A.md#Top]].\n");

    let summary = run(&corpus, &names(&["A.md"]));
    assert_eq!(summary.resolved, 1);
    assert_eq!(summary.substitutions, 0);
    assert!(corpus.text("Index.md").unwrap().ends_with("Link to [[A.md#Top]].\n"));

    let again = run(&corpus, &names(&["A.md"]));
    assert_eq!(again.substitutions, 0);
    assert_eq!(again.files_touched, 0);
}

#[test]
fn test_alias_soundness() {
    let corpus = MemoryCorpus::new()
        .with_document("A.md", "")
        .with_document("Folder/A-extended.md", "")
        .with_document("Systems/4.2. Memory.md", "# Хранилище знаний (Memory Bank)\n")
        .with_document("Legacy.md", "---\nalias: Old Legacy\n---\n# Legacy\n");
    let config = NormConfig::default();
    let options = names(&["A", "Memory Bank", "Legacy", "legacy"]);

    let plan = Pipeline::new(&corpus, &config)
        .with_today(today())
        .plan(&options)
        .unwrap();
    let expected: Vec<(String, String)> = plan
        .mapping
        .resolved
        .iter()
        .map(|(name, &id)| (name.clone(), plan.index.entry(id).unwrap().path.clone()))
        .collect();
    assert_eq!(expected.len(), 4);

    run_with(&corpus, &config, &options);

    for (name, path) in expected {
        let doc = reparse(&corpus, &path);
        assert!(
            name == doc.stem() || doc.metadata().has_alias(&name),
            "{name} missing from aliases of {path}"
        );
    }
    // the legacy key seeds the new list
    let legacy = reparse(&corpus, "Legacy.md");
    assert_eq!(legacy.metadata().aliases(), vec!["Old Legacy", "legacy"]);
}

#[test]
fn test_required_fields_complete_after_run() {
    let corpus = MemoryCorpus::new()
        .with_document("plain.md", "no metadata at all\n")
        .with_document("empty.md", "---\ntype: guide\nstatus: ''\nlayer:\n---\nbody\n")
        .with_document("broken.md", "---\n- not\n- a mapping\n---\nbody\n")
        .with_document("unclosed.md", "---\ntype: doc\nbody without closing marker\n")
        .with_document("complete.md", &format!("{COMPLETE}body\n"));
    let config = NormConfig::default();

    let summary = run_with(&corpus, &config, &RunOptions::default());
    assert_eq!(summary.files_touched, 4);

    for path in corpus.list().unwrap() {
        let doc = reparse(&corpus, &path);
        for field in &config.required_fields {
            assert!(doc.metadata().has_value(field), "{path} lacks {field}");
        }
    }
    let empty = reparse(&corpus, "empty.md");
    assert_eq!(empty.metadata().get_str("type"), Some("guide"));
    assert_eq!(empty.metadata().get_str("status"), Some("draft"));
    assert_eq!(empty.body(), "body\n");
    assert!(reparse(&corpus, "broken.md").malformed().is_none());
}

#[test]
fn test_substitution_preserves_surrounding_bytes() {
    let body = "Intro\n\n  [[OldName#Section]] tail  \n\t[[Other|label]]\n";
    let corpus = MemoryCorpus::new()
        .with_document("NewBase.md", &format!("{COMPLETE}# OldName\n"))
        .with_document("Source.md", &format!("{COMPLETE}{body}"));

    let summary = run(&corpus, &names(&["OldName"]));
    assert_eq!(summary.substitutions, 1);
    assert_eq!(
        corpus.text("Source.md").unwrap(),
        format!("{COMPLETE}Intro\n\n  [[NewBase.md#Section]] tail  \n\t[[Other|label]]\n")
    );
}

#[test]
fn test_write_failure_does_not_abort_run() {
    let corpus = MemoryCorpus::new()
        .with_document("Locked.md", "locked\n")
        .with_document("Open.md", "open\n")
        .with_read_only("Locked.md");

    let summary = run(&corpus, &RunOptions::default());
    assert!(summary.is_partial_failure());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].path, "Locked.md");
    assert_eq!(summary.failures[0].stage, Stage::Write);
    assert_eq!(summary.files_touched, 1);
    assert_eq!(corpus.text("Locked.md").unwrap(), "locked\n");
    assert!(corpus.text("Open.md").unwrap().starts_with("---\n"));
}

#[test]
fn test_unreadable_document_is_skipped() {
    let corpus = MemoryCorpus::new()
        .with_bytes("binary.md", vec![0xff, 0xfe])
        .with_document("ok.md", &format!("{COMPLETE}fine\n"));

    let summary = run(&corpus, &RunOptions::default());
    assert_eq!(summary.files_indexed, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert!(!summary.is_partial_failure());
}

#[test]
fn test_dry_run_writes_nothing() {
    let corpus = memory_bank_corpus();
    let options = RunOptions {
        dry_run: true,
        ..report_at("Reports/broken-links.md")
    };

    let summary = run(&corpus, &options);
    assert!(summary.dry_run);
    assert_eq!(summary.substitutions, 2);
    assert_eq!(summary.files_touched, 3);
    assert_eq!(corpus.write_count(), 0);
    assert_eq!(
        corpus.text("Notes/Daily.md").unwrap(),
        "See [[Memory Bank]] and [[Memory Bank#Setup]].\n"
    );
}

#[test]
fn test_report_document_is_not_rewritten() {
    let report = "| № | Документ |\n|---|---|\n| 1 | [[Memory Bank]] |\n";
    let corpus = MemoryCorpus::new()
        .with_document("Memory Bank notes.md", "# Notes\n")
        .with_document("Other.md", &format!("{COMPLETE}[[Memory Bank]]\n"))
        .with_document("report.md", &format!("{COMPLETE}{report}"));

    let summary = run(&corpus, &report_at("report.md"));
    assert_eq!(summary.candidates, 1);
    assert_eq!(summary.substitutions, 1);
    assert_eq!(
        corpus.text("report.md").unwrap(),
        format!("{COMPLETE}{report}")
    );
    assert!(corpus
        .text("Other.md")
        .unwrap()
        .ends_with("[[Memory Bank notes.md]]\n"));
}

#[test]
fn test_missing_report_still_repairs() {
    let corpus = MemoryCorpus::new().with_document("a.md", "body\n");
    let summary = run(&corpus, &report_at("nowhere.md"));
    assert_eq!(summary.candidates, 0);
    assert_eq!(summary.fields_repaired, 5);
    assert_eq!(summary.files_touched, 1);
}

#[test]
fn test_external_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.md");
    std::fs::write(&report, REPORT).unwrap();

    let corpus = memory_bank_corpus();
    let options = RunOptions {
        report: Some(ReportSource::External(report)),
        ..Default::default()
    };
    let summary = run(&corpus, &options);
    assert_eq!(summary.candidates, 1);
    assert_eq!(summary.substitutions, 2);

    let missing = RunOptions {
        report: Some(ReportSource::External(dir.path().join("absent.md"))),
        ..Default::default()
    };
    assert_eq!(run(&corpus, &missing).candidates, 0);
}

#[test]
fn test_unreadable_external_report_still_repairs() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.md");
    std::fs::write(&report, [0xff, 0xfe, b'|']).unwrap();

    let corpus = MemoryCorpus::new().with_document("a.md", "body\n");
    let options = RunOptions {
        report: Some(ReportSource::External(report)),
        ..Default::default()
    };
    let summary = run(&corpus, &options);
    assert_eq!(summary.candidates, 0);
    assert_eq!(summary.files_touched, 1);
    assert_eq!(reparse(&corpus, "a.md").metadata().get_str("status"), Some("draft"));
}

#[test]
fn test_blank_configured_default_stays_idempotent() {
    let mut config = NormConfig::default();
    config
        .defaults
        .discovered
        .insert("status".to_string(), String::new());
    let corpus = MemoryCorpus::new().with_document("a.md", "body\n");

    let first = run_with(&corpus, &config, &RunOptions::default());
    assert_eq!(first.fields_repaired, 5);
    assert_eq!(reparse(&corpus, "a.md").metadata().get_str("status"), Some("unknown"));

    let second = run_with(&corpus, &config, &RunOptions::default());
    assert_eq!(second.fields_repaired, 0);
    assert_eq!(second.files_touched, 0);
}

#[test]
fn test_candidates_from_links() {
    let corpus = MemoryCorpus::new()
        .with_document("Systems/4.2. Memory.md", "# Хранилище знаний (Memory Bank)\n")
        .with_document("Index.md", "[[Memory Bank]] [[Index]] [[Nowhere]]\n");
    let options = RunOptions {
        from_links: true,
        ..Default::default()
    };

    let summary = run(&corpus, &options);
    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.resolved, 1);
    assert_eq!(summary.unresolved_sample, vec!["Nowhere"]);
    assert!(corpus
        .text("Index.md")
        .unwrap()
        .ends_with("[[4.2. Memory.md]] [[Index]] [[Nowhere]]\n"));
}

#[test]
fn test_unresolved_sample_is_bounded() {
    let corpus = MemoryCorpus::new().with_document("a.md", &format!("{COMPLETE}body\n"));
    let config = NormConfig {
        unresolved_sample: 2,
        ..NormConfig::default()
    };

    let summary = run_with(&corpus, &config, &names(&["Zed", "Yak", "Xi"]));
    assert_eq!(summary.unresolved, 3);
    assert_eq!(summary.unresolved_sample, vec!["Xi", "Yak"]);
    assert_eq!(summary.files_touched, 0);
}

#[test]
fn test_plan_writes_nothing() {
    let corpus = memory_bank_corpus();
    let config = NormConfig::default();
    let plan = Pipeline::new(&corpus, &config)
        .plan(&report_at("Reports/broken-links.md"))
        .unwrap();

    assert_eq!(plan.report_document, Some(1));
    let report = plan.report();
    assert_eq!(report.resolved[0].target, "Systems/4.2. Memory.md");
    assert_eq!(corpus.write_count(), 0);
}

#[test]
fn test_check_reports_problems() {
    let corpus = MemoryCorpus::new()
        .with_document("a.md", &format!("{COMPLETE}[[Missing]]\n"))
        .with_document("b.md", "body\n");
    let config = NormConfig::default();

    let report = Pipeline::new(&corpus, &config).check().unwrap();
    assert_eq!(report.broken_references.len(), 1);
    assert_eq!(report.missing_fields.len(), 1);
    assert_eq!(report.missing_fields[0].path, "b.md");
}

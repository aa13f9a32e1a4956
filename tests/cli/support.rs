use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use tempfile::TempDir;

/// Get a Command for vaultnorm
pub fn vaultnorm() -> Command {
    cargo_bin_cmd!("vaultnorm")
}

pub const REPORT: &str = "\
# Broken links

| № | Документ | Проблема |
|---|----------|----------|
| 3 | Memory Bank | broken link |
";

pub const COMPLETE: &str =
    "---\ntype: doc\nstatus: active\ncreated: 2024-01-01\nlayer: x\nscope: y\n---\n";

/// Write a document under `content/`, creating parent directories
pub fn write_doc(dir: &TempDir, rel: &str, text: &str) {
    let path = dir.path().join("content").join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, text).unwrap();
}

/// Read a document under `content/`
pub fn read_doc(dir: &TempDir, rel: &str) -> String {
    fs::read_to_string(dir.path().join("content").join(rel)).unwrap()
}

/// Vault with a renamed "Memory Bank" page, a page linking to it and a report
pub fn memory_bank_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_doc(
        &dir,
        "Systems/4.2. Memory.md",
        "# Хранилище знаний (Memory Bank)\n\nContent.\n",
    );
    write_doc(
        &dir,
        "Notes/Daily.md",
        "See [[Memory Bank]] and [[Memory Bank#Setup]].\n",
    );
    write_doc(&dir, "Reports/links.md", REPORT);
    dir
}

pub fn write_config(dir: &TempDir, toml: &str) {
    fs::write(dir.path().join("vaultnorm.toml"), toml).unwrap();
}


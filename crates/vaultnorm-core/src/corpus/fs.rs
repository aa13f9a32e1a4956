use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::Corpus;
use crate::error::{NormError, Result};

/// A corpus rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FsCorpus {
    root: PathBuf,
    extension: String,
}

impl FsCorpus {
    /// Open a corpus; the root must be an existing directory
    pub fn open(root: &Path, extension: &str) -> Result<Self> {
        if !root.is_dir() {
            return Err(NormError::CorpusNotFound {
                root: root.to_path_buf(),
            });
        }
        Ok(FsCorpus {
            root: root.to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Corpus-relative path for a file under the root, if it is under the root
    pub fn relative(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }

    fn absolute(&self, path: &str) -> PathBuf {
        path.split('/')
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }
}

impl Corpus for FsCorpus {
    fn location(&self) -> String {
        self.root.display().to_string()
    }

    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    fn list(&self) -> Result<Vec<String>> {
        let mut paths = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(NormError::CorpusUnreadable {
                        root: self.root.clone(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable corpus entry");
                    continue;
                }
            };

            if !entry.file_type().is_file()
                || !entry
                    .path()
                    .extension()
                    .is_some_and(|e| e == self.extension.as_str())
            {
                continue;
            }
            if let Some(rel) = self.relative(entry.path()) {
                paths.push(rel);
            }
        }

        paths.sort();
        Ok(paths)
    }

    fn read(&self, path: &str) -> Result<String> {
        let bytes = fs::read(self.absolute(path))
            .map_err(|e| NormError::io_operation("read", path, e))?;
        String::from_utf8(bytes).map_err(|_| NormError::NotText {
            path: path.to_string(),
        })
    }

    fn write(&self, path: &str, contents: &str) -> Result<()> {
        fs::write(self.absolute(path), contents)
            .map_err(|e| NormError::io_operation("write", path, e))
    }
}

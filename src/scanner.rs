// Source file discovery
//
// Walks the input root in file-name order, pruning built-in ignored
// directories and `.repomapignore` patterns, and keeps files whose extension
// maps to a grammar (or to the language filter when one is set).

use crate::language::detect_language_from_path;
use crate::utils::ignore::is_default_ignored;
use crate::utils::{is_ignored_by_pattern, load_ignore_file, to_relative_unix_style};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// A file selected for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Unix-style path relative to the scan root
    pub relative_path: String,
}

pub struct FileScanner {
    root: PathBuf,
    patterns: Vec<String>,
    /// Dotted, lower-case extensions; `None` accepts every known language
    extensions: Option<&'static [&'static str]>,
}

impl FileScanner {
    /// Scanner for `root`, with `.repomapignore` patterns loaded and
    /// `extra_patterns` appended.
    pub fn new(root: &Path, extra_patterns: &[String]) -> Self {
        let mut patterns = load_ignore_file(root);
        patterns.extend(extra_patterns.iter().cloned());
        Self {
            root: root.to_path_buf(),
            patterns,
            extensions: None,
        }
    }

    /// Restrict the scan to files ending in one of `extensions`.
    pub fn with_extensions(mut self, extensions: &'static [&'static str]) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Every accepted file, depth-first in file-name order.
    ///
    /// Unreadable directories are reported and skipped; their siblings are still visited.
    pub fn scan(&self) -> Vec<ScannedFile> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_ignored(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.accepts(entry.path()) {
                continue;
            }
            match to_relative_unix_style(entry.path(), &self.root) {
                Ok(relative_path) => files.push(ScannedFile {
                    path: entry.into_path(),
                    relative_path,
                }),
                Err(e) => debug!("Skipping {}: {}", entry.path().display(), e),
            }
        }

        debug!("Scanned {} files under {}", files.len(), self.root.display());
        files
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        if is_default_ignored(&name) {
            return true;
        }
        if self.patterns.is_empty() {
            return false;
        }
        match to_relative_unix_style(entry.path(), &self.root) {
            Ok(relative) => is_ignored_by_pattern(&relative, &self.patterns),
            Err(_) => false,
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        match self.extensions {
            Some(extensions) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_ascii_lowercase())
                    .unwrap_or_default();
                extensions.iter().any(|ext| name.ends_with(ext))
            }
            None => detect_language_from_path(path).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::get_language_extensions;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn relative_paths(files: &[ScannedFile]) -> Vec<&str> {
        files.iter().map(|f| f.relative_path.as_str()).collect()
    }

    #[test]
    fn test_scan_keeps_known_extensions_in_name_order() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/b.ts", "");
        write(dir.path(), "src/a.py", "");
        write(dir.path(), "README.md", "");
        write(dir.path(), "app.js", "");
        write(dir.path(), "notes.txt", "");

        let files = FileScanner::new(dir.path(), &[]).scan();
        assert_eq!(relative_paths(&files), vec!["app.js", "src/a.py", "src/b.ts"]);
        assert!(files[0].path.ends_with("app.js"));
    }

    #[test]
    fn test_default_ignored_directories_are_pruned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "node_modules/lib/index.js", "");
        write(dir.path(), "tests/unit.ts", "");
        write(dir.path(), "target/debug/build.rs", "");
        write(dir.path(), "src/main.rs", "");

        let files = FileScanner::new(dir.path(), &[]).scan();
        assert_eq!(relative_paths(&files), vec!["src/main.rs"]);
    }

    #[test]
    fn test_ignore_file_and_extra_patterns() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".repomapignore", "# generated code\ngenerated/\n*.min.js\n");
        write(dir.path(), "generated/api.ts", "");
        write(dir.path(), "vendor.min.js", "");
        write(dir.path(), "scripts/deploy.sh", "");
        write(dir.path(), "src/app.js", "");

        let files = FileScanner::new(dir.path(), &["scripts/".to_string()]).scan();
        assert_eq!(relative_paths(&files), vec!["src/app.js"]);
    }

    #[test]
    fn test_language_filter_restricts_extensions() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.ts", "");
        write(dir.path(), "b.tsx", "");
        write(dir.path(), "c.js", "");
        write(dir.path(), "d.py", "");

        let extensions = get_language_extensions("TypeScript").unwrap();
        let files = FileScanner::new(dir.path(), &[])
            .with_extensions(extensions)
            .scan();
        assert_eq!(relative_paths(&files), vec!["a.ts", "b.tsx"]);
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(FileScanner::new(dir.path(), &[]).scan().is_empty());
    }
}

//! Ignore rules for directory scanning
//!
//! Built-in directory names that are never descended into, plus patterns
//! loaded from a `.repomapignore` file at the scanned root.

use glob::Pattern;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Name of the per-repository ignore file.
pub const IGNORE_FILE_NAME: &str = ".repomapignore";

/// Directory (or file) names skipped wherever they appear.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    ".git",
    "logs",
    "test",
    "tests",
    "coverage",
    "build",
    ".next",
    ".nuxt",
    ".cache",
    ".DS_Store",
    "target",
];

pub fn is_default_ignored(name: &str) -> bool {
    DEFAULT_IGNORED_DIRS.contains(&name)
}

/// Load custom ignore patterns from `.repomapignore` in `root`
///
/// Empty lines and comments (lines starting with #) are skipped. A file that
/// exists but cannot be read is reported and treated as empty.
///
/// ```text
/// # .repomapignore
/// generated/
/// *.min.js
/// fixtures/**/*.json
/// ```
pub fn load_ignore_file(root: &Path) -> Vec<String> {
    let ignore_file = root.join(IGNORE_FILE_NAME);
    if !ignore_file.is_file() {
        return Vec::new();
    }

    let content = match fs::read_to_string(&ignore_file) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", ignore_file.display(), e);
            return Vec::new();
        }
    };

    let patterns: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if !patterns.is_empty() {
        debug!(
            "Loaded {} custom ignore patterns from {}",
            patterns.len(),
            IGNORE_FILE_NAME
        );
    }
    patterns
}

/// Check a relative Unix-style path against custom ignore patterns
///
/// Pattern forms:
/// - `dir/`: any path component equal to `dir`
/// - `*.ext`: file name suffix
/// - other patterns with `*`, `?` or `[`: glob over the whole relative path
/// - anything else: substring anywhere in the path
pub fn is_ignored_by_pattern(relative_path: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| matches_pattern(relative_path, pattern))
}

fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(dir_name) = pattern.strip_suffix('/') {
        let dir_name = dir_name.trim_start_matches('/');
        if dir_name.contains('/') {
            return path == dir_name || path.starts_with(&format!("{dir_name}/"));
        }
        return path.split('/').any(|component| component == dir_name);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if suffix.starts_with('.') && !suffix.contains(['*', '?', '[']) {
            return path.ends_with(suffix);
        }
    }

    if pattern.contains(['*', '?', '[']) {
        return match Pattern::new(pattern) {
            Ok(glob) => glob.matches(path),
            Err(e) => {
                debug!("Invalid ignore pattern '{}': {}", pattern, e);
                false
            }
        };
    }

    path.contains(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_missing_ignore_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_ignore_file(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_load_ignore_file_skips_comments_and_blanks() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(IGNORE_FILE_NAME),
            "# Comment line\ngenerated/\n*.min.js\n\n  vendor  \n",
        )
        .unwrap();

        let loaded = load_ignore_file(temp_dir.path());
        assert_eq!(loaded, patterns(&["generated/", "*.min.js", "vendor"]));
    }

    #[test]
    fn test_directory_pattern_matches_whole_components() {
        let list = patterns(&["packages/"]);
        assert!(is_ignored_by_pattern("packages", &list));
        assert!(is_ignored_by_pattern("src/packages/a.ts", &list));
        assert!(!is_ignored_by_pattern("my-packages/a.ts", &list));
        assert!(!is_ignored_by_pattern("subpackages", &list));

        let nested = patterns(&["src/gen/"]);
        assert!(is_ignored_by_pattern("src/gen/a.ts", &nested));
        assert!(!is_ignored_by_pattern("lib/src/gen/a.ts", &nested));
    }

    #[test]
    fn test_extension_glob_and_substring_patterns() {
        assert!(is_ignored_by_pattern("src/app.min.js", &patterns(&["*.min.js"])));
        assert!(!is_ignored_by_pattern("src/app.js", &patterns(&["*.min.js"])));

        let glob = patterns(&["fixtures/*.json"]);
        assert!(is_ignored_by_pattern("fixtures/data.json", &glob));
        assert!(!is_ignored_by_pattern("src/data.json", &glob));

        assert!(is_ignored_by_pattern("temp_files/data.txt", &patterns(&["temp"])));
        assert!(!is_ignored_by_pattern("src/normal.rs", &patterns(&["temp"])));
    }

    #[test]
    fn test_default_ignored_names() {
        assert!(is_default_ignored("node_modules"));
        assert!(is_default_ignored("target"));
        assert!(!is_default_ignored("src"));
    }
}

// Path relevance heuristics
//
// Classifies a relative path by what kind of file it probably is. All checks
// run on the lower-cased path and are plain substring tests, so `latest.ts`
// reads as a test file; the file-priority weights are tuned with that in mind.

/// Lower-cased view of a relative path.
pub struct PathRelevance {
    path: String,
}

impl PathRelevance {
    pub fn new(relative_path: &str) -> Self {
        Self {
            path: relative_path.to_lowercase(),
        }
    }

    /// `test`, `spec` or `__test__` anywhere in the path.
    pub fn is_test_file(&self) -> bool {
        self.contains_any(&["test", "spec", "__test__"])
    }

    pub fn is_config_file(&self) -> bool {
        self.contains_any(&["config", ".json", ".yaml"])
    }

    /// Under a `src/`, `lib/` or `core/` directory.
    pub fn is_source_file(&self) -> bool {
        self.contains_any(&["src/", "lib/", "core/"])
    }

    pub fn is_entry_point(&self) -> bool {
        self.contains_any(&["index", "main", "app"])
    }

    fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.path.contains(needle))
    }
}

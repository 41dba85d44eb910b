// Path conversion utilities
//
// Files are reported by their path relative to the scanned root, always with
// `/` separators, so maps and graph keys are identical across platforms.

use crate::error::{RepoMapError, Result};
use std::path::{Path, MAIN_SEPARATOR};

/// Convert a path under `root` to a relative Unix-style path (with `/` separators)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use repomap::utils::paths::to_relative_unix_style;
///
/// let rel = to_relative_unix_style(Path::new("/work/app/src/main.rs"), Path::new("/work/app")).unwrap();
/// assert_eq!(rel, "src/main.rs");
/// ```
pub fn to_relative_unix_style(path: &Path, root: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        RepoMapError::InvalidInput(format!(
            "File path '{}' is not within root '{}'",
            path.display(),
            root.display()
        ))
    })?;

    let path_str = relative.to_string_lossy();
    let unix_style = if MAIN_SEPARATOR == '\\' {
        path_str.replace('\\', "/")
    } else {
        path_str.into_owned()
    };
    Ok(unix_style)
}

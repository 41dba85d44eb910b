// Import/export extraction
//
// Pattern matching over raw text, no parsing. Misses are acceptable: the
// results only feed dependency edges and the export bonus.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static JS_IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"import\s+(?:(?:\{[^}]*\}|\*\s+as\s+\w+|\w+)(?:\s*,\s*(?:\{[^}]*\}|\*\s+as\s+\w+|\w+))*\s+from\s+)?['"]([^'"]+)['"]"#,
    )
    .unwrap()
});

static JS_EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"export\s+(?:default\s+)?(?:async\s+)?(?:abstract\s+)?(?:class|function\*?|interface|type|enum|const|let|var)\s+([\w$]+)",
    )
    .unwrap()
});

static JS_NAMED_EXPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+\{([^}]+)\}").unwrap());

static RENAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+as\s+").unwrap());

static PY_FROM_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*from\s+([\w.]+)\s+import\b").unwrap());

static DOTTED_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*import\s+([\w.]+)\s*;?\s*$").unwrap());

static C_INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*#\s*include\s+"([^"]+)""#).unwrap());

static RUST_USE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+crate::([\w:]+)").unwrap()
});

static RUST_MOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?mod\s+(\w+)\s*;").unwrap()
});

/// Module paths a file imports and identifiers it exports, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportsExports {
    pub imports: Vec<String>,
    pub exports: Vec<String>,
}

pub fn extract_imports_exports(content: &str) -> ImportsExports {
    ImportsExports {
        imports: extract_imports(content),
        exports: extract_exports(content),
    }
}

fn extract_imports(content: &str) -> Vec<String> {
    let mut imports: Vec<String> = JS_IMPORT_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    for caps in PY_FROM_IMPORT_RE
        .captures_iter(content)
        .chain(DOTTED_IMPORT_RE.captures_iter(content))
    {
        if let Some(module) = caps.get(1) {
            push_non_empty(&mut imports, dotted_to_path(module.as_str()));
        }
    }

    imports.extend(
        C_INCLUDE_RE
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    );

    for caps in RUST_USE_RE.captures_iter(content) {
        if let Some(path) = caps.get(1) {
            push_non_empty(&mut imports, rust_use_path(path.as_str()));
        }
    }
    imports.extend(
        RUST_MOD_RE
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    );

    imports
}

fn extract_exports(content: &str) -> Vec<String> {
    let mut exports: Vec<String> = JS_EXPORT_RE
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    for caps in JS_NAMED_EXPORT_RE.captures_iter(content) {
        let Some(list) = caps.get(1) else {
            continue;
        };
        for entry in list.as_str().split(',') {
            let local = RENAME_RE.split(entry.trim()).next().unwrap_or_default();
            push_non_empty(&mut exports, local.trim().to_string());
        }
    }
    exports
}

fn push_non_empty(list: &mut Vec<String>, value: String) {
    if !value.is_empty() {
        list.push(value);
    }
}

/// `..pkg.mod` → `pkg/mod`
fn dotted_to_path(module: &str) -> String {
    module.trim_start_matches('.').replace('.', "/")
}

/// `a::b::Thing` → `a/b`; type-like segments and glob tails are dropped.
fn rust_use_path(path: &str) -> String {
    path.split("::")
        .take_while(|segment| {
            !segment.is_empty()
                && !segment.starts_with(|c: char| c.is_ascii_uppercase())
        })
        .collect::<Vec<_>>()
        .join("/")
}

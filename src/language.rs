//! Language Support - Shared grammar configuration
//!
//! This module is the single source of truth for which files repomap looks at
//! and which tree-sitter grammar each one is parsed with. Three tables live here:
//!
//! - extension → grammar name (what the scanner accepts)
//! - language filter name → extensions (the CLI `-l` flag)
//! - grammar → fallback grammar (tried when a grammar is not linked in)

use std::path::Path;

/// Grammars that are linked into the binary.
///
/// `scala`, `xml` and `vue` are recognised grammar names without a linked
/// parser: scala resolves through the fallback table, xml is skipped and vue
/// is handled by the composite extractor.
pub fn get_tree_sitter_language(grammar: &str) -> Option<tree_sitter::Language> {
    match grammar {
        // Systems languages
        "rust" => Some(tree_sitter_rust::LANGUAGE.into()),
        "c" => Some(tree_sitter_c::LANGUAGE.into()),
        "cpp" => Some(tree_sitter_cpp::LANGUAGE.into()),
        "go" => Some(tree_sitter_go::LANGUAGE.into()),
        "zig" => Some(tree_sitter_zig::LANGUAGE.into()),

        // Web languages
        "typescript" => Some(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        "tsx" => Some(tree_sitter_typescript::LANGUAGE_TSX.into()),
        "javascript" => Some(tree_sitter_javascript::LANGUAGE.into()),
        "html" => Some(tree_sitter_html::LANGUAGE.into()),
        "css" => Some(tree_sitter_css::LANGUAGE.into()),

        // Backend languages
        "python" => Some(tree_sitter_python::LANGUAGE.into()),
        "java" => Some(tree_sitter_java::LANGUAGE.into()),
        "c_sharp" => Some(tree_sitter_c_sharp::LANGUAGE.into()),
        "php" => Some(tree_sitter_php::LANGUAGE_PHP.into()),
        "ruby" => Some(tree_sitter_ruby::LANGUAGE.into()),
        "swift" => Some(tree_sitter_swift::LANGUAGE.into()),
        "kotlin" => Some(tree_sitter_kotlin_ng::LANGUAGE.into()),
        "dart" => Some(harper_tree_sitter_dart::LANGUAGE.into()),

        // Scripting languages
        "lua" => Some(tree_sitter_lua::LANGUAGE.into()),
        "bash" => Some(tree_sitter_bash::LANGUAGE.into()),

        // Data and configuration
        "json" => Some(tree_sitter_json::LANGUAGE.into()),
        "toml" => Some(tree_sitter_toml_ng::LANGUAGE.into()),
        "yaml" => Some(tree_sitter_yaml::LANGUAGE.into()),

        _ => None,
    }
}

/// Map a file extension (without the dot, case-insensitive) to its grammar name.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    let grammar = match extension.to_ascii_lowercase().as_str() {
        "js" | "mjs" | "cjs" | "jsx" => "javascript",
        "ts" => "typescript",
        "tsx" => "tsx",
        "py" | "pyw" => "python",
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "c" => "c",
        "cpp" | "cc" | "cxx" | "c++" | "h" | "hpp" | "hxx" => "cpp",
        "go" => "go",
        "rs" => "rust",
        "swift" => "swift",
        "scala" => "scala",
        "cs" => "c_sharp",
        "rb" => "ruby",
        "php" => "php",
        "lua" => "lua",
        "sh" | "bash" | "zsh" => "bash",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "xml" => "xml",
        "html" | "htm" => "html",
        "css" | "scss" | "sass" => "css",
        "vue" => "vue",
        "zig" => "zig",
        "dart" => "dart",
        _ => return None,
    };
    Some(grammar)
}

/// Grammar name for a path, from its extension.
pub fn detect_language_from_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(detect_language_from_extension)
}

/// Next grammar to try when `grammar` cannot be loaded.
pub fn fallback_grammar(grammar: &str) -> Option<&'static str> {
    match grammar {
        "typescript" => Some("javascript"),
        "tsx" => Some("typescript"),
        "kotlin" => Some("java"),
        "c_sharp" => Some("java"),
        "scala" => Some("java"),
        "scss" | "sass" => Some("css"),
        "yaml" => Some("json"),
        "toml" => Some("json"),
        "zsh" => Some("bash"),
        _ => None,
    }
}

/// The ordered list of grammars tried for `grammar`, itself first.
pub fn fallback_chain(grammar: &str) -> Vec<String> {
    let mut chain = vec![grammar.to_string()];
    let mut current = grammar;
    while let Some(next) = fallback_grammar(current) {
        // Guard against a cycle sneaking into the table
        if chain.iter().any(|seen| seen == next) {
            break;
        }
        chain.push(next.to_string());
        current = next;
    }
    chain
}

/// Language names accepted by the `-l` filter.
pub const FILTER_LANGUAGES: &[&str] = &[
    "javascript",
    "typescript",
    "python",
    "java",
    "kotlin",
    "cpp",
    "c",
    "go",
    "rust",
    "swift",
    "scala",
    "csharp",
    "ruby",
    "php",
    "lua",
    "bash",
    "html",
    "css",
    "vue",
    "json",
    "yaml",
    "xml",
];

/// Extensions (with leading dot) scanned when the run is filtered to `language`.
pub fn get_language_extensions(language: &str) -> Option<&'static [&'static str]> {
    let extensions: &'static [&'static str] = match language.to_ascii_lowercase().as_str() {
        "javascript" => &[".js", ".mjs", ".cjs", ".jsx"],
        "typescript" => &[".ts", ".tsx"],
        "python" => &[".py", ".pyw"],
        "java" => &[".java"],
        "kotlin" => &[".kt", ".kts"],
        "cpp" => &[".cpp", ".cc", ".cxx", ".c++", ".h", ".hpp", ".hxx"],
        "c" => &[".c", ".h"],
        "go" => &[".go"],
        "rust" => &[".rs"],
        "swift" => &[".swift"],
        "scala" => &[".scala"],
        "csharp" => &[".cs"],
        "ruby" => &[".rb"],
        "php" => &[".php"],
        "lua" => &[".lua"],
        "bash" => &[".sh", ".bash", ".zsh"],
        "html" => &[".html", ".htm"],
        "css" => &[".css", ".scss", ".sass"],
        "vue" => &[".vue"],
        "json" => &[".json"],
        "yaml" => &[".yaml", ".yml"],
        "xml" => &[".xml"],
        _ => return None,
    };
    Some(extensions)
}

/// True for tag-tree documents rendered as an element tree rather than grouped.
pub fn is_markup_document(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".html") || lower.ends_with(".htm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection_is_case_insensitive() {
        assert_eq!(detect_language_from_extension("TS"), Some("typescript"));
        assert_eq!(detect_language_from_extension("h"), Some("cpp"));
        assert_eq!(detect_language_from_extension("zsh"), Some("bash"));
        assert_eq!(detect_language_from_extension("md"), None);
        assert_eq!(
            detect_language_from_path(Path::new("src/App.vue")),
            Some("vue")
        );
        assert_eq!(detect_language_from_path(Path::new("Makefile")), None);
    }

    #[test]
    fn test_every_scanned_grammar_has_a_loadable_chain_or_is_special() {
        for ext in [
            "js", "ts", "tsx", "py", "java", "kt", "c", "cpp", "go", "rs", "swift", "scala",
            "cs", "rb", "php", "lua", "sh", "json", "yaml", "toml", "html", "css", "zig", "dart",
        ] {
            let grammar = detect_language_from_extension(ext).unwrap();
            let loadable = fallback_chain(grammar)
                .iter()
                .any(|name| get_tree_sitter_language(name).is_some());
            assert!(loadable, "no grammar loads for .{ext}");
        }
        assert!(get_tree_sitter_language("xml").is_none());
        assert!(get_tree_sitter_language("vue").is_none());
    }

    #[test]
    fn test_fallback_chain_order() {
        assert_eq!(fallback_chain("tsx"), vec!["tsx", "typescript", "javascript"]);
        assert_eq!(fallback_chain("scala"), vec!["scala", "java"]);
        assert_eq!(fallback_chain("rust"), vec!["rust"]);
    }

    #[test]
    fn test_filter_languages_all_map_to_extensions() {
        for language in FILTER_LANGUAGES {
            let extensions = get_language_extensions(language).unwrap();
            assert!(!extensions.is_empty());
            for ext in extensions {
                assert!(
                    detect_language_from_extension(ext.trim_start_matches('.')).is_some(),
                    "{ext} is filtered but never scanned"
                );
            }
        }
        assert_eq!(get_language_extensions("Python"), Some(&[".py", ".pyw"][..]));
        assert!(get_language_extensions("cobol").is_none());
    }

    #[test]
    fn test_markup_document_detection() {
        assert!(is_markup_document("site/index.HTML"));
        assert!(!is_markup_document("src/App.vue"));
    }
}

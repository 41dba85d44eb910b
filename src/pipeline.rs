// Repo map orchestration
//
// scan → read → imports/exports → symbols → graph → rank → score → format.
// Every discovered file is extracted and scored; the token budget only
// applies when formatting.

use crate::error::{RepoMapError, Result};
use crate::extractors::{extract_imports_exports, ExtractorManager, SymbolRecord};
use crate::formatter::{MapFormatter, MapLayout};
use crate::grammar::GrammarRegistry;
use crate::graph::DependencyGraph;
use crate::language::get_language_extensions;
use crate::scanner::{FileScanner, ScannedFile};
use crate::scoring::ScoringPolicy;
use crate::utils::TokenEstimator;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Default token budget for the rendered map.
pub const DEFAULT_MAX_TOKENS: usize = 1024;

/// Knobs for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoMapOptions {
    pub max_tokens: usize,
    /// Only scan extensions of this language
    pub language: Option<String>,
    pub scoring: ScoringPolicy,
    pub layout: MapLayout,
    /// Applied on top of `.repomapignore`
    pub extra_ignore_patterns: Vec<String>,
}

impl Default for RepoMapOptions {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            language: None,
            scoring: ScoringPolicy::default(),
            layout: MapLayout::default(),
            extra_ignore_patterns: Vec::new(),
        }
    }
}

/// One scanned file and everything extracted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub path: String,
    pub relative_path: String,
    pub imports: Vec<String>,
    pub exports: Vec<String>,
    /// Traversal order, importance filled in
    pub symbols: Vec<SymbolRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoMapResult {
    pub files: Vec<SourceFile>,
    /// Symbols across all files before any filtering
    pub total_symbols: usize,
    /// Estimate over `map`
    pub estimated_tokens: usize,
    pub map: String,
}

/// Build the ranked, budgeted map of the repository under `root`.
///
/// Fails only on an unknown language filter or a root that is not a
/// directory; unreadable files and unparseable sources are skipped.
pub fn generate_repo_map(root: &Path, options: &RepoMapOptions) -> Result<RepoMapResult> {
    let extensions = match options.language.as_deref() {
        Some(language) => Some(
            get_language_extensions(language)
                .ok_or_else(|| RepoMapError::UnsupportedLanguage(language.to_string()))?,
        ),
        None => None,
    };

    if !root.is_dir() {
        return Err(RepoMapError::InvalidInput(format!(
            "'{}' is not a directory",
            root.display()
        )));
    }

    let mut scanner = FileScanner::new(root, &options.extra_ignore_patterns);
    if let Some(extensions) = extensions {
        scanner = scanner.with_extensions(extensions);
    }
    let scanned = scanner.scan();
    info!("Found {} source files in {}", scanned.len(), root.display());

    let manager = ExtractorManager::new();
    let mut registry = GrammarRegistry::new();
    let mut files: Vec<SourceFile> = scanned
        .into_iter()
        .map(|file| extract_source_file(file, &manager, &mut registry))
        .collect();
    debug!("Loaded {} grammars", registry.cached_count());

    score_files(&mut files, &options.scoring);

    let total_symbols = files.iter().map(|f| f.symbols.len()).sum();
    let map = MapFormatter::new(options.layout.clone()).format(&files, options.max_tokens);
    let estimated_tokens = TokenEstimator::new().estimate_string(&map);

    info!(
        "Mapped {} files, {} symbols, ~{} tokens (budget {})",
        files.len(),
        total_symbols,
        estimated_tokens,
        options.max_tokens
    );

    Ok(RepoMapResult {
        files,
        total_symbols,
        estimated_tokens,
        map,
    })
}

fn extract_source_file(
    file: ScannedFile,
    manager: &ExtractorManager,
    registry: &mut GrammarRegistry,
) -> SourceFile {
    let path = file.path.to_string_lossy().into_owned();
    let content = match std::fs::read_to_string(&file.path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", file.path.display(), e);
            String::new()
        }
    };

    let imports_exports = extract_imports_exports(&content);
    let symbols = if content.is_empty() {
        Vec::new()
    } else {
        manager.extract_symbols(&path, &content, registry)
    };

    SourceFile {
        path,
        relative_path: file.relative_path,
        imports: imports_exports.imports,
        exports: imports_exports.exports,
        symbols,
    }
}

/// Rank files by their import graph and score every symbol in place.
fn score_files(files: &mut [SourceFile], policy: &ScoringPolicy) {
    let graph = DependencyGraph::build(
        files
            .iter()
            .map(|f| (f.relative_path.as_str(), f.imports.as_slice())),
    );
    let ranks = graph.page_rank(policy.damping, policy.iterations);

    for (file, rank) in files.iter_mut().zip(ranks) {
        let references = graph.dependents(&file.relative_path);
        policy.score_file(&mut file.symbols, &file.exports, references, rank);
    }
}

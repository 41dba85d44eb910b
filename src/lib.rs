// repomap - relevance-ranked structural map of a source repository
//
// Tree-sitter symbol extraction, an import graph ranked with PageRank,
// importance scoring, and a token-budgeted text rendering.

pub mod cli;
pub mod error;
pub mod extractors;
pub mod formatter;
pub mod grammar;
pub mod graph;
pub mod language;
pub mod pipeline;
pub mod scanner;
pub mod scoring;
pub mod utils;

pub use error::{RepoMapError, Result};
pub use extractors::{ExtractorManager, SymbolKind, SymbolRecord};
pub use formatter::{MapFormatter, MapLayout};
pub use graph::DependencyGraph;
pub use pipeline::{generate_repo_map, RepoMapOptions, RepoMapResult, SourceFile};
pub use scoring::{FilePriorityPolicy, ScoringPolicy};

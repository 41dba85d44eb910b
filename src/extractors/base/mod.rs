// Base extractor types and traits
//
// - types.rs: SymbolRecord and SymbolKind
// - extractor.rs: BaseExtractor (source access, names, parameters, modifiers)
// - tree_methods.rs: tree navigation helpers
// - creation_methods.rs: record construction
// - strategy.rs: the SymbolStrategy interface every symbol family implements

pub mod creation_methods;
pub mod extractor;
pub mod strategy;
pub mod tree_methods;
pub mod types;

pub use extractor::{collapse_whitespace, count_parameters_in_text, BaseExtractor};
pub use strategy::{Candidate, SymbolStrategy};
pub use types::{SymbolKind, SymbolRecord};

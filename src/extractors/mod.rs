//! Symbol extraction
//!
//! Turns source text into ordered `SymbolRecord` lists using tree-sitter
//! parsers, plus a regex pass for imports and exports.
//!
//! # Architecture
//!
//! - `base` - records, kinds, and the shared `BaseExtractor`
//! - `kinds` - the `grammar × node type → role` table driving the walk
//! - `signature` - body-free signature synthesis
//! - `functions`, `classes`, `html`, `vue` - one strategy per symbol family
//! - `manager` - `ExtractorManager` public API and the tree classifier
//! - `imports_exports` - pattern-based import/export extraction

pub mod base;
pub mod classes;
pub mod functions;
pub mod html;
pub mod imports_exports;
pub mod kinds;
pub mod manager;
pub mod signature;
pub mod vue;

pub use base::{SymbolKind, SymbolRecord};
pub use imports_exports::{extract_imports_exports, ImportsExports};
pub use manager::ExtractorManager;

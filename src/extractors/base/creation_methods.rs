// Record creation for BaseExtractor

use super::extractor::BaseExtractor;
use super::types::{SymbolKind, SymbolRecord};
use std::collections::BTreeSet;
use tree_sitter::Node;

impl BaseExtractor {
    /// Build a record spanning `span`.
    ///
    /// An empty signature falls back to the raw text of the span.
    pub fn create_record(
        &self,
        span: &Node,
        name: String,
        kind: SymbolKind,
        signature: String,
        modifiers: BTreeSet<String>,
        parameter_count: usize,
    ) -> SymbolRecord {
        let (start_line, end_line) = self.line_range(span);
        let signature = if signature.trim().is_empty() {
            self.get_node_text(span)
        } else {
            signature
        };
        SymbolRecord::new(name, kind, signature, start_line, end_line)
            .with_modifiers(modifiers)
            .with_parameter_count(parameter_count)
    }
}

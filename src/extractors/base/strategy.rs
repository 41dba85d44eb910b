// Strategy interface shared by the symbol families (function-like, class-like, markup).

use super::extractor::BaseExtractor;
use super::types::{SymbolKind, SymbolRecord};
use tree_sitter::Node;

/// A symbol-like node picked out by the classifier.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'tree> {
    /// The declaration node itself
    pub node: Node<'tree>,
    /// Outer node whose line range and leading words belong to the symbol
    /// (decorators, `const x = ...` declarations). Same as `node` otherwise.
    pub span: Node<'tree>,
    /// Base kind from the node-kind table, before refinement
    pub kind: SymbolKind,
    /// Wrapped in an export statement
    pub exported: bool,
    pub default_export: bool,
    /// Left-hand side naming an assigned function expression
    pub binding: Option<Node<'tree>>,
}

impl<'tree> Candidate<'tree> {
    pub fn new(node: Node<'tree>, kind: SymbolKind) -> Self {
        Self {
            node,
            span: node,
            kind,
            exported: false,
            default_export: false,
            binding: None,
        }
    }

    pub fn exported(mut self, exported: bool, default_export: bool) -> Self {
        self.exported = exported;
        self.default_export = default_export;
        self
    }

    pub fn with_span(mut self, span: Node<'tree>) -> Self {
        self.span = span;
        self
    }

    pub fn bound_to(mut self, binding: Node<'tree>) -> Self {
        self.binding = Some(binding);
        self
    }
}

/// One symbol family's extraction rule.
pub trait SymbolStrategy {
    fn extract(&self, base: &BaseExtractor, candidate: &Candidate) -> Vec<SymbolRecord>;
}

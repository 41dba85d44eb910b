//! ExtractorManager - Public API for symbol extraction
//!
//! Handles file parsing and routes each file to its strategy set: tag-tree
//! documents to the markup strategy, Vue components to the composite strategy,
//! and everything else to the classifier, which walks the tree and hands each
//! symbol-like node to the function-like or class-like strategy.

use crate::extractors::base::{BaseExtractor, Candidate, SymbolKind, SymbolRecord, SymbolStrategy};
use crate::extractors::classes::ClassLikeExtractor;
use crate::extractors::functions::{receiver_type, FunctionLikeExtractor};
use crate::extractors::html::MarkupExtractor;
use crate::extractors::kinds::{NodeKindTable, NodeRole};
use crate::extractors::signature::{append_members, method_member_line};
use crate::extractors::vue::component::extract_component_methods;
use crate::extractors::vue::CompositeDocumentExtractor;
use crate::grammar::GrammarRegistry;
use crate::language::detect_language_from_path;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};
use tree_sitter::Node;

/// Value kinds that turn a variable declarator into a named function.
const BOUND_FUNCTION_KINDS: &[&str] = &[
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
];

/// Walks one parsed document and collects records in traversal order.
pub struct SymbolClassifier<'a> {
    base: &'a BaseExtractor,
    table: &'static NodeKindTable,
    functions: FunctionLikeExtractor,
    classes: ClassLikeExtractor,
}

impl<'a> SymbolClassifier<'a> {
    pub fn new(base: &'a BaseExtractor) -> Self {
        let table = NodeKindTable::standard();
        Self {
            base,
            table,
            functions: FunctionLikeExtractor,
            classes: ClassLikeExtractor::new(table),
        }
    }

    pub fn classify(&self, root: Node) -> Vec<SymbolRecord> {
        let mut records = Vec::new();
        self.visit_children(root, false, false, &mut records);
        self.attach_receiver_methods(root, &mut records);
        records
    }

    /// List top-level receiver methods in their type's member lines so they
    /// are attributed to it like class methods.
    fn attach_receiver_methods(&self, root: Node, records: &mut [SymbolRecord]) {
        let mut members: HashMap<String, Vec<String>> = HashMap::new();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            let (Some(owner), Some(name)) = (
                receiver_type(self.base, &node),
                node.child_by_field_name("name"),
            ) else {
                continue;
            };
            let params = self.base.parameter_text(&node);
            members
                .entry(owner)
                .or_default()
                .push(method_member_line(&self.base.get_node_text(&name), params.as_deref()));
        }
        if members.is_empty() {
            return;
        }

        for record in records.iter_mut().filter(|r| r.kind.is_class_like()) {
            if let Some(lines) = members.get(&record.name) {
                record.signature_text = append_members(&record.signature_text, lines);
            }
        }
    }

    fn visit_children(
        &self,
        node: Node,
        exported: bool,
        default_export: bool,
        out: &mut Vec<SymbolRecord>,
    ) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        for child in children {
            self.visit(child, exported, default_export, out);
        }
    }

    fn visit(&self, node: Node, exported: bool, default_export: bool, out: &mut Vec<SymbolRecord>) {
        let Some(role) = self.table.role(&self.base.grammar, node.kind()) else {
            return;
        };

        match role {
            NodeRole::Declaration(kind) => {
                let candidate = Candidate::new(node, kind).exported(exported, default_export);
                out.extend(self.functions.extract(self.base, &candidate));
            }
            NodeRole::TypeDeclaration(kind) => {
                let candidate = Candidate::new(node, kind).exported(exported, default_export);
                out.extend(self.classes.extract(self.base, &candidate));
            }
            NodeRole::Container => self.visit_children(node, exported, default_export, out),
            NodeRole::Export => self.visit_export(node, out),
            NodeRole::Binding if node.kind() == "assignment_expression" => {
                self.visit_assignment(node, exported, default_export, out)
            }
            NodeRole::Binding => self.visit_binding(node, exported, default_export, out),
            NodeRole::Decorated => self.visit_decorated(node, exported, default_export, out),
            // Members only count inside a class body
            NodeRole::Member(_) => {}
        }
    }

    fn visit_export(&self, node: Node, out: &mut Vec<SymbolRecord>) {
        let default_export = self.base.find_child_by_type(&node, "default").is_some();
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();

        for child in children {
            if default_export && child.kind() == "object" {
                out.extend(extract_component_methods(self.base, child));
            } else {
                self.visit(child, true, default_export, out);
            }
        }
    }

    /// `const name = () => ...` and friends; other declarators are not symbols.
    fn visit_binding(
        &self,
        node: Node,
        exported: bool,
        default_export: bool,
        out: &mut Vec<SymbolRecord>,
    ) {
        for declarator in self.base.get_children_of_type(&node, "variable_declarator") {
            let (Some(name), Some(value)) = (
                declarator.child_by_field_name("name"),
                declarator.child_by_field_name("value"),
            ) else {
                continue;
            };
            if !BOUND_FUNCTION_KINDS.contains(&value.kind()) {
                continue;
            }
            let candidate = Candidate::new(value, SymbolKind::Function)
                .with_span(node)
                .bound_to(name)
                .exported(exported, default_export);
            out.extend(self.functions.extract(self.base, &candidate));
        }
    }

    /// `name = function () {}`, `exports.name = () => {}` and `module.exports = ...`.
    ///
    /// Member targets are named by their last property; CommonJS targets count as exported.
    fn visit_assignment(
        &self,
        node: Node,
        exported: bool,
        default_export: bool,
        out: &mut Vec<SymbolRecord>,
    ) {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };
        if !BOUND_FUNCTION_KINDS.contains(&right.kind()) {
            return;
        }

        let target = self.base.get_node_text(&left);
        let candidate = Candidate::new(right, SymbolKind::Function).with_span(node);
        let candidate = if target == "module.exports" {
            // whole-module export keeps the function's own name, or "default"
            candidate.exported(true, true)
        } else {
            let binding = match left.kind() {
                "identifier" => left,
                "member_expression" => match left.child_by_field_name("property") {
                    Some(property) => property,
                    None => return,
                },
                _ => return,
            };
            let commonjs = target.starts_with("module.exports.") || target.starts_with("exports.");
            candidate
                .bound_to(binding)
                .exported(exported || commonjs, default_export)
        };
        out.extend(self.functions.extract(self.base, &candidate));
    }

    fn visit_decorated(
        &self,
        node: Node,
        exported: bool,
        default_export: bool,
        out: &mut Vec<SymbolRecord>,
    ) {
        let Some(definition) = node.child_by_field_name("definition") else {
            return;
        };
        let candidate = |kind| {
            Candidate::new(definition, kind)
                .with_span(node)
                .exported(exported, default_export)
        };
        match self.table.role(&self.base.grammar, definition.kind()) {
            Some(NodeRole::Declaration(kind)) => {
                out.extend(self.functions.extract(self.base, &candidate(kind)))
            }
            Some(NodeRole::TypeDeclaration(kind)) => {
                out.extend(self.classes.extract(self.base, &candidate(kind)))
            }
            _ => {}
        }
    }
}

/// Manager for symbol extraction across every supported language
#[derive(Default)]
pub struct ExtractorManager;

impl ExtractorManager {
    pub fn new() -> Self {
        Self
    }

    /// Extract symbols from file content, in traversal order.
    ///
    /// Files with no recognised extension or no loadable grammar yield nothing.
    pub fn extract_symbols(
        &self,
        file_path: &str,
        content: &str,
        registry: &mut GrammarRegistry,
    ) -> Vec<SymbolRecord> {
        let Some(language) = detect_language_from_path(Path::new(file_path)) else {
            debug!("No language for {}, skipping", file_path);
            return Vec::new();
        };

        if language == "vue" {
            let symbols = CompositeDocumentExtractor.extract(file_path, content, registry);
            debug!("Extracted {} symbols from vue file: {}", symbols.len(), file_path);
            return symbols;
        }

        let Some(parsed) = registry.parse(content, language) else {
            warn!("Skipping {}: no grammar available for '{}'", file_path, language);
            return Vec::new();
        };
        let base = BaseExtractor::new(parsed.grammar.clone(), file_path, content);
        let root = parsed.tree.root_node();

        let symbols = if parsed.grammar == "html" {
            MarkupExtractor.extract(&base, &Candidate::new(root, SymbolKind::MarkupElement))
        } else {
            SymbolClassifier::new(&base).classify(root)
        };

        debug!(
            "Extracted {} symbols from {} file: {}",
            symbols.len(),
            parsed.grammar,
            file_path
        );
        symbols
    }
}

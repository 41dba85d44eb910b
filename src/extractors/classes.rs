// Class-like strategy
//
// Emits the declaration itself, then runs a bounded pass over its body so
// every method and field becomes its own record owned by the class.

use crate::extractors::base::{
    BaseExtractor, Candidate, SymbolKind, SymbolRecord, SymbolStrategy,
};
use crate::extractors::functions::build_function_record;
use crate::extractors::kinds::{NodeKindTable, NodeRole};
use crate::extractors::signature::{
    class_signature, field_member_line, header_slice, method_member_line, split_at_body,
};
use tree_sitter::Node;

/// Wrapper levels searched inside a class body (templates, member sections, ...).
const MEMBER_WRAPPER_DEPTH: usize = 2;

pub struct ClassLikeExtractor {
    table: &'static NodeKindTable,
}

impl ClassLikeExtractor {
    pub fn new(table: &'static NodeKindTable) -> Self {
        Self { table }
    }

    fn class_name(&self, base: &BaseExtractor, node: &Node) -> String {
        if node.kind() == "impl_item" {
            let target = base.get_field_text(node, "type").unwrap_or_default();
            return match base.get_field_text(node, "trait") {
                Some(trait_name) => format!("impl {trait_name} for {target}"),
                None => format!("impl {target}"),
            };
        }
        base.extract_name(node)
            .unwrap_or_else(|| "anonymous".to_string())
    }

    fn collect_members(
        &self,
        base: &BaseExtractor,
        container: Node,
        owner: &str,
        depth: usize,
        members: &mut Vec<SymbolRecord>,
        lines: &mut Vec<String>,
    ) {
        let mut cursor = container.walk();
        let children: Vec<Node> = container.named_children(&mut cursor).collect();

        for child in children {
            match self.table.member_role(&base.grammar, child.kind()) {
                Some(NodeRole::Member(kind)) => {
                    self.push_member(base, Candidate::new(child, kind), owner, members, lines);
                }
                Some(NodeRole::Decorated) => {
                    let Some(definition) = child.child_by_field_name("definition") else {
                        continue;
                    };
                    if let Some(NodeRole::Member(kind)) =
                        self.table.member_role(&base.grammar, definition.kind())
                    {
                        let candidate = Candidate::new(definition, kind).with_span(child);
                        self.push_member(base, candidate, owner, members, lines);
                    }
                }
                Some(NodeRole::Container) if depth > 0 => {
                    self.collect_members(base, child, owner, depth - 1, members, lines);
                }
                _ => {}
            }
        }
    }

    fn push_member(
        &self,
        base: &BaseExtractor,
        candidate: Candidate,
        owner: &str,
        members: &mut Vec<SymbolRecord>,
        lines: &mut Vec<String>,
    ) {
        let mut record = build_function_record(base, &candidate);
        record.parent = Some(owner.to_string());

        let line = if record.kind.is_callable() {
            method_member_line(&record.name, base.parameter_text(&candidate.node).as_deref())
        } else {
            field_member_line(&record.name)
        };
        lines.push(line);
        members.push(record);
    }
}

impl SymbolStrategy for ClassLikeExtractor {
    fn extract(&self, base: &BaseExtractor, candidate: &Candidate) -> Vec<SymbolRecord> {
        let node = candidate.node;
        let name = self.class_name(base, &node);
        let name_node = base.find_name_node(&node);

        let words = base.prefix_words(&candidate.span, name_node.as_ref());
        let mut modifiers = BaseExtractor::modifiers_from_words(&words);
        if candidate.exported {
            modifiers.insert("export".to_string());
        }
        if candidate.default_export {
            modifiers.insert("default".to_string());
        }

        let kind = refine_type_kind(base, &node, candidate.kind, &words);
        let mut members = Vec::new();

        let signature = if kind.is_class_like() {
            let body = base.find_body(&node);
            let header = match body {
                Some(_) => base.header_text(&node),
                None => {
                    let text = base.header_text(&node);
                    split_at_body(&text).map(str::to_string).unwrap_or(text)
                }
            };
            let mut lines = Vec::new();
            self.collect_members(
                base,
                body.unwrap_or(node),
                &name,
                MEMBER_WRAPPER_DEPTH,
                &mut members,
                &mut lines,
            );
            class_signature(&header, &lines)
        } else {
            header_slice(base, &node)
        };

        let record = base.create_record(&candidate.span, name, kind, signature, modifiers, 0);
        let mut records = Vec::with_capacity(members.len() + 1);
        records.push(record);
        records.extend(members);
        records
    }
}

/// Resolve the declaring keyword for grammars that share one node type.
fn refine_type_kind(
    base: &BaseExtractor,
    node: &Node,
    kind: SymbolKind,
    words: &[String],
) -> SymbolKind {
    if node.kind() == "type_declaration" {
        // Go: the type body decides
        if base
            .find_descendant_by_types(node, &["interface_type"], 2)
            .is_some()
        {
            return SymbolKind::Interface;
        }
        if base.find_descendant_by_types(node, &["struct_type"], 2).is_some() {
            return SymbolKind::Class;
        }
        return SymbolKind::TypeAlias;
    }

    if kind != SymbolKind::Class {
        return kind;
    }
    if words
        .iter()
        .any(|w| matches!(w.as_str(), "interface" | "protocol" | "trait"))
    {
        SymbolKind::Interface
    } else if words.iter().any(|w| w == "enum") {
        SymbolKind::Enum
    } else {
        kind
    }
}

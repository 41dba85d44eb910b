// Function-like strategy
//
// Functions, methods, arrow functions bound to names, prototypes, and the
// variable/property declarations that share their shape.

use crate::extractors::base::{BaseExtractor, Candidate, SymbolKind, SymbolRecord, SymbolStrategy};
use crate::extractors::kinds::signature_style;
use crate::extractors::signature::{
    callable_signature, header_slice, split_at_body, BODY_PLACEHOLDER,
};
use tree_sitter::Node;

pub struct FunctionLikeExtractor;

impl SymbolStrategy for FunctionLikeExtractor {
    fn extract(&self, base: &BaseExtractor, candidate: &Candidate) -> Vec<SymbolRecord> {
        vec![build_function_record(base, candidate)]
    }
}

/// Record for one function-like candidate, kind refined from its modifiers.
pub(crate) fn build_function_record(base: &BaseExtractor, candidate: &Candidate) -> SymbolRecord {
    let node = candidate.node;
    let bound = candidate.binding.is_some();
    let name_node = candidate.binding.or_else(|| base.find_name_node(&node));

    let name = name_node
        .map(|n| base.get_node_text(&n).trim().trim_matches('"').to_string())
        .filter(|n| !n.is_empty())
        .or_else(|| base.extract_identifier_name(&base.get_node_text(&node)))
        .unwrap_or_else(|| fallback_name(candidate));

    let mut words = base.prefix_words(&candidate.span, name_node.as_ref());
    if bound {
        // `const f = async () => ...` keeps its modifiers on the value
        words.extend(base.prefix_words(&node, None));
    }
    let mut modifiers = BaseExtractor::modifiers_from_words(&words);
    if candidate.exported {
        modifiers.insert("export".to_string());
    }
    if candidate.default_export {
        modifiers.insert("default".to_string());
    }

    let kind = refine_kind(base, &node, candidate.kind, &name, &modifiers, &words);
    let (signature, parameter_count) = if kind.is_callable() {
        let style = signature_style(&base.grammar);
        (
            callable_signature(base, &node, &name, style, bound),
            base.count_parameters(&node),
        )
    } else if DOCUMENT_ENTRY_KINDS.contains(&node.kind()) {
        (entry_signature(base, &node), 0)
    } else {
        let header = header_slice(base, &node);
        match spec_keyword(&node) {
            Some(keyword) => (format!("{keyword} {header}"), 0),
            None => (header, 0),
        }
    };

    let mut record =
        base.create_record(&candidate.span, name, kind, signature, modifiers, parameter_count);
    record.parent = receiver_type(base, &node);
    record
}

/// Data-document entries whose value may span many lines.
const DOCUMENT_ENTRY_KINDS: &[&str] = &["pair", "block_mapping_pair", "table", "table_array_element"];

/// First source line of a document entry, with an inline body folded to the placeholder.
fn entry_signature(base: &BaseExtractor, node: &Node) -> String {
    let text = base.get_node_text(node);
    let first_line = text.lines().next().unwrap_or_default().trim();
    match split_at_body(first_line) {
        Some(head) if !head.is_empty() => format!("{head} {BODY_PLACEHOLDER}"),
        _ => first_line.trim_end_matches(',').to_string(),
    }
}

/// Type named by a method receiver: `func (u *User) Save()` belongs to `User`.
pub(crate) fn receiver_type(base: &BaseExtractor, node: &Node) -> Option<String> {
    let receiver = node.child_by_field_name("receiver")?;
    base.find_descendant_by_types(&receiver, &["type_identifier"], 4)
        .map(|t| base.get_node_text(&t))
}

/// Keyword of the grouped declaration a Go `const`/`var` spec sits in.
fn spec_keyword(node: &Node) -> Option<&'static str> {
    if !matches!(node.kind(), "const_spec" | "var_spec") {
        return None;
    }
    let mut current = node.parent();
    while let Some(parent) = current {
        match parent.kind() {
            "const_declaration" => return Some("const"),
            "var_declaration" => return Some("var"),
            "var_spec_list" => current = parent.parent(),
            _ => return None,
        }
    }
    None
}

fn fallback_name(candidate: &Candidate) -> String {
    if candidate.default_export {
        "default".to_string()
    } else {
        "anonymous".to_string()
    }
}

/// Narrow the table's base kind using the declaration itself.
///
/// Callables resolve in priority order: constructor, static, async, getter, setter.
pub(crate) fn refine_kind(
    base: &BaseExtractor,
    node: &Node,
    kind: SymbolKind,
    name: &str,
    modifiers: &std::collections::BTreeSet<String>,
    words: &[String],
) -> SymbolKind {
    let kind = match (node.kind(), kind) {
        ("declaration" | "field_declaration", SymbolKind::Variable | SymbolKind::Constant)
            if declares_function(base, node) =>
        {
            SymbolKind::Function
        }
        ("declaration" | "field_declaration", SymbolKind::Property)
            if declares_function(base, node) =>
        {
            SymbolKind::Method
        }
        _ => kind,
    };

    if !kind.is_callable() {
        if kind == SymbolKind::Variable && modifiers.contains("const") {
            return SymbolKind::Constant;
        }
        return kind;
    }

    let has_word = |w: &str| words.iter().any(|word| word == w);
    if kind == SymbolKind::Constructor || name == "constructor" || name == "__init__" {
        SymbolKind::Constructor
    } else if kind == SymbolKind::StaticMethod || modifiers.contains("static") {
        SymbolKind::StaticMethod
    } else if modifiers.contains("async") {
        SymbolKind::AsyncFunction
    } else if has_word("get") || has_word("property") {
        SymbolKind::Getter
    } else if has_word("set") || has_word("setter") {
        SymbolKind::Setter
    } else {
        kind
    }
}

/// C-family declarations whose declarator is a function declarator.
fn declares_function(base: &BaseExtractor, node: &Node) -> bool {
    let Some(declarator) = node.child_by_field_name("declarator") else {
        return false;
    };
    declarator.kind() == "function_declarator"
        || base
            .find_descendant_by_types(&declarator, &["function_declarator"], 3)
            .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn extract_first(source: &str, grammar: &str, language: tree_sitter::Language, kind: SymbolKind) -> SymbolRecord {
        let mut parser = Parser::new();
        parser.set_language(&language).unwrap();
        let tree = parser.parse(source, None).unwrap();
        let base = BaseExtractor::new(grammar, "test", source);
        let node = tree.root_node().child(0).unwrap();
        FunctionLikeExtractor
            .extract(&base, &Candidate::new(node, kind))
            .remove(0)
    }

    #[test]
    fn test_python_async_function() {
        let record = extract_first(
            "async def fetch(url, retries):\n    pass\n",
            "python",
            tree_sitter_python::LANGUAGE.into(),
            SymbolKind::Function,
        );
        assert_eq!(record.name, "fetch");
        assert_eq!(record.kind, SymbolKind::AsyncFunction);
        assert_eq!(record.parameter_count, 2);
        assert_eq!(record.signature_text, "async def fetch(url, retries) { }");
        assert_eq!((record.start_line, record.end_line), (1, 2));
    }

    #[test]
    fn test_c_prototype_is_a_function() {
        let record = extract_first(
            "int area(int w, int h);\n",
            "c",
            tree_sitter_c::LANGUAGE.into(),
            SymbolKind::Variable,
        );
        assert_eq!(record.name, "area");
        assert_eq!(record.kind, SymbolKind::Function);
        assert_eq!(record.parameter_count, 2);
    }

    #[test]
    fn test_c_const_variable() {
        let record = extract_first(
            "const int LIMIT = 10;\n",
            "c",
            tree_sitter_c::LANGUAGE.into(),
            SymbolKind::Variable,
        );
        assert_eq!(record.name, "LIMIT");
        assert_eq!(record.kind, SymbolKind::Constant);
    }

    #[test]
    fn test_go_receiver_names_the_parent() {
        let record = extract_first(
            "func (u *User) Save(db *DB, force bool) error {\n\treturn nil\n}\n",
            "go",
            tree_sitter_go::LANGUAGE.into(),
            SymbolKind::Method,
        );
        assert_eq!(record.name, "Save");
        assert_eq!(record.kind, SymbolKind::Method);
        assert_eq!(record.parent.as_deref(), Some("User"));
        assert_eq!(record.parameter_count, 2);
    }

    #[test]
    fn test_rust_pub_fn_is_public() {
        let record = extract_first(
            "pub fn build(config: &Config) -> Engine {\n    Engine::new(config)\n}\n",
            "rust",
            tree_sitter_rust::LANGUAGE.into(),
            SymbolKind::Function,
        );
        assert!(record.has_modifier("public"));
        assert_eq!(record.signature_text, "pub fn build(config: &Config) -> Engine { }");
    }
}

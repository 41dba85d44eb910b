// Signature synthesis
//
// A signature is the declaration without its body: either rebuilt from the
// name and parameter nodes, or sliced from the declaration start up to the body.

use crate::extractors::base::{collapse_whitespace, BaseExtractor};
use crate::extractors::kinds::SignatureStyle;
use tree_sitter::Node;

/// Placeholder standing in for every elided body.
pub const BODY_PLACEHOLDER: &str = "{ }";

/// Signature for a function-like node.
///
/// `bound` is set when `name` comes from an assignment target rather than the node.
pub fn callable_signature(
    base: &BaseExtractor,
    node: &Node,
    name: &str,
    style: SignatureStyle,
    bound: bool,
) -> String {
    if style == SignatureStyle::Reconstruct {
        if let Some(params) = base.parameter_text(node) {
            return match node.kind() {
                "arrow_function" if bound => format!("{name} = {params} => {BODY_PLACEHOLDER}"),
                "function_expression" | "function" if bound => {
                    format!("{name} = function{params} {BODY_PLACEHOLDER}")
                }
                "function_declaration"
                | "generator_function_declaration"
                | "function_expression"
                | "function"
                | "arrow_function" => format!("function {name}{params} {BODY_PLACEHOLDER}"),
                _ => format!("{name}{params} {BODY_PLACEHOLDER}"),
            };
        }
    }
    header_slice(base, node)
}

/// Declaration text up to the body, plus the placeholder.
///
/// Body-less declarations keep their own text, cut at an inline `{` if one exists.
pub fn header_slice(base: &BaseExtractor, node: &Node) -> String {
    if base.find_body(node).is_some() {
        let header = base.header_text(node);
        let header = header.trim_end_matches([':', '=']).trim_end();
        if !header.is_empty() {
            return format!("{header} {BODY_PLACEHOLDER}");
        }
    }

    let text = collapse_whitespace(&base.get_node_text(node));
    match split_at_body(&text) {
        Some(head) if !head.is_empty() => format!("{head} {BODY_PLACEHOLDER}"),
        _ => text.trim_end_matches(';').trim_end().to_string(),
    }
}

/// Class-like signature listing its members, one per line.
pub fn class_signature(header: &str, members: &[String]) -> String {
    let header = header.trim_end_matches([':', '{']).trim_end();
    if members.is_empty() {
        format!("{header} {BODY_PLACEHOLDER}")
    } else {
        format!("{header} {{\n{}\n}}", members.join("\n"))
    }
}

/// `signature` with `lines` added to the end of its member list.
pub fn append_members(signature: &str, lines: &[String]) -> String {
    if lines.is_empty() {
        return signature.to_string();
    }
    if let Some(header) = signature.strip_suffix(BODY_PLACEHOLDER) {
        return class_signature(header, lines);
    }
    match signature.strip_suffix("\n}") {
        Some(head) => format!("{head}\n{}\n}}", lines.join("\n")),
        None => signature.to_string(),
    }
}

/// Line naming a callable member inside a class signature.
///
/// Nested parentheses are dropped from the parameter text so the line always
/// reads `name(...) { }`.
pub fn method_member_line(name: &str, params: Option<&str>) -> String {
    let inner: String = params
        .unwrap_or("()")
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .chars()
        .filter(|c| *c != '(' && *c != ')')
        .collect();
    format!("  {name}({inner}) {BODY_PLACEHOLDER}")
}

pub fn field_member_line(name: &str) -> String {
    format!("  {name};")
}

/// Text before the first `{` that sits outside parentheses and brackets.
pub fn split_at_body(text: &str) -> Option<&str> {
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '<' => depth += 1,
            ')' | ']' | '>' => depth = (depth - 1).max(0),
            '{' if depth == 0 => return Some(text[..i].trim_end()),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn first_node(source: &str, language: tree_sitter::Language) -> (tree_sitter::Tree, String) {
        let mut parser = Parser::new();
        parser.set_language(&language).unwrap();
        (parser.parse(source, None).unwrap(), source.to_string())
    }

    #[test]
    fn test_reconstructed_javascript_function() {
        let (tree, source) = first_node(
            "function helper(a, b) {\n  return a + b;\n}\n",
            tree_sitter_javascript::LANGUAGE.into(),
        );
        let base = BaseExtractor::new("javascript", "a.js", source);
        let node = tree.root_node().child(0).unwrap();
        let signature =
            callable_signature(&base, &node, "helper", SignatureStyle::Reconstruct, false);
        assert_eq!(signature, "function helper(a, b) { }");
    }

    #[test]
    fn test_header_slice_drops_python_body() {
        let (tree, source) = first_node(
            "def load(path, mode='r'):\n    return open(path, mode)\n",
            tree_sitter_python::LANGUAGE.into(),
        );
        let base = BaseExtractor::new("python", "a.py", source);
        let node = tree.root_node().child(0).unwrap();
        assert_eq!(header_slice(&base, &node), "def load(path, mode='r') { }");
    }

    #[test]
    fn test_header_slice_without_body_keeps_prototype() {
        let (tree, source) = first_node("int add(int a, int b);\n", tree_sitter_c::LANGUAGE.into());
        let base = BaseExtractor::new("c", "a.h", source);
        let node = tree.root_node().child(0).unwrap();
        assert_eq!(header_slice(&base, &node), "int add(int a, int b)");
    }

    #[test]
    fn test_class_signature_lists_members() {
        let members = vec![
            method_member_line("render", Some("(ctx, opts = f(x))")),
            field_member_line("count"),
        ];
        assert_eq!(
            class_signature("class Widget extends Base", &members),
            "class Widget extends Base {\n  render(ctx, opts = fx) { }\n  count;\n}"
        );
        assert_eq!(class_signature("class Empty:", &[]), "class Empty { }");
    }

    #[test]
    fn test_append_members_extends_either_form() {
        let save = vec![method_member_line("Save", Some("(db *DB)"))];
        assert_eq!(
            append_members("type User struct { }", &save),
            "type User struct {\n  Save(db *DB) { }\n}"
        );
        assert_eq!(
            append_members("class A {\n  run() { }\n}", &save),
            "class A {\n  run() { }\n  Save(db *DB) { }\n}"
        );
        assert_eq!(append_members("type Id int", &save), "type Id int");
        assert_eq!(append_members("type User struct { }", &[]), "type User struct { }");
    }

    #[test]
    fn test_split_at_body_skips_nested_braces() {
        assert_eq!(split_at_body("f({ a, b }) { return a }"), Some("f({ a, b })"));
        assert_eq!(split_at_body("type X = { a: number }"), Some("type X ="));
        assert_eq!(split_at_body("int x"), None);
    }
}

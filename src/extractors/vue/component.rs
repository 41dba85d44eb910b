// Options-API component methods
//
// `export default { data() {...}, methods: { save() {...} } }` carries its
// behavior in object members rather than declarations. Each function-valued
// member becomes a method record; computed ones keep a `computed` prefix.

use super::helpers::COMPONENT_METHOD_SECTIONS;
use crate::extractors::base::{BaseExtractor, Candidate, SymbolKind, SymbolRecord};
use crate::extractors::functions::build_function_record;
use crate::extractors::signature::BODY_PLACEHOLDER;
use tree_sitter::Node;

const FUNCTION_VALUE_KINDS: &[&str] = &["function_expression", "function", "arrow_function"];

/// Method records for a default-exported component options object.
pub(crate) fn extract_component_methods(base: &BaseExtractor, object: Node) -> Vec<SymbolRecord> {
    let mut records = Vec::new();
    let mut cursor = object.walk();
    let members: Vec<Node> = object.named_children(&mut cursor).collect();

    for member in members {
        match member.kind() {
            // data(), mounted(), ...
            "method_definition" => records.push(method_record(base, member, None, member)),
            "pair" => {
                let (Some(key), Some(value)) = (
                    member.child_by_field_name("key"),
                    member.child_by_field_name("value"),
                ) else {
                    continue;
                };
                let key_text = base.get_node_text(&key);
                let key_text = key_text.trim_matches(|c| c == '"' || c == '\'');
                if COMPONENT_METHOD_SECTIONS.contains(&key_text) && value.kind() == "object" {
                    records.extend(section_methods(base, value, key_text == "computed"));
                } else if FUNCTION_VALUE_KINDS.contains(&value.kind()) {
                    records.push(method_record(base, value, Some(key), member));
                }
            }
            _ => {}
        }
    }
    records
}

/// Function members of one section object; computed members read `computed name(params) { }`.
fn section_methods(base: &BaseExtractor, section: Node, computed: bool) -> Vec<SymbolRecord> {
    let mut cursor = section.walk();
    let members: Vec<Node> = section.named_children(&mut cursor).collect();

    members
        .into_iter()
        .filter_map(|member| {
            let (node, key) = match member.kind() {
                "method_definition" => (member, None),
                "pair" => {
                    let value = member.child_by_field_name("value")?;
                    if !FUNCTION_VALUE_KINDS.contains(&value.kind()) {
                        return None;
                    }
                    (value, Some(member.child_by_field_name("key")?))
                }
                _ => return None,
            };
            let mut record = method_record(base, node, key, member);
            if computed {
                let params = base.parameter_text(&node).unwrap_or_else(|| "()".to_string());
                record.signature_text =
                    format!("computed {}{params} {BODY_PLACEHOLDER}", record.name);
            }
            Some(record)
        })
        .collect()
}

fn method_record<'tree>(
    base: &BaseExtractor,
    node: Node<'tree>,
    binding: Option<Node<'tree>>,
    span: Node<'tree>,
) -> SymbolRecord {
    let mut candidate = Candidate::new(node, SymbolKind::Method).with_span(span);
    if let Some(binding) = binding {
        candidate = candidate.bound_to(binding);
    }
    build_function_record(base, &candidate)
}

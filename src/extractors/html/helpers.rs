use crate::extractors::base::BaseExtractor;
use tree_sitter::Node;

/// HTML-specific helper utilities
pub(super) struct HTMLHelpers;

impl HTMLHelpers {
    /// The `start_tag` or `self_closing_tag` opening an element.
    pub(super) fn opening_tag<'a>(node: &Node<'a>) -> Option<Node<'a>> {
        let mut cursor = node.walk();
        let tag = node
            .children(&mut cursor)
            .find(|c| matches!(c.kind(), "start_tag" | "self_closing_tag"));
        tag
    }

    /// Lower-cased tag name of an element, if it has one.
    pub(super) fn extract_tag_name(base: &BaseExtractor, node: &Node) -> Option<String> {
        let tag = Self::opening_tag(node)?;
        let name = base.find_child_by_type(&tag, "tag_name")?;
        Some(base.get_node_text(&name).to_ascii_lowercase())
    }

    /// Whether the opening tag carries `attribute_name` (values are never read).
    pub(super) fn has_attribute(base: &BaseExtractor, node: &Node, attribute_name: &str) -> bool {
        let Some(tag) = Self::opening_tag(node) else {
            return false;
        };
        base.get_children_of_type(&tag, "attribute")
            .iter()
            .filter_map(|attr| base.find_child_by_type(attr, "attribute_name"))
            .any(|name| base.get_node_text(&name).eq_ignore_ascii_case(attribute_name))
    }
}

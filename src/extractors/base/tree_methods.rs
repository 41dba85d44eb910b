// Tree navigation helpers for BaseExtractor

use super::extractor::BaseExtractor;
use tree_sitter::Node;

impl BaseExtractor {
    pub fn get_field_text(&self, node: &Node, field_name: &str) -> Option<String> {
        node.child_by_field_name(field_name)
            .map(|field_node| self.get_node_text(&field_node))
    }

    pub fn find_child_by_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Option<Node<'a>> {
        self.find_child_by_types(node, &[child_type])
    }

    pub fn find_child_by_types<'a>(&self, node: &Node<'a>, types: &[&str]) -> Option<Node<'a>> {
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                if types.contains(&child.kind()) {
                    return Some(child);
                }
            }
        }
        None
    }

    pub fn get_children_of_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Vec<Node<'a>> {
        let mut children = Vec::new();
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                if child.kind() == child_type {
                    children.push(child);
                }
            }
        }
        children
    }

    /// Depth-limited search for a descendant of one of `types`.
    pub fn find_descendant_by_types<'a>(
        &self,
        node: &Node<'a>,
        types: &[&str],
        max_depth: usize,
    ) -> Option<Node<'a>> {
        if max_depth == 0 {
            return None;
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if types.contains(&child.kind()) {
                return Some(child);
            }
            if let Some(found) = self.find_descendant_by_types(&child, types, max_depth - 1) {
                return Some(found);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    #[test]
    fn test_find_descendant_respects_depth() {
        let source = "type Store interface { Get(id int) string }";
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .unwrap();
        let wrapped = format!("package main\n{source}\n");
        let tree = parser.parse(&wrapped, None).unwrap();
        let base = BaseExtractor::new("go", "store.go", wrapped.clone());

        let declaration = base
            .find_child_by_type(&tree.root_node(), "type_declaration")
            .unwrap();
        assert!(base
            .find_descendant_by_types(&declaration, &["interface_type"], 2)
            .is_some());
        assert!(base
            .find_descendant_by_types(&declaration, &["interface_type"], 1)
            .is_none());
        assert_eq!(
            base.get_children_of_type(&tree.root_node(), "type_declaration").len(),
            1
        );
    }
}

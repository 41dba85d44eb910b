// Markup strategy
//
// Tag-tree documents are walked structurally instead of by declaration type.
// The first qualifying top-level element is turned into an outline; each kept
// element becomes a markup_element record whose signature is its indented
// tree line, e.g. `  ├─ nav [id, class]`.

use crate::extractors::base::{BaseExtractor, Candidate, SymbolKind, SymbolRecord, SymbolStrategy};
use tree_sitter::Node;

mod helpers;

use helpers::HTMLHelpers;

/// Tags that survive outline building without an id or class.
const STRUCTURAL_TAGS: &[&str] = &[
    "html", "head", "body", "header", "nav", "main", "section", "article", "aside", "footer",
    "div", "form", "table", "ul", "ol", "li",
];
const TOP_LEVEL_TAGS: &[&str] = &["html", "head", "body"];
const SEMANTIC_TAGS: &[&str] = &["header", "nav", "main", "section", "article", "aside", "footer"];
const COLLECTION_TAGS: &[&str] = &["form", "table", "ul", "ol", "li"];
const COMMON_TAGS: &[&str] = &[
    "a", "button", "input", "select", "textarea", "img", "span", "p", "h1", "h2", "h3", "h4",
    "h5", "h6",
];

/// Deepest outline level that is still emitted.
pub const MAX_MARKUP_DEPTH: usize = 6;
/// Plain `div`s are only emitted this close to the root.
const MAX_DIV_DEPTH: usize = 4;

/// One element kept in the outline.
struct OutlineElement<'tree> {
    tag: String,
    has_id: bool,
    has_class: bool,
    node: Node<'tree>,
    children: Vec<OutlineElement<'tree>>,
}

impl OutlineElement<'_> {
    fn signature(&self, depth: usize) -> String {
        let indent = "  ".repeat(depth);
        let branch = if depth == 0 { "" } else { "├─ " };
        let mut attrs = Vec::new();
        if self.has_id {
            attrs.push("id");
        }
        if self.has_class {
            attrs.push("class");
        }
        let attrs = if attrs.is_empty() {
            String::new()
        } else {
            format!(" [{}]", attrs.join(", "))
        };
        format!("{indent}{branch}{}{attrs}", self.tag)
    }

    fn is_emitted(&self, depth: usize) -> bool {
        if depth > MAX_MARKUP_DEPTH {
            return false;
        }
        let tag = self.tag.as_str();
        TOP_LEVEL_TAGS.contains(&tag)
            || SEMANTIC_TAGS.contains(&tag)
            || self.has_id
            || self.has_class
            || COLLECTION_TAGS.contains(&tag)
            || COMMON_TAGS.contains(&tag)
            || (tag == "div" && depth <= MAX_DIV_DEPTH)
    }
}

pub struct MarkupExtractor;

impl MarkupExtractor {
    fn build_outline<'tree>(base: &BaseExtractor, node: Node<'tree>) -> Option<OutlineElement<'tree>> {
        if node.kind() != "element" {
            return None;
        }
        let tag = HTMLHelpers::extract_tag_name(base, &node)?;
        let has_id = HTMLHelpers::has_attribute(base, &node, "id");
        let has_class = HTMLHelpers::has_attribute(base, &node, "class");
        if !STRUCTURAL_TAGS.contains(&tag.as_str()) && !has_id && !has_class {
            return None;
        }

        let mut cursor = node.walk();
        let children = node
            .children(&mut cursor)
            .filter_map(|child| Self::build_outline(base, child))
            .collect();

        Some(OutlineElement {
            tag,
            has_id,
            has_class,
            node,
            children,
        })
    }

    fn flatten(
        base: &BaseExtractor,
        element: &OutlineElement,
        depth: usize,
        records: &mut Vec<SymbolRecord>,
    ) {
        if element.is_emitted(depth) {
            let (start_line, end_line) = base.line_range(&element.node);
            records.push(SymbolRecord::new(
                element.tag.clone(),
                SymbolKind::MarkupElement,
                element.signature(depth),
                start_line,
                end_line,
            ));
        }
        for child in &element.children {
            Self::flatten(base, child, depth + 1, records);
        }
    }
}

impl SymbolStrategy for MarkupExtractor {
    /// `candidate.node` is the document root; only its first qualifying element is outlined.
    fn extract(&self, base: &BaseExtractor, candidate: &Candidate) -> Vec<SymbolRecord> {
        let root = candidate.node;
        let mut cursor = root.walk();
        let outline = root
            .children(&mut cursor)
            .find_map(|child| Self::build_outline(base, child));

        let mut records = Vec::new();
        if let Some(outline) = outline {
            Self::flatten(base, &outline, 0, &mut records);
        }
        records
    }
}

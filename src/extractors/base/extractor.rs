// BaseExtractor implementation for repomap
//
// Shared source access for every extractor strategy: node text, line ranges,
// name/parameter/body discovery across grammars, and declaration modifiers.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tree_sitter::Node;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());

static IDENTIFIER_FALLBACK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:class|interface|struct|enum|trait|impl|protocol|object|module|type|def|fn|fun|func|function|var|const|let|val)\s+([A-Za-z_$][\w$]*)",
    )
    .unwrap()
});

static CALL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_$][\w$]*)\s*\(").unwrap());

/// Keywords that read like a call in `function (`, `if (` and the like.
const CALL_LIKE_KEYWORDS: &[&str] = &[
    "function", "async", "await", "if", "for", "while", "switch", "catch", "return", "fn",
    "func", "def", "const", "var", "let", "new", "typeof",
];

/// Node kinds holding a declaration body.
pub const BODY_KINDS: &[&str] = &[
    "block",
    "statement_block",
    "class_body",
    "interface_body",
    "enum_body",
    "enum_class_body",
    "protocol_body",
    "declaration_list",
    "field_declaration_list",
    "enumerator_list",
    "enum_variant_list",
    "compound_statement",
    "function_body",
    "body_statement",
    "object_type",
];

/// Node kinds holding a parameter list when no `parameters` field exists.
const PARAMETER_LIST_KINDS: &[&str] = &[
    "formal_parameters",
    "parameters",
    "parameter_list",
    "function_value_parameters",
    "method_parameters",
    "lambda_parameters",
    "formal_parameter_list",
];

/// Node kinds that can carry a declared name.
const NAME_KINDS: &[&str] = &[
    "identifier",
    "type_identifier",
    "field_identifier",
    "property_identifier",
    "simple_identifier",
    "qualified_identifier",
    "destructor_name",
    "operator_name",
    "constant",
    "name",
    "word",
];

/// Selector and key nodes naming stylesheet rules and document entries.
const KEY_KINDS: &[&str] = &["selectors", "bare_key", "quoted_key", "dotted_key"];

const COMMENT_KINDS: &[&str] = &["comment", "line_comment", "block_comment"];

/// Source access shared by all strategies for one parsed document.
pub struct BaseExtractor {
    /// Grammar the tree was parsed with (after fallback)
    pub grammar: String,
    pub file_path: String,
    pub content: String,
    /// Rows added to every reported line (embedded sections)
    pub line_offset: usize,
}

impl BaseExtractor {
    pub fn new(grammar: impl Into<String>, file_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            grammar: grammar.into(),
            file_path: file_path.into(),
            content: content.into(),
            line_offset: 0,
        }
    }

    pub fn with_line_offset(mut self, line_offset: usize) -> Self {
        self.line_offset = line_offset;
        self
    }

    pub fn get_node_text(&self, node: &Node) -> String {
        self.text_between(node.start_byte(), node.end_byte())
    }

    /// Byte-range slice of the source, lossy at UTF-8 boundaries.
    pub fn text_between(&self, start_byte: usize, end_byte: usize) -> String {
        let content_bytes = self.content.as_bytes();
        if start_byte <= end_byte && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// 1-based inclusive line range of `node`.
    pub fn line_range(&self, node: &Node) -> (usize, usize) {
        (
            node.start_position().row + 1 + self.line_offset,
            node.end_position().row + 1 + self.line_offset,
        )
    }

    /// The node holding the declared name, searching the shapes grammars use.
    pub fn find_name_node<'a>(&self, node: &Node<'a>) -> Option<Node<'a>> {
        if let Some(name) = node.child_by_field_name("name") {
            return Some(name);
        }
        if let Some(declarator) = node.child_by_field_name("declarator") {
            if let Some(name) = Self::declarator_name(declarator) {
                return Some(name);
            }
        }
        // Go wraps the name in a type_spec
        if let Some(spec) = self.find_child_by_types(node, &["type_spec", "type_alias"]) {
            if let Some(name) = spec.child_by_field_name("name") {
                return Some(name);
            }
        }
        if let Some(name) = self.find_child_by_types(node, NAME_KINDS) {
            return Some(name);
        }
        // Stylesheet rules and data-document entries
        if let Some(key) = node
            .child_by_field_name("key")
            .or_else(|| self.find_child_by_types(node, KEY_KINDS))
        {
            return Some(key);
        }
        // Field declarations keep the name one or two levels down
        let declarator =
            self.find_descendant_by_types(node, &["variable_declarator", "variable_declaration"], 2)?;
        declarator
            .child_by_field_name("name")
            .or_else(|| self.find_descendant_by_types(&declarator, NAME_KINDS, 2))
    }

    fn declarator_name(declarator: Node) -> Option<Node> {
        if NAME_KINDS.contains(&declarator.kind()) {
            return Some(declarator);
        }
        if let Some(inner) = declarator.child_by_field_name("declarator") {
            return Self::declarator_name(inner);
        }
        let mut cursor = declarator.walk();
        let found = declarator
            .named_children(&mut cursor)
            .find_map(Self::declarator_name);
        found
    }

    /// Declared name, falling back to a text scan of the declaration.
    pub fn extract_name(&self, node: &Node) -> Option<String> {
        if let Some(name_node) = self.find_name_node(node) {
            let name = self.get_node_text(&name_node).trim().to_string();
            if !name.is_empty() {
                return Some(name);
            }
        }
        self.extract_identifier_name(&self.get_node_text(node))
    }

    /// Best-effort name from raw declaration text.
    pub fn extract_identifier_name(&self, text: &str) -> Option<String> {
        let first_line = text.lines().next().unwrap_or_default();
        IDENTIFIER_FALLBACK_RE
            .captures(first_line)
            .or_else(|| {
                CALL_NAME_RE
                    .captures_iter(first_line)
                    .find(|caps| !CALL_LIKE_KEYWORDS.contains(&&caps[1]))
            })
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// The parameter-list node of a callable, if the grammar exposes one.
    pub fn find_parameter_list<'a>(&self, node: &Node<'a>) -> Option<Node<'a>> {
        if let Some(params) = node.child_by_field_name("parameters") {
            return Some(params);
        }
        if let Some(declarator) = node.child_by_field_name("declarator") {
            if let Some(params) = Self::declarator_parameters(declarator) {
                return Some(params);
            }
        }
        self.find_child_by_types(node, PARAMETER_LIST_KINDS)
    }

    fn declarator_parameters(declarator: Node) -> Option<Node> {
        if declarator.kind() == "function_declarator" {
            return declarator.child_by_field_name("parameters");
        }
        declarator
            .child_by_field_name("declarator")
            .and_then(Self::declarator_parameters)
    }

    /// Parameter text including its parentheses; a bare arrow parameter gets wrapped.
    pub fn parameter_text(&self, node: &Node) -> Option<String> {
        if let Some(params) = self.find_parameter_list(node) {
            return Some(collapse_whitespace(&self.get_node_text(&params)));
        }
        node.child_by_field_name("parameter")
            .map(|param| format!("({})", self.get_node_text(&param).trim()))
    }

    pub fn count_parameters(&self, node: &Node) -> usize {
        if let Some(params) = self.find_parameter_list(node) {
            let mut cursor = params.walk();
            return params
                .named_children(&mut cursor)
                .filter(|child| !COMMENT_KINDS.contains(&child.kind()))
                .count();
        }
        if node.child_by_field_name("parameter").is_some() {
            return 1;
        }
        count_parameters_in_text(&self.get_node_text(node))
    }

    /// The body of a declaration: the `body` field or a trailing block-like child.
    pub fn find_body<'a>(&self, node: &Node<'a>) -> Option<Node<'a>> {
        if let Some(body) = node.child_by_field_name("body") {
            return Some(body);
        }
        let mut cursor = node.walk();
        let body = node
            .children(&mut cursor)
            .filter(|child| BODY_KINDS.contains(&child.kind()))
            .last();
        body
    }

    /// Declaration text up to its body, whitespace collapsed to single spaces.
    pub fn header_text(&self, node: &Node) -> String {
        let end = self
            .find_body(node)
            .map(|body| body.start_byte())
            .unwrap_or_else(|| node.end_byte());
        collapse_whitespace(&self.text_between(node.start_byte(), end))
    }

    /// Words written before the declared name (`export`, `static`, `pub`, decorators, ...).
    pub fn prefix_words(&self, node: &Node, name_node: Option<&Node>) -> Vec<String> {
        let prefix = match name_node {
            Some(name) if name.start_byte() >= node.start_byte() => {
                self.text_between(node.start_byte(), name.start_byte())
            }
            _ => {
                let header = self.header_text(node);
                header.split('(').next().unwrap_or_default().to_string()
            }
        };
        WORD_RE
            .find_iter(&prefix)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Normalized declaration modifiers found in `words`.
    pub fn modifiers_from_words(words: &[String]) -> BTreeSet<String> {
        words
            .iter()
            .filter_map(|word| normalize_modifier(word))
            .map(str::to_string)
            .collect()
    }
}

fn normalize_modifier(word: &str) -> Option<&'static str> {
    let modifier = match word {
        "public" | "pub" => "public",
        "private" => "private",
        "protected" => "protected",
        "static" | "staticmethod" | "classmethod" => "static",
        "final" => "final",
        "abstract" => "abstract",
        "async" | "suspend" => "async",
        "readonly" => "readonly",
        "const" => "const",
        "export" => "export",
        "default" => "default",
        "override" => "override",
        _ => return None,
    };
    Some(modifier)
}

/// Replace every whitespace run with one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parameter count from the first parenthesised group of `text`.
pub fn count_parameters_in_text(text: &str) -> usize {
    let Some(open) = text.find('(') else {
        return 0;
    };
    let Some(close) = text[open..].find(')') else {
        return 0;
    };
    text[open + 1..open + close]
        .split(',')
        .filter(|param| !param.trim().is_empty())
        .count()
}

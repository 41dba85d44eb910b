//! Node-kind table
//!
//! Which syntax-tree node types are symbol-like, per grammar, and what role
//! they play in the walk. The table is plain data: supporting a new construct
//! means adding a row, not a branch.

use crate::extractors::base::SymbolKind;
use std::collections::HashMap;
use std::sync::LazyLock;

/// What the classifier does with a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Function-like declaration handled by the function strategy
    Declaration(SymbolKind),
    /// Class-like declaration handled by the class strategy
    TypeDeclaration(SymbolKind),
    /// Only meaningful inside a class body
    Member(SymbolKind),
    /// `const x = ...` and `x = ...` forms that may bind a function expression
    Binding,
    /// Namespacing or conditional-compilation wrapper whose children are visited
    Container,
    /// Export wrapper: children are visited as exported
    Export,
    /// Decorator wrapper around the real definition
    Decorated,
}

/// How callables build their signature text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureStyle {
    /// `name(params)` rebuilt from named sub-nodes
    Reconstruct,
    /// Declaration text up to the body plus a placeholder body
    HeaderSlice,
}

pub fn signature_style(grammar: &str) -> SignatureStyle {
    match grammar {
        "javascript" | "typescript" | "tsx" => SignatureStyle::Reconstruct,
        _ => SignatureStyle::HeaderSlice,
    }
}

/// One table row: every `(grammar, kind)` pair gets `role`.
pub struct RoleRule {
    pub grammars: &'static [&'static str],
    pub kinds: &'static [&'static str],
    pub role: NodeRole,
}

const JS_FAMILY: &[&str] = &["javascript", "typescript", "tsx"];
const TS_FAMILY: &[&str] = &["typescript", "tsx"];
const C_FAMILY: &[&str] = &["c", "cpp"];

use NodeRole::*;
use SymbolKind as K;

pub static STANDARD_RULES: &[RoleRule] = &[
    // JavaScript / TypeScript
    RoleRule {
        grammars: JS_FAMILY,
        kinds: &[
            "function_declaration",
            "generator_function_declaration",
            "function_expression",
            "function",
            "arrow_function",
        ],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: JS_FAMILY,
        kinds: &["class_declaration", "class", "abstract_class_declaration"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: JS_FAMILY,
        kinds: &["lexical_declaration", "variable_declaration", "assignment_expression"],
        role: Binding,
    },
    RoleRule {
        grammars: JS_FAMILY,
        kinds: &["expression_statement"],
        role: Container,
    },
    RoleRule {
        grammars: JS_FAMILY,
        kinds: &["export_statement"],
        role: Export,
    },
    RoleRule {
        grammars: JS_FAMILY,
        kinds: &["method_definition", "method_signature", "abstract_method_signature"],
        role: Member(K::Method),
    },
    RoleRule {
        grammars: JS_FAMILY,
        kinds: &["public_field_definition", "field_definition", "property_signature"],
        role: Member(K::Property),
    },
    RoleRule {
        grammars: TS_FAMILY,
        kinds: &["interface_declaration"],
        role: TypeDeclaration(K::Interface),
    },
    RoleRule {
        grammars: TS_FAMILY,
        kinds: &["type_alias_declaration"],
        role: TypeDeclaration(K::TypeAlias),
    },
    RoleRule {
        grammars: TS_FAMILY,
        kinds: &["enum_declaration"],
        role: TypeDeclaration(K::Enum),
    },
    RoleRule {
        grammars: TS_FAMILY,
        kinds: &[
            "internal_module",
            "module",
            "ambient_declaration",
            "statement_block",
        ],
        role: Container,
    },
    // Python
    RoleRule {
        grammars: &["python"],
        kinds: &["function_definition"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: &["python"],
        kinds: &["class_definition"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["python"],
        kinds: &["decorated_definition"],
        role: Decorated,
    },
    // Java (also serves Scala through the fallback chain)
    RoleRule {
        grammars: &["java"],
        kinds: &["class_declaration", "record_declaration"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["java"],
        kinds: &["interface_declaration", "annotation_type_declaration"],
        role: TypeDeclaration(K::Interface),
    },
    RoleRule {
        grammars: &["java", "c_sharp", "php", "dart"],
        kinds: &["enum_declaration"],
        role: TypeDeclaration(K::Enum),
    },
    RoleRule {
        grammars: &["java", "c_sharp", "php"],
        kinds: &["method_declaration"],
        role: Member(K::Method),
    },
    RoleRule {
        grammars: &["java", "c_sharp"],
        kinds: &["constructor_declaration"],
        role: Member(K::Constructor),
    },
    RoleRule {
        grammars: &["java", "c_sharp"],
        kinds: &["field_declaration"],
        role: Member(K::Property),
    },
    // Kotlin
    RoleRule {
        grammars: &["kotlin"],
        kinds: &["class_declaration", "object_declaration"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["kotlin", "swift"],
        kinds: &["function_declaration"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: &["kotlin", "swift"],
        kinds: &["property_declaration"],
        role: Declaration(K::Property),
    },
    RoleRule {
        grammars: &["kotlin"],
        kinds: &["secondary_constructor"],
        role: Member(K::Constructor),
    },
    RoleRule {
        grammars: &["kotlin"],
        kinds: &["companion_object", "class_body"],
        role: Container,
    },
    // Go
    RoleRule {
        grammars: &["go"],
        kinds: &["function_declaration"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: &["go"],
        kinds: &["method_declaration"],
        role: Declaration(K::Method),
    },
    RoleRule {
        grammars: &["go"],
        kinds: &["type_declaration"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["go"],
        kinds: &["const_spec"],
        role: Declaration(K::Constant),
    },
    RoleRule {
        grammars: &["go"],
        kinds: &["var_spec"],
        role: Declaration(K::Variable),
    },
    RoleRule {
        grammars: &["go"],
        kinds: &["const_declaration", "var_declaration", "var_spec_list"],
        role: Container,
    },
    // C / C++
    RoleRule {
        grammars: C_FAMILY,
        kinds: &["function_definition"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: C_FAMILY,
        kinds: &["declaration"],
        role: Declaration(K::Variable),
    },
    RoleRule {
        grammars: C_FAMILY,
        kinds: &["struct_specifier", "union_specifier"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: C_FAMILY,
        kinds: &["enum_specifier"],
        role: TypeDeclaration(K::Enum),
    },
    RoleRule {
        grammars: C_FAMILY,
        kinds: &["type_definition"],
        role: TypeDeclaration(K::TypeAlias),
    },
    RoleRule {
        grammars: C_FAMILY,
        kinds: &[
            "preproc_ifdef",
            "preproc_if",
            "preproc_else",
            "preproc_elif",
            "linkage_specifier",
            "declaration_list",
        ],
        role: Container,
    },
    RoleRule {
        grammars: C_FAMILY,
        kinds: &["field_declaration"],
        role: Member(K::Property),
    },
    RoleRule {
        grammars: &["cpp"],
        kinds: &["class_specifier"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["cpp"],
        kinds: &["namespace_definition", "template_declaration"],
        role: Container,
    },
    // Rust
    RoleRule {
        grammars: &["rust"],
        kinds: &["function_item"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: &["rust"],
        kinds: &["function_signature_item"],
        role: Member(K::Method),
    },
    RoleRule {
        grammars: &["rust"],
        kinds: &["struct_item", "union_item", "impl_item"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["rust"],
        kinds: &["enum_item"],
        role: TypeDeclaration(K::Enum),
    },
    RoleRule {
        grammars: &["rust"],
        kinds: &["trait_item"],
        role: TypeDeclaration(K::Interface),
    },
    RoleRule {
        grammars: &["rust"],
        kinds: &["type_item"],
        role: TypeDeclaration(K::TypeAlias),
    },
    RoleRule {
        grammars: &["rust"],
        kinds: &["const_item"],
        role: Declaration(K::Constant),
    },
    RoleRule {
        grammars: &["rust"],
        kinds: &["static_item"],
        role: Declaration(K::Variable),
    },
    RoleRule {
        grammars: &["rust"],
        kinds: &["field_declaration"],
        role: Member(K::Property),
    },
    RoleRule {
        grammars: &["rust"],
        kinds: &["mod_item", "declaration_list"],
        role: Container,
    },
    // Swift
    RoleRule {
        grammars: &["swift"],
        kinds: &["class_declaration"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["swift"],
        kinds: &["protocol_declaration"],
        role: TypeDeclaration(K::Interface),
    },
    RoleRule {
        grammars: &["swift"],
        kinds: &["typealias_declaration"],
        role: TypeDeclaration(K::TypeAlias),
    },
    RoleRule {
        grammars: &["swift"],
        kinds: &["init_declaration"],
        role: Member(K::Constructor),
    },
    RoleRule {
        grammars: &["swift"],
        kinds: &["protocol_function_declaration"],
        role: Member(K::Method),
    },
    // C#
    RoleRule {
        grammars: &["c_sharp"],
        kinds: &["class_declaration", "struct_declaration", "record_declaration"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["c_sharp"],
        kinds: &["interface_declaration"],
        role: TypeDeclaration(K::Interface),
    },
    RoleRule {
        grammars: &["c_sharp"],
        kinds: &["property_declaration"],
        role: Member(K::Property),
    },
    RoleRule {
        grammars: &["c_sharp"],
        kinds: &[
            "namespace_declaration",
            "file_scoped_namespace_declaration",
            "declaration_list",
        ],
        role: Container,
    },
    // PHP
    RoleRule {
        grammars: &["php"],
        kinds: &["function_definition"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: &["php"],
        kinds: &["class_declaration"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["php"],
        kinds: &["interface_declaration", "trait_declaration"],
        role: TypeDeclaration(K::Interface),
    },
    RoleRule {
        grammars: &["php"],
        kinds: &["property_declaration", "const_declaration"],
        role: Member(K::Property),
    },
    RoleRule {
        grammars: &["php"],
        kinds: &["namespace_definition", "compound_statement"],
        role: Container,
    },
    // Ruby
    RoleRule {
        grammars: &["ruby"],
        kinds: &["method"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: &["ruby"],
        kinds: &["singleton_method"],
        role: Declaration(K::StaticMethod),
    },
    RoleRule {
        grammars: &["ruby"],
        kinds: &["class"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["ruby"],
        kinds: &["module", "body_statement"],
        role: Container,
    },
    // Dart
    RoleRule {
        grammars: &["dart"],
        kinds: &["class_definition", "mixin_declaration", "extension_declaration"],
        role: TypeDeclaration(K::Class),
    },
    RoleRule {
        grammars: &["dart"],
        kinds: &["function_signature"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: &["dart"],
        kinds: &["method_signature"],
        role: Member(K::Method),
    },
    RoleRule {
        grammars: &["dart"],
        kinds: &["getter_signature"],
        role: Member(K::Getter),
    },
    RoleRule {
        grammars: &["dart"],
        kinds: &["setter_signature"],
        role: Member(K::Setter),
    },
    RoleRule {
        grammars: &["dart"],
        kinds: &["constructor_signature", "factory_constructor_signature"],
        role: Member(K::Constructor),
    },
    RoleRule {
        grammars: &["dart"],
        kinds: &["class_member_definition", "class_member"],
        role: Container,
    },
    // Stylesheets and data documents: top-level rules and keys
    RoleRule {
        grammars: &["css"],
        kinds: &["rule_set"],
        role: Declaration(K::Property),
    },
    RoleRule {
        grammars: &["css"],
        kinds: &["media_statement", "supports_statement", "block"],
        role: Container,
    },
    RoleRule {
        grammars: &["json"],
        kinds: &["object"],
        role: Container,
    },
    RoleRule {
        grammars: &["yaml"],
        kinds: &["document", "block_node", "block_mapping"],
        role: Container,
    },
    RoleRule {
        grammars: &["json", "toml"],
        kinds: &["pair"],
        role: Declaration(K::Property),
    },
    RoleRule {
        grammars: &["yaml"],
        kinds: &["block_mapping_pair"],
        role: Declaration(K::Property),
    },
    RoleRule {
        grammars: &["toml"],
        kinds: &["table", "table_array_element"],
        role: Declaration(K::Property),
    },
    // Scripting
    RoleRule {
        grammars: &["lua"],
        kinds: &["function_declaration", "local_function"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: &["bash"],
        kinds: &["function_definition"],
        role: Declaration(K::Function),
    },
    RoleRule {
        grammars: &["zig"],
        kinds: &["function_declaration"],
        role: Declaration(K::Function),
    },
];

/// `grammar → node kind → role`, built once from the rules.
pub struct NodeKindTable {
    roles: HashMap<&'static str, HashMap<&'static str, NodeRole>>,
}

static STANDARD_TABLE: LazyLock<NodeKindTable> =
    LazyLock::new(|| NodeKindTable::from_rules(STANDARD_RULES));

impl NodeKindTable {
    /// The table covering every linked grammar.
    pub fn standard() -> &'static NodeKindTable {
        &STANDARD_TABLE
    }

    /// Later rules override earlier ones for the same pair.
    pub fn from_rules(rules: &[RoleRule]) -> Self {
        let mut roles: HashMap<&'static str, HashMap<&'static str, NodeRole>> = HashMap::new();
        for rule in rules {
            for grammar in rule.grammars {
                let by_kind = roles.entry(*grammar).or_default();
                for kind in rule.kinds {
                    by_kind.insert(*kind, rule.role);
                }
            }
        }
        Self { roles }
    }

    pub fn role(&self, grammar: &str, node_kind: &str) -> Option<NodeRole> {
        self.roles
            .get(grammar)
            .and_then(|by_kind| by_kind.get(node_kind))
            .copied()
    }

    /// Role of a node met inside a class body, with callables turned into methods.
    ///
    /// `None` for nested type declarations and anything not member-like.
    pub fn member_role(&self, grammar: &str, node_kind: &str) -> Option<NodeRole> {
        match self.role(grammar, node_kind)? {
            Member(kind) | Declaration(kind) => Some(Member(member_kind(kind))),
            Decorated => Some(Decorated),
            Container => Some(Container),
            TypeDeclaration(_) | Binding | Export => None,
        }
    }

    pub fn grammar_count(&self) -> usize {
        self.roles.len()
    }
}

/// How a declared kind reads once it sits inside a class.
pub fn member_kind(kind: SymbolKind) -> SymbolKind {
    match kind {
        K::Function | K::AsyncFunction | K::Method => K::Method,
        K::Variable | K::Constant | K::Property => K::Property,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_per_grammar() {
        let table = NodeKindTable::standard();
        assert_eq!(
            table.role("typescript", "interface_declaration"),
            Some(TypeDeclaration(K::Interface))
        );
        assert_eq!(table.role("javascript", "interface_declaration"), None);
        assert_eq!(
            table.role("rust", "function_item"),
            Some(Declaration(K::Function))
        );
        assert_eq!(table.role("python", "function_item"), None);
        assert_eq!(table.role("html", "element"), None);
    }

    #[test]
    fn test_assignments_and_document_keys_have_rows() {
        let table = NodeKindTable::standard();
        assert_eq!(table.role("javascript", "assignment_expression"), Some(Binding));
        assert_eq!(table.role("javascript", "expression_statement"), Some(Container));
        assert_eq!(table.role("go", "const_spec"), Some(Declaration(K::Constant)));
        assert_eq!(table.role("go", "var_spec_list"), Some(Container));
        for (grammar, kind) in [
            ("css", "rule_set"),
            ("json", "pair"),
            ("yaml", "block_mapping_pair"),
            ("toml", "table"),
        ] {
            assert_eq!(table.role(grammar, kind), Some(Declaration(K::Property)), "{grammar}");
        }
    }

    #[test]
    fn test_member_role_turns_functions_into_methods() {
        let table = NodeKindTable::standard();
        assert_eq!(
            table.member_role("python", "function_definition"),
            Some(Member(K::Method))
        );
        assert_eq!(
            table.member_role("ruby", "singleton_method"),
            Some(Member(K::StaticMethod))
        );
        assert_eq!(
            table.member_role("java", "constructor_declaration"),
            Some(Member(K::Constructor))
        );
        // nested classes are never members
        assert_eq!(table.member_role("java", "class_declaration"), None);
    }

    #[test]
    fn test_later_rules_override_earlier_ones() {
        let rules = [
            RoleRule {
                grammars: &["toy"],
                kinds: &["fn"],
                role: Declaration(K::Function),
            },
            RoleRule {
                grammars: &["toy"],
                kinds: &["fn"],
                role: Declaration(K::AsyncFunction),
            },
        ];
        let table = NodeKindTable::from_rules(&rules);
        assert_eq!(table.role("toy", "fn"), Some(Declaration(K::AsyncFunction)));
        assert_eq!(table.grammar_count(), 1);
    }

    #[test]
    fn test_signature_style_by_grammar() {
        assert_eq!(signature_style("tsx"), SignatureStyle::Reconstruct);
        assert_eq!(signature_style("go"), SignatureStyle::HeaderSlice);
    }
}

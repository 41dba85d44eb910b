// Symbol types for repomap
//
// SymbolRecord is what every extractor strategy produces and what the scorer
// and formatter consume. Field names serialize in camelCase for the JSON output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named, classified unit of source structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SymbolRecord {
    /// Symbol name as it appears in code (tag name for markup elements)
    pub name: String,
    pub kind: SymbolKind,
    /// Body-free declaration text
    pub signature_text: String,
    /// 1-based, inclusive
    pub start_line: usize,
    pub end_line: usize,
    /// Declaration modifiers (export, static, async, ...), sorted
    pub modifiers: BTreeSet<String>,
    /// Number of declared parameters, 0 for non-callables
    #[serde(default)]
    pub parameter_count: usize,
    /// Owning class for members found by the class-body pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Filled in by the scorer; 0 until then
    #[serde(default)]
    pub importance: f64,
}

impl SymbolRecord {
    pub fn new(
        name: impl Into<String>,
        kind: SymbolKind,
        signature_text: impl Into<String>,
        start_line: usize,
        end_line: usize,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            signature_text: signature_text.into(),
            start_line,
            end_line,
            modifiers: BTreeSet::new(),
            parameter_count: 0,
            parent: None,
            importance: 0.0,
        }
    }

    pub fn with_modifiers(mut self, modifiers: BTreeSet<String>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_parameter_count(mut self, count: usize) -> Self {
        self.parameter_count = count;
        self
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.contains(modifier)
    }

    /// The `(kind, name)` pair the formatter deduplicates on.
    pub fn dedup_key(&self) -> (SymbolKind, &str) {
        (self.kind, self.name.as_str())
    }
}

/// Closed set of symbol kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Class,
    Interface,
    Enum,
    TypeAlias,
    Constructor,
    Function,
    AsyncFunction,
    StaticMethod,
    Method,
    Getter,
    Setter,
    Property,
    Constant,
    Variable,
    MarkupElement,
    Separator,
}

impl SymbolKind {
    /// Class-like kinds render first and own attributed methods.
    pub fn is_class_like(self) -> bool {
        matches!(self, SymbolKind::Class | SymbolKind::Interface)
    }

    /// Kinds that carry a parameter list.
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            SymbolKind::Constructor
                | SymbolKind::Function
                | SymbolKind::AsyncFunction
                | SymbolKind::StaticMethod
                | SymbolKind::Method
                | SymbolKind::Getter
                | SymbolKind::Setter
        )
    }

    /// Kinds that count as free functions when not attributed to a class.
    pub fn is_function(self) -> bool {
        matches!(self, SymbolKind::Function | SymbolKind::AsyncFunction)
    }

    pub fn icon(self) -> &'static str {
        match self {
            SymbolKind::Class => "🏛️",
            SymbolKind::Interface => "📋",
            SymbolKind::Enum => "🔢",
            SymbolKind::TypeAlias => "🏷️",
            SymbolKind::Constructor => "🏗️",
            SymbolKind::Function => "⚡",
            SymbolKind::AsyncFunction => "⚡🔄",
            SymbolKind::StaticMethod => "⚡📌",
            SymbolKind::Method => "🔧",
            SymbolKind::Getter => "📤",
            SymbolKind::Setter => "📥",
            SymbolKind::Property => "💎",
            SymbolKind::Constant => "🔒",
            SymbolKind::Variable => "📦",
            SymbolKind::MarkupElement => "📦",
            SymbolKind::Separator => "📍",
        }
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SymbolKind::Class => "class",
            SymbolKind::Interface => "interface",
            SymbolKind::Enum => "enum",
            SymbolKind::TypeAlias => "type_alias",
            SymbolKind::Constructor => "constructor",
            SymbolKind::Function => "function",
            SymbolKind::AsyncFunction => "async_function",
            SymbolKind::StaticMethod => "static_method",
            SymbolKind::Method => "method",
            SymbolKind::Getter => "getter",
            SymbolKind::Setter => "setter",
            SymbolKind::Property => "property",
            SymbolKind::Constant => "constant",
            SymbolKind::Variable => "variable",
            SymbolKind::MarkupElement => "markup_element",
            SymbolKind::Separator => "separator",
        };
        f.write_str(name)
    }
}

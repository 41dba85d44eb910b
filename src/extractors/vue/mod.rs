// Composite-document strategy for Vue single-file components
//
// A .vue file embeds a script document and a markup document. Each is parsed
// with its own grammar; a separator record sits between the two result sets
// when both sections have content.

use crate::extractors::base::{BaseExtractor, Candidate, SymbolKind, SymbolRecord, SymbolStrategy};
use crate::extractors::html::MarkupExtractor;
use crate::extractors::manager::SymbolClassifier;
use crate::grammar::GrammarRegistry;
use tracing::{debug, warn};

pub(crate) mod component;
mod helpers;
pub(crate) mod parsing;

use parsing::{parse_vue_sfc, SectionKind, VueSection};

/// Signature of the synthetic record between script and template symbols.
pub const TEMPLATE_SEPARATOR: &str = "--- Template ---";

pub struct CompositeDocumentExtractor;

impl CompositeDocumentExtractor {
    pub fn extract(
        &self,
        file_path: &str,
        content: &str,
        registry: &mut GrammarRegistry,
    ) -> Vec<SymbolRecord> {
        let sections = parse_vue_sfc(content);
        let script = Self::first_section(&sections, SectionKind::Script);
        let template = Self::first_section(&sections, SectionKind::Template);
        debug!(
            "Vue sections in {}: {}",
            file_path,
            sections
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut records = Vec::new();
        if let Some(script) = script {
            records.extend(Self::script_symbols(file_path, script, registry));
        }

        if let Some(template) = template {
            if script.is_some() {
                records.push(SymbolRecord::new(
                    "template",
                    SymbolKind::Separator,
                    TEMPLATE_SEPARATOR,
                    template.start_line,
                    template.start_line,
                ));
            }
            records.extend(Self::template_symbols(file_path, template, registry));
        }
        records
    }

    fn first_section(sections: &[VueSection], kind: SectionKind) -> Option<&VueSection> {
        sections.iter().find(|s| s.kind == kind && !s.is_blank())
    }

    fn script_symbols(
        file_path: &str,
        script: &VueSection,
        registry: &mut GrammarRegistry,
    ) -> Vec<SymbolRecord> {
        let grammar = match script.lang.as_deref() {
            Some("ts" | "typescript" | "tsx") => "typescript",
            _ => "javascript",
        };
        let Some(parsed) = registry.parse(&script.content, grammar) else {
            warn!("Skipping script section of {}: no {} grammar", file_path, grammar);
            return Vec::new();
        };
        let base = BaseExtractor::new(parsed.grammar.clone(), file_path, script.content.clone())
            .with_line_offset(script.line_offset());
        SymbolClassifier::new(&base).classify(parsed.tree.root_node())
    }

    fn template_symbols(
        file_path: &str,
        template: &VueSection,
        registry: &mut GrammarRegistry,
    ) -> Vec<SymbolRecord> {
        // Templates may hold several roots; give them one
        let wrapped = format!("<div>{}</div>", template.content);
        let Some(parsed) = registry.parse(&wrapped, "html") else {
            warn!("Skipping template section of {}: no html grammar", file_path);
            return Vec::new();
        };
        let base = BaseExtractor::new(parsed.grammar.clone(), file_path, wrapped.clone())
            .with_line_offset(template.line_offset());
        let root = parsed.tree.root_node();
        MarkupExtractor.extract(&base, &Candidate::new(root, SymbolKind::MarkupElement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPONENT: &str = r#"<template>
  <div class="counter">
    <button id="inc" @click="increment">+</button>
  </div>
</template>

<script>
export default {
  methods: {
    increment() { this.n++; },
  },
};

function format(n) { return String(n); }
</script>
"#;

    #[test]
    fn test_separator_between_script_and_template() {
        let mut registry = GrammarRegistry::new();
        let records = CompositeDocumentExtractor.extract("Counter.vue", COMPONENT, &mut registry);

        let kinds: Vec<SymbolKind> = records.iter().map(|r| r.kind).collect();
        let separator = kinds
            .iter()
            .position(|k| *k == SymbolKind::Separator)
            .unwrap();
        assert!(kinds[..separator].iter().all(|k| k.is_callable()));
        assert!(kinds[separator + 1..]
            .iter()
            .all(|k| *k == SymbolKind::MarkupElement));
        assert_eq!(records[separator].signature_text, TEMPLATE_SEPARATOR);

        let increment = records.iter().find(|r| r.name == "increment").unwrap();
        assert_eq!(increment.start_line, 10);
        let format = records.iter().find(|r| r.name == "format").unwrap();
        assert_eq!(format.start_line, 14);
        let button = records.iter().find(|r| r.name == "button").unwrap();
        assert_eq!(button.start_line, 3);
    }

    #[test]
    fn test_no_separator_without_script() {
        let mut registry = GrammarRegistry::new();
        let records = CompositeDocumentExtractor.extract(
            "Static.vue",
            "<template>\n  <main id=\"root\"></main>\n</template>\n",
            &mut registry,
        );
        assert!(records.iter().all(|r| r.kind != SymbolKind::Separator));
        assert!(records.iter().any(|r| r.name == "main"));
    }
}

// Grammar registry
//
// One registry per run. Parsers are created lazily, keyed by the requested
// grammar name, and reused for every later file of that grammar. A failed
// lookup is cached too, so the fallback chain is only walked once per run.

use rustc_hash::FxHashMap;

use tracing::{debug, warn};
use tree_sitter::{Parser, Tree};

use crate::language::{fallback_chain, get_tree_sitter_language};

/// A parser bound to the grammar that actually loaded.
struct LoadedGrammar {
    /// Grammar the parser speaks (may be a fallback of the requested one)
    name: String,
    parser: Parser,
}

/// A syntax tree plus the name of the grammar that produced it.
pub struct ParsedSource {
    pub grammar: String,
    pub tree: Tree,
}

/// Lazily populated cache of parsers, passed explicitly through the pipeline.
#[derive(Default)]
pub struct GrammarRegistry {
    parsers: FxHashMap<String, Option<LoadedGrammar>>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the grammar that `grammar` resolves to after walking the fallback chain.
    pub fn resolve(&mut self, grammar: &str) -> Option<String> {
        self.loaded(grammar).map(|loaded| loaded.name.clone())
    }

    /// Parse `source` with `grammar`, falling back along the chain.
    ///
    /// Returns `None` when no grammar in the chain loads or the parser gives up.
    pub fn parse(&mut self, source: &str, grammar: &str) -> Option<ParsedSource> {
        let loaded = self.loaded(grammar)?;
        let tree = loaded.parser.parse(source, None)?;
        Some(ParsedSource {
            grammar: loaded.name.clone(),
            tree,
        })
    }

    /// Number of grammar names looked up so far, loaded or not.
    pub fn cached_count(&self) -> usize {
        self.parsers.len()
    }

    fn loaded(&mut self, grammar: &str) -> Option<&mut LoadedGrammar> {
        if !self.parsers.contains_key(grammar) {
            let entry = Self::load_chain(grammar);
            self.parsers.insert(grammar.to_string(), entry);
        }
        self.parsers.get_mut(grammar).and_then(|entry| entry.as_mut())
    }

    fn load_chain(grammar: &str) -> Option<LoadedGrammar> {
        for candidate in fallback_chain(grammar) {
            let Some(language) = get_tree_sitter_language(&candidate) else {
                debug!("Grammar '{}' not available, trying fallback", candidate);
                continue;
            };

            let mut parser = Parser::new();
            if let Err(e) = parser.set_language(&language) {
                warn!("Grammar '{}' failed to load: {}", candidate, e);
                continue;
            }

            if candidate != grammar {
                debug!("Using '{}' grammar in place of '{}'", candidate, grammar);
            }
            return Some(LoadedGrammar {
                name: candidate,
                parser,
            });
        }

        debug!("No grammar available for '{}'", grammar);
        None
    }
}

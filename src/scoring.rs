// Symbol importance and file priority
//
// Every weight is a public field of a policy struct so callers and tests can
// override one term without touching the formula.

use crate::extractors::base::{SymbolKind, SymbolRecord};
use crate::utils::PathRelevance;
use std::collections::BTreeMap;

/// Substrings of a lower-cased symbol name that adjust its score.
#[derive(Debug, Clone, PartialEq)]
pub struct NamePattern {
    pub needles: &'static [&'static str],
    pub bonus: f64,
}

/// Weights of the importance formula:
/// `base + modifiers + export list + references + name patterns + parameters`,
/// clamped at zero, then multiplied by the file's rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringPolicy {
    pub base_scores: BTreeMap<SymbolKind, f64>,
    /// Bonus per modifier present on the symbol; bonuses add up
    pub modifier_bonuses: BTreeMap<String, f64>,
    /// Name appears in the file's export list
    pub export_list_bonus: f64,
    /// Per distinct other file importing this symbol's file
    pub reference_bonus: f64,
    /// Each matching pattern applies once, in order
    pub name_patterns: Vec<NamePattern>,
    pub parameter_bonus: f64,
    pub parameter_bonus_cap: f64,
    /// PageRank damping factor
    pub damping: f64,
    /// PageRank rounds; fixed, not convergence-driven
    pub iterations: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        use SymbolKind as K;
        let base_scores = [
            (K::Class, 25.0),
            (K::Interface, 20.0),
            (K::Enum, 18.0),
            (K::TypeAlias, 15.0),
            (K::Constructor, 12.0),
            (K::AsyncFunction, 12.0),
            (K::Function, 10.0),
            (K::StaticMethod, 10.0),
            (K::Method, 8.0),
            (K::MarkupElement, 8.0),
            (K::Constant, 7.0),
            (K::Getter, 6.0),
            (K::Setter, 6.0),
            (K::Property, 5.0),
            (K::Variable, 4.0),
            // never filtered
            (K::Separator, 100.0),
        ]
        .into_iter()
        .collect();

        let modifier_bonuses = [
            ("export", 5.0),
            ("public", 2.0),
            ("static", 3.0),
            ("async", 2.0),
            ("abstract", 3.0),
            ("override", 2.0),
        ]
        .into_iter()
        .map(|(m, bonus)| (m.to_string(), bonus))
        .collect();

        Self {
            base_scores,
            modifier_bonuses,
            export_list_bonus: 8.0,
            reference_bonus: 2.0,
            name_patterns: vec![
                NamePattern {
                    needles: &["main", "init", "setup"],
                    bonus: 3.0,
                },
                NamePattern {
                    needles: &["config", "setting"],
                    bonus: 2.0,
                },
                NamePattern {
                    needles: &["util", "helper"],
                    bonus: 1.0,
                },
                NamePattern {
                    needles: &["test", "spec"],
                    bonus: -2.0,
                },
            ],
            parameter_bonus: 0.5,
            parameter_bonus_cap: 3.0,
            damping: 0.85,
            iterations: 10,
        }
    }
}

impl ScoringPolicy {
    pub fn base_score(&self, kind: SymbolKind) -> f64 {
        self.base_scores.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn modifier_bonus(&self, symbol: &SymbolRecord) -> f64 {
        symbol
            .modifiers
            .iter()
            .filter_map(|m| self.modifier_bonuses.get(m))
            .sum()
    }

    pub fn name_pattern_bonus(&self, name: &str) -> f64 {
        let name = name.to_lowercase();
        self.name_patterns
            .iter()
            .filter(|pattern| pattern.needles.iter().any(|needle| name.contains(needle)))
            .map(|pattern| pattern.bonus)
            .sum()
    }

    pub fn parameter_complexity_bonus(&self, parameter_count: usize) -> f64 {
        (parameter_count as f64 * self.parameter_bonus).min(self.parameter_bonus_cap)
    }

    /// Rank-independent importance, never below zero.
    ///
    /// `reference_count` is the number of distinct other files importing the symbol's file.
    pub fn importance(&self, symbol: &SymbolRecord, exports: &[String], reference_count: usize) -> f64 {
        let mut score = self.base_score(symbol.kind) + self.modifier_bonus(symbol);
        if exports.iter().any(|export| *export == symbol.name) {
            score += self.export_list_bonus;
        }
        score += reference_count as f64 * self.reference_bonus;
        score += self.name_pattern_bonus(&symbol.name);
        score += self.parameter_complexity_bonus(symbol.parameter_count);
        score.max(0.0)
    }

    /// Fill in `importance` for every symbol of one file.
    pub fn score_file(
        &self,
        symbols: &mut [SymbolRecord],
        exports: &[String],
        reference_count: usize,
        rank: f64,
    ) {
        for symbol in symbols.iter_mut() {
            symbol.importance = self.importance(symbol, exports, reference_count) * rank;
        }
    }
}

/// Weights of the file ordering used by the formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePriorityPolicy {
    pub test_penalty: f64,
    pub config_penalty: f64,
    pub source_dir_bonus: f64,
    pub entry_point_bonus: f64,
    /// Summed symbol importance is divided by this...
    pub importance_divisor: f64,
    /// ...and capped here
    pub importance_cap: f64,
    pub export_weight: f64,
    pub export_cap: f64,
}

impl Default for FilePriorityPolicy {
    fn default() -> Self {
        Self {
            test_penalty: 10.0,
            config_penalty: 5.0,
            source_dir_bonus: 5.0,
            entry_point_bonus: 8.0,
            importance_divisor: 10.0,
            importance_cap: 20.0,
            export_weight: 2.0,
            export_cap: 10.0,
        }
    }
}

impl FilePriorityPolicy {
    pub fn path_score(&self, relative_path: &str) -> f64 {
        let path = PathRelevance::new(relative_path);
        let mut score = 0.0;
        if path.is_test_file() {
            score -= self.test_penalty;
        }
        if path.is_config_file() {
            score -= self.config_penalty;
        }
        if path.is_source_file() {
            score += self.source_dir_bonus;
        }
        if path.is_entry_point() {
            score += self.entry_point_bonus;
        }
        score
    }

    pub fn priority(&self, relative_path: &str, symbols: &[SymbolRecord], export_count: usize) -> f64 {
        let total_importance: f64 = symbols.iter().map(|s| s.importance).sum();
        self.path_score(relative_path)
            + (total_importance / self.importance_divisor).min(self.importance_cap)
            + (export_count as f64 * self.export_weight).min(self.export_cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: &str) -> SymbolRecord {
        SymbolRecord::new(name, SymbolKind::Function, format!("function {name}() {{ }}"), 1, 1)
    }

    #[test]
    fn test_export_modifier_adds_exactly_the_bonus() {
        let policy = ScoringPolicy::default();
        let plain = function("render");
        let mut exported = plain.clone();
        exported.modifiers.insert("export".to_string());

        let delta = policy.importance(&exported, &[], 0) - policy.importance(&plain, &[], 0);
        assert_eq!(delta, 5.0);
    }

    #[test]
    fn test_all_terms_add_up() {
        let policy = ScoringPolicy::default();
        let mut symbol = function("initConfig");
        symbol.kind = SymbolKind::AsyncFunction;
        symbol.modifiers.extend(["async".to_string(), "export".to_string()]);
        symbol.parameter_count = 3;

        let exports = vec!["initConfig".to_string()];
        // 12 base + 2 async + 5 export + 8 export list + 2*2 refs + 3 init + 2 config + 1.5 params
        assert_eq!(policy.importance(&symbol, &exports, 2), 37.5);
    }

    #[test]
    fn test_parameter_bonus_is_capped() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.parameter_complexity_bonus(0), 0.0);
        assert_eq!(policy.parameter_complexity_bonus(4), 2.0);
        assert_eq!(policy.parameter_complexity_bonus(20), 3.0);
    }

    #[test]
    fn test_score_is_clamped_at_zero() {
        let mut policy = ScoringPolicy::default();
        policy.base_scores.insert(SymbolKind::Variable, 0.0);
        let symbol = SymbolRecord::new("testSpec", SymbolKind::Variable, "let testSpec", 1, 1);
        assert_eq!(policy.importance(&symbol, &[], 0), 0.0);
    }

    #[test]
    fn test_rank_multiplies_final_importance() {
        let policy = ScoringPolicy::default();
        let mut symbols = vec![function("draw")];
        policy.score_file(&mut symbols, &[], 0, 0.5);
        assert_eq!(symbols[0].importance, 5.0);
    }

    #[test]
    fn test_file_priority_terms() {
        let policy = FilePriorityPolicy::default();
        assert_eq!(policy.path_score("src/index.ts"), 13.0);
        assert_eq!(policy.path_score("tests/util.ts"), -10.0);
        assert_eq!(policy.path_score("config/settings.json"), -5.0);
        assert_eq!(policy.path_score("docs/readme.ts"), 0.0);

        let mut heavy = function("a");
        heavy.importance = 500.0;
        // 0 path + capped 20 importance + capped 10 exports
        assert_eq!(policy.priority("pkg/x.ts", &[heavy], 9), 30.0);

        let mut light = function("b");
        light.importance = 15.0;
        assert_eq!(policy.priority("pkg/y.ts", &[light], 1), 3.5);
    }
}

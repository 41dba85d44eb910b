// Token-bounded map formatter
//
// Files are ordered by priority and rendered greedily into a fixed token
// budget. Every addition is estimated with the same `ceil(utf16_units / 4)` rule;
// the first addition that does not fit ends the whole run.

use crate::extractors::base::{SymbolKind, SymbolRecord};
use crate::extractors::signature::{split_at_body, BODY_PLACEHOLDER};
use crate::language::is_markup_document;
use crate::pipeline::SourceFile;
use crate::scoring::FilePriorityPolicy;
use crate::utils::TokenEstimator;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

static CLASS_METHOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\([^)]*\)\s*\{\s*\}").unwrap());

static LEADING_ACCESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:public|private|protected|static|final|override|suspend)\s+)+").unwrap()
});

/// Modifiers worth showing next to a symbol, in display order.
const DISPLAYED_MODIFIERS: &[&str] = &["abstract", "async", "export", "readonly", "static"];

const ELLIPSIS_LINE: &str = "⋮...";

/// Per-file selection thresholds and group caps.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayout {
    /// Markup elements need importance above this
    pub markup_threshold: f64,
    /// Every other non-separator symbol needs importance above this
    pub general_threshold: f64,
    pub max_methods_per_class: usize,
    pub max_free_functions: usize,
    pub max_other_symbols: usize,
    pub priority: FilePriorityPolicy,
}

impl Default for MapLayout {
    fn default() -> Self {
        Self {
            markup_threshold: 0.001,
            general_threshold: 0.01,
            max_methods_per_class: 8,
            max_free_functions: 5,
            max_other_symbols: 2,
            priority: FilePriorityPolicy::default(),
        }
    }
}

/// Output buffer that refuses any addition exceeding the token budget.
///
/// Once one addition is refused the writer stays closed.
pub struct BudgetedWriter {
    out: String,
    used: usize,
    max_tokens: usize,
    exhausted: bool,
    estimator: TokenEstimator,
}

impl BudgetedWriter {
    pub fn new(max_tokens: usize) -> Self {
        Self {
            out: String::new(),
            used: 0,
            max_tokens,
            exhausted: false,
            estimator: TokenEstimator::new(),
        }
    }

    /// Append `text` if its estimate fits in what is left.
    pub fn push(&mut self, text: &str) -> bool {
        if self.exhausted {
            return false;
        }
        let cost = self.estimator.estimate_string(text);
        if self.used + cost > self.max_tokens {
            self.exhausted = true;
            return false;
        }
        self.out.push_str(text);
        self.used += cost;
        true
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn used_tokens(&self) -> usize {
        self.used
    }

    pub fn finish(self) -> String {
        self.out.trim().to_string()
    }
}

pub struct MapFormatter {
    layout: MapLayout,
}

impl MapFormatter {
    pub fn new(layout: MapLayout) -> Self {
        Self { layout }
    }

    /// Render `files` into at most `max_tokens` estimated tokens.
    pub fn format(&self, files: &[SourceFile], max_tokens: usize) -> String {
        let mut writer = BudgetedWriter::new(max_tokens);

        for file in self.order_files(files) {
            if !writer.push(&format!("{}:\n", file.relative_path)) {
                break;
            }

            let symbols = self.select_symbols(&file.symbols);
            let added = if is_markup_document(&file.relative_path) {
                Self::write_markup(&mut writer, &symbols)
            } else {
                self.write_grouped(&mut writer, &symbols)
            };

            if writer.is_exhausted() {
                break;
            }
            if added && !writer.push("\n") {
                break;
            }
        }

        debug!("Map uses {} of {} tokens", writer.used_tokens(), max_tokens);
        writer.finish()
    }

    /// Files with symbols, highest priority first, ties by path.
    fn order_files<'a>(&self, files: &'a [SourceFile]) -> Vec<&'a SourceFile> {
        let mut ranked: Vec<(f64, &SourceFile)> = files
            .iter()
            .filter(|file| !file.symbols.is_empty())
            .map(|file| {
                let priority = self.layout.priority.priority(
                    &file.relative_path,
                    &file.symbols,
                    file.exports.len(),
                );
                (priority, file)
            })
            .collect();

        ranked.sort_by(|(pa, a), (pb, b)| {
            pb.total_cmp(pa)
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });
        ranked.into_iter().map(|(_, file)| file).collect()
    }

    /// Threshold filter, then `(kind, name)` dedup keeping the first seen,
    /// then a stable sort by descending importance.
    pub fn select_symbols<'a>(&self, symbols: &'a [SymbolRecord]) -> Vec<&'a SymbolRecord> {
        let mut seen = HashSet::new();
        let mut selected: Vec<&SymbolRecord> = symbols
            .iter()
            .filter(|s| match s.kind {
                SymbolKind::Separator => true,
                SymbolKind::MarkupElement => s.importance > self.layout.markup_threshold,
                _ => s.importance > self.layout.general_threshold,
            })
            .filter(|&s| seen.insert(s.dedup_key()))
            .collect();
        selected.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        selected
    }

    fn write_markup(writer: &mut BudgetedWriter, symbols: &[&SymbolRecord]) -> bool {
        let mut added = false;
        for element in symbols.iter().filter(|s| s.kind == SymbolKind::MarkupElement) {
            if !writer.push(&format!("{ELLIPSIS_LINE}\n│{}\n", element.signature_text)) {
                break;
            }
            added = true;
        }
        added
    }

    /// Classes with their methods, free functions, separators, then a few others.
    fn write_grouped(&self, writer: &mut BudgetedWriter, symbols: &[&SymbolRecord]) -> bool {
        let layout = &self.layout;
        let mut added = false;
        let classes: Vec<&SymbolRecord> =
            symbols.iter().copied().filter(|s| s.kind.is_class_like()).collect();
        let class_names: HashSet<&str> = classes.iter().map(|c| c.name.as_str()).collect();

        // symbols attributed to some class, by position in `symbols`
        let mut attributed = vec![false; symbols.len()];

        for class in &classes {
            if !writer.push(&format!("{ELLIPSIS_LINE}\n│{}\n", clean_signature(class))) {
                return added;
            }
            added = true;

            let method_names = class_method_names(class);
            let mut shown = 0;
            for (idx, symbol) in symbols.iter().enumerate() {
                if !symbol.kind.is_callable() || !method_names.contains(symbol.name.as_str()) {
                    continue;
                }
                attributed[idx] = true;
                if shown < layout.max_methods_per_class {
                    if !writer.push(&format!("    │  {}\n", clean_signature(symbol))) {
                        return added;
                    }
                    shown += 1;
                }
            }
        }

        let free_functions = symbols.iter().enumerate().filter(|(idx, s)| {
            is_free_callable(s, &class_names)
                && !attributed[*idx]
                && !class_names.contains(s.name.as_str())
        });
        let others = symbols.iter().enumerate().filter(|(idx, s)| {
            !s.kind.is_class_like()
                && !is_free_callable(s, &class_names)
                && s.kind != SymbolKind::Separator
                && !attributed[*idx]
        });
        let separators = symbols
            .iter()
            .enumerate()
            .filter(|(_, s)| s.kind == SymbolKind::Separator);

        let groups = free_functions
            .take(layout.max_free_functions)
            .chain(separators)
            .chain(others.take(layout.max_other_symbols));
        for (_, symbol) in groups {
            if !writer.push(&format!("{ELLIPSIS_LINE}\n│{}\n", clean_signature(symbol))) {
                return added;
            }
            added = true;
        }
        added
    }
}

/// Functions, plus methods whose owning type is not rendered in this file.
fn is_free_callable(symbol: &SymbolRecord, class_names: &HashSet<&str>) -> bool {
    symbol.kind.is_function()
        || (symbol.kind == SymbolKind::Method
            && symbol
                .parent
                .as_deref()
                .is_some_and(|owner| !class_names.contains(owner)))
}

/// Method names declared in a class signature's `name(...) { }` member lines.
pub fn class_method_names(class: &SymbolRecord) -> HashSet<&str> {
    let signature = class.signature_text.as_str();
    if !signature.contains('{') || !signature.contains('}') {
        return HashSet::new();
    }
    CLASS_METHOD_RE
        .captures_iter(signature)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| *name != class.name)
        .collect()
}

/// One display line: icon, body-free signature, modifier tag, line range.
pub fn clean_signature(symbol: &SymbolRecord) -> String {
    let signature = symbol.signature_text.as_str();
    let first_line = signature.lines().next().unwrap_or_default().trim();

    let clean = match symbol.kind {
        SymbolKind::Separator | SymbolKind::MarkupElement => signature.trim().to_string(),
        SymbolKind::Class | SymbolKind::Interface | SymbolKind::Enum => {
            let header = first_line
                .strip_suffix(BODY_PLACEHOLDER)
                .unwrap_or(first_line)
                .trim_end()
                .trim_end_matches(['{', ':'])
                .trim_end();
            format!("{header} {BODY_PLACEHOLDER}")
        }
        kind if kind.is_callable() => {
            let head = split_at_body(first_line).unwrap_or(first_line);
            let head = LEADING_ACCESS_RE.replace(head, "");
            format!("{} {BODY_PLACEHOLDER}", head.trim_end())
        }
        _ if signature.trim().lines().count() > 1 => format!("{first_line} {BODY_PLACEHOLDER}"),
        _ => first_line.to_string(),
    };

    let modifiers: Vec<&str> = DISPLAYED_MODIFIERS
        .iter()
        .copied()
        .filter(|m| symbol.has_modifier(m))
        .collect();
    let modifier_tag = if modifiers.is_empty() {
        String::new()
    } else {
        format!(" [{}]", modifiers.join(", "))
    };

    let range_tag = match (symbol.start_line, symbol.end_line) {
        (0, _) => String::new(),
        (start, end) if end != start && end != 0 => format!(" [L{start}-{end}]"),
        (start, _) => format!(" [L{start}]"),
    };

    format!("{} {clean}{modifier_tag}{range_tag}", symbol.kind.icon())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(name: &str, kind: SymbolKind, signature: &str, lines: (usize, usize), importance: f64) -> SymbolRecord {
        let mut record = SymbolRecord::new(name, kind, signature, lines.0, lines.1);
        record.importance = importance;
        record
    }

    fn file(relative_path: &str, symbols: Vec<SymbolRecord>) -> SourceFile {
        SourceFile {
            path: format!("/repo/{relative_path}"),
            relative_path: relative_path.to_string(),
            imports: Vec::new(),
            exports: Vec::new(),
            symbols,
        }
    }

    fn widget_file() -> SourceFile {
        file(
            "src/widget.ts",
            vec![
                symbol(
                    "Widget",
                    SymbolKind::Class,
                    "class Widget {\n  render() { }\n  destroy() { }\n}",
                    (1, 4),
                    25.0,
                ),
                symbol("render", SymbolKind::Method, "render() { }", (2, 2), 8.0),
                symbol("destroy", SymbolKind::Method, "destroy() { }", (3, 3), 8.0),
                symbol("helper", SymbolKind::Function, "function helper() { }", (6, 6), 11.0),
            ],
        )
    }

    #[test]
    fn test_class_methods_are_grouped_and_helper_stays_free() {
        let map = MapFormatter::new(MapLayout::default()).format(&[widget_file()], 1024);
        assert_eq!(
            map,
            "src/widget.ts:\n\
             ⋮...\n│🏛️ class Widget { } [L1-4]\n\
             \x20   │  🔧 render() { } [L2]\n\
             \x20   │  🔧 destroy() { } [L3]\n\
             ⋮...\n│⚡ function helper() { } [L6]"
        );
    }

    #[test]
    fn test_methods_of_types_declared_elsewhere_are_free_functions() {
        let mut get = symbol("Get", SymbolKind::Method, "func (s *Store) Get(id int) { }", (3, 5), 8.0);
        get.parent = Some("Store".to_string());
        let mut put = symbol("Put", SymbolKind::Method, "func (s *Store) Put(id int) { }", (7, 9), 8.0);
        put.parent = Some("Store".to_string());
        let files = [file(
            "store_ops.go",
            vec![
                get,
                put,
                symbol("A", SymbolKind::Constant, "const A = 1", (11, 11), 7.0),
                symbol("B", SymbolKind::Constant, "const B = 2", (12, 12), 7.0),
                symbol("C", SymbolKind::Constant, "const C = 3", (13, 13), 7.0),
            ],
        )];
        let map = MapFormatter::new(MapLayout::default()).format(&files, 1024);
        assert!(map.contains("Get(id int)"));
        assert!(map.contains("Put(id int)"));
        // the other-symbol cap still applies to the constants alone
        assert!(map.contains("const A = 1"));
        assert!(map.contains("const B = 2"));
        assert!(!map.contains("const C = 3"));
    }

    #[test]
    fn test_duplicate_names_keep_first_occurrence() {
        let files = [file(
            "parse.js",
            vec![
                symbol("parse", SymbolKind::Function, "function parse(a) { }", (1, 1), 10.5),
                symbol("parse", SymbolKind::Function, "function parse(a, b) { }", (2, 2), 11.0),
            ],
        )];
        let map = MapFormatter::new(MapLayout::default()).format(&files, 1024);
        assert_eq!(map.matches("parse(").count(), 1);
        assert!(map.contains("function parse(a) { } [L1]"));
    }

    #[test]
    fn test_zero_budget_gives_empty_map() {
        let formatter = MapFormatter::new(MapLayout::default());
        assert_eq!(formatter.format(&[widget_file()], 0), "");
        // header alone needs four tokens
        assert_eq!(formatter.format(&[widget_file()], 3), "");
    }

    #[test]
    fn test_budget_is_never_exceeded() {
        let formatter = MapFormatter::new(MapLayout::default());
        let files = [
            widget_file(),
            file(
                "lib/util.py",
                vec![symbol("helper", SymbolKind::Function, "def helper(x) { }", (1, 2), 3.0)],
            ),
        ];
        let estimator = TokenEstimator::new();
        for max_tokens in 0..80 {
            let map = formatter.format(&files, max_tokens);
            assert!(estimator.estimate_string(&map) <= max_tokens, "budget {max_tokens}");
        }
    }

    #[test]
    fn test_first_refusal_stops_the_run() {
        let formatter = MapFormatter::new(MapLayout::default());
        let full = formatter.format(&[widget_file()], 1024);
        // enough for the header and class line, not the first method line
        let map = formatter.format(&[widget_file()], 16);
        assert!(full.starts_with(&map));
        assert!(map.contains("class Widget"));
        assert!(!map.contains("helper"));
    }

    #[test]
    fn test_thresholds_and_separator() {
        let files = [file(
            "App.vue",
            vec![
                symbol("tiny", SymbolKind::Function, "function tiny() { }", (1, 1), 0.005),
                symbol("template", SymbolKind::Separator, "--- Template ---", (5, 5), 0.0),
                symbol("div", SymbolKind::MarkupElement, "div [class]", (6, 9), 0.002),
            ],
        )];
        let map = MapFormatter::new(MapLayout::default()).format(&files, 1024);
        assert!(!map.contains("tiny"));
        assert!(map.contains("│📍 --- Template --- [L5]"));
        assert!(map.contains("│📦 div [class] [L6-9]"));
    }

    #[test]
    fn test_markup_files_print_raw_tree_lines() {
        let files = [file(
            "index.html",
            vec![
                symbol("html", SymbolKind::MarkupElement, "html", (1, 9), 8.0),
                symbol("nav", SymbolKind::MarkupElement, "    ├─ nav [id]", (3, 5), 8.0),
            ],
        )];
        let map = MapFormatter::new(MapLayout::default()).format(&files, 1024);
        assert_eq!(map, "index.html:\n⋮...\n│html\n⋮...\n│    ├─ nav [id]");
    }

    #[test]
    fn test_files_ordered_by_priority_then_path() {
        let one = |path: &str| {
            file(
                path,
                vec![symbol("run", SymbolKind::Function, "function run() { }", (1, 1), 10.0)],
            )
        };
        let files = [one("zeta.js"), one("alpha.js"), one("src/main.js")];
        let map = MapFormatter::new(MapLayout::default()).format(&files, 1024);
        let order: Vec<&str> = map.lines().filter(|l| l.ends_with(".js:")).collect();
        assert_eq!(order, vec!["src/main.js:", "alpha.js:", "zeta.js:"]);
    }

    #[test]
    fn test_clean_signature_forms() {
        let mut method = symbol(
            "load",
            SymbolKind::AsyncFunction,
            "public static async load(id: string) {\n  return id;\n}",
            (3, 5),
            1.0,
        );
        method.modifiers.extend(["static".to_string(), "async".to_string(), "public".to_string()]);
        assert_eq!(
            clean_signature(&method),
            "⚡🔄 async load(id: string) { } [async, static] [L3-5]"
        );

        let class = symbol("Shape", SymbolKind::Class, "abstract class Shape { }", (1, 1), 1.0);
        assert_eq!(clean_signature(&class), "🏛️ abstract class Shape { } [L1]");

        let python_class = symbol("Config", SymbolKind::Class, "class Config: { }", (1, 3), 1.0);
        assert_eq!(clean_signature(&python_class), "🏛️ class Config { } [L1-3]");

        let arrow = symbol("helper", SymbolKind::Function, "helper = (a, b) => { }", (7, 7), 1.0);
        assert_eq!(clean_signature(&arrow), "⚡ helper = (a, b) => { } [L7]");

        let alias = symbol("Id", SymbolKind::TypeAlias, "type Id =\n  string", (2, 3), 1.0);
        assert_eq!(clean_signature(&alias), "🏷️ type Id = { } [L2-3]");

        let constant = symbol("MAX", SymbolKind::Constant, "const MAX = 3", (0, 0), 1.0);
        assert_eq!(clean_signature(&constant), "🔒 const MAX = 3");
    }

    #[test]
    fn test_class_method_names_skip_own_name() {
        let class = symbol(
            "Foo",
            SymbolKind::Class,
            "class Foo(Base) {\n  run(self) { }\n  stop() { }\n}",
            (1, 4),
            1.0,
        );
        let names = class_method_names(&class);
        assert_eq!(names, HashSet::from(["run", "stop"]));
    }
}

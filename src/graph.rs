// Dependency graph and file ranking
//
// One node per scanned file, one edge per resolved import. Ranks come from a
// fixed number of PageRank power-iteration rounds seeded at 1.0 per file and
// left unnormalized, so they act as a multiplicative relevance weight.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Directed file graph: an edge `a → b` means `a` imports `b`.
pub struct DependencyGraph {
    graph: DiGraph<String, ()>,
    /// Fast lookup from relative path to graph node index
    node_map: FxHashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Build the graph from `(relative path, imports)` pairs in scan order.
    ///
    /// Node `i` corresponds to the `i`-th file, so rank vectors line up with the input.
    pub fn build<'a, I>(files: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let files: Vec<(&str, &[String])> = files.into_iter().collect();
        let mut graph = DiGraph::with_capacity(files.len(), 0);
        let mut node_map: FxHashMap<String, NodeIndex> = FxHashMap::default();

        // First pass: one node per file
        let paths: Vec<&str> = files.iter().map(|(path, _)| *path).collect();
        for path in &paths {
            let idx = graph.add_node(path.to_string());
            node_map.entry(path.to_string()).or_insert(idx);
        }

        // Second pass: edges, deduplicated per pair
        for (from_idx, (_, imports)) in files.iter().enumerate() {
            for import in imports.iter() {
                if let Some(to_idx) = resolve_import(import, &paths, from_idx) {
                    graph.update_edge(NodeIndex::new(from_idx), NodeIndex::new(to_idx), ());
                }
            }
        }

        debug!(
            "Dependency graph: {} files, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        DependencyGraph { graph, node_map }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Number of distinct files importing `path`.
    pub fn dependents(&self, path: &str) -> usize {
        self.node_map.get(path).map_or(0, |&idx| {
            self.graph
                .neighbors_directed(idx, Direction::Incoming)
                .count()
        })
    }

    pub fn out_degree(&self, path: &str) -> usize {
        self.node_map.get(path).map_or(0, |&idx| {
            self.graph
                .neighbors_directed(idx, Direction::Outgoing)
                .count()
        })
    }

    /// Rank per file, in build order, after exactly `iterations` rounds of
    /// `rank[f] = (1 - d) / N + d * Σ rank[g] / outdeg(g)` over edges `g → f`.
    ///
    /// Every file starts at 1.0; files without outgoing edges distribute nothing.
    pub fn page_rank(&self, damping: f64, iterations: usize) -> Vec<f64> {
        let node_count = self.graph.node_count();
        if node_count == 0 {
            return Vec::new();
        }

        let mut scores: Vec<f64> = vec![1.0; node_count];
        let mut new_scores: Vec<f64> = vec![0.0; node_count];

        // Precompute out-degrees and inbound sources once
        let out_degrees: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| self.graph.neighbors_directed(idx, Direction::Outgoing).count())
            .collect();
        let sources: Vec<Vec<usize>> = self
            .graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .map(|n| n.index())
                    .collect()
            })
            .collect();

        let teleport = (1.0 - damping) / node_count as f64;

        for _ in 0..iterations {
            for (target, incoming) in sources.iter().enumerate() {
                let inbound: f64 = incoming
                    .iter()
                    .map(|&g| scores[g] / out_degrees[g].max(1) as f64)
                    .sum();
                new_scores[target] = teleport + damping * inbound;
            }
            std::mem::swap(&mut scores, &mut new_scores);
        }

        scores
    }
}

/// Drop leading `./` and `../` segments from an import string.
pub fn normalize_import(import: &str) -> &str {
    let mut rest = import.trim();
    loop {
        if let Some(stripped) = rest.strip_prefix("./") {
            rest = stripped;
        } else if let Some(stripped) = rest.strip_prefix("../") {
            rest = stripped;
        } else {
            return rest;
        }
    }
}

/// `src/app.ts` → `src/app`; dots in directory names are left alone.
fn strip_extension(path: &str) -> &str {
    let file_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..file_start + dot],
        _ => path,
    }
}

/// Index of the first file (other than `from`) an import refers to.
///
/// A file matches when its path contains the import or the import contains its
/// extension-less path. Imports that normalize to nothing never match.
pub fn resolve_import(import: &str, paths: &[&str], from: usize) -> Option<usize> {
    let import = normalize_import(import);
    if import.is_empty() {
        return None;
    }
    paths
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != from)
        .find(|(_, path)| path.contains(import) || import.contains(strip_extension(path)))
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Imports are given comma-separated.
    fn graph(files: &[(&str, &str)]) -> (DependencyGraph, Vec<(String, Vec<String>)>) {
        let owned: Vec<(String, Vec<String>)> = files
            .iter()
            .map(|(path, imports)| {
                (
                    path.to_string(),
                    imports
                        .split(',')
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect(),
                )
            })
            .collect();
        let graph = DependencyGraph::build(
            owned
                .iter()
                .map(|(path, imports)| (path.as_str(), imports.as_slice())),
        );
        (graph, owned)
    }

    #[test]
    fn test_empty_graph() {
        let (graph, _) = graph(&[]);
        assert_eq!(graph.node_count(), 0);
        assert!(graph.page_rank(0.85, 10).is_empty());
    }

    #[test]
    fn test_import_resolution() {
        let paths = ["src/a.ts", "src/utils/format.ts", "styles/main.css"];
        assert_eq!(resolve_import("./a", &paths, 1), Some(0));
        assert_eq!(resolve_import("../utils/format", &paths, 0), Some(1));
        assert_eq!(resolve_import("./main.css", &paths, 0), Some(2));
        assert_eq!(resolve_import("lodash", &paths, 0), None);
        assert_eq!(resolve_import("./", &paths, 0), None);
        assert_eq!(resolve_import("../..", &paths, 0), None);
    }

    #[test]
    fn test_import_never_resolves_to_importer() {
        let paths = ["src/a.ts", "src/b.ts"];
        assert_eq!(resolve_import("./a", &paths, 0), None);
        assert_eq!(resolve_import("./a", &paths, 1), Some(0));
    }

    #[test]
    fn test_strip_extension_only_touches_file_name() {
        assert_eq!(strip_extension("src/app.ts"), "src/app");
        assert_eq!(strip_extension("my.pkg/Makefile"), "my.pkg/Makefile");
        assert_eq!(strip_extension(".eslintrc"), ".eslintrc");
    }

    #[test]
    fn test_edges_are_deduplicated() {
        let (graph, _) = graph(&[("src/b.ts", "./a,../src/a"), ("src/a.ts", "")]);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge("src/b.ts", "src/a.ts"));
        assert_eq!(graph.out_degree("src/b.ts"), 1);
        assert_eq!(graph.dependents("src/a.ts"), 1);
        assert_eq!(graph.dependents("src/b.ts"), 0);
    }

    #[test]
    fn test_referenced_file_outranks_unreferenced_one() {
        // b imports a; c is unrelated
        let (graph, _) = graph(&[
            ("a.ts", ""),
            ("b.ts", "./a"),
            ("c.ts", ""),
        ]);
        let ranks = graph.page_rank(0.85, 10);
        assert_eq!(ranks.len(), 3);
        assert!(ranks[0] > ranks[2]);
        assert!(ranks.iter().all(|r| *r > 0.0));
        // no inbound edges leaves only the constant term
        assert!((ranks[2] - 0.15 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_grows_with_referrers() {
        let (graph, _) = graph(&[
            ("core.ts", ""),
            ("lone.ts", ""),
            ("x.ts", "./core"),
            ("y.ts", "./core"),
        ]);
        let ranks = graph.page_rank(0.85, 10);
        assert!(ranks[0] > ranks[1]);
        assert!((ranks[0] - (0.15 / 4.0 + 0.85 * 2.0 * 0.15 / 4.0)).abs() < 1e-12);
    }

    #[test]
    fn test_cycles_are_permitted() {
        let (graph, _) = graph(&[("a.ts", "./b"), ("b.ts", "./a")]);
        assert_eq!(graph.edge_count(), 2);
        let ranks = graph.page_rank(0.85, 10);
        assert!((ranks[0] - ranks[1]).abs() < 1e-12);
    }
}

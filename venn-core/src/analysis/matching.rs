//! Win detection: comparing the current structure against the target.

use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{config::MatchRule, graph::{AdjacencyGraph, Edge}, key::Key, region::Region, regions};

/// Differences between a current and a target graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Target regions the current configuration lacks.
    #[tsify(type = "string[]")]
    pub missing_regions: Vec<Key>,
    /// Current regions the target doesn't have.
    #[tsify(type = "string[]")]
    pub extra_regions: Vec<Key>,
    #[tsify(type = "[string, string][]")]
    pub missing_edges: Vec<Edge>,
    #[tsify(type = "[string, string][]")]
    pub extra_edges: Vec<Edge>,
}

impl Comparison {
    pub fn is_match(&self, rule: MatchRule) -> bool {
        let labels = self.missing_regions.is_empty() && self.extra_regions.is_empty();
        match rule {
            MatchRule::Labels => labels,
            MatchRule::Edges => labels && self.missing_edges.is_empty() && self.extra_edges.is_empty(),
        }
    }
}

pub fn compare(current: &AdjacencyGraph, target: &AdjacencyGraph) -> Comparison {
    Comparison {
        missing_regions: target.nodes.difference(&current.nodes).copied().collect(),
        extra_regions: current.nodes.difference(&target.nodes).copied().collect(),
        missing_edges: target.edges.difference(&current.edges).copied().collect(),
        extra_edges: current.edges.difference(&target.edges).copied().collect(),
    }
}

pub fn is_match(current: &AdjacencyGraph, target: &AdjacencyGraph, rule: MatchRule) -> bool {
    match rule {
        MatchRule::Labels => current.nodes == target.nodes,
        MatchRule::Edges => current.nodes == target.nodes && current.edges == target.edges,
    }
}

/// Label-set equality over raw region lists (order irrelevant).
pub fn regions_match(current: &[Region], target: &[Region]) -> bool {
    regions::keys(current) == regions::keys(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AdjacencyPolicy, graph, r2::R2};

    fn k(s: &str) -> Key {
        s.parse().unwrap()
    }

    fn regions(names: &[&str]) -> Vec<Region> {
        names.iter().map(|name| Region::new(k(name), R2::default())).collect()
    }

    fn lattice(names: &[&str]) -> AdjacencyGraph {
        graph::build(&regions(names), &[], AdjacencyPolicy::Lattice, 0.)
    }

    #[test]
    fn reflexive_and_symmetric() {
        let x = lattice(&[ "A", "B", "AB" ]);
        let y = lattice(&[ "A", "B" ]);
        for rule in [ MatchRule::Edges, MatchRule::Labels ] {
            assert!(is_match(&x, &x, rule));
            assert_eq!(is_match(&x, &y, rule), is_match(&y, &x, rule));
            assert!(!is_match(&x, &y, rule));
        }
    }

    #[test]
    fn edges_are_stricter_than_labels() {
        let mut x = lattice(&[ "A", "B", "AB" ]);
        let y = x.clone();
        x.edges.insert(Edge::new(k("A"), k("B")).unwrap());
        assert!(is_match(&x, &y, MatchRule::Labels));
        assert!(!is_match(&x, &y, MatchRule::Edges));
        let diff = compare(&x, &y);
        assert!(diff.is_match(MatchRule::Labels));
        assert!(!diff.is_match(MatchRule::Edges));
        assert_eq!(diff.extra_edges, vec![ Edge::new(k("A"), k("B")).unwrap() ]);
        assert!(diff.missing_edges.is_empty());
    }

    #[test]
    fn comparison_lists_differences() {
        let current = lattice(&[ "A", "B" ]);
        let target = lattice(&[ "A", "B", "AB" ]);
        let diff = compare(&current, &target);
        assert_eq!(diff.missing_regions, vec![ k("AB") ]);
        assert!(diff.extra_regions.is_empty());
        assert_eq!(diff.missing_edges.len(), 2);
        assert!(diff.extra_edges.is_empty());
        assert_eq!(compare(&target, &target), Comparison::default());
    }

    #[test]
    fn raw_regions() {
        assert!(regions_match(&regions(&[ "AB", "A" ]), &regions(&[ "A", "AB" ])));
        assert!(!regions_match(&regions(&[ "A", "B" ]), &regions(&[ "A", "B", "AB" ])));
    }
}

//! Region adjacency graphs.

use std::{collections::BTreeSet, f64::consts::PI, fmt};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    circle::Circle,
    config::AdjacencyPolicy,
    key::Key,
    r2::R2,
    region::Region,
};

/// Undirected edge; the smaller key always comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "(Key, Key)", into = "(Key, Key)")]
pub struct Edge(Key, Key);

impl Edge {
    /// `None` for self-loops.
    pub fn new(a: Key, b: Key) -> Option<Edge> {
        if a < b {
            Some(Edge(a, b))
        } else if b < a {
            Some(Edge(b, a))
        } else {
            None
        }
    }
    pub fn keys(&self) -> (Key, Key) {
        (self.0, self.1)
    }
    pub fn touches(&self, key: Key) -> bool {
        self.0 == key || self.1 == key
    }
    pub fn other(&self, key: Key) -> Option<Key> {
        if self.0 == key {
            Some(self.1)
        } else if self.1 == key {
            Some(self.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Self-loop on {0}")]
pub struct SelfLoop(Key);

impl TryFrom<(Key, Key)> for Edge {
    type Error = SelfLoop;
    fn try_from((a, b): (Key, Key)) -> Result<Self, Self::Error> {
        Edge::new(a, b).ok_or(SelfLoop(a))
    }
}

impl From<Edge> for (Key, Key) {
    fn from(edge: Edge) -> (Key, Key) {
        edge.keys()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
pub struct AdjacencyGraph {
    #[tsify(type = "string[]")]
    pub nodes: BTreeSet<Key>,
    #[tsify(type = "[string, string][]")]
    pub edges: BTreeSet<Edge>,
}

/// Whether regions `a` and `b` are adjacent under `policy`.
///
/// `circles` is only consulted by [`AdjacencyPolicy::Geometric`], for pairs of single-set regions; a
/// circle missing from `circles` touches nothing.
pub fn adjacent(a: Key, b: Key, circles: &[Circle], policy: AdjacencyPolicy, epsilon: f64) -> bool {
    if a == b {
        return false;
    }
    match policy {
        AdjacencyPolicy::Lattice => a.distance(b) == 1,
        AdjacencyPolicy::Overlap => a.intersects(b) || a.distance(b) == 1,
        AdjacencyPolicy::Geometric => match (a.as_single(), b.as_single()) {
            (Some(i), Some(j)) => {
                let find = |id| circles.iter().find(|c| c.id == id);
                match (find(i), find(j)) {
                    (Some(ci), Some(cj)) => ci.touches(cj, epsilon),
                    _ => false,
                }
            },
            _ => a.distance(b) == 1,
        },
    }
}

pub fn build(regions: &[Region], circles: &[Circle], policy: AdjacencyPolicy, epsilon: f64) -> AdjacencyGraph {
    let nodes: BTreeSet<Key> = regions.iter().map(|r| r.key).collect();
    let edges = nodes
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| adjacent(**a, **b, circles, policy, epsilon))
        .filter_map(|(a, b)| Edge::new(*a, *b))
        .collect();
    AdjacencyGraph { nodes, edges }
}

impl AdjacencyGraph {
    pub fn contains_edge(&self, a: Key, b: Key) -> bool {
        Edge::new(a, b).map_or(false, |e| self.edges.contains(&e))
    }
    pub fn neighbors(&self, key: Key) -> Vec<Key> {
        self.edges.iter().filter_map(|e| e.other(key)).sorted().collect()
    }
    pub fn degree(&self, key: Key) -> usize {
        self.edges.iter().filter(|e| e.touches(key)).count()
    }
    /// Node positions evenly spaced around a circle, in key order starting at angle 0.
    pub fn ring_layout(&self, center: R2<f64>, radius: f64) -> Vec<(Key, R2<f64>)> {
        let n = self.nodes.len() as f64;
        self.nodes.iter().enumerate().map(|(idx, key)| {
            let theta = 2. * PI * idx as f64 / n;
            (*key, R2 { x: center.x + radius * theta.cos(), y: center.y + radius * theta.sin() })
        }).collect()
    }
}

impl fmt::Display for AdjacencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "G[{}; {}]",
            self.nodes.iter().join(" "),
            self.edges.iter().join(" "),
        )
    }
}

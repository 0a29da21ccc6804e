use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::{
    circle::Circle,
    config::{Config, MatchRule},
    graph::{self, AdjacencyGraph},
    matching::{self, Comparison},
    region::Region,
    regions,
};

/// Everything derived from one circle configuration: its regions and their adjacency graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
pub struct Structure {
    pub regions: Vec<Region>,
    pub graph: AdjacencyGraph,
}

impl Structure {
    pub fn new(circles: &[Circle], config: &Config) -> Structure {
        let regions = regions::extract(circles, &config.extract);
        let graph = graph::build(&regions, circles, config.adjacency, config.touch_epsilon);
        Structure { regions, graph }
    }
    pub fn matches(&self, target: &Structure, rule: MatchRule) -> bool {
        matching::is_match(&self.graph, &target.graph, rule)
    }
    pub fn compare(&self, target: &Structure) -> Comparison {
        matching::compare(&self.graph, &target.graph)
    }
}

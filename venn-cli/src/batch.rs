//! Generate many targets in parallel and summarize their structures.

use std::collections::BTreeMap;

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

use venn_core::{circle::Circle, config::Config, structure::Structure, target};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub targets: usize,
    /// Number of targets per region count
    pub regions: BTreeMap<usize, usize>,
    /// Number of targets per edge count
    pub edges: BTreeMap<usize, usize>,
    /// Targets that still fail the acceptance checks (fallbacks after `maxAttempts`)
    pub rejected: usize,
}

/// Target `i` is generated from an RNG seeded with `seed + i`, so results don't depend on thread scheduling.
pub fn run(base: &[Circle], count: usize, seed: u64, config: &Config) -> Summary {
    let base_structure = config.target.distinct.then(|| Structure::new(base, config));
    let results: Vec<(usize, usize, bool)> = (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let circles = target::generate(base, &mut rng, config);
            let structure = Structure::new(&circles, config);
            let rejected = target::check(&circles, &structure, base_structure.as_ref(), config).is_some();
            (structure.graph.nodes.len(), structure.graph.edges.len(), rejected)
        })
        .collect();

    let mut summary = Summary { targets: count, ..Summary::default() };
    for (regions, edges, rejected) in results {
        *summary.regions.entry(regions).or_default() += 1;
        *summary.edges.entry(edges).or_default() += 1;
        if rejected {
            summary.rejected += 1;
        }
    }
    info!("Generated {} targets, {} rejected", summary.targets, summary.rejected);
    summary
}

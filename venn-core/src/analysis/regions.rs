use std::collections::BTreeSet;

use log::debug;

use crate::{
    analytic,
    circle::Circle,
    config::{ExtractConfig, Strategy},
    key::Key,
    region::Region,
    sampling,
};

/// Non-empty regions of `circles`, sorted by key.
///
/// Circles with a non-finite center or a non-positive radius are ignored, so degenerate input yields fewer
/// regions (possibly none) rather than an error.
pub fn extract(circles: &[Circle], config: &ExtractConfig) -> Vec<Region> {
    let valid: Vec<Circle> = circles.iter().filter(|c| c.is_valid()).copied().collect();
    if valid.len() < circles.len() {
        debug!("Ignoring {} degenerate circle(s)", circles.len() - valid.len());
    }
    match config.strategy {
        Strategy::Sampling => sampling::extract(&valid, config),
        Strategy::Analytic => analytic::extract(&valid),
    }
}

pub fn keys(regions: &[Region]) -> BTreeSet<Key> {
    regions.iter().map(|r| r.key).collect()
}

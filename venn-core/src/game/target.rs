//! Random target configurations.

use derive_more::Display;
use itertools::Itertools;
use log::{debug, warn};
use rand::Rng;

use crate::{
    circle::{Circle, Relation},
    config::{Config, TargetConfig},
    key::SetId,
    structure::Structure,
};

/// Why a candidate target was thrown away.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[display(fmt = "no adjacent regions")]
    NoEdges,
    #[display(fmt = "{} and {} are identical", _0, _1)]
    Identical(SetId, SetId),
    #[display(fmt = "{} and {} are nested", _0, _1)]
    Nested(SetId, SetId),
    #[display(fmt = "same structure as the starting layout")]
    SameAsBase,
}

/// Move each circle's center uniformly within `±jitter · r / 2`, and scale its radius by up to `1 ± radius_jitter`.
pub fn jitter<R: Rng + ?Sized>(base: &[Circle], rng: &mut R, config: &TargetConfig) -> Vec<Circle> {
    base.iter().map(|c| {
        let span = config.jitter * c.r;
        let dx = (rng.gen::<f64>() - 0.5) * span;
        let dy = (rng.gen::<f64>() - 0.5) * span;
        let scale = 1. + (rng.gen::<f64>() * 2. - 1.) * config.radius_jitter;
        let mut c = *c;
        c.c.x += dx;
        c.c.y += dy;
        c.r = (c.r * scale).max(config.min_radius);
        c
    }).collect()
}

/// First reason (if any) to reject `candidate`.
pub fn check(candidate: &[Circle], structure: &Structure, base: Option<&Structure>, config: &Config) -> Option<Rejection> {
    if structure.graph.edges.is_empty() {
        return Some(Rejection::NoEdges);
    }
    if config.target.strict {
        for (c0, c1) in candidate.iter().tuple_combinations() {
            match c0.relation(c1) {
                Relation::Identical => return Some(Rejection::Identical(c0.id, c1.id)),
                Relation::Contains | Relation::Within => return Some(Rejection::Nested(c0.id, c1.id)),
                _ => {},
            }
        }
    }
    if let Some(base) = base {
        if structure.matches(base, config.rule) {
            return Some(Rejection::SameAsBase);
        }
    }
    None
}

/// Random target derived from `base`.
///
/// Falls back to the last candidate (with a warning) if none of `max_attempts` passes [`check`].
pub fn generate<R: Rng + ?Sized>(base: &[Circle], rng: &mut R, config: &Config) -> Vec<Circle> {
    let base_structure = config.target.distinct.then(|| Structure::new(base, config));
    let attempts = config.target.max_attempts.max(1);
    let mut candidate = base.to_vec();
    for attempt in 1..=attempts {
        candidate = jitter(base, rng, &config.target);
        let structure = Structure::new(&candidate, config);
        match check(&candidate, &structure, base_structure.as_ref(), config) {
            None => {
                debug!("Accepted target after {} attempt(s): {}", attempt, structure.graph);
                return candidate;
            },
            Some(rejection) => debug!("Rejected target candidate {}: {}", attempt, rejection),
        }
    }
    warn!("No acceptable target after {} attempts, keeping the last candidate", attempts);
    candidate
}

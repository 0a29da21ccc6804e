//! Tunables for extraction, adjacency, matching and target generation.
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a valid config.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tsify::Tsify;

use crate::error::ParseError;

/// How regions are found.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    /// Classify a regular grid of points; centers are sample means.
    #[default]
    #[display(fmt = "sampling")]
    Sampling,
    /// Enumerate arrangement cells from circle-circle intersection points.
    #[display(fmt = "analytic")]
    Analytic,
}

/// Which pairs of regions are joined by an edge.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum AdjacencyPolicy {
    /// Labels differ by exactly one set.
    #[default]
    #[display(fmt = "lattice")]
    Lattice,
    /// Labels share a set, or differ by exactly one set.
    #[display(fmt = "overlap")]
    Overlap,
    /// Single-set regions: their circles touch. Otherwise: labels differ by exactly one set.
    #[display(fmt = "geometric")]
    Geometric,
}

/// What has to agree between the current and target structures.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[serde(rename_all = "camelCase")]
pub enum MatchRule {
    /// Same region labels and same adjacency edges.
    #[default]
    #[display(fmt = "edges")]
    Edges,
    /// Same region labels.
    #[display(fmt = "labels")]
    Labels,
}

fn parse_variant<T: Copy>(kind: &'static str, expected: &'static str, variants: &[(&str, T)], s: &str) -> Result<T, ParseError> {
    let lower = s.trim().to_ascii_lowercase();
    variants
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, v)| *v)
        .ok_or_else(|| ParseError::UnknownVariant { kind, value: s.to_string(), expected })
}

impl FromStr for Strategy {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("strategy", "sampling, analytic", &[
            ("sampling", Strategy::Sampling),
            ("analytic", Strategy::Analytic),
        ], s)
    }
}

impl FromStr for AdjacencyPolicy {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("adjacency policy", "lattice, overlap, geometric", &[
            ("lattice", AdjacencyPolicy::Lattice),
            ("overlap", AdjacencyPolicy::Overlap),
            ("geometric", AdjacencyPolicy::Geometric),
        ], s)
    }
}

impl FromStr for MatchRule {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("match rule", "edges, labels", &[
            ("edges", MatchRule::Edges),
            ("labels", MatchRule::Labels),
        ], s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractConfig {
    pub strategy: Strategy,
    /// Sampling grid spacing, in the circles' coordinate units (canvas pixels in the game).
    pub grid_step: f64,
    /// The step never exceeds the smallest radius divided by this, so small circles still get samples.
    pub steps_per_radius: f64,
    /// A region is present iff more than this many grid points land in it.
    pub noise_threshold: usize,
    /// Upper bound on grid points; the step is widened to stay under it.
    pub max_samples: usize,
    /// Report each region's sampled member points.
    pub keep_points: bool,
}

impl ExtractConfig {
    pub const DEFAULT_GRID_STEP: f64 = 5.;
    pub const DEFAULT_STEPS_PER_RADIUS: f64 = 10.;
    pub const DEFAULT_MAX_SAMPLES: usize = 1_000_000;
}

impl Default for ExtractConfig {
    fn default() -> Self {
        ExtractConfig {
            strategy: Strategy::default(),
            grid_step: Self::DEFAULT_GRID_STEP,
            steps_per_radius: Self::DEFAULT_STEPS_PER_RADIUS,
            noise_threshold: 0,
            max_samples: Self::DEFAULT_MAX_SAMPLES,
            keep_points: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetConfig {
    /// Each center moves uniformly within `±jitter / 2` on both axes, in multiples of that circle's radius.
    pub jitter: f64,
    /// Each radius is scaled by a factor in `1 ± radius_jitter`.
    pub radius_jitter: f64,
    /// Radii never shrink below this.
    pub min_radius: f64,
    pub max_attempts: usize,
    /// Reject candidates with identical or nested circles.
    pub strict: bool,
    /// Reject candidates whose structure already equals the base layout's.
    pub distinct: bool,
}

impl TargetConfig {
    pub const DEFAULT_JITTER: f64 = 2.;
    pub const DEFAULT_RADIUS_JITTER: f64 = 0.25;
    pub const DEFAULT_MIN_RADIUS: f64 = 10.;
    pub const DEFAULT_MAX_ATTEMPTS: usize = 64;
}

impl Default for TargetConfig {
    fn default() -> Self {
        TargetConfig {
            jitter: Self::DEFAULT_JITTER,
            radius_jitter: Self::DEFAULT_RADIUS_JITTER,
            min_radius: Self::DEFAULT_MIN_RADIUS,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            strict: true,
            distinct: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub extract: ExtractConfig,
    pub adjacency: AdjacencyPolicy,
    /// Slack added to `r1 + r2` when the geometric policy decides whether two circles touch.
    pub touch_epsilon: f64,
    pub rule: MatchRule,
    pub target: TargetConfig,
}

impl Config {
    pub fn from_json(s: &str) -> Result<Config, serde_json::Error> {
        serde_json::from_str(s)
    }
}

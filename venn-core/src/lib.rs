#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

pub mod analysis;
pub mod game;
pub mod geometry;

pub use geometry::circle;
pub use geometry::layout;
pub use geometry::r2;

pub use analysis::analytic;
pub use analysis::contains;
pub use analysis::graph;
pub use analysis::key;
pub use analysis::matching;
pub use analysis::region;
pub use analysis::regions;
pub use analysis::sampling;
pub use analysis::structure;

pub use game::session;
pub use game::target;

pub mod config;
pub mod error;
pub mod fmt;

pub use circle::Circle;
pub use config::{AdjacencyPolicy, Config, ExtractConfig, MatchRule, Strategy, TargetConfig};
pub use graph::{AdjacencyGraph, Edge};
pub use key::{Key, SetId};
pub use layout::Layout;
pub use matching::Comparison;
pub use r2::R2;
pub use region::Region;
pub use session::{Canvas, Phase, Session, Snapshot};
pub use structure::Structure;

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> Result<log::LevelFilter, error::ParseError> {
    match level {
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some("off") => Ok(log::LevelFilter::Off),
        Some(level) => Err(error::ParseError::UnknownVariant {
            kind: "log level",
            value: level.to_string(),
            expected: "off, error, warn, info, debug, trace",
        }),
    }
}

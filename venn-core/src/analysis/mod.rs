pub mod analytic;
pub mod contains;
pub mod graph;
pub mod key;
pub mod matching;
pub mod region;
pub mod regions;
pub mod sampling;
pub mod structure;

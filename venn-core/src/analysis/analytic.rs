//! Exact region extraction from the circle arrangement.
//!
//! Every bounded cell of an arrangement of circles is bordered by arcs. An arc either runs between two
//! intersection points, or is a whole circle whose perimeter crosses no other. So probing just off each
//! intersection point (once per angular sector) and just inside/outside each uncrossed circle visits
//! every cell. Each probe is itself a witness point, so no cell is reported that doesn't exist.

use std::{collections::BTreeMap, f64::consts::FRAC_PI_2};

use itertools::Itertools;
use log::debug;

use crate::{
    circle::Circle,
    contains::{in_region, membership},
    key::Key,
    r2::R2,
    region::Region,
};

/// Probe offset, relative to the largest radius.
pub const PROBE_RATIO: f64 = 1e-6;

/// Inward pushes tried (relative to the largest radius) when looking for a well-placed center.
const PUSH_RATIOS: [f64; 5] = [ 0.25, 0.1, 0.03, 0.01, 0.001 ];

#[derive(Debug, Clone, Default)]
struct Cell {
    /// Intersection points on this cell's boundary.
    vertices: Vec<R2<f64>>,
    /// Boundary points with a direction pointing into the cell.
    probes: Vec<(R2<f64>, R2<f64>)>,
}

impl Cell {
    fn add_vertex(&mut self, p: R2<f64>, tolerance: f64) {
        if !self.vertices.iter().any(|v| v.distance(&p) <= tolerance) {
            self.vertices.push(p);
        }
    }
}

pub fn extract(circles: &[Circle]) -> Vec<Region> {
    let Some(scale) = circles.iter().map(|c| c.r).reduce(f64::max) else {
        return vec![];
    };
    let delta = scale * PROBE_RATIO;
    let mut cells: BTreeMap<Key, Cell> = BTreeMap::new();
    let record = |base: R2<f64>, dir: R2<f64>, vertex: bool, cells: &mut BTreeMap<Key, Cell>| {
        let probe = base + dir * delta;
        if let Some(key) = Key::from_bits(membership(circles, &probe)) {
            let cell = cells.entry(key).or_default();
            if vertex {
                cell.add_vertex(base, delta);
            }
            cell.probes.push((base, dir));
        }
    };

    let mut crossed = vec![false; circles.len()];
    for ((i, ci), (j, cj)) in circles.iter().enumerate().tuple_combinations() {
        let points = ci.intersections(cj);
        if points.len() == 2 {
            crossed[i] = true;
            crossed[j] = true;
        }
        for p in points {
            let (Some(ni), Some(nj)) = (ci.normal(&p), cj.normal(&p)) else {
                continue;
            };
            // Bisectors of the four sectors between the two perimeters
            for (si, sj) in [ (1., 1.), (1., -1.), (-1., 1.), (-1., -1.) ] {
                if let Some(dir) = (ni * si + nj * sj).unit() {
                    record(p, dir, true, &mut cells);
                }
            }
        }
    }

    for (c, _) in circles.iter().zip(&crossed).filter(|(_, crossed)| !**crossed) {
        // Several angles, in case one lands on a tangency
        for k in 0..4 {
            let theta = k as f64 * FRAC_PI_2;
            let base = c.point(theta);
            let outward = R2 { x: theta.cos(), y: theta.sin() };
            record(base, -outward, false, &mut cells);
            record(base, outward, false, &mut cells);
        }
    }

    let regions: Vec<Region> = cells
        .into_iter()
        .map(|(key, cell)| Region::new(key, center(circles, key, &cell, scale, delta)))
        .collect();
    debug!(
        "Analytic extraction over {} circles: {}",
        circles.len(),
        regions.iter().map(|r| r.key.to_string()).join(" "),
    );
    regions
}

/// First candidate that lies in the cell: vertex centroid, mean of member centers, then probes pushed inward.
fn center(circles: &[Circle], key: Key, cell: &Cell, scale: f64, delta: f64) -> R2<f64> {
    let member_centers: Vec<R2<f64>> = circles.iter().filter(|c| key.contains(c.id)).map(|c| c.c).collect();
    let pushed = PUSH_RATIOS.iter().flat_map(|ratio| {
        cell.probes.iter().map(move |(base, dir)| *base + *dir * (scale * ratio))
    });
    let candidates = R2::mean(&cell.vertices)
        .into_iter()
        .chain(R2::mean(&member_centers))
        .chain(pushed);
    for candidate in candidates {
        if in_region(circles, key, &candidate) {
            return candidate;
        }
    }
    // The witness probe itself always qualifies
    cell.probes
        .first()
        .map(|(base, dir)| *base + *dir * delta)
        .or_else(|| R2::mean(&member_centers))
        .unwrap_or_default()
}

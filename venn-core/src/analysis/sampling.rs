//! Grid-sampling region extraction.
//!
//! Grid points sit at integer multiples of the step, so the same circles always produce the same
//! samples no matter how the bounding box shifts.

use log::{debug, warn};

use crate::{
    circle::Circle,
    config::ExtractConfig,
    contains::membership,
    key::{Key, MAX_SETS},
    r2::R2,
    region::Region,
};

const SIGNATURES: usize = 1 << MAX_SETS;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub step: f64,
    ix0: i64,
    iy0: i64,
    pub nx: usize,
    pub ny: usize,
}

impl Grid {
    /// Grid over the bounding box of `circles`; `None` if there's nothing to sample.
    pub fn new(circles: &[Circle], config: &ExtractConfig) -> Option<Grid> {
        let mut step = config.grid_step;
        if !(step.is_finite() && step > 0.) {
            warn!("Invalid grid step {}, skipping extraction", step);
            return None;
        }
        if let Some(r) = circles.iter().map(|c| c.r).reduce(f64::min) {
            let cap = r / config.steps_per_radius.max(1.);
            if cap > 0. && cap < step {
                debug!("Grid step {} narrowed to {} for radius {}", step, cap, r);
                step = cap;
            }
        }
        let (min, max) = circles.iter().map(|c| c.bounds()).reduce(|(min0, max0), (min1, max1)| {
            (
                R2 { x: min0.x.min(min1.x), y: min0.y.min(min1.y) },
                R2 { x: max0.x.max(max1.x), y: max0.y.max(max1.y) },
            )
        })?;
        let size = max - min;
        if !(size.is_finite() && size.x > 0. && size.y > 0.) {
            return None;
        }
        let span = |lo: f64, hi: f64, step: f64| ((hi / step).floor() - (lo / step).ceil() + 1.).max(0.);
        let count = |step: f64| span(min.x, max.x, step) * span(min.y, max.y, step);
        let limit = config.max_samples.max(1) as f64;
        if count(step) > limit {
            let requested = step;
            while count(step) > limit {
                step *= (count(step) / limit).sqrt().max(1.01);
            }
            warn!("Grid step {} would exceed {} samples, widened to {:.3}", requested, config.max_samples, step);
        }
        Some(Grid {
            step,
            ix0: (min.x / step).ceil() as i64,
            iy0: (min.y / step).ceil() as i64,
            nx: span(min.x, max.x, step) as usize,
            ny: span(min.y, max.y, step) as usize,
        })
    }

    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub fn points(&self) -> impl Iterator<Item = R2<f64>> + '_ {
        (0..self.nx).flat_map(move |i| {
            let x = (self.ix0 + i as i64) as f64 * self.step;
            (0..self.ny).map(move |j| R2 { x, y: (self.iy0 + j as i64) as f64 * self.step })
        })
    }
}

#[derive(Debug, Clone, Default)]
struct Tally {
    count: usize,
    sum: R2<f64>,
    points: Vec<R2<f64>>,
}

pub fn extract(circles: &[Circle], config: &ExtractConfig) -> Vec<Region> {
    let Some(grid) = Grid::new(circles, config) else {
        return vec![];
    };
    let mut tallies: [Tally; SIGNATURES] = Default::default();
    for p in grid.points() {
        let bits = membership(circles, &p) as usize;
        if bits == 0 {
            continue;
        }
        let tally = &mut tallies[bits];
        tally.count += 1;
        tally.sum = tally.sum + p;
        if config.keep_points {
            tally.points.push(p);
        }
    }

    let present: Vec<(Key, R2<f64>)> = tallies
        .iter()
        .enumerate()
        .filter(|(_, tally)| tally.count > config.noise_threshold)
        .filter_map(|(bits, tally)| Key::from_bits(bits as u8).map(|key| (key, tally.sum / tally.count as f64)))
        .collect();

    // Means of non-convex regions (e.g. crescents) can fall outside them; snap those to the nearest member sample.
    let mut nearest: [Option<(f64, R2<f64>)>; SIGNATURES] = [None; SIGNATURES];
    let mut means: [Option<R2<f64>>; SIGNATURES] = [None; SIGNATURES];
    for (key, mean) in &present {
        if membership(circles, mean) != key.bits() {
            means[key.bits() as usize] = Some(*mean);
        }
    }
    if means.iter().any(Option::is_some) {
        for p in grid.points() {
            let bits = membership(circles, &p) as usize;
            if let Some(mean) = means[bits] {
                let d2 = (p - mean).norm2();
                if nearest[bits].map_or(true, |(best, _)| d2 < best) {
                    nearest[bits] = Some((d2, p));
                }
            }
        }
    }

    let area_per_sample = grid.step * grid.step;
    let mut regions: Vec<Region> = present
        .into_iter()
        .map(|(key, mean)| {
            let bits = key.bits() as usize;
            let center = nearest[bits].map_or(mean, |(_, p)| p);
            let tally = &mut tallies[bits];
            Region {
                key,
                center,
                area: Some(tally.count as f64 * area_per_sample),
                samples: tally.count,
                points: std::mem::take(&mut tally.points),
            }
        })
        .collect();
    regions.sort_by_key(|r| r.key);
    debug!(
        "Sampled {} grid points (step {}): {}",
        grid.len(),
        grid.step,
        regions.iter().map(|r| format!("{}:{}", r.key, r.samples)).collect::<Vec<_>>().join(" "),
    );
    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{circle::circle, contains::in_region, key::SetId};
    use test_log::test;

    fn keys(regions: &[Region]) -> Vec<String> {
        regions.iter().map(|r| r.key.to_string()).collect()
    }

    #[test]
    fn grid_alignment() {
        let circles = [ circle(SetId::A, 52., 52., 50.) ];
        let grid = Grid::new(&circles, &ExtractConfig::default()).unwrap();
        // [2, 102] → 5, 10, …, 100
        assert_eq!((grid.nx, grid.ny), (20, 20));
        let points: Vec<R2<f64>> = grid.points().collect();
        assert_eq!(points[0], R2::new(5., 5.));
        assert_eq!(points[points.len() - 1], R2::new(100., 100.));
    }

    #[test]
    fn step_follows_smallest_radius() {
        let circles = [
            circle(SetId::A, 0., 0., 1.),
            circle(SetId::B, 1.5, 0., 1.),
        ];
        let grid = Grid::new(&circles, &ExtractConfig::default()).unwrap();
        assert_relative_eq!(grid.step, 1. / ExtractConfig::DEFAULT_STEPS_PER_RADIUS);
        let regions = extract(&circles, &ExtractConfig::default());
        assert_eq!(keys(&regions), vec![ "A", "B", "AB" ]);
        for region in &regions {
            assert!(in_region(&circles, region.key, &region.center), "{}", region);
        }

        // A small circle next to large ones still gets sampled
        let circles = [
            circle(SetId::A, 0., 0., 20.),
            circle(SetId::B, 20., 0., 1.),
        ];
        assert_eq!(keys(&extract(&circles, &ExtractConfig::default())), vec![ "A", "B", "AB" ]);
    }

    #[test]
    fn grid_widens_past_limit() {
        let circles = [ circle(SetId::A, 0., 0., 1000.) ];
        let config = ExtractConfig { grid_step: 1., max_samples: 10_000, ..ExtractConfig::default() };
        let grid = Grid::new(&circles, &config).unwrap();
        assert!(grid.len() <= 10_000);
        assert!(grid.step > 1.);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(extract(&[], &ExtractConfig::default()).is_empty());
        let circles = [ circle(SetId::A, 0., 0., 10.) ];
        for grid_step in [ 0., -1., f64::NAN, f64::INFINITY ] {
            let config = ExtractConfig { grid_step, ..ExtractConfig::default() };
            assert!(extract(&circles, &config).is_empty());
        }
    }

    #[test]
    fn two_overlapping() {
        let circles = [
            circle(SetId::A, 100., 100., 50.),
            circle(SetId::B, 160., 100., 50.),
        ];
        let regions = extract(&circles, &ExtractConfig::default());
        assert_eq!(keys(&regions), vec![ "A", "B", "AB" ]);
        for region in &regions {
            assert!(in_region(&circles, region.key, &region.center), "{}", region);
            assert!(region.samples > 0);
        }
        // AB lens is symmetric about x = 130, y = 100
        let ab = &regions[2];
        assert_relative_eq!(ab.center, R2::new(130., 100.), epsilon = 1e-9);
        let total: f64 = regions.iter().filter_map(|r| r.area).sum();
        let union = 2. * circles[0].area() - lens_area(50., 60.);
        assert_relative_eq!(total, union, max_relative = 0.05);
    }

    fn lens_area(r: f64, d: f64) -> f64 {
        2. * r * r * (d / (2. * r)).acos() - d / 2. * (4. * r * r - d * d).sqrt()
    }

    #[test]
    fn noise_threshold_drops_slivers() {
        let circles = [
            circle(SetId::A, 0., 0., 50.),
            circle(SetId::B, 99., 0., 50.),
        ];
        let regions = extract(&circles, &ExtractConfig { grid_step: 1., ..ExtractConfig::default() });
        assert_eq!(keys(&regions), vec![ "A", "B", "AB" ]);
        let ab = regions[2].samples;
        let regions = extract(&circles, &ExtractConfig { grid_step: 1., noise_threshold: ab, ..ExtractConfig::default() });
        assert_eq!(keys(&regions), vec![ "A", "B" ]);
    }

    #[test]
    fn crescent_centers_snap_inside() {
        // B nearly covers A, leaving a thin crescent of A-only whose mean lies inside B
        let circles = [
            circle(SetId::A, 0., 0., 50.),
            circle(SetId::B, 10., 0., 50.),
        ];
        let config = ExtractConfig { grid_step: 1., keep_points: true, ..ExtractConfig::default() };
        let regions = extract(&circles, &config);
        assert_eq!(keys(&regions), vec![ "A", "B", "AB" ]);
        for region in &regions {
            assert!(in_region(&circles, region.key, &region.center), "{}", region);
            assert_eq!(region.points.len(), region.samples);
        }
    }
}

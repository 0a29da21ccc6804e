use std::collections::BTreeSet;

use test_log::test;
use venn_core::{
    circle::{circle, Circle},
    config::{AdjacencyPolicy, Config, ExtractConfig, MatchRule, Strategy},
    contains::in_region,
    key::{Key, SetId},
    layout::Layout,
    matching,
    r2::R2,
    regions,
    structure::Structure,
};

fn keys(names: &[&str]) -> BTreeSet<Key> {
    names.iter().map(|name| name.parse().unwrap()).collect()
}

fn configs() -> Vec<Config> {
    [ Strategy::Sampling, Strategy::Analytic ].into_iter().map(|strategy| Config {
        extract: ExtractConfig { strategy, ..ExtractConfig::default() },
        ..Config::default()
    }).collect()
}

fn scenario() -> Vec<Circle> {
    vec![
        circle(SetId::A, 100., 100., 50.),
        circle(SetId::B, 140., 100., 50.),
        circle(SetId::C, 120., 135., 50.),
    ]
}

fn apart() -> Vec<Circle> {
    vec![
        circle(SetId::A, 0., 0., 30.),
        circle(SetId::B, 200., 0., 30.),
    ]
}

#[test]
fn classic_triangle() {
    let layout = Layout::symmetric(3, R2::new(200., 200.), 100.).unwrap();
    for config in configs() {
        let structure = Structure::new(&layout, &config);
        assert_eq!(structure.graph.nodes, keys(&[ "A", "B", "C", "AB", "AC", "BC", "ABC" ]));
        assert_eq!(structure.graph.edges.len(), 9);
        for region in &structure.regions {
            assert!(in_region(&layout, region.key, &region.center), "{} center {} outside its region", region.key, region.center);
        }
        let overlap = Config { adjacency: AdjacencyPolicy::Overlap, ..config };
        assert_eq!(Structure::new(&layout, &overlap).graph.edges.len(), 15);
    }
}

#[test]
fn pairwise_overlapping_scenario() {
    let target = Structure::new(&Layout::symmetric(3, R2::new(0., 0.), 100.).unwrap(), &Config::default());
    for config in configs() {
        let structure = Structure::new(&scenario(), &config);
        assert_eq!(structure.regions.len(), 7);
        assert_eq!(regions::keys(&structure.regions), keys(&[ "A", "B", "C", "AB", "AC", "BC", "ABC" ]));
        let diff = structure.compare(&target);
        assert!(diff.missing_regions.is_empty());
        assert!(structure.matches(&target, config.rule));
    }
}

#[test]
fn containment() {
    let circles = [
        circle(SetId::A, 10., 0., 20.),
        circle(SetId::B, 0., 0., 50.),
    ];
    for config in configs() {
        let found = regions::keys(&regions::extract(&circles, &config.extract));
        assert_eq!(found, keys(&[ "B", "AB" ]));
    }
}

#[test]
fn no_overlap() {
    for config in configs() {
        let structure = Structure::new(&apart(), &config);
        assert_eq!(structure.graph.nodes, keys(&[ "A", "B" ]));
        assert!(structure.graph.edges.is_empty());
        let geometric = Config { adjacency: AdjacencyPolicy::Geometric, ..config.clone() };
        assert!(Structure::new(&apart(), &geometric).graph.edges.is_empty());

        let target = Structure::new(&[ circle(SetId::A, 0., 0., 30.), circle(SetId::B, 40., 0., 30.) ], &config);
        assert_eq!(target.graph.nodes, keys(&[ "A", "B", "AB" ]));
        for rule in [ MatchRule::Edges, MatchRule::Labels ] {
            assert!(!structure.matches(&target, rule));
        }
        assert!(!matching::regions_match(&structure.regions, &target.regions));
    }
}

#[test]
fn matching_is_reflexive_and_symmetric() {
    let layouts: Vec<Vec<Circle>> = vec![
        scenario(),
        apart(),
        Layout::symmetric(4, R2::new(0., 0.), 100.).unwrap().into(),
    ];
    let config = Config::default();
    let structures: Vec<Structure> = layouts.iter().map(|circles| Structure::new(circles, &config)).collect();
    for x in &structures {
        assert!(x.matches(x, MatchRule::Edges));
        for y in &structures {
            for rule in [ MatchRule::Edges, MatchRule::Labels ] {
                assert_eq!(x.matches(y, rule), y.matches(x, rule));
            }
        }
    }
}

#[test]
fn region_count_bounds() {
    let layouts: Vec<Vec<Circle>> = vec![
        scenario(),
        apart(),
        Layout::symmetric(2, R2::new(0., 0.), 50.).unwrap().into(),
        Layout::symmetric(4, R2::new(0., 0.), 100.).unwrap().into(),
    ];
    for circles in &layouts {
        let universe = circles.iter().fold(0u8, |bits, c| bits | c.id.bit());
        let max = (1usize << circles.len()) - 1;
        for config in configs() {
            let found = regions::extract(circles, &config.extract);
            assert!(!found.is_empty() && found.len() <= max);
            let labels = regions::keys(&found);
            assert_eq!(labels.len(), found.len());
            assert!(labels.iter().all(|key| key.bits() & !universe == 0));
            // Idempotent
            assert_eq!(regions::keys(&regions::extract(circles, &config.extract)), labels);
        }
    }
}

//! Integration tests for the regional economy

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexmarch::catalog::Catalog;
use hexmarch::core::config::WorldConfig;
use hexmarch::core::types::{Direction, LevelKind, MarketSide, RegionId};
use hexmarch::economy::{decay, market, town, wages};
use hexmarch::turn::events::TurnLog;
use hexmarch::world::graph::RegionGraph;
use hexmarch::world::region::StructureKind;
use hexmarch::world::topology::build_rectangular_level;

fn plains_map(width: i32, height: i32) -> (RegionGraph, Catalog) {
    let catalog = Catalog::standard();
    let plain = catalog.terrains.find_abbr("PLAI").unwrap();
    let mut graph = RegionGraph::new();
    build_rectangular_level(&mut graph, "surface", LevelKind::Surface, width, height, plain);
    (graph, catalog)
}

proptest! {
    // Wages never go down when development alone goes up.
    #[test]
    fn prop_wages_monotonic_in_development(a in 0i32..2000, b in 0i32..2000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(wages::wages_from_dev(lo) <= wages::wages_from_dev(hi));
    }

    // A recompute never leaves the amount outside [minamt, maxamt],
    // whatever the population, zero and absurd values included.
    #[test]
    fn prop_market_amount_stays_bounded(population in 0i32..5_000_000) {
        let catalog = Catalog::standard();
        let mut market = hexmarch::world::region::Market {
            item: catalog.items.find_abbr("GRAI").unwrap(),
            side: MarketSide::Sell,
            price: 40,
            baseprice: 40,
            amount: 5,
            minpop: 400,
            maxpop: 3200,
            minamt: 5,
            maxamt: 60,
        };
        market.recompute(population);
        prop_assert!(market.amount >= market.minamt);
        prop_assert!(market.amount <= market.maxamt);
    }
}

// The wage staircase: each level L costs L more development than the
// last, so thresholds sit at the triangular numbers and the figure at
// a threshold is an exact multiple of ten.
#[test]
fn test_wage_staircase_thresholds() {
    let mut threshold = 0;
    for level in 1..=10 {
        threshold += level;
        assert_eq!(
            wages::wages_from_dev(threshold),
            level * 10,
            "development {} should pay exactly level {}",
            threshold,
            level
        );
        assert!(wages::wages_from_dev(threshold - 1) < level * 10);
    }
    // between thresholds the figure interpolates: dev 4 is one point
    // past level 2 on the way to level 3
    assert_eq!(wages::wages_from_dev(4), 23);
}

#[test]
fn test_road_bonus_feeds_wages() {
    let (mut graph, _) = plains_map(16, 16);
    let config = WorldConfig::default();
    let id = RegionId(40);
    graph.get_mut(id).unwrap().development = 30;
    graph.get_mut(id).unwrap().population = 500;
    wages::recompute_wages(&mut graph, id, &config);
    let bare = graph.get(id).unwrap().wages;

    // a working road toward a developed neighbor raises the input
    let neighbor = graph.neighbor(id, Direction::Southeast).unwrap();
    graph.get_mut(neighbor).unwrap().development = 90;
    graph
        .get_mut(id)
        .unwrap()
        .add_structure(StructureKind::Road(Direction::Southeast), "Road".into());
    wages::recompute_wages(&mut graph, id, &config);
    assert!(graph.get(id).unwrap().wages > bare);
}

#[test]
fn test_maxwages_is_a_high_water_mark() {
    let (mut graph, _) = plains_map(8, 8);
    let config = WorldConfig::default();
    let id = RegionId(0);
    graph.get_mut(id).unwrap().development = 100;
    wages::recompute_wages(&mut graph, id, &config);
    let peak = graph.get(id).unwrap().maxwages;
    graph.get_mut(id).unwrap().development = 10;
    wages::recompute_wages(&mut graph, id, &config);
    let region = graph.get(id).unwrap();
    assert!(region.wages < peak);
    assert_eq!(region.maxwages, peak);
}

#[test]
fn test_town_markets_respect_quotas() {
    let (mut graph, catalog) = plains_map(16, 16);
    let config = WorldConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for id in graph.ids().collect::<Vec<_>>() {
        let race = catalog.races.find_abbr("PLAI");
        let region = graph.get_mut(id).unwrap();
        region.race = race;
        region.population = 4000;
        region.habitat = 6000;
        region.development = 60;
    }
    let id = RegionId(0);
    market::setup_markets(&mut graph, id, &catalog, &config, &mut rng);
    let region = graph.get(id).unwrap();
    let sells = region.markets.iter().filter(|m| m.side == MarketSide::Sell).count();
    let buys = region.markets.iter().filter(|m| m.side == MarketSide::Buy).count();
    assert!(sells <= config.max_sell_markets as usize);
    assert!(buys <= config.max_buy_markets as usize);
    for m in &region.markets {
        assert!(m.minamt <= m.amount && m.amount <= m.maxamt);
        assert!(m.price > 0);
    }
}

#[test]
fn test_shrines_never_decay() {
    let (mut graph, catalog) = plains_map(8, 8);
    let mut config = WorldConfig::default();
    config.decay_base = 10;
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut log = TurnLog::new();
    let id = RegionId(0);
    graph
        .get_mut(id)
        .unwrap()
        .add_structure(StructureKind::Shrine, "Quiet Shrine".into());
    for turn in 1..=200 {
        decay::decay_structures(&mut graph, id, &catalog, &config, &mut rng, turn, &mut log);
    }
    let region = graph.get(id).unwrap();
    assert_eq!(region.structures[0].incomplete, 0);
}

#[test]
fn test_pillage_then_recovery() {
    let (mut graph, _) = plains_map(8, 8);
    let config = WorldConfig::default();
    let mut log = TurnLog::new();
    let id = RegionId(0);
    {
        let region = graph.get_mut(id).unwrap();
        region.development = 60;
        region.wealth = 900;
        region.population = 800;
    }
    town::pillage(&mut graph, id, 1, &mut log);
    let region = graph.get(id).unwrap();
    assert_eq!(region.wealth, 0);
    assert_eq!(region.development, 40);
    assert!(region.is_pillaged());

    // recovery climbs back toward the old figure and stops as soon as
    // wages cover upkeep again, which can land short of it
    for _ in 0..60 {
        town::recover_development(&mut graph, id, &config);
        wages::recompute_wages(&mut graph, id, &config);
    }
    let region = graph.get(id).unwrap();
    assert!(!region.is_pillaged());
    assert!(region.development > 40 && region.development <= 60);
    assert!(region.wages >= config.maintenance_cost * 10);
}

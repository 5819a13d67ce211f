//! Town lifecycle: seeding, growth toward the activity target,
//! dissolution, pillage

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::Catalog;
use crate::core::config::WorldConfig;
use crate::core::types::{Direction, RegionId, Turn};
use crate::turn::events::{RegionEvent, TurnLog};
use crate::world::graph::RegionGraph;
use crate::world::names;
use crate::world::region::Town;

/// Try to spontaneously seed a town. The chance is weighted by terrain
/// economy score and distance from the pole rows, and a region next to
/// an existing town never seeds one.
pub fn try_seed_town(
    graph: &mut RegionGraph,
    id: RegionId,
    catalog: &Catalog,
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) -> bool {
    let Some(region) = graph.get(id) else {
        return false;
    };
    if region.town.is_some() || region.race.is_none() {
        return false;
    }
    let terrain = catalog.terrains.get(region.terrain);
    if terrain.kind.is_water() || terrain.economy <= 0 {
        return false;
    }
    for dir in Direction::ALL {
        if let Some(neighbor) = region.neighbor(dir) {
            if graph.get(neighbor).is_some_and(|r| r.town.is_some()) {
                return false;
            }
        }
    }

    let height = graph
        .level(region.level)
        .map(|array| array.height)
        .unwrap_or(0);
    let pole_distance = region.y.min(height - 1 - region.y).max(0);
    // full weight from a third of the way toward the equator
    let pole_factor = (pole_distance * 3 * 100 / height.max(1)).min(100);
    let chance = config.town_probability * terrain.economy as u32 / 30 * pole_factor as u32 / 100;
    if rng.gen_range(0..100) >= chance {
        return false;
    }

    let population = config.village_pop / 2 + rng.gen_range(0..config.village_pop / 2);
    let town = Town {
        name: names::town_name(rng),
        population,
        habitat: population * 3 / 2,
        activity: 0,
    };
    if let Some(region) = graph.get_mut(id) {
        region.town = Some(town);
        true
    } else {
        false
    }
}

/// Target population a town converges toward, from accumulated trade
/// activity versus the tier thresholds.
pub fn town_target(town: &Town, config: &WorldConfig) -> i32 {
    if town.activity >= config.city_activity {
        config.city_pop
    } else if town.activity >= config.town_activity {
        config.town_pop
    } else if town.activity >= config.village_activity {
        config.village_pop
    } else {
        config.village_pop / 2
    }
}

/// One turn of gradual convergence: population closes a config fraction
/// of the gap to the activity target, then habitat trails population.
/// Emits an event when the tier steps up.
pub fn town_growth(
    graph: &mut RegionGraph,
    id: RegionId,
    config: &WorldConfig,
    turn: Turn,
    log: &mut TurnLog,
) {
    // a town drained below a quarter of the village figure folds up
    // instead of growing
    let collapsed = graph
        .get(id)
        .and_then(|r| r.town.as_ref())
        .is_some_and(|t| t.population < config.village_pop / 4);
    if collapsed {
        dissolve_town(graph, id, turn, log);
        return;
    }
    let Some(region) = graph.get_mut(id) else { return };
    let development = region.development;
    let Some(town) = region.town.as_mut() else {
        return;
    };
    let before = town.tier(development);
    let target = town_target(town, config);
    let gap = target - town.population;
    town.population += gap * config.town_growth_rate / 100;
    town.population = town.population.max(0);
    adjust_pop(town);
    let after = town.tier(development);
    if after > before {
        log.add_event(
            RegionEvent::TownAdvanced {
                region: id,
                name: town.name.clone(),
                tier: after,
            },
            turn,
        );
    }
}

/// Remove a town outright. All of its markets are discarded, and the
/// remaining townsfolk spill into the countryside so no population is
/// lost. Returns false when there was no town to remove.
pub fn dissolve_town(
    graph: &mut RegionGraph,
    id: RegionId,
    turn: Turn,
    log: &mut TurnLog,
) -> bool {
    let Some(region) = graph.get_mut(id) else {
        return false;
    };
    let Some(town) = region.town.take() else {
        return false;
    };
    region.population += town.population.max(0);
    region.markets.clear();
    log.add_event(
        RegionEvent::TownDissolved {
            region: id,
            name: town.name,
        },
        turn,
    );
    true
}

/// Habitat trails population instead of jumping with it
fn adjust_pop(town: &mut Town) {
    let wanted = town.population * 3 / 2;
    town.habitat += (wanted - town.habitat) / 4;
    town.habitat = town.habitat.max(town.population);
}

/// Pillage: wealth is lost outright, development drops by a third, and
/// the old development level becomes a recovery floor the region grows
/// back toward until wages can pay upkeep again.
pub fn pillage(graph: &mut RegionGraph, id: RegionId, turn: Turn, log: &mut TurnLog) {
    let Some(region) = graph.get_mut(id) else { return };
    region.wealth = 0;
    let before = region.development;
    region.development -= region.development / 3;
    region.pillage_floor = before;
    log.add_event(RegionEvent::Pillaged { region: id }, turn);
}

/// One turn of post-pillage recovery; clears the floor once wages beat
/// upkeep again.
pub fn recover_development(graph: &mut RegionGraph, id: RegionId, config: &WorldConfig) {
    let Some(region) = graph.get_mut(id) else { return };
    if region.pillage_floor == 0 {
        return;
    }
    if region.development < region.pillage_floor {
        region.development += 1 + region.development / 20;
        region.development = region.development.min(region.pillage_floor);
    }
    // viable again once a month's wages cover a month's upkeep
    if region.wages >= config.maintenance_cost * 10 {
        region.pillage_floor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{LevelKind, RegionId};
    use crate::economy::wages::recompute_wages;
    use crate::world::region::Region;

    fn town_region() -> (RegionGraph, RegionId) {
        let catalog = Catalog::standard();
        let plain = catalog.terrains.find_abbr("PLAI").unwrap();
        let mut graph = RegionGraph::new();
        let level = graph.add_level("surface".into(), LevelKind::Surface, 8, 8);
        let id = graph.add_region(Region::new(RegionId(0), 2, 2, level, plain));
        let region = graph.get_mut(id).unwrap();
        region.race = catalog.races.find_abbr("PLAI");
        region.population = 2000;
        region.habitat = 4000;
        region.development = 40;
        region.town = Some(Town {
            name: "Oldmill".into(),
            population: 400,
            habitat: 600,
            activity: 0,
        });
        (graph, id)
    }

    #[test]
    fn test_target_follows_activity() {
        let config = WorldConfig::default();
        let mut town = Town {
            name: "Oldmill".into(),
            population: 400,
            habitat: 600,
            activity: 0,
        };
        assert_eq!(town_target(&town, &config), config.village_pop / 2);
        town.activity = config.village_activity;
        assert_eq!(town_target(&town, &config), config.village_pop);
        town.activity = config.city_activity;
        assert_eq!(town_target(&town, &config), config.city_pop);
    }

    #[test]
    fn test_growth_converges_not_jumps() {
        let config = WorldConfig::default();
        let (mut graph, id) = town_region();
        let mut log = TurnLog::new();
        graph.get_mut(id).unwrap().town.as_mut().unwrap().activity = config.city_activity;
        town_growth(&mut graph, id, &config, 1, &mut log);
        let town = graph.get(id).unwrap().town.as_ref().unwrap();
        assert!(town.population > 400);
        assert!(
            town.population < config.city_pop,
            "growth must be gradual, got {}",
            town.population
        );
        assert!(town.habitat >= town.population);
    }

    #[test]
    fn test_pillage_and_recovery() {
        let config = WorldConfig::default();
        let (mut graph, id) = town_region();
        let mut log = TurnLog::new();
        pillage(&mut graph, id, 1, &mut log);
        {
            let region = graph.get(id).unwrap();
            assert_eq!(region.wealth, 0);
            assert_eq!(region.development, 27); // 40 - 40/3
            assert_eq!(region.pillage_floor, 40);
        }
        // recovery climbs back toward the floor and clears once wages
        // beat upkeep
        for _ in 0..40 {
            recover_development(&mut graph, id, &config);
            recompute_wages(&mut graph, id, &config);
            if graph.get(id).unwrap().pillage_floor == 0 {
                break;
            }
        }
        let region = graph.get(id).unwrap();
        assert_eq!(region.pillage_floor, 0, "region should recover");
        assert!(region.development <= 40);
    }

    #[test]
    fn test_collapsed_town_dissolves_and_discards_markets() {
        use crate::core::types::MarketSide;
        use crate::world::region::Market;
        let catalog = Catalog::standard();
        let config = WorldConfig::default();
        let (mut graph, id) = town_region();
        let mut log = TurnLog::new();
        graph.get_mut(id).unwrap().markets.push(Market {
            item: catalog.items.find_abbr("GRAI").unwrap(),
            side: MarketSide::Sell,
            price: 15,
            baseprice: 15,
            amount: 20,
            minpop: 200,
            maxpop: 1000,
            minamt: 10,
            maxamt: 50,
        });
        graph.get_mut(id).unwrap().town.as_mut().unwrap().population = config.village_pop / 4 - 1;
        let before = graph.get(id).unwrap().total_population();
        town_growth(&mut graph, id, &config, 1, &mut log);
        let region = graph.get(id).unwrap();
        assert!(region.town.is_none(), "collapsed town should dissolve");
        assert!(region.markets.is_empty(), "dissolution discards markets");
        assert_eq!(region.total_population(), before);
        assert_eq!(log.events.len(), 1);
    }

    #[test]
    fn test_healthy_town_survives_growth() {
        let config = WorldConfig::default();
        let (mut graph, id) = town_region();
        let mut log = TurnLog::new();
        town_growth(&mut graph, id, &config, 1, &mut log);
        assert!(graph.get(id).unwrap().town.is_some());
    }

    #[test]
    fn test_dissolve_without_a_town_is_a_no_op() {
        let (mut graph, id) = town_region();
        let mut log = TurnLog::new();
        graph.get_mut(id).unwrap().town = None;
        assert!(!dissolve_town(&mut graph, id, 1, &mut log));
        assert!(log.events.is_empty());
    }

    #[test]
    fn test_no_seed_next_to_existing_town() {
        use rand::SeedableRng;
        let catalog = Catalog::standard();
        let config = WorldConfig::default();
        let (mut graph, id) = town_region();
        let plain = catalog.terrains.find_abbr("PLAI").unwrap();
        let level = graph.get(id).unwrap().level;
        let other = graph.add_region(Region::new(RegionId(0), 3, 3, level, plain));
        graph.get_mut(other).unwrap().race = catalog.races.find_abbr("PLAI");
        graph.link(other, Direction::Northwest, id);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(!try_seed_town(&mut graph, other, &catalog, &config, &mut rng));
        }
    }
}

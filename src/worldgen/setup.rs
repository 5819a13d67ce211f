//! Initial settlement: race, habitat, economy, and names for a fresh map

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{Catalog, TerrainKind};
use crate::core::config::WorldConfig;
use crate::core::types::LevelId;
use crate::economy::{market, town, wages};
use crate::world::graph::RegionGraph;
use crate::world::names;
use crate::world::region::{Gate, Production};

/// Populate every region of a level once terrain is final: dominant
/// race, carrying capacity, starting population and development,
/// products, gates, towns, markets, and initial wages.
pub fn settle_level(
    graph: &mut RegionGraph,
    level: LevelId,
    catalog: &Catalog,
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) {
    let ids = graph.level_ids(level);
    let height = graph.level(level).map(|a| a.height).unwrap_or(0);

    for &id in &ids {
        let Some(region) = graph.get(id) else { continue };
        let terrain_id = region.terrain;
        let y = region.y;
        let terrain = catalog.terrains.get(terrain_id).clone();

        let name = names::region_name(rng);
        let race = if terrain.races.is_empty() {
            None
        } else {
            catalog
                .races
                .find_abbr(terrain.races[rng.gen_range(0..terrain.races.len())])
        };

        let habitat = if terrain.habitat_max > terrain.habitat_min {
            rng.gen_range(terrain.habitat_min..=terrain.habitat_max)
        } else {
            terrain.habitat_min
        };
        let population = if race.is_some() {
            habitat * rng.gen_range(60..=90) / 100
        } else {
            0
        };
        let development = if population > 0 {
            population / 80 + rng.gen_range(0..10)
        } else {
            0
        };

        let mut products = Vec::new();
        for product in terrain.products {
            if rng.gen_range(0..100) >= product.chance {
                continue;
            }
            let Some(item) = catalog.items.find_abbr(product.item) else {
                continue;
            };
            let skill = product.skill.and_then(|s| catalog.skills.find_abbr(s));
            let baseamount = product.amount * rng.gen_range(75..=125) / 100;
            products.push(Production {
                item,
                skill,
                amount: baseamount,
                baseamount,
                productivity: 10,
                activity: 0,
            });
        }

        let gate = if terrain.kind == TerrainKind::Surface
            && race.is_some()
            && rng.gen_range(0..100) < config.gate_chance
        {
            graph.gate_count += 1;
            Some(Gate {
                id: graph.gate_count,
                month: rng.gen_range(0..12),
            })
        } else {
            None
        };

        let climate = roll_climate(&terrain.kind, y, height, rng);

        if let Some(region) = graph.get_mut(id) {
            region.name = name;
            region.race = race;
            region.habitat = habitat;
            region.population = population;
            region.basepopulation = population;
            region.development = development;
            region.wealth = population / 2;
            region.products = products;
            region.gate = gate;
            let (elevation, humidity, temperature, vegetation, culture) = climate;
            region.elevation = elevation;
            region.humidity = humidity;
            region.temperature = temperature;
            region.vegetation = vegetation;
            region.culture = culture;
        }
    }

    // towns need neighbors settled, so they seed in a second pass
    for &id in &ids {
        if town::try_seed_town(graph, id, catalog, config, rng) {
            market::setup_markets(graph, id, catalog, config, rng);
        }
    }

    // first wage figures so the world starts consistent
    for &id in &ids {
        wages::recompute_wages(graph, id, config);
        market::recompute_markets(graph, id);
    }
}

/// Climate scalars (0..100) rolled from terrain and latitude
fn roll_climate(
    kind: &TerrainKind,
    y: i32,
    height: i32,
    rng: &mut ChaCha8Rng,
) -> (i32, i32, i32, i32, i32) {
    let equator_distance = if height > 1 {
        // 0 at the equator, 100 at a pole
        ((2 * y - (height - 1)).abs() * 100 / (height - 1)).min(100)
    } else {
        0
    };
    let (elevation, humidity, vegetation) = match kind {
        TerrainKind::Ocean | TerrainKind::Lake => (0, 100, 0),
        TerrainKind::Surface => (rng.gen_range(10..60), rng.gen_range(20..90), rng.gen_range(20..90)),
        TerrainKind::Polar => (rng.gen_range(10..40), rng.gen_range(10..40), rng.gen_range(0..30)),
        TerrainKind::Underworld | TerrainKind::Underdeep => {
            (rng.gen_range(60..100), rng.gen_range(0..40), rng.gen_range(0..20))
        }
        TerrainKind::Nexus => (0, 0, 0),
    };
    let temperature = (100 - equator_distance) * rng.gen_range(60..100) / 100;
    let culture = rng.gen_range(0..100);
    (elevation, humidity, temperature, vegetation, culture)
}

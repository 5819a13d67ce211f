//! Land shaping: continents and archipelagos grown by random walk

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::WorldConfig;
use crate::core::types::{Direction, LevelId, RegionId};
use crate::world::graph::RegionGraph;
use crate::worldgen::CellState;

/// Grow land masses until the configured land fraction is reached.
/// Everything still unset afterwards defaults to ocean.
pub fn shape_land(
    graph: &RegionGraph,
    level: LevelId,
    cells: &mut [CellState],
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) {
    let ids = graph.level_ids(level);
    if ids.is_empty() {
        return;
    }
    let target = ids.len() as i64 * (100 - config.ocean_percent.min(100)) as i64 / 100;
    let mut land: i64 = 0;

    // attempts are bounded so a degenerate config cannot spin forever
    let mut attempts = ids.len() * 20;
    while land < target && attempts > 0 {
        attempts -= 1;
        let seed = ids[rng.gen_range(0..ids.len())];
        let grown = if rng.gen_range(0..100) < config.archipelago_ratio {
            grow_archipelago(graph, seed, cells, config, rng)
        } else {
            grow_continent(graph, seed, cells, config, rng)
        };
        land += grown as i64;
    }

    for id in &ids {
        if cells[id.index()] == CellState::Unset {
            cells[id.index()] = CellState::Ocean;
        }
    }
}

fn near_pole(graph: &RegionGraph, id: RegionId) -> bool {
    let Some(region) = graph.get(id) else {
        return true;
    };
    let Some(array) = graph.level(region.level) else {
        return true;
    };
    region.y < 2 || region.y >= array.height - 2
}

fn mark_land(cells: &mut [CellState], id: RegionId) -> u32 {
    if cells[id.index()] == CellState::Land {
        return 0;
    }
    cells[id.index()] = CellState::Land;
    1
}

/// A single land mass: a momentum-biased random walk whose length grows
/// with the square of a random size roll. Growth never enters the two
/// rows nearest a pole.
fn grow_continent(
    graph: &RegionGraph,
    seed: RegionId,
    cells: &mut [CellState],
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) -> u32 {
    if near_pole(graph, seed) {
        return 0;
    }
    let size = rng.gen_range(1..=config.continent_size.max(1));
    let steps = size * size;
    let mut grown = mark_land(cells, seed);
    let mut here = seed;
    let mut heading = Direction::ALL[rng.gen_range(0..6)];
    for _ in 0..steps {
        // momentum: half the time keep going the same way
        if rng.gen_range(0..2) == 0 {
            heading = Direction::ALL[rng.gen_range(0..6)];
        }
        let Some(next) = graph.neighbor(here, heading) else {
            heading = Direction::ALL[rng.gen_range(0..6)];
            continue;
        };
        if near_pole(graph, next) {
            heading = heading.opposite();
            continue;
        }
        here = next;
        grown += mark_land(cells, here);
    }
    grown
}

/// A chain of small islands, each a bounded walk, separated by two to
/// three hex jumps. Walks avoid doubling straight back along the chain
/// direction so the islands stay apart.
fn grow_archipelago(
    graph: &RegionGraph,
    seed: RegionId,
    cells: &mut [CellState],
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) -> u32 {
    if near_pole(graph, seed) {
        return 0;
    }
    let chain_dir = Direction::ALL[rng.gen_range(0..6)];
    let islands = rng.gen_range(2..=5u32);
    let island_size = (config.continent_size / 4).max(2);
    let mut grown = 0;
    let mut anchor = seed;

    for island in 0..islands {
        if island > 0 {
            // hop the gap to the next island site
            let jump = rng.gen_range(2..=3);
            let mut ok = true;
            for _ in 0..jump {
                match graph.neighbor(anchor, chain_dir) {
                    Some(next) if !near_pole(graph, next) => anchor = next,
                    _ => {
                        ok = false;
                        break;
                    }
                }
            }
            if !ok {
                break;
            }
        }
        grown += mark_land(cells, anchor);
        let mut here = anchor;
        let steps = rng.gen_range(1..=island_size);
        for _ in 0..steps {
            let dir = Direction::ALL[rng.gen_range(0..6)];
            if dir == chain_dir.opposite() {
                continue;
            }
            let Some(next) = graph.neighbor(here, dir) else {
                continue;
            };
            if near_pole(graph, next) {
                continue;
            }
            here = next;
            grown += mark_land(cells, here);
        }
    }
    grown
}

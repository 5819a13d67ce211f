//! Water cleanup: lake carving and land-bridge severance

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use ahash::AHashSet;

use crate::core::config::WorldConfig;
use crate::core::types::{Direction, LevelId, RegionId};
use crate::world::graph::RegionGraph;
use crate::worldgen::CellState;

/// Reclassify isolated ocean pockets into lakes or land, then sever
/// narrow land bridges. Severance removes graph edges, so adjacency may
/// be thinner than geometry from here on.
pub fn cleanup_water(
    graph: &mut RegionGraph,
    level: LevelId,
    cells: &mut [CellState],
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) {
    reclassify_pockets(graph, level, cells, config, rng);
    sever_bridges(graph, level, cells, config, rng);
}

/// Bounded flood fill of connected ocean. Returns the pocket when the
/// search bottoms out within the limit, None when it keeps going (open
/// sea).
fn bounded_pocket(
    graph: &RegionGraph,
    cells: &[CellState],
    start: RegionId,
    limit: usize,
) -> Option<Vec<RegionId>> {
    let mut seen = AHashSet::from([start]);
    let mut pocket = vec![start];
    let mut cursor = 0;
    while cursor < pocket.len() {
        let here = pocket[cursor];
        cursor += 1;
        for dir in Direction::ALL {
            let Some(next) = graph.neighbor(here, dir) else {
                continue;
            };
            if cells[next.index()] != CellState::Ocean || !seen.insert(next) {
                continue;
            }
            pocket.push(next);
            if pocket.len() > limit {
                return None;
            }
        }
    }
    Some(pocket)
}

/// Repeated passes until no pocket is left: every isolated patch of
/// remaining ocean becomes a lake or gets filled in as land.
fn reclassify_pockets(
    graph: &RegionGraph,
    level: LevelId,
    cells: &mut [CellState],
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) {
    let ids = graph.level_ids(level);
    let limit = config.sea_limit.max(1) as usize;
    loop {
        let mut changed = false;
        for &id in &ids {
            if cells[id.index()] != CellState::Ocean {
                continue;
            }
            let Some(pocket) = bounded_pocket(graph, cells, id, limit) else {
                continue;
            };
            let state = if rng.gen_range(0..100) < config.lake_percent {
                CellState::Lake
            } else {
                CellState::Land
            };
            for cell in pocket {
                cells[cell.index()] = state;
            }
            changed = true;
        }
        if !changed {
            break;
        }
    }
}

fn water_at(cells: &[CellState], id: RegionId) -> bool {
    matches!(cells[id.index()], CellState::Ocean | CellState::Lake)
}

/// A land cell whose every other link is water; the far end of a spit
fn fully_coastal(graph: &RegionGraph, cells: &[CellState], id: RegionId, except: RegionId) -> bool {
    if cells[id.index()] != CellState::Land {
        return false;
    }
    for dir in Direction::ALL {
        if let Some(next) = graph.neighbor(id, dir) {
            if next != except && !water_at(cells, next) {
                return false;
            }
        }
    }
    true
}

/// Cut peninsulas loose: land cells that are mostly surrounded by water
/// lose one land link with a config probability, doubled when the cell
/// on the other side is itself fully coastal.
fn sever_bridges(
    graph: &mut RegionGraph,
    level: LevelId,
    cells: &[CellState],
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) {
    let ids = graph.level_ids(level);
    for &id in &ids {
        if cells[id.index()] != CellState::Land {
            continue;
        }
        let mut water = 0;
        let mut land_links: Vec<Direction> = Vec::new();
        for dir in Direction::ALL {
            match graph.neighbor(id, dir) {
                Some(next) if water_at(cells, next) => water += 1,
                Some(next) if cells[next.index()] == CellState::Land => land_links.push(dir),
                _ => {}
            }
        }
        // a bridge: nearly ringed by water but still carrying traffic
        if water < 4 || land_links.is_empty() {
            continue;
        }
        let dir = land_links[rng.gen_range(0..land_links.len())];
        let Some(other) = graph.neighbor(id, dir) else {
            continue;
        };
        let mut chance = config.severance_rate;
        if fully_coastal(graph, cells, other, id) {
            chance *= 2;
        }
        if rng.gen_range(0..100) < chance {
            graph.unlink(id, dir);
        }
    }
}

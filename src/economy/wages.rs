//! Wage computation: the development staircase and the road bonus

use crate::core::config::WorldConfig;
use crate::core::types::{Direction, RegionId};
use crate::world::graph::RegionGraph;

/// Cumulative development cost of wage level L is 1 + 2 + ... + L, so
/// each level is one step harder to reach than the last. Returns
/// (level, leftover development, cost of the next level).
pub fn wage_level(development: i32) -> (i32, i32, i32) {
    let mut level = 0;
    let mut next = 1;
    let mut rem = development.max(0);
    while rem >= next {
        rem -= next;
        level += 1;
        next += 1;
    }
    (level, rem, next)
}

/// Wages in x10 fixed point: the level reached plus a linear fraction of
/// the progress toward the next level. Zero development pays zero.
pub fn wages_from_dev(development: i32) -> i32 {
    let (level, rem, next) = wage_level(development);
    level * 10 + rem * 10 / next
}

/// Development-equivalent input to the wage formula: accumulated
/// development, the road network bonus, and the two live spell
/// modifiers; a town multiplies the whole input by tier^2 + 1.
pub fn effective_development(graph: &RegionGraph, id: RegionId, config: &WorldConfig) -> i32 {
    let Some(region) = graph.get(id) else { return 0 };
    let mut input = region.development + road_bonus(graph, id, config);
    input += region.clearskies + region.earthlore;
    if let Some(town) = &region.town {
        input *= town.tier(region.development).dev_factor();
    }
    input.max(0)
}

/// Recompute wages and the high-water mark for one region
pub fn recompute_wages(graph: &mut RegionGraph, id: RegionId, config: &WorldConfig) {
    let input = effective_development(graph, id, config);
    let Some(region) = graph.get_mut(id) else { return };
    region.wages = wages_from_dev(input);
    region.maxwages = region.maxwages.max(region.wages);
}

/// Trace the road network out of a region and score the connections.
///
/// Each working road exit is followed up to `road_trace_depth` hops,
/// chaining through onward roads that do not double back. A hop scores
/// its remaining depth as weight, doubled into a town connection, plus
/// the weight again when it crosses into higher development. The total
/// is capped.
pub fn road_bonus(graph: &RegionGraph, id: RegionId, config: &WorldConfig) -> i32 {
    let Some(region) = graph.get(id) else { return 0 };
    let exits: Vec<Direction> = region
        .structures
        .iter()
        .filter_map(|s| s.is_working_road())
        .collect();
    if exits.is_empty() {
        return 0;
    }

    let depth_cap = config.road_trace_depth as i32;
    let mut score = 0;
    for exit in exits {
        let mut here = id;
        let mut dir = exit;
        for depth in 1..=depth_cap {
            let Some(next) = graph.neighbor(here, dir) else {
                break;
            };
            let weight = depth_cap - depth + 1;
            let Some(next_region) = graph.get(next) else {
                break;
            };
            score += weight;
            if next_region.town.is_some() {
                score += weight * 2;
            }
            if next_region.development > region.development {
                score += weight;
            }
            // chain onward through a road that does not point back
            let back = graph.complement(here, dir);
            let Some(onward) = next_region
                .structures
                .iter()
                .filter_map(|s| s.is_working_road())
                .find(|d| *d != back)
            else {
                break;
            };
            here = next;
            dir = onward;
        }
    }
    score.min(config.road_bonus_cap)
}

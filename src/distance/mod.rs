//! Distance queries over the region graph
//!
//! Rectangular worlds get a closed-form wrapped hex distance; spherical
//! and carved worlds fall back to a breadth-first expansion with an
//! explicit work queue and a distance budget.

use std::collections::VecDeque;

use ahash::AHashMap;

use crate::core::config::WorldConfig;
use crate::core::types::{Direction, LevelKind, RegionId};
use crate::world::graph::RegionGraph;

/// Sentinel for "cannot get there from here"
pub const DISTANCE_UNREACHABLE: i32 = 10_000_000;

fn level_reachable(graph: &RegionGraph, id: RegionId) -> bool {
    graph
        .get(id)
        .and_then(|r| graph.level(r.level))
        .map(|array| array.kind != LevelKind::Nexus)
        .unwrap_or(false)
}

/// Closed-form distance on a rectangular torus: the wrapped column delta
/// combined with the row delta (two rows per hex step north or south),
/// plus a penalty per vertical level crossed. Nexus regions are
/// unreachable for range-limited effects.
pub fn wrapped_distance(
    graph: &RegionGraph,
    from: RegionId,
    to: RegionId,
    config: &WorldConfig,
) -> i32 {
    if !level_reachable(graph, from) || !level_reachable(graph, to) {
        return DISTANCE_UNREACHABLE;
    }
    let (Some(a), Some(b)) = (graph.get(from), graph.get(to)) else {
        return DISTANCE_UNREACHABLE;
    };
    let Some(array) = graph.level(a.level) else {
        return DISTANCE_UNREACHABLE;
    };
    let width = array.width;

    let raw_dx = (a.x - b.x).abs();
    let dx = raw_dx.min(width - raw_dx);
    let dy = (a.y - b.y).abs();
    // a diagonal step covers one column and one row; going further
    // vertically costs one step per extra two rows
    let planar = if dy > dx { dx + (dy - dx) / 2 } else { dx };

    let levels = (a.level.0 as i32 - b.level.0 as i32).abs();
    planar + levels * config.level_penalty
}

/// Breadth-first distance through the live adjacency, stopping once the
/// budget is exceeded. Returns the sentinel when the target is out of
/// range, severed, or on an unreachable level.
pub fn graph_distance(graph: &RegionGraph, from: RegionId, to: RegionId, budget: i32) -> i32 {
    if !level_reachable(graph, from) || !level_reachable(graph, to) {
        return DISTANCE_UNREACHABLE;
    }
    if from == to {
        return 0;
    }
    let mut dist: AHashMap<RegionId, i32> = AHashMap::new();
    dist.insert(from, 0);
    let mut queue = VecDeque::from([from]);
    while let Some(id) = queue.pop_front() {
        let here = dist[&id];
        if here >= budget {
            continue;
        }
        for dir in Direction::ALL {
            let Some(next) = graph.neighbor(id, dir) else {
                continue;
            };
            if dist.contains_key(&next) {
                continue;
            }
            if next == to {
                return here + 1;
            }
            dist.insert(next, here + 1);
            queue.push_back(next);
        }
    }
    DISTANCE_UNREACHABLE
}

/// All regions within `budget` hops of a source, with their distances,
/// in discovery order.
pub fn regions_within(graph: &RegionGraph, from: RegionId, budget: i32) -> Vec<(RegionId, i32)> {
    let mut out = Vec::new();
    if !level_reachable(graph, from) {
        return out;
    }
    let mut dist: AHashMap<RegionId, i32> = AHashMap::new();
    dist.insert(from, 0);
    let mut queue = VecDeque::from([from]);
    while let Some(id) = queue.pop_front() {
        let here = dist[&id];
        if here >= budget {
            continue;
        }
        for dir in Direction::ALL {
            let Some(next) = graph.neighbor(id, dir) else {
                continue;
            };
            if dist.contains_key(&next) {
                continue;
            }
            dist.insert(next, here + 1);
            out.push((next, here + 1));
            queue.push_back(next);
        }
    }
    out
}

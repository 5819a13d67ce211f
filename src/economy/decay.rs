//! Structure decay: weather gnaws at everything that is not warded

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{Catalog, TerrainKind};
use crate::core::config::WorldConfig;
use crate::core::types::{RegionId, Turn};
use crate::turn::events::{RegionEvent, TurnLog};
use crate::world::graph::RegionGraph;

/// Monthly decay click budget for one region: a base roll, more in
/// harsh terrain, more again while the region is pillaged.
fn decay_budget(graph: &RegionGraph, id: RegionId, catalog: &Catalog, config: &WorldConfig) -> u32 {
    let Some(region) = graph.get(id) else { return 0 };
    let terrain = catalog.terrains.get(region.terrain);
    let harsh = matches!(
        terrain.kind,
        TerrainKind::Polar | TerrainKind::Underworld | TerrainKind::Underdeep
    ) || region.temperature < 30;
    let mut budget = config.decay_base;
    if harsh {
        budget += config.weather_decay_bonus;
    }
    if region.is_pillaged() {
        // deeper below the recovery floor, faster rot
        let severity = (region.pillage_floor - region.development).max(0);
        budget += config.pillage_decay_bonus * severity as u32 / region.pillage_floor.max(1) as u32;
    }
    budget
}

/// Roll decay clicks for every structure in a region. Immune structures
/// accumulate nothing regardless of inputs. Crossing from sound into
/// damaged emits an event.
pub fn decay_structures(
    graph: &mut RegionGraph,
    id: RegionId,
    catalog: &Catalog,
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
    turn: Turn,
    log: &mut TurnLog,
) {
    let budget = decay_budget(graph, id, catalog, config);
    let Some(region) = graph.get_mut(id) else { return };
    let mut crossed = Vec::new();
    for structure in &mut region.structures {
        if structure.kind.decay_immune() {
            continue;
        }
        let clicks = rng
            .gen_range(0..=budget)
            .min(structure.kind.max_monthly_decay() as u32) as i32;
        if clicks == 0 {
            continue;
        }
        let was = structure.incomplete;
        structure.incomplete =
            (structure.incomplete + clicks).min(structure.kind.max_total_incomplete());
        if was == 0 && structure.incomplete > 0 {
            crossed.push((structure.seq, structure.kind));
        }
    }
    for (seq, kind) in crossed {
        log.add_event(
            RegionEvent::StructureDecay {
                region: id,
                seq,
                kind,
            },
            turn,
        );
    }
}

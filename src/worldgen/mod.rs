//! World generation: topology, land shaping, terrain growth, settlement
//!
//! The pipeline runs once per level: wire the geometry, shape land and
//! ocean, carve lakes and sever bridges, grow terrain from anchors, then
//! settle races, economy, and towns. Everything is driven by a single
//! seeded RNG, so a (seed, geometry) pair always yields the same world.

pub mod growth;
pub mod land;
pub mod setup;
pub mod water;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::catalog::Catalog;
use crate::core::config::WorldConfig;
use crate::core::error::{EngineError, Result};
use crate::core::types::{LevelId, LevelKind};
use crate::world::graph::RegionGraph;
use crate::world::topology::{build_level, GeometryMode};

/// Per-cell scratch state used between land shaping and terrain growth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Unset,
    Land,
    Ocean,
    Lake,
}

/// Generate a complete world: the surface in the requested geometry, a
/// rectangular underworld at half size, and a one-region nexus.
pub fn generate(config: &WorldConfig, mode: GeometryMode, catalog: &Catalog) -> Result<RegionGraph> {
    config.validate().map_err(EngineError::InvalidConfig)?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut graph = RegionGraph::new();

    let ocean = catalog
        .terrains
        .find_abbr("OCEA")
        .ok_or_else(|| EngineError::InvalidConfig("catalog has no ocean terrain".into()))?;
    let nexus_terrain = catalog
        .terrains
        .find_abbr("NEXU")
        .ok_or_else(|| EngineError::InvalidConfig("catalog has no nexus terrain".into()))?;

    let (width, height) = mode.dimensions();
    info!(width, height, seed = config.seed, "generating surface");
    let surface = build_level(&mut graph, "surface", LevelKind::Surface, mode, ocean);
    run_pipeline(&mut graph, surface, catalog, config, &mut rng);

    let (uw, uh) = ((width / 2).max(4), (height / 2).max(4));
    info!(width = uw, height = uh, "generating underworld");
    let underworld = build_level(
        &mut graph,
        "underworld",
        LevelKind::Underworld,
        GeometryMode::Rectangular {
            width: uw,
            height: uh,
        },
        ocean,
    );
    run_pipeline(&mut graph, underworld, catalog, config, &mut rng);

    let nexus = graph.add_level("nexus".into(), LevelKind::Nexus, 2, 2);
    let mut origin = crate::world::region::Region::new(
        crate::core::types::RegionId(0),
        0,
        0,
        nexus,
        nexus_terrain,
    );
    origin.name = "The Nexus".into();
    graph.add_region(origin);

    info!(
        regions = graph.regions.len(),
        levels = graph.level_count(),
        gates = graph.gate_count,
        "world generated"
    );
    Ok(graph)
}

fn run_pipeline(
    graph: &mut RegionGraph,
    level: LevelId,
    catalog: &Catalog,
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) {
    let mut cells = vec![CellState::Unset; graph.regions.len()];
    land::shape_land(graph, level, &mut cells, config, rng);
    water::cleanup_water(graph, level, &mut cells, config, rng);
    growth::grow_terrain(graph, level, &cells, catalog, config, rng);
    setup::settle_level(graph, level, catalog, config, rng);
    info!(
        level = level.0,
        land = cells.iter().filter(|c| **c == CellState::Land).count(),
        "level pipeline complete"
    );
}

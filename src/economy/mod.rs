//! The per-region economic model: wages, markets, towns, decay

pub mod decay;
pub mod market;
pub mod town;
pub mod wages;

use crate::core::config::WorldConfig;
use crate::core::types::RegionId;
use crate::world::graph::RegionGraph;

/// Monthly refresh of extractable production: amounts reset from the
/// base scaled by productivity, and last month's activity counters
/// clear.
pub fn refresh_production(graph: &mut RegionGraph, id: RegionId) {
    let Some(region) = graph.get_mut(id) else { return };
    for product in &mut region.products {
        product.amount = (product.baseamount * product.productivity / 10).max(0);
        product.activity = 0;
    }
}

/// Monthly wealth update: the peasantry earns wages, spends upkeep, and
/// the remainder pools as taxable wealth. Never goes negative.
pub fn update_wealth(graph: &mut RegionGraph, id: RegionId, config: &WorldConfig) {
    let Some(region) = graph.get_mut(id) else { return };
    let earned = region.total_population() as i64 * region.wages_for_report() as i64;
    let spent = region.total_population() as i64 * config.maintenance_cost as i64;
    let surplus = ((earned - spent) / 10).clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    region.wealth = (region.wealth / 2 + surplus).max(0);
}

/// Slow development drift: a crowded, wealthy region improves by a
/// point a month.
pub fn drift_development(graph: &mut RegionGraph, id: RegionId) {
    let Some(region) = graph.get_mut(id) else { return };
    if region.habitat <= 0 {
        return;
    }
    let crowded = region.population >= region.habitat * 3 / 4;
    let wealthy = region.wealth >= region.population;
    if crowded && wealthy {
        region.development += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::core::types::{LevelKind, RegionId};
    use crate::world::region::{Production, Region};

    fn plain_region() -> (RegionGraph, RegionId) {
        let catalog = Catalog::standard();
        let plain = catalog.terrains.find_abbr("PLAI").unwrap();
        let mut graph = RegionGraph::new();
        let level = graph.add_level("surface".into(), LevelKind::Surface, 8, 8);
        let id = graph.add_region(Region::new(RegionId(0), 0, 0, level, plain));
        (graph, id)
    }

    #[test]
    fn test_production_refresh_scales_by_productivity() {
        let catalog = Catalog::standard();
        let grain = catalog.items.find_abbr("GRAI").unwrap();
        let (mut graph, id) = plain_region();
        graph.get_mut(id).unwrap().products.push(Production {
            item: grain,
            skill: None,
            amount: 0,
            baseamount: 80,
            productivity: 15,
            activity: 99,
        });
        refresh_production(&mut graph, id);
        let product = &graph.get(id).unwrap().products[0];
        assert_eq!(product.amount, 120);
        assert_eq!(product.activity, 0);
    }

    #[test]
    fn test_wealth_never_negative() {
        let config = WorldConfig::default();
        let (mut graph, id) = plain_region();
        let region = graph.get_mut(id).unwrap();
        region.population = 1000;
        region.wages = 0; // earns nothing, still pays upkeep
        region.wealth = 5;
        update_wealth(&mut graph, id, &config);
        assert_eq!(graph.get(id).unwrap().wealth, 0);
    }

    #[test]
    fn test_development_drift_needs_crowding_and_wealth() {
        let (mut graph, id) = plain_region();
        {
            let region = graph.get_mut(id).unwrap();
            region.habitat = 1000;
            region.population = 900;
            region.wealth = 100; // poor
        }
        drift_development(&mut graph, id);
        assert_eq!(graph.get(id).unwrap().development, 0);
        graph.get_mut(id).unwrap().wealth = 2000;
        drift_development(&mut graph, id);
        assert_eq!(graph.get(id).unwrap().development, 1);
    }
}

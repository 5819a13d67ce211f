//! Market setup and the per-turn amount recompute
//!
//! Which items a region lists depends on its terrain (can the raw
//! inputs be produced locally?) and its dominant race (does anyone here
//! use or make the thing?). Selection is weighted random with per-class
//! quotas; advanced and magic listings are gated behind low config
//! probabilities.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::catalog::{Catalog, ItemClass, ItemId};
use crate::core::config::WorldConfig;
use crate::core::types::{MarketSide, RegionId};
use crate::world::graph::RegionGraph;
use crate::world::region::Market;

/// Selection weight per item class; richer tiers are rarer listings
fn class_weight(class: ItemClass) -> u32 {
    match class {
        ItemClass::Raw => 4,
        ItemClass::Basic => 3,
        ItemClass::Tool => 2,
        ItemClass::Trade => 2,
        ItemClass::Advanced => 1,
        ItemClass::Magic => 1,
    }
}

/// Whether an item class passes its rarity gate this roll
fn class_gate(class: ItemClass, config: &WorldConfig, rng: &mut ChaCha8Rng) -> bool {
    match class {
        ItemClass::Advanced => rng.gen_range(0..100) < config.advanced_market_chance,
        ItemClass::Magic => rng.gen_range(0..100) < config.magic_market_chance,
        _ => true,
    }
}

/// Weighted draw without replacement
fn draw_weighted(pool: &mut Vec<(ItemId, u32)>, rng: &mut ChaCha8Rng) -> Option<ItemId> {
    let total: u32 = pool.iter().map(|(_, w)| w).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.gen_range(0..total);
    for idx in 0..pool.len() {
        let (item, weight) = pool[idx];
        if roll < weight {
            pool.remove(idx);
            return Some(item);
        }
        roll -= weight;
    }
    None
}

/// Create the market listings for a region that just gained a town.
/// Existing listings are replaced.
pub fn setup_markets(
    graph: &mut RegionGraph,
    id: RegionId,
    catalog: &Catalog,
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) {
    let Some(region) = graph.get(id) else { return };
    let Some(race_id) = region.race else { return };
    let race = catalog.races.get(race_id);
    let terrain = region.terrain;
    let population = region.total_population();

    let mut sell_pool: Vec<(ItemId, u32)> = Vec::new();
    let mut buy_pool: Vec<(ItemId, u32)> = Vec::new();
    for (item_id, item) in catalog.items.iter() {
        if item.disabled || !race.can_use(item.class) {
            continue;
        }
        if !class_gate(item.class, config, rng) {
            continue;
        }
        let local = catalog.locally_producible(terrain, item_id);
        let workable = item.skill.map_or(true, |s| race.can_work(s));
        let weight = class_weight(item.class);
        match item.class {
            // local produce is offered to the world; everything usable
            // but not craftable here is demanded from it
            ItemClass::Raw => {
                let produced_here = catalog
                    .terrains
                    .get(terrain)
                    .products
                    .iter()
                    .any(|p| p.item == item.abbr);
                if produced_here && workable {
                    sell_pool.push((item_id, weight));
                } else {
                    buy_pool.push((item_id, weight));
                }
            }
            ItemClass::Trade => buy_pool.push((item_id, weight)),
            _ => {
                if local && workable {
                    sell_pool.push((item_id, weight));
                } else {
                    buy_pool.push((item_id, weight));
                }
            }
        }
    }

    let economy = catalog.terrains.get(terrain).economy.max(1);
    let mut markets = Vec::new();
    for _ in 0..config.max_sell_markets {
        let Some(item_id) = draw_weighted(&mut sell_pool, rng) else {
            break;
        };
        markets.push(new_market(item_id, MarketSide::Sell, economy, catalog, config, rng));
    }
    for _ in 0..config.max_buy_markets {
        let Some(item_id) = draw_weighted(&mut buy_pool, rng) else {
            break;
        };
        markets.push(new_market(item_id, MarketSide::Buy, economy, catalog, config, rng));
    }

    for market in &mut markets {
        market.recompute(population);
    }
    if let Some(region) = graph.get_mut(id) {
        region.markets = markets;
    }
}

fn new_market(
    item: ItemId,
    side: MarketSide,
    economy: i32,
    catalog: &Catalog,
    config: &WorldConfig,
    rng: &mut ChaCha8Rng,
) -> Market {
    let def = catalog.items.get(item);
    // price wobbles around base by up to 20% either way
    let price = def.base_price * rng.gen_range(80..=120) / 100;
    let maxamt = (economy * 2 / class_weight(def.class).max(1) as i32).max(10);
    Market {
        item,
        side,
        price: price.max(1),
        baseprice: def.base_price,
        amount: 0,
        minpop: config.village_pop / 2,
        maxpop: config.city_pop,
        minamt: 5,
        maxamt,
    }
}

/// Per-turn amount recompute; returns the trade volume fed into the
/// town activity counter.
pub fn recompute_markets(graph: &mut RegionGraph, id: RegionId) -> i32 {
    let Some(region) = graph.get_mut(id) else {
        return 0;
    };
    let population = region.total_population();
    let mut volume = 0;
    for market in &mut region.markets {
        market.recompute(population);
        volume += market.amount;
    }
    volume / 10
}

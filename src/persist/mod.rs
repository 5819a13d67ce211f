//! The persisted record layout consumed by the save/load collaborator
//!
//! `RegionRecord` fields follow the documented order. The topology rides
//! in a trailing global block of six neighbor ids per region, -1 for an
//! absent slot, and must round-trip exactly.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::core::error::{EngineError, Result};
use crate::core::types::{Direction, LevelId, LevelKind, MarketSide, RegionId};
use crate::world::graph::RegionGraph;
use crate::world::region::{Gate, Market, Production, Region, Structure, StructureKind, Town};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub item: String,
    pub skill: Option<String>,
    pub amount: i32,
    pub baseamount: i32,
    pub productivity: i32,
    pub activity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRecord {
    pub item: String,
    pub side: MarketSide,
    pub price: i32,
    pub baseprice: i32,
    pub amount: i32,
    pub minpop: i32,
    pub maxpop: i32,
    pub minamt: i32,
    pub maxamt: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureRecord {
    pub kind: StructureKind,
    pub name: String,
    pub seq: u32,
    pub incomplete: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TownRecord {
    pub name: String,
    pub population: i32,
    pub habitat: i32,
    pub activity: i32,
}

/// One region in the documented field order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRecord {
    pub name: String,
    pub id: u32,
    pub terrain: String,
    pub building_seq: u32,
    pub gate_id: Option<u32>,
    pub gate_month: Option<u32>,
    pub race: Option<String>,
    pub population: i32,
    pub basepopulation: i32,
    pub wages: i32,
    pub maxwages: i32,
    pub wealth: i32,
    pub elevation: i32,
    pub humidity: i32,
    pub temperature: i32,
    pub vegetation: i32,
    pub culture: i32,
    pub habitat: i32,
    pub development: i32,
    pub town: Option<TownRecord>,
    pub x: i32,
    pub y: i32,
    pub z: u32,
    pub visited: bool,
    pub products: Vec<ProductionRecord>,
    pub markets: Vec<MarketRecord>,
    pub objects: Vec<StructureRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRecord {
    pub name: String,
    pub kind: LevelKind,
    pub width: i32,
    pub height: i32,
}

/// The whole world: levels, regions, and the trailing neighbor block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldRecord {
    pub levels: Vec<LevelRecord>,
    pub gate_count: u32,
    pub regions: Vec<RegionRecord>,
    /// Six ids per region in direction order, -1 = absent
    pub neighbors: Vec<[i64; 6]>,
}

impl WorldRecord {
    pub fn capture(graph: &RegionGraph, catalog: &Catalog) -> Self {
        let levels = graph
            .levels
            .iter()
            .map(|level| LevelRecord {
                name: level.name.clone(),
                kind: level.kind,
                width: level.width,
                height: level.height,
            })
            .collect();
        let regions = graph
            .regions
            .iter()
            .map(|region| capture_region(region, catalog))
            .collect();
        let neighbors = graph
            .regions
            .iter()
            .map(|region| {
                let mut slots = [-1i64; 6];
                for dir in Direction::ALL {
                    if let Some(id) = region.neighbor(dir) {
                        slots[dir.index()] = id.0 as i64;
                    }
                }
                slots
            })
            .collect();
        Self {
            levels,
            gate_count: graph.gate_count,
            regions,
            neighbors,
        }
    }

    /// Rebuild a graph from records. Unknown catalog keys and shape
    /// mismatches are loader errors, not silent skips.
    pub fn apply(&self, catalog: &Catalog) -> Result<RegionGraph> {
        if self.neighbors.len() != self.regions.len() {
            return Err(EngineError::MalformedRecord(format!(
                "{} regions but {} neighbor rows",
                self.regions.len(),
                self.neighbors.len()
            )));
        }
        let mut graph = RegionGraph::new();
        graph.gate_count = self.gate_count;
        for level in &self.levels {
            graph.add_level(level.name.clone(), level.kind, level.width, level.height);
        }

        for (index, record) in self.regions.iter().enumerate() {
            if record.id as usize != index {
                return Err(EngineError::MalformedRecord(format!(
                    "region id {} at position {}",
                    record.id, index
                )));
            }
            if record.z as usize >= self.levels.len() {
                return Err(EngineError::MalformedRecord(format!(
                    "region {} on unknown level {}",
                    record.id, record.z
                )));
            }
            let region = apply_region(record, catalog)?;
            graph.add_region(region);
        }

        for (index, slots) in self.neighbors.iter().enumerate() {
            let id = RegionId(index as u32);
            for dir in Direction::ALL {
                let raw = slots[dir.index()];
                if raw < 0 {
                    continue;
                }
                if raw as usize >= self.regions.len() {
                    return Err(EngineError::MalformedRecord(format!(
                        "region {} links to missing region {}",
                        index, raw
                    )));
                }
                graph.link(id, dir, RegionId(raw as u32));
            }
        }
        Ok(graph)
    }
}

fn capture_region(region: &Region, catalog: &Catalog) -> RegionRecord {
    RegionRecord {
        name: region.name.clone(),
        id: region.id.0,
        terrain: catalog.terrains.get(region.terrain).abbr.to_string(),
        building_seq: region.building_seq,
        gate_id: region.gate.map(|g| g.id),
        gate_month: region.gate.map(|g| g.month),
        race: region.race.map(|r| catalog.races.get(r).abbr.to_string()),
        population: region.population,
        basepopulation: region.basepopulation,
        wages: region.wages,
        maxwages: region.maxwages,
        wealth: region.wealth,
        elevation: region.elevation,
        humidity: region.humidity,
        temperature: region.temperature,
        vegetation: region.vegetation,
        culture: region.culture,
        habitat: region.habitat,
        development: region.development,
        town: region.town.as_ref().map(|t| TownRecord {
            name: t.name.clone(),
            population: t.population,
            habitat: t.habitat,
            activity: t.activity,
        }),
        x: region.x,
        y: region.y,
        z: region.level.0,
        visited: region.visited,
        products: region
            .products
            .iter()
            .map(|p| ProductionRecord {
                item: catalog.items.get(p.item).abbr.to_string(),
                skill: p.skill.map(|s| catalog.skills.get(s).abbr.to_string()),
                amount: p.amount,
                baseamount: p.baseamount,
                productivity: p.productivity,
                activity: p.activity,
            })
            .collect(),
        markets: region
            .markets
            .iter()
            .map(|m| MarketRecord {
                item: catalog.items.get(m.item).abbr.to_string(),
                side: m.side,
                price: m.price,
                baseprice: m.baseprice,
                amount: m.amount,
                minpop: m.minpop,
                maxpop: m.maxpop,
                minamt: m.minamt,
                maxamt: m.maxamt,
            })
            .collect(),
        objects: region
            .structures
            .iter()
            .map(|s| StructureRecord {
                kind: s.kind,
                name: s.name.clone(),
                seq: s.seq,
                incomplete: s.incomplete,
            })
            .collect(),
    }
}

fn apply_region(record: &RegionRecord, catalog: &Catalog) -> Result<Region> {
    let terrain = catalog
        .terrains
        .find_abbr(&record.terrain)
        .ok_or_else(|| EngineError::MalformedRecord(format!("unknown terrain {}", record.terrain)))?;
    let mut region = Region::new(
        RegionId(record.id),
        record.x,
        record.y,
        LevelId(record.z),
        terrain,
    );
    region.name = record.name.clone();
    region.building_seq = record.building_seq;
    region.gate = match (record.gate_id, record.gate_month) {
        (Some(id), Some(month)) => Some(Gate { id, month }),
        (None, None) => None,
        _ => {
            return Err(EngineError::MalformedRecord(format!(
                "region {} has a half-specified gate",
                record.id
            )))
        }
    };
    region.race = match &record.race {
        Some(abbr) => Some(catalog.races.find_abbr(abbr).ok_or_else(|| {
            EngineError::MalformedRecord(format!("unknown race {}", abbr))
        })?),
        None => None,
    };
    region.population = record.population;
    region.basepopulation = record.basepopulation;
    region.wages = record.wages;
    region.maxwages = record.maxwages;
    region.wealth = record.wealth;
    region.elevation = record.elevation;
    region.humidity = record.humidity;
    region.temperature = record.temperature;
    region.vegetation = record.vegetation;
    region.culture = record.culture;
    region.habitat = record.habitat;
    region.development = record.development;
    region.town = record.town.as_ref().map(|t| Town {
        name: t.name.clone(),
        population: t.population,
        habitat: t.habitat,
        activity: t.activity,
    });
    region.visited = record.visited;
    for p in &record.products {
        let item = catalog
            .items
            .find_abbr(&p.item)
            .ok_or_else(|| EngineError::MalformedRecord(format!("unknown item {}", p.item)))?;
        let skill = match &p.skill {
            Some(abbr) => Some(catalog.skills.find_abbr(abbr).ok_or_else(|| {
                EngineError::MalformedRecord(format!("unknown skill {}", abbr))
            })?),
            None => None,
        };
        region.products.push(Production {
            item,
            skill,
            amount: p.amount,
            baseamount: p.baseamount,
            productivity: p.productivity,
            activity: p.activity,
        });
    }
    for m in &record.markets {
        let item = catalog
            .items
            .find_abbr(&m.item)
            .ok_or_else(|| EngineError::MalformedRecord(format!("unknown item {}", m.item)))?;
        region.markets.push(Market {
            item,
            side: m.side,
            price: m.price,
            baseprice: m.baseprice,
            amount: m.amount,
            minpop: m.minpop,
            maxpop: m.maxpop,
            minamt: m.minamt,
            maxamt: m.maxamt,
        });
    }
    for s in &record.objects {
        region.structures.push(Structure {
            kind: s.kind,
            name: s.name.clone(),
            seq: s.seq,
            incomplete: s.incomplete,
        });
    }
    Ok(region)
}

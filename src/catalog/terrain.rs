//! Terrain definitions: the per-terrain static data every generator and
//! economy formula reads

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Validated index into the terrain table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerrainId(pub(crate) u16);

impl TerrainId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Broad class of a terrain, driving water handling and level placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    Ocean,
    Lake,
    Surface,
    /// Surface terrain allowed in the pole rows
    Polar,
    Underworld,
    Underdeep,
    Nexus,
}

impl TerrainKind {
    pub fn is_water(&self) -> bool {
        matches!(self, TerrainKind::Ocean | TerrainKind::Lake)
    }
}

/// One raw good a terrain can yield
#[derive(Debug, Clone)]
pub struct TerrainProduct {
    /// Item abbreviation; resolved against the item table at use sites
    pub item: &'static str,
    /// Monthly base amount
    pub amount: i32,
    /// Skill abbreviation required to extract it, if any
    pub skill: Option<&'static str>,
    /// Percent chance the product appears in a given region
    pub chance: u32,
}

/// Static definition of one terrain type
#[derive(Debug, Clone)]
pub struct TerrainDef {
    pub name: &'static str,
    pub abbr: &'static str,
    pub kind: TerrainKind,
    /// Relative economic weight; drives town seeding and market richness
    pub economy: i32,
    /// Carrying-capacity range rolled per region at generation
    pub habitat_min: i32,
    pub habitat_max: i32,
    /// Raw goods this terrain can yield
    pub products: &'static [TerrainProduct],
    /// Races native here, by abbreviation
    pub races: &'static [&'static str],
    /// Percent chance of a monster lair at generation
    pub lair_chance: u32,
    /// Movement cost for the distance/movement collaborators
    pub move_cost: i32,
    pub disabled: bool,
}

#[derive(Debug, Default)]
pub struct TerrainTable {
    defs: Vec<TerrainDef>,
    by_abbr: AHashMap<&'static str, TerrainId>,
    by_name: AHashMap<&'static str, TerrainId>,
}

impl TerrainTable {
    pub fn new(defs: Vec<TerrainDef>) -> Self {
        let mut by_abbr = AHashMap::with_capacity(defs.len());
        let mut by_name = AHashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            let id = TerrainId(i as u16);
            by_abbr.insert(def.abbr, id);
            by_name.insert(def.name, id);
        }
        Self {
            defs,
            by_abbr,
            by_name,
        }
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn get(&self, id: TerrainId) -> &TerrainDef {
        &self.defs[id.index()]
    }

    pub fn find_abbr(&self, abbr: &str) -> Option<TerrainId> {
        let id = *self.by_abbr.get(abbr)?;
        if self.defs[id.index()].disabled {
            return None;
        }
        Some(id)
    }

    pub fn find_name(&self, name: &str) -> Option<TerrainId> {
        let id = *self.by_name.get(name)?;
        if self.defs[id.index()].disabled {
            return None;
        }
        Some(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TerrainId, &TerrainDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, d)| (TerrainId(i as u16), d))
    }
}

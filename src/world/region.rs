//! Region state: the per-hex record everything else reads and writes

use serde::{Deserialize, Serialize};

use crate::catalog::{ItemId, RaceId, SkillId, TerrainId};
use crate::core::types::{Direction, LevelId, MarketSide, RegionId};

/// An inter-region teleportation point with a seasonal opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    pub id: u32,
    /// Month of the year (0..12) the gate opens
    pub month: u32,
}

/// Settlement tier, a pure function of population times development
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TownTier {
    Village,
    Town,
    City,
}

/// Fixed tier thresholds on population * development
const TOWN_SCORE: i64 = 50_000;
const CITY_SCORE: i64 = 250_000;

impl TownTier {
    pub fn of(population: i32, development: i32) -> TownTier {
        let score = population as i64 * development as i64;
        if score >= CITY_SCORE {
            TownTier::City
        } else if score >= TOWN_SCORE {
            TownTier::Town
        } else {
            TownTier::Village
        }
    }

    /// Wage multiplier factor: effective development input is scaled by
    /// tier squared plus one.
    pub fn dev_factor(&self) -> i32 {
        let t = match self {
            TownTier::Village => 1,
            TownTier::Town => 2,
            TownTier::City => 3,
        };
        t * t + 1
    }
}

/// A settlement inside a region. Owned exclusively by its region;
/// destroying it discards all markets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Town {
    pub name: String,
    pub population: i32,
    pub habitat: i32,
    /// Accumulated trade volume, drives the tier target population
    pub activity: i32,
}

impl Town {
    pub fn tier(&self, development: i32) -> TownTier {
        TownTier::of(self.population, development)
    }
}

/// A buy or sell listing with a population-driven amount ramp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub item: ItemId,
    pub side: MarketSide,
    pub price: i32,
    pub baseprice: i32,
    pub amount: i32,
    pub minpop: i32,
    pub maxpop: i32,
    pub minamt: i32,
    pub maxamt: i32,
}

impl Market {
    /// Re-derive the tradeable amount from current population. The ramp
    /// is linear between the population bounds and clamps outside them,
    /// so minamt <= amount <= maxamt for any population, including 0.
    pub fn recompute(&mut self, population: i32) {
        if self.maxpop <= self.minpop {
            self.amount = self.maxamt;
            return;
        }
        let span = (self.maxamt - self.minamt) as i64;
        let pop = population.clamp(self.minpop, self.maxpop) as i64;
        let frac_num = pop - self.minpop as i64;
        let frac_den = (self.maxpop - self.minpop) as i64;
        self.amount = self.minamt + (span * frac_num / frac_den) as i32;
    }
}

/// A resource the region can yield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Production {
    pub item: ItemId,
    pub skill: Option<SkillId>,
    pub amount: i32,
    pub baseamount: i32,
    /// Scalar applied by tools and season; 10 = baseline (x1.0)
    pub productivity: i32,
    /// Extraction volume accumulated this turn
    pub activity: i32,
}

/// Kinds of man-made structures a region can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureKind {
    /// A road segment leaving through one exit
    Road(Direction),
    Harbour,
    Keep,
    Tower,
    Temple,
    /// Magical shrines do not weather
    Shrine,
    Mine,
    Quarry,
}

impl StructureKind {
    pub fn decay_immune(&self) -> bool {
        matches!(self, StructureKind::Shrine)
    }

    /// Most clicks of damage one month of weather can add
    pub fn max_monthly_decay(&self) -> i32 {
        match self {
            StructureKind::Road(_) => 4,
            StructureKind::Harbour => 5,
            StructureKind::Keep => 2,
            StructureKind::Tower => 2,
            StructureKind::Temple => 3,
            StructureKind::Shrine => 0,
            StructureKind::Mine | StructureKind::Quarry => 6,
        }
    }

    /// Damage ceiling; at this point the structure is fully ruined
    pub fn max_total_incomplete(&self) -> i32 {
        match self {
            StructureKind::Road(_) => 30,
            StructureKind::Harbour => 40,
            StructureKind::Keep => 100,
            StructureKind::Tower => 60,
            StructureKind::Temple => 50,
            StructureKind::Shrine => 0,
            StructureKind::Mine | StructureKind::Quarry => 50,
        }
    }
}

/// A built object inside a region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    pub kind: StructureKind,
    pub name: String,
    /// Sequence number within the region, stable across saves
    pub seq: u32,
    /// Damage clicks; 0 = intact, positive = needs repair
    pub incomplete: i32,
}

impl Structure {
    /// A completed, undamaged road counts for the wage bonus trace
    pub fn is_working_road(&self) -> Option<Direction> {
        match self.kind {
            StructureKind::Road(dir) if self.incomplete <= 0 => Some(dir),
            _ => None,
        }
    }
}

/// One hex of the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub level: LevelId,
    pub terrain: TerrainId,
    pub race: Option<RaceId>,

    pub population: i32,
    pub basepopulation: i32,
    pub habitat: i32,
    pub development: i32,
    /// x10 fixed point; 52 means 5.2 silver
    pub wages: i32,
    /// High-water mark of wages, used by pillage recovery
    pub maxwages: i32,
    pub wealth: i32,

    pub gate: Option<Gate>,
    /// Slot per compass direction. Slots can be cleared after initial
    /// wiring (land-bridge severance), so adjacency is directed.
    pub neighbors: [Option<RegionId>; 6],

    pub products: Vec<Production>,
    pub markets: Vec<Market>,
    pub town: Option<Town>,
    pub structures: Vec<Structure>,
    /// Next structure sequence number
    pub building_seq: u32,

    // Climate scalars, rolled at generation and persisted for reports
    pub elevation: i32,
    pub humidity: i32,
    pub temperature: i32,
    pub vegetation: i32,
    pub culture: i32,

    pub visited: bool,

    /// Temporary spell modifiers, reset to zero at end of turn
    pub clearskies: i32,
    pub earthlore: i32,

    /// Development floor a pillaged region re-grows toward; 0 when sound
    pub pillage_floor: i32,

    /// Where this region sent migrants last turn (oscillation guard)
    pub last_migration: Option<RegionId>,
}

impl Region {
    pub fn new(id: RegionId, x: i32, y: i32, level: LevelId, terrain: TerrainId) -> Self {
        Self {
            id,
            name: String::new(),
            x,
            y,
            level,
            terrain,
            race: None,
            population: 0,
            basepopulation: 0,
            habitat: 0,
            development: 0,
            wages: 0,
            maxwages: 0,
            wealth: 0,
            gate: None,
            neighbors: [None; 6],
            products: Vec::new(),
            markets: Vec::new(),
            town: None,
            structures: Vec::new(),
            building_seq: 0,
            elevation: 0,
            humidity: 0,
            temperature: 0,
            vegetation: 0,
            culture: 0,
            visited: false,
            clearskies: 0,
            earthlore: 0,
            pillage_floor: 0,
            last_migration: None,
        }
    }

    pub fn neighbor(&self, dir: Direction) -> Option<RegionId> {
        self.neighbors[dir.index()]
    }

    pub fn set_neighbor(&mut self, dir: Direction, target: Option<RegionId>) {
        self.neighbors[dir.index()] = target;
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.iter().filter(|n| n.is_some()).count()
    }

    /// Region plus town population
    pub fn total_population(&self) -> i32 {
        self.population + self.town.as_ref().map_or(0, |t| t.population)
    }

    /// Wages in whole silver, as reports show them
    pub fn wages_for_report(&self) -> i32 {
        self.wages / 10
    }

    /// Monthly entertainment income available to performers
    pub fn entertainment(&self, fraction: i32) -> i32 {
        if fraction <= 0 {
            return 0;
        }
        (self.wealth / fraction).max(0)
    }

    /// Still recovering from a pillage; raises the decay budget
    pub fn is_pillaged(&self) -> bool {
        self.pillage_floor > 0
    }

    pub fn add_structure(&mut self, kind: StructureKind, name: String) -> u32 {
        let seq = self.building_seq;
        self.building_seq += 1;
        self.structures.push(Structure {
            kind,
            name,
            seq,
            incomplete: 0,
        });
        seq
    }
}

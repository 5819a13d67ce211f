//! The region graph: an arena of regions plus per-level grids
//!
//! Regions are never deleted during play, so a plain `Vec` arena indexed
//! by `RegionId` is safe; neighbor slots hold ids, not references.

use serde::{Deserialize, Serialize};

use crate::core::types::{Direction, LevelId, LevelKind, RegionId};
use crate::world::region::Region;

/// One vertical level: a dense toroidal grid of region back-references
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionArray {
    pub name: String,
    pub kind: LevelKind,
    pub width: i32,
    pub height: i32,
    cells: Vec<Option<RegionId>>,
}

impl RegionArray {
    pub fn new(name: String, kind: LevelKind, width: i32, height: i32) -> Self {
        Self {
            name,
            kind,
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    fn slot(&self, x: i32, y: i32) -> Option<usize> {
        let x = x.rem_euclid(self.width);
        if y < 0 || y >= self.height {
            return None;
        }
        Some((y * self.width + x) as usize)
    }

    /// Cell lookup; x wraps, y does not
    pub fn at(&self, x: i32, y: i32) -> Option<RegionId> {
        self.cells.get(self.slot(x, y)?).copied().flatten()
    }

    /// Cell lookup with both axes wrapped (diagonal moves near the poles)
    pub fn at_wrapped(&self, x: i32, y: i32) -> Option<RegionId> {
        let y = y.rem_euclid(self.height);
        self.at(x, y)
    }

    pub fn set(&mut self, x: i32, y: i32, id: RegionId) {
        if let Some(slot) = self.slot(x, y) {
            self.cells[slot] = Some(id);
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

/// The whole world map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionGraph {
    pub regions: Vec<Region>,
    pub levels: Vec<RegionArray>,
    pub gate_count: u32,
}

impl RegionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_level(&mut self, name: String, kind: LevelKind, width: i32, height: i32) -> LevelId {
        let id = LevelId(self.levels.len() as u32);
        self.levels.push(RegionArray::new(name, kind, width, height));
        id
    }

    pub fn add_region(&mut self, mut region: Region) -> RegionId {
        let id = RegionId(self.regions.len() as u32);
        region.id = id;
        let (x, y, level) = (region.x, region.y, region.level);
        self.regions.push(region);
        if let Some(array) = self.levels.get_mut(level.index()) {
            array.set(x, y, id);
        }
        id
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(id.index())
    }

    pub fn level(&self, id: LevelId) -> Option<&RegionArray> {
        self.levels.get(id.index())
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn at(&self, level: LevelId, x: i32, y: i32) -> Option<RegionId> {
        self.levels.get(level.index())?.at(x, y)
    }

    pub fn neighbor(&self, id: RegionId, dir: Direction) -> Option<RegionId> {
        self.get(id)?.neighbor(dir)
    }

    pub fn ids(&self) -> impl Iterator<Item = RegionId> {
        (0..self.regions.len() as u32).map(RegionId)
    }

    /// Ids of all regions on one level, in id order
    pub fn level_ids(&self, level: LevelId) -> Vec<RegionId> {
        self.regions
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.id)
            .collect()
    }

    /// The direction slot on `target` that points back at `from`, or the
    /// compass opposite when no explicit reciprocal exists (a severed
    /// bridge leaves one-sided links).
    pub fn complement(&self, from: RegionId, dir: Direction) -> Direction {
        if let Some(target) = self.neighbor(from, dir) {
            if let Some(region) = self.get(target) {
                for d in Direction::ALL {
                    if region.neighbor(d) == Some(from) {
                        return d;
                    }
                }
            }
        }
        dir.opposite()
    }

    /// Region plus town population summed over the whole graph
    pub fn total_population(&self) -> i64 {
        self.regions
            .iter()
            .map(|r| r.total_population() as i64)
            .sum()
    }

    pub fn link(&mut self, a: RegionId, dir: Direction, b: RegionId) {
        if let Some(region) = self.get_mut(a) {
            region.set_neighbor(dir, Some(b));
        }
    }

    /// Remove both ends of an edge (the severance pass)
    pub fn unlink(&mut self, a: RegionId, dir: Direction) {
        let Some(b) = self.neighbor(a, dir) else {
            return;
        };
        let back = self.complement(a, dir);
        if let Some(region) = self.get_mut(a) {
            region.set_neighbor(dir, None);
        }
        if let Some(region) = self.get_mut(b) {
            if region.neighbor(back) == Some(a) {
                region.set_neighbor(back, None);
            }
        }
    }
}

//! Race definitions: who lives where and what they can make

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::item::ItemClass;

/// Validated index into the race table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaceId(pub(crate) u16);

impl RaceId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct RaceDef {
    pub name: &'static str,
    pub abbr: &'static str,
    /// Item classes this race trades in at all
    pub usable_classes: &'static [ItemClass],
    /// Skills this race can work, by skill abbreviation
    pub skills: &'static [&'static str],
    pub disabled: bool,
}

impl RaceDef {
    pub fn can_use(&self, class: ItemClass) -> bool {
        self.usable_classes.contains(&class)
    }

    pub fn can_work(&self, skill_abbr: &str) -> bool {
        self.skills.contains(&skill_abbr)
    }
}

#[derive(Debug, Default)]
pub struct RaceTable {
    defs: Vec<RaceDef>,
    by_abbr: AHashMap<&'static str, RaceId>,
    by_name: AHashMap<&'static str, RaceId>,
}

impl RaceTable {
    pub fn new(defs: Vec<RaceDef>) -> Self {
        let mut by_abbr = AHashMap::with_capacity(defs.len());
        let mut by_name = AHashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            let id = RaceId(i as u16);
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

    pub fn get(&self, id: RaceId) -> &RaceDef {
        &self.defs[id.index()]
    }

    pub fn find_abbr(&self, abbr: &str) -> Option<RaceId> {
        let id = *self.by_abbr.get(abbr)?;
        if self.defs[id.index()].disabled {
            return None;
        }
        Some(id)
    }

    pub fn find_name(&self, name: &str) -> Option<RaceId> {
        let id = *self.by_name.get(name)?;
        if self.defs[id.index()].disabled {
            return None;
        }
        Some(id)
    }
}

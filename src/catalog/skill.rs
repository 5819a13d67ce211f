//! Skill definitions

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Validated index into the skill table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillId(pub(crate) u16);

impl SkillId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct SkillDef {
    pub name: &'static str,
    pub abbr: &'static str,
    /// Magical skills gate magic-item production
    pub magical: bool,
    pub disabled: bool,
}

#[derive(Debug, Default)]
pub struct SkillTable {
    defs: Vec<SkillDef>,
    by_abbr: AHashMap<&'static str, SkillId>,
    by_name: AHashMap<&'static str, SkillId>,
}

impl SkillTable {
    pub fn new(defs: Vec<SkillDef>) -> Self {
        let mut by_abbr = AHashMap::with_capacity(defs.len());
        let mut by_name = AHashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            let id = SkillId(i as u16);
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

    pub fn get(&self, id: SkillId) -> &SkillDef {
        &self.defs[id.index()]
    }

    pub fn find_abbr(&self, abbr: &str) -> Option<SkillId> {
        let id = *self.by_abbr.get(abbr)?;
        if self.defs[id.index()].disabled {
            return None;
        }
        Some(id)
    }

    pub fn find_name(&self, name: &str) -> Option<SkillId> {
        let id = *self.by_name.get(name)?;
        if self.defs[id.index()].disabled {
            return None;
        }
        Some(id)
    }
}

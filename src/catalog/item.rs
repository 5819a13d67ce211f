//! Item definitions: tradeable and producible goods

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Validated index into the item table. Only the owning table hands
/// these out, so holding one proves the item exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub(crate) u16);

impl ItemId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Market tier of an item, driving eligibility and listing quotas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemClass {
    Raw,
    Basic,
    Tool,
    Advanced,
    Magic,
    Trade,
}

/// Static definition of one item type
#[derive(Debug, Clone)]
pub struct ItemDef {
    pub name: &'static str,
    pub abbr: &'static str,
    pub class: ItemClass,
    /// Base market price in silver
    pub base_price: i32,
    /// Raw inputs needed to craft this item, by item abbreviation.
    /// Empty for raw and trade goods.
    pub inputs: &'static [&'static str],
    /// Skill needed to produce this item, by skill abbreviation
    pub skill: Option<&'static str>,
    pub disabled: bool,
}

/// The item table with O(1) lookup by abbreviation or name
#[derive(Debug, Default)]
pub struct ItemTable {
    defs: Vec<ItemDef>,
    by_abbr: AHashMap<&'static str, ItemId>,
    by_name: AHashMap<&'static str, ItemId>,
}

impl ItemTable {
    pub fn new(defs: Vec<ItemDef>) -> Self {
        let mut by_abbr = AHashMap::with_capacity(defs.len());
        let mut by_name = AHashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            let id = ItemId(i as u16);
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

    pub fn get(&self, id: ItemId) -> &ItemDef {
        &self.defs[id.index()]
    }

    /// Lookup by abbreviation; disabled entries are misses.
    pub fn find_abbr(&self, abbr: &str) -> Option<ItemId> {
        let id = *self.by_abbr.get(abbr)?;
        if self.defs[id.index()].disabled {
            return None;
        }
        Some(id)
    }

    pub fn find_name(&self, name: &str) -> Option<ItemId> {
        let id = *self.by_name.get(name)?;
        if self.defs[id.index()].disabled {
            return None;
        }
        Some(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &ItemDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, d)| (ItemId(i as u16), d))
    }

    /// All enabled items of a class
    pub fn of_class(&self, class: ItemClass) -> Vec<ItemId> {
        self.iter()
            .filter(|(_, d)| d.class == class && !d.disabled)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_table() -> ItemTable {
        ItemTable::new(vec![
            ItemDef {
                name: "wood",
                abbr: "WOOD",
                class: ItemClass::Raw,
                base_price: 30,
                inputs: &[],
                skill: Some("LUMB"),
                disabled: false,
            },
            ItemDef {
                name: "cursed blade",
                abbr: "CRSB",
                class: ItemClass::Magic,
                base_price: 900,
                inputs: &["IRON"],
                skill: Some("MAGI"),
                disabled: true,
            },
        ])
    }

    #[test]
    fn test_lookup_hits_and_misses() {
        let table = tiny_table();
        assert!(table.find_abbr("WOOD").is_some());
        assert!(table.find_name("wood").is_some());
        assert_eq!(table.find_abbr("GOLD"), None);
    }

    #[test]
    fn test_disabled_items_are_misses() {
        let table = tiny_table();
        assert_eq!(table.find_abbr("CRSB"), None);
        assert_eq!(table.find_name("cursed blade"), None);
    }
}

//! Static catalogs: terrain, item, race, and skill tables
//!
//! Consumed read-only by generation and the economy. Lookups by name or
//! abbreviation are O(1); a miss (unknown key or disabled entry) returns
//! `None` and callers treat it as "skip this candidate".

pub mod item;
pub mod race;
pub mod skill;
pub mod terrain;

pub use item::{ItemClass, ItemDef, ItemId, ItemTable};
pub use race::{RaceDef, RaceId, RaceTable};
pub use skill::{SkillDef, SkillId, SkillTable};
pub use terrain::{TerrainDef, TerrainId, TerrainKind, TerrainProduct, TerrainTable};

/// The full catalog set handed to the generator and the turn engine
#[derive(Debug, Default)]
pub struct Catalog {
    pub terrains: TerrainTable,
    pub items: ItemTable,
    pub races: RaceTable,
    pub skills: SkillTable,
}

impl Catalog {
    /// Whether the terrain can yield every raw input of an item locally.
    /// Items without inputs (raw goods, trade goods) count as local.
    pub fn locally_producible(&self, terrain: TerrainId, item: ItemId) -> bool {
        let def = self.items.get(item);
        def.inputs.iter().all(|input| {
            self.terrains
                .get(terrain)
                .products
                .iter()
                .any(|p| p.item == *input)
        })
    }

    /// The builtin ruleset
    pub fn standard() -> Self {
        Self {
            terrains: TerrainTable::new(standard_terrains()),
            items: ItemTable::new(standard_items()),
            races: RaceTable::new(standard_races()),
            skills: SkillTable::new(standard_skills()),
        }
    }
}

fn standard_skills() -> Vec<SkillDef> {
    fn s(name: &'static str, abbr: &'static str, magical: bool) -> SkillDef {
        SkillDef {
            name,
            abbr,
            magical,
            disabled: false,
        }
    }
    vec![
        s("mining", "MINI", false),
        s("lumberjack", "LUMB", false),
        s("quarrying", "QUAR", false),
        s("hunting", "HUNT", false),
        s("fishing", "FISH", false),
        s("farming", "FARM", false),
        s("ranching", "RANC", false),
        s("horse training", "HORS", false),
        s("herb lore", "HERB", false),
        s("weaponsmith", "WEAP", false),
        s("armorer", "ARMO", false),
        s("carpenter", "CARP", false),
        s("entertainment", "ENTE", false),
        s("magery", "MAGI", true),
    ]
}

fn standard_items() -> Vec<ItemDef> {
    use ItemClass::*;
    fn i(
        name: &'static str,
        abbr: &'static str,
        class: ItemClass,
        base_price: i32,
        inputs: &'static [&'static str],
        skill: Option<&'static str>,
    ) -> ItemDef {
        ItemDef {
            name,
            abbr,
            class,
            base_price,
            inputs,
            skill,
            disabled: false,
        }
    }
    vec![
        // Raw goods
        i("wood", "WOOD", Raw, 30, &[], Some("LUMB")),
        i("iron", "IRON", Raw, 40, &[], Some("MINI")),
        i("stone", "STON", Raw, 30, &[], Some("QUAR")),
        i("fur", "FUR", Raw, 25, &[], Some("HUNT")),
        i("fish", "FSH", Raw, 20, &[], Some("FISH")),
        i("grain", "GRAI", Raw, 15, &[], Some("FARM")),
        i("livestock", "LIVE", Raw, 25, &[], Some("RANC")),
        i("horse", "HORS", Raw, 60, &[], Some("HORS")),
        i("herbs", "HERB", Raw, 35, &[], Some("HERB")),
        i("mithril", "MITH", Raw, 200, &[], Some("MINI")),
        // Basic gear
        i("sword", "SWOR", Basic, 100, &["IRON"], Some("WEAP")),
        i("crossbow", "XBOW", Basic, 90, &["WOOD"], Some("WEAP")),
        i("longbow", "LBOW", Basic, 90, &["WOOD"], Some("WEAP")),
        i("chain armor", "CARM", Basic, 120, &["IRON"], Some("ARMO")),
        i("leather armor", "LARM", Basic, 70, &["FUR"], Some("ARMO")),
        i("wagon", "WAGN", Basic, 150, &["WOOD"], Some("CARP")),
        // Tools
        i("pick", "PICK", Tool, 60, &["IRON"], Some("WEAP")),
        i("axe", "AXE", Tool, 50, &["IRON", "WOOD"], Some("WEAP")),
        i("hammer", "HAMM", Tool, 50, &["IRON"], Some("WEAP")),
        i("net", "NET", Tool, 40, &["WOOD"], Some("CARP")),
        // Advanced gear
        i("plate armor", "PARM", Advanced, 400, &["IRON"], Some("ARMO")),
        i("mithril sword", "MSWO", Advanced, 600, &["MITH"], Some("WEAP")),
        i("mithril armor", "MARM", Advanced, 800, &["MITH"], Some("ARMO")),
        // Magic
        i("healing potion", "HPOT", Magic, 300, &["HERB"], Some("MAGI")),
        i("amulet of protection", "AMPR", Magic, 500, &["STON"], Some("MAGI")),
        i("runesword", "RUNE", Magic, 900, &["IRON"], Some("MAGI")),
        // Trade goods: produced nowhere, moved for profit
        i("ivory", "IVOR", Trade, 80, &[], None),
        i("pearl", "PEAR", Trade, 110, &[], None),
        i("jewelry", "JEWE", Trade, 130, &[], None),
        i("figurines", "FIGU", Trade, 70, &[], None),
        i("caviar", "CAVI", Trade, 120, &[], None),
        i("wine", "WINE", Trade, 90, &[], None),
        i("silk", "SILK", Trade, 100, &[], None),
        i("spices", "SPIC", Trade, 140, &[], None),
        i("velvet", "VELV", Trade, 100, &[], None),
        i("roses", "ROSE", Trade, 60, &[], None),
    ]
}

fn standard_races() -> Vec<RaceDef> {
    use ItemClass::*;
    const COMMON: &[ItemClass] = &[Raw, Basic, Tool, Trade];
    const CRAFTY: &[ItemClass] = &[Raw, Basic, Tool, Advanced, Trade];
    const ARCANE: &[ItemClass] = &[Raw, Basic, Tool, Advanced, Magic, Trade];
    fn r(
        name: &'static str,
        abbr: &'static str,
        usable_classes: &'static [ItemClass],
        skills: &'static [&'static str],
    ) -> RaceDef {
        RaceDef {
            name,
            abbr,
            usable_classes,
            skills,
            disabled: false,
        }
    }
    vec![
        r(
            "viking",
            "VIKI",
            COMMON,
            &["LUMB", "FISH", "HUNT", "WEAP", "CARP", "ENTE"],
        ),
        r(
            "barbarian",
            "BARB",
            COMMON,
            &["HUNT", "RANC", "MINI", "WEAP", "ENTE"],
        ),
        r(
            "plainsman",
            "PLAI",
            COMMON,
            &["FARM", "RANC", "HORS", "CARP", "ENTE"],
        ),
        r("eskimo", "ESKI", COMMON, &["HUNT", "FISH", "ARMO", "ENTE"]),
        r(
            "nomad",
            "NOMA",
            COMMON,
            &["RANC", "HORS", "HUNT", "WEAP", "ENTE"],
        ),
        r(
            "tribesman",
            "TRIB",
            COMMON,
            &["HUNT", "HERB", "FARM", "ENTE"],
        ),
        r(
            "darkman",
            "DMAN",
            CRAFTY,
            &["MINI", "QUAR", "WEAP", "ARMO", "ENTE"],
        ),
        r(
            "high elf",
            "HELF",
            ARCANE,
            &["LUMB", "HERB", "HORS", "WEAP", "MAGI", "ENTE"],
        ),
    ]
}

fn standard_terrains() -> Vec<TerrainDef> {
    use TerrainKind::*;
    const fn p(
        item: &'static str,
        amount: i32,
        skill: Option<&'static str>,
        chance: u32,
    ) -> TerrainProduct {
        TerrainProduct {
            item,
            amount,
            skill,
            chance,
        }
    }
    #[allow(clippy::too_many_arguments)]
    fn t(
        name: &'static str,
        abbr: &'static str,
        kind: TerrainKind,
        economy: i32,
        habitat: (i32, i32),
        products: &'static [TerrainProduct],
        races: &'static [&'static str],
        lair_chance: u32,
        move_cost: i32,
    ) -> TerrainDef {
        TerrainDef {
            name,
            abbr,
            kind,
            economy,
            habitat_min: habitat.0,
            habitat_max: habitat.1,
            products,
            races,
            lair_chance,
            move_cost,
            disabled: false,
        }
    }
    // named consts so the slices really are 'static
    const OCEAN_GOODS: &[TerrainProduct] = &[p("FSH", 60, Some("FISH"), 100)];
    const LAKE_GOODS: &[TerrainProduct] = &[p("FSH", 40, Some("FISH"), 100)];
    const PLAIN_GOODS: &[TerrainProduct] = &[
        p("GRAI", 80, Some("FARM"), 100),
        p("LIVE", 60, Some("RANC"), 60),
        p("HORS", 20, Some("HORS"), 40),
    ];
    const FOREST_GOODS: &[TerrainProduct] = &[
        p("WOOD", 80, Some("LUMB"), 100),
        p("FUR", 30, Some("HUNT"), 60),
        p("HERB", 20, Some("HERB"), 30),
    ];
    const MOUNTAIN_GOODS: &[TerrainProduct] = &[
        p("IRON", 60, Some("MINI"), 100),
        p("STON", 60, Some("QUAR"), 100),
        p("MITH", 5, Some("MINI"), 10),
    ];
    const SWAMP_GOODS: &[TerrainProduct] = &[
        p("WOOD", 20, Some("LUMB"), 60),
        p("HERB", 30, Some("HERB"), 60),
    ];
    const JUNGLE_GOODS: &[TerrainProduct] = &[
        p("WOOD", 40, Some("LUMB"), 100),
        p("HERB", 40, Some("HERB"), 60),
    ];
    const DESERT_GOODS: &[TerrainProduct] = &[
        p("STON", 30, Some("QUAR"), 60),
        p("HORS", 10, Some("HORS"), 30),
    ];
    const TUNDRA_GOODS: &[TerrainProduct] = &[
        p("FUR", 40, Some("HUNT"), 100),
        p("HERB", 10, Some("HERB"), 20),
    ];
    const CAVERN_GOODS: &[TerrainProduct] = &[
        p("IRON", 40, Some("MINI"), 100),
        p("STON", 40, Some("QUAR"), 100),
    ];
    const UNDERFOREST_GOODS: &[TerrainProduct] = &[
        p("WOOD", 30, Some("LUMB"), 80),
        p("HERB", 20, Some("HERB"), 40),
    ];
    const TUNNEL_GOODS: &[TerrainProduct] = &[
        p("IRON", 40, Some("MINI"), 80),
        p("MITH", 10, Some("MINI"), 20),
    ];
    const CHASM_GOODS: &[TerrainProduct] = &[p("STON", 20, Some("QUAR"), 60)];
    vec![
        t("ocean", "OCEA", Ocean, 0, (0, 0), OCEAN_GOODS, &[], 1, 1),
        t("lake", "LAKE", Lake, 0, (0, 0), LAKE_GOODS, &[], 1, 1),
        t(
            "plain",
            "PLAI",
            Surface,
            60,
            (2000, 6000),
            PLAIN_GOODS,
            &["PLAI", "NOMA", "HELF"],
            5,
            1,
        ),
        t(
            "forest",
            "FORE",
            Surface,
            40,
            (1000, 4000),
            FOREST_GOODS,
            &["VIKI", "TRIB", "HELF"],
            8,
            2,
        ),
        t(
            "mountain",
            "MOUN",
            Surface,
            20,
            (400, 2000),
            MOUNTAIN_GOODS,
            &["BARB", "DMAN"],
            12,
            2,
        ),
        t(
            "swamp",
            "SWAM",
            Surface,
            10,
            (300, 1600),
            SWAMP_GOODS,
            &["TRIB"],
            10,
            2,
        ),
        t(
            "jungle",
            "JUNG",
            Surface,
            15,
            (600, 2400),
            JUNGLE_GOODS,
            &["TRIB", "HELF"],
            10,
            2,
        ),
        t(
            "desert",
            "DESE",
            Surface,
            10,
            (200, 1200),
            DESERT_GOODS,
            &["NOMA"],
            8,
            1,
        ),
        t(
            "tundra",
            "TUND",
            Polar,
            5,
            (100, 800),
            TUNDRA_GOODS,
            &["ESKI"],
            6,
            2,
        ),
        t(
            "cavern",
            "CAVE",
            Underworld,
            15,
            (200, 1200),
            CAVERN_GOODS,
            &["DMAN"],
            15,
            2,
        ),
        t(
            "underforest",
            "UFOR",
            Underworld,
            10,
            (200, 1000),
            UNDERFOREST_GOODS,
            &["DMAN", "TRIB"],
            15,
            2,
        ),
        t(
            "tunnels",
            "TUNN",
            Underdeep,
            5,
            (0, 600),
            TUNNEL_GOODS,
            &["DMAN"],
            20,
            2,
        ),
        t(
            "chasm",
            "CHAS",
            Underdeep,
            0,
            (0, 300),
            CHASM_GOODS,
            &["DMAN"],
            25,
            3,
        ),
        t("nexus", "NEXU", Nexus, 0, (0, 0), &[], &[], 0, 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_cross_references_resolve() {
        let catalog = Catalog::standard();
        // Every terrain product names a real item and (if set) a real skill.
        for (_, terrain) in catalog.terrains.iter() {
            if terrain.abbr != "NEXU" {
                assert!(
                    !terrain.products.is_empty(),
                    "terrain {} has no products",
                    terrain.name
                );
            }
            for product in terrain.products {
                assert!(
                    catalog.items.find_abbr(product.item).is_some(),
                    "terrain {} product {} unresolved",
                    terrain.name,
                    product.item
                );
                if let Some(skill) = product.skill {
                    assert!(
                        catalog.skills.find_abbr(skill).is_some(),
                        "terrain {} skill {} unresolved",
                        terrain.name,
                        skill
                    );
                }
            }
            for race in terrain.races {
                assert!(
                    catalog.races.find_abbr(race).is_some(),
                    "terrain {} race {} unresolved",
                    terrain.name,
                    race
                );
            }
        }
        // Every item input and skill resolves too.
        for (_, item) in catalog.items.iter() {
            for input in item.inputs {
                assert!(
                    catalog.items.find_abbr(input).is_some(),
                    "item {} input {} unresolved",
                    item.name,
                    input
                );
            }
            if let Some(skill) = item.skill {
                assert!(catalog.skills.find_abbr(skill).is_some());
            }
        }
    }

    #[test]
    fn test_locally_producible() {
        let catalog = Catalog::standard();
        let mountain = catalog.terrains.find_abbr("MOUN").unwrap();
        let plain = catalog.terrains.find_abbr("PLAI").unwrap();
        let sword = catalog.items.find_abbr("SWOR").unwrap();
        let grain = catalog.items.find_abbr("GRAI").unwrap();
        // Swords need iron: mountains have it, plains do not.
        assert!(catalog.locally_producible(mountain, sword));
        assert!(!catalog.locally_producible(plain, sword));
        // Raw goods have no inputs, so they are local anywhere.
        assert!(catalog.locally_producible(mountain, grain));
    }

    #[test]
    fn test_class_listing_excludes_other_classes() {
        let catalog = Catalog::standard();
        let raws = catalog.items.of_class(ItemClass::Raw);
        assert!(!raws.is_empty());
        for id in raws {
            assert_eq!(catalog.items.get(id).class, ItemClass::Raw);
        }
    }
}
